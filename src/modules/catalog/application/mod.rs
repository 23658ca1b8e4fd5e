pub mod service;

pub use service::{CatalogOutcome, CatalogService};
