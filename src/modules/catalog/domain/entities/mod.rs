pub mod catalog_title;

pub use catalog_title::{CatalogDetail, CatalogSummary};
