pub mod service;

pub use service::{AddOutcome, ReorderOutcome, WatchlistService};
