pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

pub use application::{CatalogOutcome, CatalogService};
pub use domain::{CatalogDetail, CatalogRepository, CatalogSummary};
pub use infrastructure::{CachingCatalogDecorator, CatalogCacheStats};
