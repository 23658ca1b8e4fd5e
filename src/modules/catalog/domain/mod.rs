pub mod entities;
pub mod repositories;

pub use entities::{CatalogDetail, CatalogSummary};
pub use repositories::CatalogRepository;
