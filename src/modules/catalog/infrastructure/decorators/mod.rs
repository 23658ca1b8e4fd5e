pub mod caching_catalog_decorator;

pub use caching_catalog_decorator::{CachingCatalogDecorator, CatalogCacheStats};
