pub mod decorators;

pub use decorators::{CachingCatalogDecorator, CatalogCacheStats};
