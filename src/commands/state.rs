use std::sync::{Arc, Mutex};

use crate::modules::{
    catalog::{CachingCatalogDecorator, CatalogRepository, CatalogService},
    navigation::NavigationHistory,
    reviews::{InMemoryReviewRepository, JsonReviewRepository, ReviewService},
    watchlist::{InMemoryWatchlistRepository, JsonWatchlistRepository, WatchlistService},
};
use crate::shared::config::AppConfig;

/// Everything the command handlers operate on.
pub struct AppState {
    pub watchlist: Arc<WatchlistService>,
    pub reviews: Arc<ReviewService>,
    pub catalog: Option<Arc<CatalogService>>,
    pub navigation: Mutex<NavigationHistory>,
}

impl AppState {
    pub fn new(watchlist: Arc<WatchlistService>, reviews: Arc<ReviewService>) -> Self {
        Self {
            watchlist,
            reviews,
            catalog: None,
            navigation: Mutex::new(NavigationHistory::default()),
        }
    }

    /// File-backed stores under the configured data directory.
    pub fn from_config(config: &AppConfig) -> Self {
        let watchlist = WatchlistService::with_reorder_policy(
            Arc::new(JsonWatchlistRepository::new(config.watchlist_path())),
            config.reorder_policy,
        );
        let reviews = ReviewService::new(Arc::new(JsonReviewRepository::new(config.reviews_path())));
        Self::new(Arc::new(watchlist), Arc::new(reviews))
    }

    /// Stores that live only as long as the process.
    pub fn in_memory(config: &AppConfig) -> Self {
        let watchlist = WatchlistService::with_reorder_policy(
            Arc::new(InMemoryWatchlistRepository::new()),
            config.reorder_policy,
        );
        let reviews = ReviewService::new(Arc::new(InMemoryReviewRepository::new()));
        Self::new(Arc::new(watchlist), Arc::new(reviews))
    }

    /// Attaches a catalog client, cached for the configured TTL.
    pub fn with_catalog(mut self, catalog: Arc<dyn CatalogRepository>, config: &AppConfig) -> Self {
        let cached = CachingCatalogDecorator::new(catalog, config.catalog_cache_ttl);
        self.catalog = Some(Arc::new(CatalogService::new(Arc::new(cached))));
        self
    }
}
