/// Test helper functions and service builders
use shiori_lib::commands::AppState;
use shiori_lib::modules::{
    reviews::{JsonReviewRepository, ReviewService},
    watchlist::{JsonWatchlistRepository, WatchlistService},
};
use shiori_lib::shared::config::{AppConfig, ReorderPolicy};
use std::path::PathBuf;
use std::sync::Arc;
use tempfile::TempDir;

pub struct TestServices {
    pub watchlist: Arc<WatchlistService>,
    pub reviews: Arc<ReviewService>,
    pub config: AppConfig,
    // Keeps the data directory alive for the duration of the test
    _data_dir: TempDir,
}

impl TestServices {
    pub fn watchlist_path(&self) -> PathBuf {
        self.config.watchlist_path()
    }

    pub fn reviews_path(&self) -> PathBuf {
        self.config.reviews_path()
    }

    /// Fresh services over the same files, as after an application restart.
    pub fn reopen(&self) -> (WatchlistService, ReviewService) {
        (
            WatchlistService::with_reorder_policy(
                Arc::new(JsonWatchlistRepository::new(self.watchlist_path())),
                self.config.reorder_policy,
            ),
            ReviewService::new(Arc::new(JsonReviewRepository::new(self.reviews_path()))),
        )
    }

    pub fn app_state(&self) -> AppState {
        AppState::new(self.watchlist.clone(), self.reviews.clone())
    }
}

/// Build file-backed services over a throw-away data directory
pub fn build_test_services() -> TestServices {
    build_test_services_with_policy(ReorderPolicy::DropUnnamed)
}

pub fn build_test_services_with_policy(policy: ReorderPolicy) -> TestServices {
    let data_dir = TempDir::new().expect("Failed to create temp data dir");
    let config = AppConfig::default()
        .with_data_dir(data_dir.path())
        .with_reorder_policy(policy);

    let state = AppState::from_config(&config);

    TestServices {
        watchlist: state.watchlist,
        reviews: state.reviews,
        config,
        _data_dir: data_dir,
    }
}
