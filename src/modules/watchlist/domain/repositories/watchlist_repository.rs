use async_trait::async_trait;

use crate::modules::watchlist::domain::entities::TitleRecord;
use crate::shared::errors::AppResult;

/// Whole-document storage for the watchlist.
///
/// `load` returns an empty list when nothing has been saved yet, and
/// `AppError::MalformedData` when the stored document can't be parsed.
#[async_trait]
pub trait WatchlistRepository: Send + Sync {
    async fn load(&self) -> AppResult<Vec<TitleRecord>>;

    /// Replaces the stored document.
    async fn save(&self, records: &[TitleRecord]) -> AppResult<()>;
}
