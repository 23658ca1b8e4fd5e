use async_trait::async_trait;

use crate::modules::catalog::domain::entities::{CatalogDetail, CatalogSummary};
use crate::shared::domain::{CatalogId, MediaKind};
use crate::shared::errors::AppResult;

/// Port to the external title catalog. The watchlist core only consumes it;
/// implementations live with whatever shell provides network access.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Free-text search within one kind.
    async fn search(&self, query: &str, kind: MediaKind) -> AppResult<Vec<CatalogSummary>>;

    async fn details(&self, id: &CatalogId, kind: MediaKind) -> AppResult<Option<CatalogDetail>>;
}
