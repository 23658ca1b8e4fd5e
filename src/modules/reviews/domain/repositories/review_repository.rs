use async_trait::async_trait;

use crate::modules::reviews::domain::entities::ReviewBook;
use crate::shared::errors::AppResult;

/// Whole-document storage for reviews.
///
/// `load` returns an empty book when nothing has been saved yet, and
/// `AppError::MalformedData` when the stored document can't be parsed.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn load(&self) -> AppResult<ReviewBook>;

    async fn save(&self, book: &ReviewBook) -> AppResult<()>;
}
