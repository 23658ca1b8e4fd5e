use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::modules::reviews::domain::{entities::ReviewBook, repositories::ReviewRepository};
use crate::shared::errors::AppResult;

#[derive(Default)]
pub struct InMemoryReviewRepository {
    book: RwLock<ReviewBook>,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn load(&self) -> AppResult<ReviewBook> {
        Ok(self.book.read().await.clone())
    }

    async fn save(&self, book: &ReviewBook) -> AppResult<()> {
        *self.book.write().await = book.clone();
        Ok(())
    }
}
