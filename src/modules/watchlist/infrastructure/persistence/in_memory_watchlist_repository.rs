use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::modules::watchlist::domain::{entities::TitleRecord, repositories::WatchlistRepository};
use crate::shared::errors::AppResult;

/// Keeps the watchlist in memory. Used for tests and throw-away sessions.
#[derive(Default)]
pub struct InMemoryWatchlistRepository {
    records: RwLock<Vec<TitleRecord>>,
}

impl InMemoryWatchlistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WatchlistRepository for InMemoryWatchlistRepository {
    async fn load(&self) -> AppResult<Vec<TitleRecord>> {
        Ok(self.records.read().await.clone())
    }

    async fn save(&self, records: &[TitleRecord]) -> AppResult<()> {
        *self.records.write().await = records.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::watchlist::application::service::WatchlistService;
    use crate::modules::watchlist::domain::entities::TitleDraft;
    use std::sync::Arc;

    #[test]
    fn changes_are_visible_to_the_next_read() {
        let repository = Arc::new(InMemoryWatchlistRepository::new());
        let watchlist = WatchlistService::new(repository.clone());

        tokio_test::block_on(async {
            watchlist.add(TitleDraft::new("Haibane Renmei")).await.unwrap();
            let stored = repository.load().await.unwrap();
            assert_eq!(stored.len(), 1);
            assert_eq!(stored[0].title(), "Haibane Renmei");
        });
    }
}
