use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Instant;

use crate::modules::watchlist::domain::{
    entities::{title_record::normalize_legacy_keys, TitleRecord},
    repositories::WatchlistRepository,
};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::JsonDocumentFile;
use crate::shared::utils::logger::LogContext;
use crate::log_warn;

/// Stores the watchlist as one JSON array of title records.
pub struct JsonWatchlistRepository {
    file: JsonDocumentFile,
}

impl JsonWatchlistRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonDocumentFile::new(path),
        }
    }

    /// Parses one stored entry. Entries that no longer parse (hand edits,
    /// older formats) are skipped rather than failing the whole document.
    fn decode_record(index: usize, mut value: Value) -> Option<TitleRecord> {
        if let Value::Object(fields) = &mut value {
            normalize_legacy_keys(fields);
        }

        match serde_json::from_value::<TitleRecord>(value) {
            Ok(mut record) => {
                record.reconcile();
                Some(record)
            }
            Err(e) => {
                log_warn!("Skipping unreadable watchlist entry #{}: {}", index, e);
                None
            }
        }
    }
}

#[async_trait]
impl WatchlistRepository for JsonWatchlistRepository {
    async fn load(&self) -> AppResult<Vec<TitleRecord>> {
        LogContext::document_operation("load", "watchlist", None);

        let Some(document) = self.file.read::<Value>().await? else {
            return Ok(Vec::new());
        };

        let Value::Array(entries) = document else {
            return Err(AppError::MalformedData(format!(
                "{}: expected an array of titles",
                self.file.path().display()
            )));
        };

        Ok(entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| Self::decode_record(index, entry))
            .collect())
    }

    async fn save(&self, records: &[TitleRecord]) -> AppResult<()> {
        LogContext::document_operation("save", "watchlist", None);
        let started = Instant::now();

        self.file.write(records).await.inspect_err(|e| {
            LogContext::error_with_context(e, "Failed to write watchlist document");
        })?;

        let elapsed = started.elapsed().as_millis() as u64;
        LogContext::document_operation("save", "watchlist", Some(elapsed));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn missing_file_loads_as_empty() {
        let dir = TempDir::new().unwrap();
        let repo = JsonWatchlistRepository::new(dir.path().join("watchlist.json"));

        assert!(repo.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn unwritable_location_is_a_persistence_error() {
        let dir = TempDir::new().unwrap();
        let blocker = dir.path().join("data");
        tokio::fs::write(&blocker, "not a directory").await.unwrap();
        let repo = JsonWatchlistRepository::new(blocker.join("watchlist.json"));

        let result = repo.save(&[]).await;

        assert!(matches!(result, Err(AppError::PersistenceError(_))));
    }

    #[tokio::test]
    async fn non_array_document_is_malformed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watchlist.json");
        tokio::fs::write(&path, r#"{"title": "Trigun"}"#).await.unwrap();

        let result = JsonWatchlistRepository::new(path).load().await;
        assert!(matches!(result, Err(AppError::MalformedData(_))));
    }

    #[tokio::test]
    async fn legacy_entries_are_read_and_stale_counts_fixed() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("watchlist.json");
        let legacy = json!([
            {
                "id": "Trigun-1700000000000",
                "title": "Trigun",
                "type": "anime",
                "mal_id": 6,
                "episodes": 26,
                "totalEpisodes": 26,
                "seasons": ["Season 1", "Season 2"],
                "seasonEpisodes": {
                    "Season 1": [{"number": 1, "watched": true}, {"number": 2, "watched": true}]
                },
                "watchedEpisodes": 17,
                "isCompleted": false,
                "order": 3,
                "createdAt": "2024-01-01T00:00:00.000Z",
                "updatedAt": "2024-01-02T00:00:00.000Z"
            },
            "not a record"
        ]);
        tokio::fs::write(&path, legacy.to_string()).await.unwrap();

        let records = JsonWatchlistRepository::new(path).load().await.unwrap();

        assert_eq!(records.len(), 1);
        let trigun = &records[0];
        assert_eq!(trigun.watched_episodes(), 2);
        assert_eq!(trigun.catalog_id().map(|id| id.as_str()), Some("6"));
        assert_eq!(trigun.order(), 3);
        assert_eq!(trigun.extra().get("episodes"), Some(&json!(26)));
    }
}
