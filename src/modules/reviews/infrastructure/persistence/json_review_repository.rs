use async_trait::async_trait;
use serde_json::Value;
use std::path::PathBuf;
use std::time::Instant;

use crate::modules::reviews::domain::{entities::ReviewBook, repositories::ReviewRepository};
use crate::shared::errors::{AppError, AppResult};
use crate::shared::infrastructure::JsonDocumentFile;
use crate::shared::utils::logger::LogContext;

/// Stores reviews as one JSON object mapping catalog ids to review arrays.
pub struct JsonReviewRepository {
    file: JsonDocumentFile,
}

impl JsonReviewRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            file: JsonDocumentFile::new(path),
        }
    }
}

#[async_trait]
impl ReviewRepository for JsonReviewRepository {
    async fn load(&self) -> AppResult<ReviewBook> {
        LogContext::document_operation("load", "reviews", None);

        match self.file.read::<Value>().await? {
            None => Ok(ReviewBook::new()),
            Some(Value::Object(document)) => Ok(ReviewBook::from_raw(document)),
            Some(_) => Err(AppError::MalformedData(format!(
                "{}: expected an object keyed by catalog id",
                self.file.path().display()
            ))),
        }
    }

    async fn save(&self, book: &ReviewBook) -> AppResult<()> {
        LogContext::document_operation("save", "reviews", None);
        let started = Instant::now();

        self.file.write(book).await.inspect_err(|e| {
            LogContext::error_with_context(e, "Failed to write reviews document");
        })?;

        let elapsed = started.elapsed().as_millis() as u64;
        LogContext::document_operation("save", "reviews", Some(elapsed));
        Ok(())
    }
}
