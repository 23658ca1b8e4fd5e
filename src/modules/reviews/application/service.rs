use chrono::Utc;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::super::domain::{
    entities::{ReviewBook, ReviewRecord},
    repositories::ReviewRepository,
};
use crate::shared::domain::CatalogId;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::{logger::TimedOperation, Validator};
use crate::{log_debug, log_info, log_warn};

/// The review store. Writes are serialized the same way as the watchlist's:
/// one read-modify-write of the reviews document at a time, in arrival order.
pub struct ReviewService {
    repository: Arc<dyn ReviewRepository>,
    write_gate: Mutex<()>,
}

impl ReviewService {
    pub fn new(repository: Arc<dyn ReviewRepository>) -> Self {
        Self {
            repository,
            write_gate: Mutex::new(()),
        }
    }

    /// Replaces every review of `catalog_id` with the complete entries of
    /// `entries`, dropping the rest without error. Returns what was kept.
    pub async fn save(&self, catalog_id: &CatalogId, entries: Vec<Value>) -> AppResult<Vec<ReviewRecord>> {
        Validator::validate_catalog_id(catalog_id.as_str())?;

        let submitted = entries.len();
        let reviews = ReviewRecord::retain_valid(entries);
        if reviews.len() < submitted {
            log_debug!(
                "Dropped {} incomplete review(s) for {}",
                submitted - reviews.len(),
                catalog_id
            );
        }

        let kept = reviews.clone();
        self.mutate("save reviews", |book| {
            book.replace(catalog_id.as_str(), reviews);
            Ok(())
        })
        .await?;

        log_info!("Saved {} review(s) for {}", kept.len(), catalog_id);
        Ok(kept)
    }

    /// Reviews of `catalog_id` in stored order; empty when there are none or
    /// the document can't be read.
    pub async fn load(&self, catalog_id: &CatalogId) -> Vec<ReviewRecord> {
        let _gate = self.write_gate.lock().await;
        match self.repository.load().await {
            Ok(book) => book.get(catalog_id.as_str()).to_vec(),
            Err(e) => {
                log_warn!("Failed to read reviews, showing none: {}", e);
                Vec::new()
            }
        }
    }

    pub async fn submit(&self, catalog_id: &CatalogId, rating: u8, text: &str) -> AppResult<ReviewRecord> {
        Validator::validate_catalog_id(catalog_id.as_str())?;
        let review = ReviewRecord::new(rating, text, Utc::now())?;

        self.mutate("submit review", |book| {
            let mut reviews = book.get(catalog_id.as_str()).to_vec();
            reviews.push(review.clone());
            book.replace(catalog_id.as_str(), reviews);
            Ok(())
        })
        .await?;

        log_info!("Review {} added for {}", review.id, catalog_id);
        Ok(review)
    }

    pub async fn edit(
        &self,
        catalog_id: &CatalogId,
        review_id: &str,
        rating: u8,
        text: &str,
    ) -> AppResult<ReviewRecord> {
        self.mutate("edit review", |book| {
            let review = book
                .get_mut(catalog_id.as_str())
                .and_then(|reviews| reviews.iter_mut().find(|r| r.id == review_id))
                .ok_or_else(|| not_found(catalog_id, review_id))?;
            review.revise(rating, text, Utc::now())?;
            Ok(review.clone())
        })
        .await
    }

    pub async fn delete(&self, catalog_id: &CatalogId, review_id: &str) -> AppResult<()> {
        self.mutate("delete review", |book| {
            let reviews = book
                .get_mut(catalog_id.as_str())
                .ok_or_else(|| not_found(catalog_id, review_id))?;
            let before = reviews.len();
            reviews.retain(|r| r.id != review_id);
            if reviews.len() == before {
                return Err(not_found(catalog_id, review_id));
            }
            book.prune(catalog_id.as_str());
            Ok(())
        })
        .await?;

        log_info!("Review {} deleted for {}", review_id, catalog_id);
        Ok(())
    }

    async fn mutate<T, F>(&self, operation: &str, apply: F) -> AppResult<T>
    where
        F: FnOnce(&mut ReviewBook) -> AppResult<T>,
    {
        let _gate = self.write_gate.lock().await;
        let timer = TimedOperation::new(operation);
        let mut book = match self.repository.load().await {
            Ok(book) => book,
            Err(e) if e.is_malformed_data() => {
                log_warn!("Reviews document is malformed, starting from empty: {}", e);
                ReviewBook::new()
            }
            Err(e) => return Err(e),
        };

        let result = apply(&mut book)?;
        self.repository.save(&book).await?;

        timer.finish_with_info(&format!("{} catalog ids", book.len()));

        Ok(result)
    }
}

fn not_found(catalog_id: &CatalogId, review_id: &str) -> AppError {
    AppError::NotFound(format!("Review {} for {} not found", review_id, catalog_id))
}
