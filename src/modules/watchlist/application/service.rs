use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::Mutex;

use super::super::domain::{
    entities::{TitleDraft, TitleRecord},
    repositories::WatchlistRepository,
    services::DisplayOrder,
};
use crate::shared::config::ReorderPolicy;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::logger::TimedOperation;
use crate::{log_debug, log_info, log_warn};

/// Result of `add`: the stored record and whether it was newly inserted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOutcome {
    pub record: TitleRecord,
    pub created: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderOutcome {
    /// The watchlist as stored after the reorder.
    pub titles: Vec<TitleRecord>,
    /// Stored titles the caller did not name and that were removed.
    pub dropped: Vec<String>,
    /// Named titles that are not in the watchlist.
    pub missing: Vec<String>,
}

/// The watchlist store.
///
/// Every operation re-reads the whole document, applies its change to an
/// in-memory copy and writes the document back. The write gate lets one
/// operation through at a time in arrival order, so concurrent callers never
/// overwrite each other's changes. A failed operation writes nothing.
pub struct WatchlistService {
    repository: Arc<dyn WatchlistRepository>,
    reorder_policy: ReorderPolicy,
    write_gate: Mutex<()>,
}

impl WatchlistService {
    pub fn new(repository: Arc<dyn WatchlistRepository>) -> Self {
        Self::with_reorder_policy(repository, ReorderPolicy::default())
    }

    pub fn with_reorder_policy(
        repository: Arc<dyn WatchlistRepository>,
        reorder_policy: ReorderPolicy,
    ) -> Self {
        Self {
            repository,
            reorder_policy,
            write_gate: Mutex::new(()),
        }
    }

    pub fn reorder_policy(&self) -> ReorderPolicy {
        self.reorder_policy
    }

    /// Inserts a title, or merges into the record with the same title.
    pub async fn add(&self, draft: TitleDraft) -> AppResult<AddOutcome> {
        let outcome = self
            .mutate("add title", |records, now| {
                let title = draft.title.trim().to_string();
                match records.iter_mut().find(|r| r.title() == title) {
                    Some(existing) => {
                        existing.merge_draft(draft, now)?;
                        Ok(AddOutcome {
                            record: existing.clone(),
                            created: false,
                        })
                    }
                    None => {
                        let record = TitleRecord::from_draft(draft, now)?;
                        records.push(record.clone());
                        Ok(AddOutcome {
                            record,
                            created: true,
                        })
                    }
                }
            })
            .await?;

        if outcome.created {
            log_info!("Added '{}' to watchlist", outcome.record.title());
        } else {
            log_info!("Updated '{}' in watchlist", outcome.record.title());
        }
        Ok(outcome)
    }

    /// Marks one episode and returns the title's new watched count.
    pub async fn set_episode_watched(
        &self,
        title: &str,
        season: &str,
        episode_number: u32,
        watched: bool,
    ) -> AppResult<u32> {
        let count = self
            .mutate("set episode watched", |records, now| {
                find_mut(records, title)?.set_episode_watched(season, episode_number, watched, now)
            })
            .await?;

        log_debug!(
            "'{}' {} episode {} watched={} ({} watched)",
            title,
            season,
            episode_number,
            watched,
            count
        );
        Ok(count)
    }

    /// Marks every episode of `season` up to and including `up_to` in one
    /// write. Returns the title's new watched count.
    pub async fn mark_episodes_through(
        &self,
        title: &str,
        season: &str,
        up_to: u32,
        watched: bool,
    ) -> AppResult<u32> {
        let count = self
            .mutate("mark episodes through", |records, now| {
                find_mut(records, title)?.set_episodes_watched_through(season, up_to, watched, now)
            })
            .await?;

        log_debug!(
            "'{}' {} episodes 1..={} watched={} ({} watched)",
            title,
            season,
            up_to,
            watched,
            count
        );
        Ok(count)
    }

    /// Deletes a title. Returns whether anything was removed; deleting a
    /// title that isn't there succeeds without writing.
    pub async fn remove(&self, title: &str) -> AppResult<bool> {
        let _gate = self.write_gate.lock().await;
        let timer = TimedOperation::new("remove title");
        let mut records = self.load_for_write().await?;

        let before = records.len();
        records.retain(|r| r.title() != title);
        if records.len() == before {
            log_debug!("Delete of '{}' skipped, not in watchlist", title);
            return Ok(false);
        }

        self.repository.save(&records).await?;
        timer.finish();

        log_info!("Removed '{}' from watchlist", title);
        Ok(true)
    }

    /// Sets `order` to each named title's position in `ordered_titles`.
    ///
    /// Under the default policy the stored watchlist becomes exactly the
    /// named titles that exist: everything else is dropped. With
    /// `ReorderPolicy::AppendUnnamed` unnamed titles follow the named ones.
    pub async fn reorder(&self, ordered_titles: &[String]) -> AppResult<ReorderOutcome> {
        let policy = self.reorder_policy;

        let outcome = self
            .mutate("reorder titles", |records, now| {
                let mut remaining: Vec<Option<TitleRecord>> =
                    records.drain(..).map(Some).collect();
                let mut reordered = Vec::with_capacity(ordered_titles.len());
                let mut missing = Vec::new();

                // A named title's order is its index in the caller's list,
                // unknown names included.
                for (index, title) in ordered_titles.iter().enumerate() {
                    let found = remaining
                        .iter_mut()
                        .find(|slot| slot.as_ref().is_some_and(|r| r.title() == title))
                        .and_then(Option::take);
                    match found {
                        Some(mut record) => {
                            record.set_order(index as i64, now);
                            reordered.push(record);
                        }
                        None => missing.push(title.clone()),
                    }
                }

                let unnamed: Vec<TitleRecord> = remaining.into_iter().flatten().collect();
                let dropped = match policy {
                    ReorderPolicy::DropUnnamed => {
                        unnamed.iter().map(|r| r.title().to_string()).collect()
                    }
                    ReorderPolicy::AppendUnnamed => {
                        for (offset, mut record) in unnamed.into_iter().enumerate() {
                            record.set_order((ordered_titles.len() + offset) as i64, now);
                            reordered.push(record);
                        }
                        Vec::new()
                    }
                };

                *records = reordered;
                Ok(ReorderOutcome {
                    titles: records.clone(),
                    dropped,
                    missing,
                })
            })
            .await?;

        if !outcome.dropped.is_empty() {
            log_warn!(
                "Reorder dropped {} unnamed title(s): {:?}",
                outcome.dropped.len(),
                outcome.dropped
            );
        }
        if !outcome.missing.is_empty() {
            log_debug!("Reorder skipped unknown title(s): {:?}", outcome.missing);
        }
        Ok(outcome)
    }

    pub async fn set_season(&self, title: &str, season: &str) -> AppResult<TitleRecord> {
        self.mutate("set season", |records, now| {
            let record = find_mut(records, title)?;
            record.set_current_season(season, now)?;
            Ok(record.clone())
        })
        .await
    }

    pub async fn set_notes(&self, title: &str, notes: String) -> AppResult<TitleRecord> {
        self.mutate("set notes", |records, now| {
            let record = find_mut(records, title)?;
            record.set_notes(notes, now);
            Ok(record.clone())
        })
        .await
    }

    pub async fn set_custom_fields(
        &self,
        title: &str,
        custom_season: String,
        custom_episodes: String,
    ) -> AppResult<TitleRecord> {
        self.mutate("set custom fields", |records, now| {
            let record = find_mut(records, title)?;
            record.set_custom_fields(custom_season, custom_episodes, now);
            Ok(record.clone())
        })
        .await
    }

    /// All titles in stored order. An unreadable document reads as empty.
    pub async fn list(&self) -> Vec<TitleRecord> {
        let _gate = self.write_gate.lock().await;
        match self.repository.load().await {
            Ok(records) => records,
            Err(e) => {
                log_warn!("Failed to read watchlist, showing it as empty: {}", e);
                Vec::new()
            }
        }
    }

    /// Anime shelf, then manga shelf, each sorted for display.
    pub async fn list_for_display(&self) -> Vec<TitleRecord> {
        let (mut anime, manga) = DisplayOrder::partition_by_kind(self.list().await);
        anime.extend(manga);
        anime
    }

    pub async fn get(&self, title: &str) -> AppResult<TitleRecord> {
        self.list()
            .await
            .into_iter()
            .find(|r| r.title() == title)
            .ok_or_else(|| not_found(title))
    }

    async fn mutate<T, F>(&self, operation: &str, apply: F) -> AppResult<T>
    where
        F: FnOnce(&mut Vec<TitleRecord>, DateTime<Utc>) -> AppResult<T>,
    {
        let _gate = self.write_gate.lock().await;
        let timer = TimedOperation::new(operation);
        let mut records = self.load_for_write().await?;

        let result = apply(&mut records, Utc::now())?;
        self.repository.save(&records).await?;

        timer.finish_with_info(&format!("{} titles", records.len()));
        Ok(result)
    }

    /// A malformed document is replaced by the next write; any other read
    /// failure aborts the mutation so nothing is overwritten.
    async fn load_for_write(&self) -> AppResult<Vec<TitleRecord>> {
        match self.repository.load().await {
            Ok(records) => Ok(records),
            Err(e) if e.is_malformed_data() => {
                log_warn!("Watchlist document is malformed, starting from empty: {}", e);
                Ok(Vec::new())
            }
            Err(e) => Err(e),
        }
    }
}

fn find_mut<'a>(records: &'a mut [TitleRecord], title: &str) -> AppResult<&'a mut TitleRecord> {
    records
        .iter_mut()
        .find(|r| r.title() == title)
        .ok_or_else(|| not_found(title))
}

fn not_found(title: &str) -> AppError {
    AppError::NotFound(format!("Title '{}' is not in the watchlist", title))
}
