use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use super::episode_ledger::EpisodeLedger;
use crate::modules::watchlist::domain::{
    services::{
        progress_aggregator::{Progress, ProgressAggregator},
        season_partitioner::SeasonPartitioner,
    },
    value_objects::{EpisodeCount, SeasonLabel},
};
use crate::shared::{
    domain::{CatalogId, MediaKind},
    errors::{AppError, AppResult},
    utils::Validator,
};

/// A request to add a title, or to merge into the one with the same title.
///
/// Every field but `title` is optional: on merge, absent fields keep the
/// stored value. Fields the store doesn't know about are kept in `extra` and
/// copied onto the record verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TitleDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<MediaKind>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_id: Option<CatalogId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_episodes: Option<EpisodeCount>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasons: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub season_episodes: Option<EpisodeLedger>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_season: Option<String>,
    /// Only honoured for titles of unknown length.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_episodes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Recomputed by the store; accepted and ignored.
    #[serde(default, skip_serializing)]
    pub watched_episodes: Option<u32>,
    /// Owned by the store; accepted and ignored.
    #[serde(default, skip_serializing)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TitleDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_kind(mut self, kind: MediaKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_total_episodes(mut self, total: EpisodeCount) -> Self {
        self.total_episodes = Some(total);
        self
    }

    pub fn with_catalog_id(mut self, catalog_id: impl Into<CatalogId>) -> Self {
        self.catalog_id = Some(catalog_id.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = Some(order);
        self
    }

    pub fn with_extra(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    fn validate_total_episodes(&self) -> AppResult<()> {
        match self.total_episodes.and_then(|total| total.known()) {
            Some(total) => Validator::validate_total_episodes(total),
            None => Ok(()),
        }
    }

    /// Parses an add request coming from the presentation layer.
    pub fn from_value(mut value: Value) -> AppResult<Self> {
        if let Value::Object(fields) = &mut value {
            normalize_legacy_keys(fields);
        }
        serde_json::from_value(value)
            .map_err(|e| AppError::ValidationError(format!("Invalid title: {}", e)))
    }
}

/// Older documents and raw catalog payloads use `type`, `mal_id` and
/// `episodes`; move them onto the current field names.
pub fn normalize_legacy_keys(fields: &mut Map<String, Value>) {
    if !fields.contains_key("kind") {
        let kind = fields
            .get("type")
            .and_then(Value::as_str)
            .and_then(|t| t.parse::<MediaKind>().ok());
        if let Some(kind) = kind {
            fields.remove("type");
            fields.insert("kind".to_string(), Value::String(kind.to_string()));
        }
    }

    if !fields.contains_key("catalogId") {
        if let Some(id) = fields.remove("mal_id") {
            if id.is_number() || id.is_string() {
                fields.insert("catalogId".to_string(), id);
            }
        }
    }

    let has_total = fields.get("totalEpisodes").is_some_and(|v| !v.is_null());
    if !has_total {
        if let Some(episodes) = fields.get("episodes").cloned() {
            fields.insert("totalEpisodes".to_string(), episodes);
        }
    }
}

/// One tracked anime or manga.
///
/// Fields are private: the watched count and completion flag are caches of
/// the episode ledger, and only the watchlist store may change the ledger so
/// that it can recompute them in the same step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TitleRecord {
    #[serde(default)]
    id: String,
    title: String,
    #[serde(default)]
    kind: MediaKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    catalog_id: Option<CatalogId>,
    #[serde(default)]
    total_episodes: EpisodeCount,
    #[serde(default)]
    seasons: Vec<String>,
    #[serde(default)]
    season_episodes: EpisodeLedger,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    current_season: Option<String>,
    #[serde(default)]
    watched_episodes: u32,
    #[serde(default)]
    is_completed: bool,
    #[serde(default)]
    custom_season: String,
    #[serde(default)]
    custom_episodes: String,
    #[serde(default)]
    order: i64,
    #[serde(default)]
    notes: String,
    #[serde(default = "Utc::now")]
    created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    updated_at: DateTime<Utc>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl TitleRecord {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn kind(&self) -> MediaKind {
        self.kind
    }

    pub fn catalog_id(&self) -> Option<&CatalogId> {
        self.catalog_id.as_ref()
    }

    pub fn total_episodes(&self) -> EpisodeCount {
        self.total_episodes
    }

    pub fn seasons(&self) -> &[String] {
        &self.seasons
    }

    pub fn season_episodes(&self) -> &EpisodeLedger {
        &self.season_episodes
    }

    pub fn current_season(&self) -> Option<&str> {
        self.current_season.as_deref()
    }

    pub fn watched_episodes(&self) -> u32 {
        self.watched_episodes
    }

    pub fn is_completed(&self) -> bool {
        self.is_completed
    }

    pub fn custom_season(&self) -> &str {
        &self.custom_season
    }

    pub fn custom_episodes(&self) -> &str {
        &self.custom_episodes
    }

    pub fn order(&self) -> i64 {
        self.order
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    pub fn extra(&self) -> &Map<String, Value> {
        &self.extra
    }

    pub fn progress(&self) -> Progress {
        Progress {
            watched_episodes: self.watched_episodes,
            is_completed: self.is_completed,
        }
    }

    pub fn progress_percentage(&self) -> u8 {
        ProgressAggregator::percentage(self.watched_episodes, self.total_episodes)
    }

    /// Known-length titles are tracked per episode; the rest through the
    /// free-text custom fields.
    pub fn tracks_episodes(&self) -> bool {
        self.total_episodes.is_known()
    }

    /// Season labels the way this title's partition shows them.
    pub fn display_seasons(&self) -> Vec<String> {
        self.seasons
            .iter()
            .map(|s| SeasonLabel::display(s, self.kind))
            .collect()
    }

    pub(crate) fn from_draft(draft: TitleDraft, now: DateTime<Utc>) -> AppResult<Self> {
        Validator::validate_title(&draft.title)?;
        draft.validate_total_episodes()?;

        let mut record = TitleRecord {
            id: draft
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            title: draft.title.trim().to_string(),
            kind: draft.kind.unwrap_or_default(),
            catalog_id: draft.catalog_id,
            total_episodes: draft.total_episodes.unwrap_or_default(),
            seasons: Vec::new(),
            season_episodes: EpisodeLedger::new(),
            current_season: None,
            watched_episodes: 0,
            is_completed: draft.is_completed.unwrap_or(false),
            custom_season: draft.custom_season.unwrap_or_default(),
            custom_episodes: draft.custom_episodes.unwrap_or_default(),
            order: draft.order.unwrap_or(0),
            notes: draft.notes.unwrap_or_default(),
            created_at: draft.created_at.unwrap_or(now),
            updated_at: now,
            extra: draft.extra,
        };

        record.settle_tracking(draft.seasons, draft.season_episodes, draft.current_season)?;
        Ok(record)
    }

    /// Overwrites every field the draft carries except `id` and `createdAt`.
    /// Nothing changes if the draft is rejected.
    pub(crate) fn merge_draft(&mut self, draft: TitleDraft, now: DateTime<Utc>) -> AppResult<()> {
        Validator::validate_title(&draft.title)?;
        draft.validate_total_episodes()?;

        let mut merged = self.clone();
        let was_known = merged.total_episodes.is_known();

        if let Some(kind) = draft.kind {
            merged.kind = kind;
        }
        if draft.catalog_id.is_some() {
            merged.catalog_id = draft.catalog_id;
        }
        if let Some(total) = draft.total_episodes {
            merged.total_episodes = total;
        }
        match draft.is_completed {
            Some(flag) => merged.is_completed = flag,
            None if was_known && !merged.total_episodes.is_known() => merged.is_completed = false,
            None => {}
        }
        if let Some(custom_season) = draft.custom_season {
            merged.custom_season = custom_season;
        }
        if let Some(custom_episodes) = draft.custom_episodes {
            merged.custom_episodes = custom_episodes;
        }
        if let Some(order) = draft.order {
            merged.order = order;
        }
        if let Some(notes) = draft.notes {
            merged.notes = notes;
        }
        merged.extra.extend(draft.extra);

        merged.settle_tracking(draft.seasons, draft.season_episodes, draft.current_season)?;
        merged.updated_at = now;

        *self = merged;
        Ok(())
    }

    /// Brings seasons, ledger and current season in line with the total.
    ///
    /// For known totals a supplied ledger must satisfy the partition
    /// invariant. Without one, a stored ledger that still fits is kept;
    /// otherwise the title is re-partitioned and watched flags carried over
    /// by episode number.
    fn settle_tracking(
        &mut self,
        seasons: Option<Vec<String>>,
        ledger: Option<EpisodeLedger>,
        current_season: Option<String>,
    ) -> AppResult<()> {
        match self.total_episodes {
            EpisodeCount::Known(total) => {
                let candidate = seasons.unwrap_or_else(|| self.seasons.clone());

                match ledger {
                    Some(ledger) => {
                        let seasons = if candidate.is_empty() {
                            SeasonPartitioner::partition(self.total_episodes).seasons
                        } else {
                            candidate
                        };
                        ledger.check_partition(&seasons, total).map_err(|e| {
                            AppError::ValidationError(format!(
                                "Episode list for '{}' is inconsistent: {}",
                                self.title, e
                            ))
                        })?;
                        self.seasons = seasons;
                        self.season_episodes = ledger;
                    }
                    None => {
                        let fits = !candidate.is_empty()
                            && self.season_episodes.check_partition(&candidate, total).is_ok();
                        if fits {
                            self.seasons = candidate;
                        } else {
                            let layout = SeasonPartitioner::partition(self.total_episodes);
                            let mut fresh = layout.ledger;
                            fresh.carry_watched_from(&self.season_episodes);
                            self.seasons = layout.seasons;
                            self.season_episodes = fresh;
                        }
                    }
                }

                let requested = current_season
                    .map(|s| self.match_season(&s).unwrap_or(s))
                    .or_else(|| self.current_season.take());
                self.current_season = requested
                    .filter(|s| self.seasons.contains(s))
                    .or_else(|| self.seasons.first().cloned());
            }
            EpisodeCount::Unknown => {
                if let Some(seasons) = seasons {
                    self.seasons = seasons;
                }
                if let Some(ledger) = ledger {
                    self.season_episodes = ledger;
                }
                if current_season.is_some() {
                    self.current_season = current_season;
                }
            }
        }

        self.recompute_progress();
        Ok(())
    }

    /// The stored label an incoming label refers to, if the title has it.
    fn match_season(&self, label: &str) -> Option<String> {
        if self.seasons.iter().any(|s| s == label) {
            return Some(label.to_string());
        }
        let canonical = SeasonLabel::canonical(label);
        self.seasons.iter().find(|s| **s == canonical).cloned()
    }

    fn resolve_season(&self, label: &str) -> AppResult<String> {
        if let Some(season) = self.match_season(label) {
            return Ok(season);
        }

        match self.total_episodes {
            EpisodeCount::Known(_) => Err(AppError::ValidationError(format!(
                "'{}' has no season '{}'",
                self.title, label
            ))),
            EpisodeCount::Unknown => {
                let canonical = SeasonLabel::canonical(label);
                if canonical.is_empty() {
                    Err(AppError::ValidationError("Season is required".to_string()))
                } else {
                    Ok(canonical)
                }
            }
        }
    }

    pub(crate) fn set_episode_watched(
        &mut self,
        season: &str,
        episode_number: u32,
        watched: bool,
        now: DateTime<Utc>,
    ) -> AppResult<u32> {
        Validator::validate_episode_number(episode_number)?;
        let season = self.resolve_season(season)?;

        if let EpisodeCount::Known(total) = self.total_episodes {
            if episode_number > total {
                return Err(AppError::ValidationError(format!(
                    "'{}' has {} episodes, there is no episode {}",
                    self.title, total, episode_number
                )));
            }
            if let Some(other) = self.season_episodes.season_of(episode_number) {
                if other != season {
                    return Err(AppError::ValidationError(format!(
                        "Episode {} of '{}' belongs to {}",
                        episode_number, self.title, other
                    )));
                }
            }
        }

        self.season_episodes.set_watched(&season, episode_number, watched);
        self.recompute_progress();
        self.updated_at = now;
        Ok(self.watched_episodes)
    }

    pub(crate) fn set_episodes_watched_through(
        &mut self,
        season: &str,
        up_to: u32,
        watched: bool,
        now: DateTime<Utc>,
    ) -> AppResult<u32> {
        Validator::validate_episode_number(up_to)?;
        let season = self.resolve_season(season)?;

        if self
            .season_episodes
            .set_watched_through(&season, up_to, watched)
            .is_none()
        {
            return Err(AppError::ValidationError(format!(
                "{} of '{}' has no episodes",
                season, self.title
            )));
        }

        self.recompute_progress();
        self.updated_at = now;
        Ok(self.watched_episodes)
    }

    pub(crate) fn set_current_season(&mut self, season: &str, now: DateTime<Utc>) -> AppResult<()> {
        self.current_season = Some(self.resolve_season(season)?);
        self.updated_at = now;
        Ok(())
    }

    pub(crate) fn set_notes(&mut self, notes: String, now: DateTime<Utc>) {
        self.notes = notes;
        self.updated_at = now;
    }

    pub(crate) fn set_custom_fields(
        &mut self,
        custom_season: String,
        custom_episodes: String,
        now: DateTime<Utc>,
    ) {
        self.custom_season = custom_season;
        self.custom_episodes = custom_episodes;
        self.updated_at = now;
    }

    pub(crate) fn set_order(&mut self, order: i64, now: DateTime<Utc>) {
        self.order = order;
        self.updated_at = now;
    }

    /// Refreshes the cached totals of a record read from disk.
    pub(crate) fn reconcile(&mut self) {
        self.recompute_progress();
    }

    fn recompute_progress(&mut self) {
        let progress =
            ProgressAggregator::aggregate(&self.season_episodes, self.total_episodes, self.is_completed);
        self.watched_episodes = progress.watched_episodes;
        self.is_completed = progress.is_completed;
    }
}
