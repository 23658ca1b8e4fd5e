use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::application::service::{AddOutcome, ReorderOutcome, WatchlistService};
use super::domain::entities::{TitleDraft, TitleRecord};
use crate::shared::errors::AppResult;
use crate::log_debug;

/// A title as handed to the presentation layer: the stored record plus
/// values derived for display.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleView {
    #[serde(flatten)]
    pub record: TitleRecord,
    pub progress_percentage: u8,
    pub display_seasons: Vec<String>,
}

impl From<TitleRecord> for TitleView {
    fn from(record: TitleRecord) -> Self {
        Self {
            progress_percentage: record.progress_percentage(),
            display_seasons: record.display_seasons(),
            record,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddOrUpdateTitleRequest {
    pub item: Value,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddOrUpdateTitleResponse {
    pub created: bool,
    pub message: String,
    pub title: TitleView,
}

impl From<AddOutcome> for AddOrUpdateTitleResponse {
    fn from(outcome: AddOutcome) -> Self {
        let message = if outcome.created {
            "Added to watchlist"
        } else {
            "Item updated"
        };
        Self {
            created: outcome.created,
            message: message.to_string(),
            title: outcome.record.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitleRequest {
    pub title: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteTitleResponse {
    pub removed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetEpisodeWatchedRequest {
    pub title: String,
    pub season: String,
    pub episode_number: u32,
    pub watched: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkEpisodesThroughRequest {
    pub title: String,
    pub season: String,
    pub up_to: u32,
    #[serde(default = "default_watched")]
    pub watched: bool,
}

fn default_watched() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchedCountResponse {
    pub watched_count: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetSeasonRequest {
    pub title: String,
    pub season: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SetNotesRequest {
    pub title: String,
    #[serde(default)]
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetCustomFieldsRequest {
    pub title: String,
    #[serde(default)]
    pub custom_season: String,
    #[serde(default)]
    pub custom_episodes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReorderTitlesRequest {
    pub titles: Vec<String>,
}

pub async fn add_or_update_title(
    request: AddOrUpdateTitleRequest,
    watchlist: &WatchlistService,
) -> AppResult<AddOrUpdateTitleResponse> {
    let draft = TitleDraft::from_value(request.item)?;
    log_debug!("add_or_update_title command called - title: {}", draft.title);

    Ok(watchlist.add(draft).await?.into())
}

pub async fn list_titles(watchlist: &WatchlistService) -> AppResult<Vec<TitleView>> {
    let titles = watchlist.list_for_display().await;
    Ok(titles.into_iter().map(TitleView::from).collect())
}

pub async fn get_title(request: TitleRequest, watchlist: &WatchlistService) -> AppResult<TitleView> {
    Ok(watchlist.get(&request.title).await?.into())
}

pub async fn delete_title(
    request: TitleRequest,
    watchlist: &WatchlistService,
) -> AppResult<DeleteTitleResponse> {
    let removed = watchlist.remove(&request.title).await?;
    Ok(DeleteTitleResponse { removed })
}

pub async fn set_episode_watched(
    request: SetEpisodeWatchedRequest,
    watchlist: &WatchlistService,
) -> AppResult<WatchedCountResponse> {
    let watched_count = watchlist
        .set_episode_watched(
            &request.title,
            &request.season,
            request.episode_number,
            request.watched,
        )
        .await?;
    Ok(WatchedCountResponse { watched_count })
}

pub async fn mark_episodes_through(
    request: MarkEpisodesThroughRequest,
    watchlist: &WatchlistService,
) -> AppResult<WatchedCountResponse> {
    let watched_count = watchlist
        .mark_episodes_through(&request.title, &request.season, request.up_to, request.watched)
        .await?;
    Ok(WatchedCountResponse { watched_count })
}

pub async fn set_season(request: SetSeasonRequest, watchlist: &WatchlistService) -> AppResult<TitleView> {
    let record = watchlist.set_season(&request.title, &request.season).await?;
    Ok(record.into())
}

pub async fn set_notes(request: SetNotesRequest, watchlist: &WatchlistService) -> AppResult<TitleView> {
    let record = watchlist.set_notes(&request.title, request.notes).await?;
    Ok(record.into())
}

pub async fn set_custom_fields(
    request: SetCustomFieldsRequest,
    watchlist: &WatchlistService,
) -> AppResult<TitleView> {
    let record = watchlist
        .set_custom_fields(&request.title, request.custom_season, request.custom_episodes)
        .await?;
    Ok(record.into())
}

pub async fn reorder_titles(
    request: ReorderTitlesRequest,
    watchlist: &WatchlistService,
) -> AppResult<ReorderOutcome> {
    log_debug!("reorder_titles command called - {} titles", request.titles.len());
    watchlist.reorder(&request.titles).await
}
