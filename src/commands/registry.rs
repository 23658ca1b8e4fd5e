use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::{json, Map, Value};

use super::state::AppState;
use crate::modules::{
    catalog::{self, CatalogOutcome},
    navigation, reviews, watchlist,
};
use crate::log_error;
use crate::shared::{
    domain::{CatalogId, MediaKind},
    errors::{AppError, AppResult},
    utils::logger::LogContext,
};

/// Single source of truth for the command names the presentation layer
/// may send.
pub const COMMANDS: &[&str] = &[
    // Watchlist commands
    "addOrUpdateTitle",
    "addFromCatalogDetail",
    "listTitles",
    "getTitle",
    "deleteTitle",
    "setEpisodeWatched",
    "markEpisodesThrough",
    "setSeason",
    "setNotes",
    "setCustomFields",
    "reorderTitles",
    // Review commands
    "saveReviews",
    "loadReviews",
    "submitReview",
    "editReview",
    "deleteReview",
    // Catalog commands
    "searchCatalog",
    "getCatalogDetails",
    // Navigation commands
    "navigateTo",
    "goBack",
    "goHome",
    "getNavigationHistory",
];

/// One request from the presentation layer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandEnvelope {
    pub command: String,
    #[serde(default)]
    pub args: Value,
}

/// `{ "ok": true, "data": ... }` or `{ "ok": false, "error": { "type", "message" } }`.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResponse {
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<AppError>,
}

impl CommandResponse {
    pub fn success(data: Value) -> Self {
        Self {
            ok: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: AppError) -> Self {
        Self {
            ok: false,
            data: None,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogSearchRequest {
    query: String,
    #[serde(default)]
    kind: MediaKind,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CatalogDetailsRequest {
    catalog_id: CatalogId,
    #[serde(default)]
    kind: MediaKind,
}

const NO_CATALOG: &str = "No catalog service is configured";

/// Parses one JSON line, runs it and renders the reply line.
pub async fn handle_line(state: &AppState, line: &str) -> String {
    let response = match serde_json::from_str::<CommandEnvelope>(line) {
        Ok(envelope) => dispatch(state, envelope).await,
        Err(e) => CommandResponse::failure(AppError::ValidationError(format!(
            "Invalid command envelope: {}",
            e
        ))),
    };

    serde_json::to_string(&response).unwrap_or_else(|e| encoding_failure(&e))
}

fn encoding_failure(error: &serde_json::Error) -> String {
    log_error!("Failed to encode response: {}", error);
    json!({
        "ok": false,
        "error": {
            "type": "InternalError",
            "message": format!("Failed to encode response: {}", error),
        },
    })
    .to_string()
}

pub async fn dispatch(state: &AppState, envelope: CommandEnvelope) -> CommandResponse {
    let result = execute(state, &envelope.command, envelope.args).await;
    LogContext::command(&envelope.command, result.is_ok());

    match result {
        Ok(data) => CommandResponse::success(data),
        Err(e) => CommandResponse::failure(e),
    }
}

async fn execute(state: &AppState, command: &str, args: Value) -> AppResult<Value> {
    let watchlist_service = state.watchlist.as_ref();
    let review_service = state.reviews.as_ref();

    match command {
        "addOrUpdateTitle" => {
            respond(watchlist::commands::add_or_update_title(parse(args)?, watchlist_service).await)
        }
        "addFromCatalogDetail" => {
            respond(catalog::commands::add_from_catalog_detail(parse(args)?, watchlist_service).await)
        }
        "listTitles" => respond(watchlist::commands::list_titles(watchlist_service).await),
        "getTitle" => respond(watchlist::commands::get_title(parse(args)?, watchlist_service).await),
        "deleteTitle" => {
            respond(watchlist::commands::delete_title(parse(args)?, watchlist_service).await)
        }
        "setEpisodeWatched" => {
            respond(watchlist::commands::set_episode_watched(parse(args)?, watchlist_service).await)
        }
        "markEpisodesThrough" => {
            respond(watchlist::commands::mark_episodes_through(parse(args)?, watchlist_service).await)
        }
        "setSeason" => respond(watchlist::commands::set_season(parse(args)?, watchlist_service).await),
        "setNotes" => respond(watchlist::commands::set_notes(parse(args)?, watchlist_service).await),
        "setCustomFields" => {
            respond(watchlist::commands::set_custom_fields(parse(args)?, watchlist_service).await)
        }
        "reorderTitles" => {
            respond(watchlist::commands::reorder_titles(parse(args)?, watchlist_service).await)
        }

        "saveReviews" => respond(reviews::commands::save_reviews(parse(args)?, review_service).await),
        "loadReviews" => respond(reviews::commands::load_reviews(parse(args)?, review_service).await),
        "submitReview" => {
            respond(reviews::commands::submit_review(parse(args)?, review_service).await)
        }
        "editReview" => respond(reviews::commands::edit_review(parse(args)?, review_service).await),
        "deleteReview" => {
            respond(reviews::commands::delete_review(parse(args)?, review_service).await)
        }

        "searchCatalog" => {
            let request: CatalogSearchRequest = parse(args)?;
            let outcome = match &state.catalog {
                Some(catalog) => catalog.search(&request.query, request.kind).await,
                None => CatalogOutcome {
                    data: Vec::new(),
                    error: Some(NO_CATALOG.to_string()),
                },
            };
            respond(Ok(outcome))
        }
        "getCatalogDetails" => {
            let request: CatalogDetailsRequest = parse(args)?;
            let outcome = match &state.catalog {
                Some(catalog) => catalog.details(&request.catalog_id, request.kind).await,
                None => CatalogOutcome {
                    data: None,
                    error: Some(NO_CATALOG.to_string()),
                },
            };
            respond(Ok(outcome))
        }

        "navigateTo" => respond(navigation::commands::navigate_to(parse(args)?, &state.navigation)),
        "goBack" => respond(navigation::commands::go_back(&state.navigation)),
        "goHome" => respond(navigation::commands::go_home(&state.navigation)),
        "getNavigationHistory" => {
            respond(navigation::commands::get_navigation_history(&state.navigation))
        }

        other => Err(AppError::ValidationError(format!("Unknown command: {}", other))),
    }
}

/// Missing arguments read as an empty object so commands whose fields all
/// have defaults can be sent without `args`.
fn parse<T: DeserializeOwned>(args: Value) -> AppResult<T> {
    let args = if args.is_null() {
        Value::Object(Map::new())
    } else {
        args
    };
    serde_json::from_value(args)
        .map_err(|e| AppError::ValidationError(format!("Invalid arguments: {}", e)))
}

fn respond<T: Serialize>(result: AppResult<T>) -> AppResult<Value> {
    let data = result?;
    serde_json::to_value(data)
        .map_err(|e| AppError::InternalError(format!("Failed to encode response: {}", e)))
}
