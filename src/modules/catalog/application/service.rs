use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::{info, warn};

use super::super::domain::{
    entities::{CatalogDetail, CatalogSummary},
    repositories::CatalogRepository,
};
use crate::modules::watchlist::domain::entities::TitleDraft;
use crate::shared::domain::{CatalogId, MediaKind};

/// A catalog answer. Failures never propagate: `data` falls back to its
/// empty value and `error` carries a message the presentation layer can show.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogOutcome<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> CatalogOutcome<T> {
    fn ok(data: T) -> Self {
        Self { data, error: None }
    }

    fn degraded(data: T, error: String) -> Self {
        Self {
            data,
            error: Some(error),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

pub struct CatalogService {
    repository: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn CatalogRepository>) -> Self {
        Self { repository }
    }

    pub async fn search(&self, query: &str, kind: MediaKind) -> CatalogOutcome<Vec<CatalogSummary>> {
        let query = query.trim();
        if query.is_empty() {
            return CatalogOutcome::ok(Vec::new());
        }

        match self.repository.search(query, kind).await {
            Ok(results) => {
                info!("Catalog search '{}' ({}) returned {} result(s)", query, kind, results.len());
                CatalogOutcome::ok(results)
            }
            Err(e) => {
                warn!("Catalog search '{}' ({}) failed: {}", query, kind, e);
                CatalogOutcome::degraded(Vec::new(), e.to_string())
            }
        }
    }

    pub async fn details(&self, id: &CatalogId, kind: MediaKind) -> CatalogOutcome<Option<CatalogDetail>> {
        match self.repository.details(id, kind).await {
            Ok(detail) => CatalogOutcome::ok(detail),
            Err(e) => {
                warn!("Catalog details for {} ({}) failed: {}", id, kind, e);
                CatalogOutcome::degraded(None, e.to_string())
            }
        }
    }

    /// The add request for a catalog entry. Seasons and the episode ledger
    /// are left out so the watchlist derives them from the episode count.
    pub fn draft_from_detail(detail: CatalogDetail) -> TitleDraft {
        let mut draft = TitleDraft::new(detail.title)
            .with_kind(detail.kind)
            .with_catalog_id(detail.catalog_id)
            .with_total_episodes(detail.total_episodes);

        draft.extra = detail.extra;
        if let Some(image_url) = detail.image_url {
            draft.extra.insert("imageUrl".to_string(), Value::String(image_url));
        }
        if let Some(score) = detail.score {
            draft.extra.insert("score".to_string(), score.into());
        }
        if let Some(synopsis) = detail.synopsis {
            draft.extra.insert("synopsis".to_string(), Value::String(synopsis));
        }
        if let Some(status) = detail.status {
            draft.extra.insert("status".to_string(), Value::String(status));
        }
        if !detail.genres.is_empty() {
            draft.extra.insert("genres".to_string(), detail.genres.into());
        }
        draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::watchlist::domain::value_objects::EpisodeCount;
    use crate::shared::errors::{AppError, AppResult};
    use async_trait::async_trait;
    use serde_json::{json, Map};

    struct OfflineCatalog;

    #[async_trait]
    impl CatalogRepository for OfflineCatalog {
        async fn search(&self, _query: &str, _kind: MediaKind) -> AppResult<Vec<CatalogSummary>> {
            Err(AppError::ExternalServiceError("HTTP 503".to_string()))
        }

        async fn details(&self, _id: &CatalogId, _kind: MediaKind) -> AppResult<Option<CatalogDetail>> {
            Err(AppError::ExternalServiceError("HTTP 503".to_string()))
        }
    }

    #[tokio::test]
    async fn failures_degrade_to_empty_with_message() {
        let service = CatalogService::new(Arc::new(OfflineCatalog));

        let search = service.search("Trigun", MediaKind::Anime).await;
        assert!(search.data.is_empty());
        assert!(search.error.unwrap().contains("HTTP 503"));

        let details = service.details(&CatalogId::from(6u64), MediaKind::Anime).await;
        assert!(details.data.is_none());
        assert!(details.is_degraded());
    }

    #[tokio::test]
    async fn blank_query_skips_the_catalog() {
        let service = CatalogService::new(Arc::new(OfflineCatalog));
        let outcome = service.search("   ", MediaKind::Manga).await;
        assert_eq!(outcome, CatalogOutcome::ok(Vec::new()));
    }

    #[test]
    fn draft_carries_catalog_metadata() {
        let mut extra = Map::new();
        extra.insert("rank".to_string(), json!(12));
        let detail = CatalogDetail {
            catalog_id: CatalogId::from(6u64),
            title: "Trigun".to_string(),
            kind: MediaKind::Anime,
            total_episodes: EpisodeCount::Known(26),
            image_url: Some("https://example.org/trigun.jpg".to_string()),
            score: Some(8.2),
            synopsis: None,
            status: Some("Finished Airing".to_string()),
            genres: vec!["Action".to_string()],
            extra,
        };

        let draft = CatalogService::draft_from_detail(detail);

        assert_eq!(draft.title, "Trigun");
        assert_eq!(draft.total_episodes, Some(EpisodeCount::Known(26)));
        assert_eq!(draft.extra["rank"], json!(12));
        assert_eq!(draft.extra["genres"], json!(["Action"]));
        assert!(draft.season_episodes.is_none());
    }
}
