use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::modules::watchlist::domain::value_objects::EpisodeCount;
use crate::shared::domain::{CatalogId, MediaKind};

/// One search hit from the external catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogSummary {
    pub catalog_id: CatalogId,
    pub title: String,
    #[serde(default)]
    pub kind: MediaKind,
    #[serde(default)]
    pub total_episodes: EpisodeCount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

/// The full catalog entry for one title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDetail {
    pub catalog_id: CatalogId,
    pub title: String,
    #[serde(default)]
    pub kind: MediaKind,
    #[serde(default)]
    pub total_episodes: EpisodeCount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub synopsis: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Catalog fields the watchlist doesn't interpret (rank, aired, ...).
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl CatalogDetail {
    pub fn summary(&self) -> CatalogSummary {
        CatalogSummary {
            catalog_id: self.catalog_id.clone(),
            title: self.title.clone(),
            kind: self.kind,
            total_episodes: self.total_episodes,
            image_url: self.image_url.clone(),
            score: self.score,
        }
    }
}
