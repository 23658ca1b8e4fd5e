use serde::{Deserialize, Serialize};

use super::application::service::CatalogService;
use super::domain::entities::CatalogDetail;
use crate::modules::watchlist::{
    application::service::WatchlistService, commands::AddOrUpdateTitleResponse,
};
use crate::shared::errors::AppResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFromCatalogRequest {
    pub detail: CatalogDetail,
}

/// Adds (or refreshes) a watchlist title from a catalog entry the
/// presentation layer already fetched.
pub async fn add_from_catalog_detail(
    request: AddFromCatalogRequest,
    watchlist: &WatchlistService,
) -> AppResult<AddOrUpdateTitleResponse> {
    let draft = CatalogService::draft_from_detail(request.detail);
    Ok(watchlist.add(draft).await?.into())
}
