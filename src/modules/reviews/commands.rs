use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::application::service::ReviewService;
use super::domain::entities::ReviewRecord;
use crate::shared::domain::CatalogId;
use crate::shared::errors::AppResult;
use crate::log_debug;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaveReviewsRequest {
    pub catalog_id: CatalogId,
    pub reviews: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoadReviewsRequest {
    pub catalog_id: CatalogId,
    /// Sort newest first instead of stored order.
    #[serde(default)]
    pub newest_first: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitReviewRequest {
    pub catalog_id: CatalogId,
    pub rating: u8,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditReviewRequest {
    pub catalog_id: CatalogId,
    pub review_id: String,
    pub rating: u8,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteReviewRequest {
    pub catalog_id: CatalogId,
    pub review_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReviewsResponse {
    pub reviews: Vec<ReviewRecord>,
}

pub async fn save_reviews(request: SaveReviewsRequest, reviews: &ReviewService) -> AppResult<ReviewsResponse> {
    log_debug!(
        "save_reviews command called - catalog id: {}, {} entries",
        request.catalog_id,
        request.reviews.len()
    );
    let saved = reviews.save(&request.catalog_id, request.reviews).await?;
    Ok(ReviewsResponse { reviews: saved })
}

pub async fn load_reviews(request: LoadReviewsRequest, reviews: &ReviewService) -> AppResult<ReviewsResponse> {
    let mut loaded = reviews.load(&request.catalog_id).await;
    if request.newest_first {
        ReviewRecord::newest_first(&mut loaded);
    }
    Ok(ReviewsResponse { reviews: loaded })
}

pub async fn submit_review(request: SubmitReviewRequest, reviews: &ReviewService) -> AppResult<ReviewRecord> {
    reviews
        .submit(&request.catalog_id, request.rating, &request.text)
        .await
}

pub async fn edit_review(request: EditReviewRequest, reviews: &ReviewService) -> AppResult<ReviewRecord> {
    reviews
        .edit(&request.catalog_id, &request.review_id, request.rating, &request.text)
        .await
}

pub async fn delete_review(request: DeleteReviewRequest, reviews: &ReviewService) -> AppResult<()> {
    reviews.delete(&request.catalog_id, &request.review_id).await
}
