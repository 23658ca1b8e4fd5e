use crate::shared::errors::AppError;

pub struct Validator;

impl Validator {
    pub const MIN_RATING: u8 = 1;
    pub const MAX_RATING: u8 = 5;
    /// Longest series a title may track. Every episode gets a ledger entry
    /// and the whole watchlist is rewritten on each change.
    pub const MAX_EPISODES: u32 = 10_000;

    pub fn validate_title(title: &str) -> Result<(), AppError> {
        if title.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Title is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_rating(rating: u8) -> Result<(), AppError> {
        if !(Self::MIN_RATING..=Self::MAX_RATING).contains(&rating) {
            return Err(AppError::ValidationError(format!(
                "Rating must be between {} and {}",
                Self::MIN_RATING,
                Self::MAX_RATING
            )));
        }
        Ok(())
    }

    pub fn validate_review_text(text: &str) -> Result<(), AppError> {
        if text.is_empty() {
            return Err(AppError::ValidationError(
                "Review text cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_catalog_id(catalog_id: &str) -> Result<(), AppError> {
        if catalog_id.trim().is_empty() {
            return Err(AppError::ValidationError(
                "Catalog id is required".to_string(),
            ));
        }
        Ok(())
    }

    pub fn validate_page(page: &str) -> Result<(), AppError> {
        if page.trim().is_empty() {
            return Err(AppError::ValidationError("Page is required".to_string()));
        }
        Ok(())
    }

    pub fn validate_episode_number(episode_number: u32) -> Result<(), AppError> {
        if episode_number == 0 {
            return Err(AppError::ValidationError(
                "Episode numbers start at 1".to_string(),
            ));
        }
        if episode_number > Self::MAX_EPISODES {
            return Err(AppError::ValidationError(format!(
                "Episode numbers stop at {}",
                Self::MAX_EPISODES
            )));
        }
        Ok(())
    }

    pub fn validate_total_episodes(total: u32) -> Result<(), AppError> {
        if total > Self::MAX_EPISODES {
            return Err(AppError::ValidationError(format!(
                "A title can have at most {} episodes, got {}",
                Self::MAX_EPISODES,
                total
            )));
        }
        Ok(())
    }
}
