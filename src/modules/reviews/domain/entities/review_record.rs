use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::cmp::Reverse;
use uuid::Uuid;

use crate::shared::errors::AppResult;
use crate::shared::utils::Validator;

/// A user-authored review of one catalog title.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRecord {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    pub rating: u8,
    pub text: String,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ReviewRecord {
    pub fn new(rating: u8, text: &str, now: DateTime<Utc>) -> AppResult<Self> {
        let text = text.trim();
        Validator::validate_rating(rating)?;
        Validator::validate_review_text(text)?;

        Ok(Self {
            id: Uuid::new_v4().to_string(),
            rating,
            text: text.to_string(),
            created_at: Some(now),
            updated_at: Some(now),
            extra: Map::new(),
        })
    }

    /// Rewrites rating and text, keeping `id` and `createdAt`.
    pub(crate) fn revise(&mut self, rating: u8, text: &str, now: DateTime<Utc>) -> AppResult<()> {
        let text = text.trim();
        Validator::validate_rating(rating)?;
        Validator::validate_review_text(text)?;

        self.rating = rating;
        self.text = text.to_string();
        self.updated_at = Some(now);
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty()
            && Validator::validate_rating(self.rating).is_ok()
            && Validator::validate_review_text(&self.text).is_ok()
    }

    /// Parses one submitted entry; `None` for anything that isn't a
    /// complete review.
    pub fn from_entry(entry: Value) -> Option<Self> {
        if !entry.is_object() {
            return None;
        }
        serde_json::from_value::<ReviewRecord>(entry)
            .ok()
            .filter(ReviewRecord::is_valid)
    }

    /// Keeps the complete reviews of `entries` in their given order.
    pub fn retain_valid(entries: Vec<Value>) -> Vec<Self> {
        entries.into_iter().filter_map(Self::from_entry).collect()
    }

    /// Most recent first; reviews without a creation time go last.
    pub fn newest_first(reviews: &mut [ReviewRecord]) {
        reviews.sort_by_key(|r| Reverse(r.created_at));
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

/// Timestamps that don't parse are dropped instead of rejecting the review.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(Value::as_str)
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc)))
}
