/// Test data factories using builder pattern
///
/// Provides convenient methods to create add requests and raw review entries
/// with sensible defaults
use serde_json::{json, Value};
use shiori_lib::modules::watchlist::{EpisodeCount, TitleDraft};
use shiori_lib::shared::domain::MediaKind;

pub struct TitleFactory {
    draft: TitleDraft,
}

impl TitleFactory {
    pub fn anime(title: &str) -> Self {
        Self {
            draft: TitleDraft::new(title).with_kind(MediaKind::Anime),
        }
    }

    pub fn manga(title: &str) -> Self {
        Self {
            draft: TitleDraft::new(title).with_kind(MediaKind::Manga),
        }
    }

    pub fn episodes(mut self, total: u32) -> Self {
        self.draft = self.draft.with_total_episodes(EpisodeCount::new(total));
        self
    }

    pub fn order(mut self, order: i64) -> Self {
        self.draft = self.draft.with_order(order);
        self
    }

    pub fn notes(mut self, notes: &str) -> Self {
        self.draft = self.draft.with_notes(notes);
        self
    }

    pub fn catalog_id(mut self, id: u64) -> Self {
        self.draft = self.draft.with_catalog_id(id);
        self
    }

    pub fn extra(mut self, key: &str, value: Value) -> Self {
        self.draft = self.draft.with_extra(key, value);
        self
    }

    pub fn build(self) -> TitleDraft {
        self.draft
    }
}

pub fn review_entry(id: &str, rating: u8, text: &str) -> Value {
    json!({
        "id": id,
        "rating": rating,
        "text": text,
        "createdAt": "2024-03-01T12:00:00Z",
        "updatedAt": "2024-03-01T12:00:00Z"
    })
}
