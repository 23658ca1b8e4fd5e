use crate::modules::watchlist::domain::entities::title_record::TitleRecord;
use crate::shared::domain::MediaKind;

/// Ordering of the watchlist as the presentation layer shows it.
pub struct DisplayOrder;

impl DisplayOrder {
    /// Titles still in progress first, then finished ones; by `order`
    /// within each group. Ties keep their stored position.
    pub fn sort(records: &mut [TitleRecord]) {
        records.sort_by_key(|record| (record.is_completed(), record.order()));
    }

    /// Splits the watchlist into its anime and manga shelves, each sorted
    /// for display.
    pub fn partition_by_kind(records: Vec<TitleRecord>) -> (Vec<TitleRecord>, Vec<TitleRecord>) {
        let (mut anime, mut manga): (Vec<_>, Vec<_>) = records
            .into_iter()
            .partition(|record| record.kind() == MediaKind::Anime);
        Self::sort(&mut anime);
        Self::sort(&mut manga);
        (anime, manga)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::watchlist::domain::{entities::title_record::TitleDraft, value_objects::EpisodeCount};
    use chrono::Utc;

    fn record(title: &str, kind: MediaKind, order: i64, total: u32, watch_all: bool) -> TitleRecord {
        let draft = TitleDraft::new(title)
            .with_kind(kind)
            .with_order(order)
            .with_total_episodes(EpisodeCount::Known(total));
        let mut record = TitleRecord::from_draft(draft, Utc::now()).unwrap();
        if watch_all {
            for season in record.seasons().to_vec() {
                record
                    .set_episodes_watched_through(&season, total, true, Utc::now())
                    .unwrap();
            }
        }
        record
    }

    #[test]
    fn completed_titles_sink_below_in_progress_ones() {
        let mut records = vec![
            record("Done", MediaKind::Anime, 0, 12, true),
            record("Later", MediaKind::Anime, 2, 12, false),
            record("Sooner", MediaKind::Anime, 1, 12, false),
        ];

        DisplayOrder::sort(&mut records);

        let titles: Vec<&str> = records.iter().map(TitleRecord::title).collect();
        assert_eq!(titles, vec!["Sooner", "Later", "Done"]);
    }

    #[test]
    fn shelves_are_split_by_kind() {
        let records = vec![
            record("Berserk", MediaKind::Manga, 0, 10, false),
            record("Trigun", MediaKind::Anime, 0, 26, false),
        ];

        let (anime, manga) = DisplayOrder::partition_by_kind(records);
        assert_eq!(anime.len(), 1);
        assert_eq!(manga[0].title(), "Berserk");
    }
}
