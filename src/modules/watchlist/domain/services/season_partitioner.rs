use crate::modules::watchlist::domain::{
    entities::episode_ledger::EpisodeLedger,
    value_objects::{EpisodeCount, SeasonLabel},
};

/// Seasons and a fresh ledger for a title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonLayout {
    pub seasons: Vec<String>,
    pub ledger: EpisodeLedger,
}

/// Splits a total episode count into seasons the way broadcast cours usually
/// run: one cour up to 13 episodes, two up to 26, four up to 52, and 13-ish
/// episode seasons beyond that.
///
/// Pure and deterministic: the same count always yields the same layout, so
/// a stored ledger can be checked against a fresh partition.
pub struct SeasonPartitioner;

impl SeasonPartitioner {
    /// Nominal episodes per season for long-running series.
    pub const SEASON_LENGTH: u32 = 13;
    /// Size of the placeholder ledger handed out for unknown counts.
    pub const PLACEHOLDER_EPISODES: u32 = 12;

    pub fn season_count(total: u32) -> u32 {
        match total {
            0..=13 => 1,
            14..=26 => 2,
            27..=52 => 4,
            n => n.div_ceil(Self::SEASON_LENGTH),
        }
    }

    pub fn partition(total: EpisodeCount) -> SeasonLayout {
        match total {
            EpisodeCount::Known(count) => Self::partition_known(count),
            // Never shown: unknown-length titles are tracked through the
            // free-text custom fields instead.
            EpisodeCount::Unknown => SeasonLayout {
                seasons: vec![SeasonLabel::nth(0)],
                ledger: EpisodeLedger::new().with_range(
                    SeasonLabel::nth(0),
                    1,
                    Self::PLACEHOLDER_EPISODES,
                ),
            },
        }
    }

    fn partition_known(count: u32) -> SeasonLayout {
        let season_count = Self::season_count(count);
        let per_season = count.div_ceil(season_count);

        let mut seasons = Vec::with_capacity(season_count as usize);
        let mut ledger = EpisodeLedger::new();

        for index in 0..season_count {
            let start = index.saturating_mul(per_season).saturating_add(1);
            if start > count {
                break;
            }
            let end = (index + 1).saturating_mul(per_season).min(count);
            let label = SeasonLabel::nth(index as usize);
            ledger = ledger.with_range(label.clone(), start, end);
            seasons.push(label);
        }

        SeasonLayout { seasons, ledger }
    }
}
