use serde::Serialize;

use crate::modules::watchlist::domain::{
    entities::episode_ledger::EpisodeLedger, value_objects::EpisodeCount,
};

/// Derived progress of one title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    pub watched_episodes: u32,
    pub is_completed: bool,
}

/// Recomputes watched totals from a ledger. Always counts every season of
/// the title, never just the one that was touched.
pub struct ProgressAggregator;

impl ProgressAggregator {
    pub fn watched_count(ledger: &EpisodeLedger) -> u32 {
        ledger.episodes().filter(|e| e.watched).count() as u32
    }

    /// `explicit_completed` only matters when the total is unknown: a count
    /// can't prove completion there, so the flag the user set stands.
    pub fn aggregate(ledger: &EpisodeLedger, total: EpisodeCount, explicit_completed: bool) -> Progress {
        let watched_episodes = Self::watched_count(ledger);
        let is_completed = match total {
            EpisodeCount::Known(total) => watched_episodes >= total,
            EpisodeCount::Unknown => explicit_completed,
        };

        Progress {
            watched_episodes,
            is_completed,
        }
    }

    /// Whole-number percentage watched; 0 when the total is unknown.
    pub fn percentage(watched: u32, total: EpisodeCount) -> u8 {
        match total {
            EpisodeCount::Known(total) if total > 0 => {
                let pct = (f64::from(watched) / f64::from(total) * 100.0).round();
                pct.min(100.0) as u8
            }
            _ => 0,
        }
    }
}
