use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One episode slot in a season.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Episode {
    #[serde(alias = "episodeNumber")]
    pub number: u32,
    #[serde(default)]
    pub watched: bool,
}

impl Episode {
    pub fn unwatched(number: u32) -> Self {
        Self {
            number,
            watched: false,
        }
    }
}

/// Which episodes of each season exist and which of them are watched.
///
/// The ledger holds the primitive facts a title's progress is derived from.
/// Reads are public; every write goes through the watchlist store so the
/// cached totals on the owning record are recomputed in the same step.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct EpisodeLedger {
    seasons: BTreeMap<String, Vec<Episode>>,
}

impl EpisodeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unwatched episodes `start..=end` filed under `season`.
    pub fn with_range(mut self, season: impl Into<String>, start: u32, end: u32) -> Self {
        let episodes = (start..=end).map(Episode::unwatched).collect();
        self.seasons.insert(season.into(), episodes);
        self
    }

    pub fn with_season(mut self, season: impl Into<String>, episodes: Vec<Episode>) -> Self {
        self.seasons.insert(season.into(), episodes);
        self
    }

    pub fn season(&self, season: &str) -> Option<&[Episode]> {
        self.seasons.get(season).map(Vec::as_slice)
    }

    pub fn season_labels(&self) -> impl Iterator<Item = &str> {
        self.seasons.keys().map(String::as_str)
    }

    pub fn episodes(&self) -> impl Iterator<Item = &Episode> {
        self.seasons.values().flatten()
    }

    pub fn is_empty(&self) -> bool {
        self.seasons.values().all(Vec::is_empty)
    }

    pub fn episode_count(&self) -> usize {
        self.seasons.values().map(Vec::len).sum()
    }

    /// Season an episode number is filed under, if any.
    pub fn season_of(&self, number: u32) -> Option<&str> {
        self.seasons
            .iter()
            .find(|(_, episodes)| episodes.iter().any(|e| e.number == number))
            .map(|(label, _)| label.as_str())
    }

    pub fn is_watched(&self, number: u32) -> bool {
        self.episodes().any(|e| e.number == number && e.watched)
    }

    /// Checks the partition invariant: walking `seasons` in order, episode
    /// numbers are contiguous, strictly increasing, and cover exactly
    /// `1..=total`. The ledger may not file episodes under other labels.
    pub fn check_partition(&self, seasons: &[String], total: u32) -> Result<(), String> {
        let known: HashSet<&str> = seasons.iter().map(String::as_str).collect();
        if let Some(stray) = self.season_labels().find(|label| !known.contains(label)) {
            return Err(format!("'{}' is not one of the title's seasons", stray));
        }

        let mut expected = 1u32;
        for season in seasons {
            for episode in self.season(season).unwrap_or_default() {
                if episode.number != expected {
                    return Err(format!(
                        "{} lists episode {} where episode {} was expected",
                        season, episode.number, expected
                    ));
                }
                expected += 1;
            }
        }

        if expected - 1 != total {
            return Err(format!(
                "Seasons cover {} episodes but the title has {}",
                expected - 1,
                total
            ));
        }
        Ok(())
    }

    /// Copies watched flags from `previous` onto episodes with the same
    /// number. Used when a title is re-partitioned.
    pub(crate) fn carry_watched_from(&mut self, previous: &EpisodeLedger) {
        let watched: HashSet<u32> = previous
            .episodes()
            .filter(|e| e.watched)
            .map(|e| e.number)
            .collect();

        for episode in self.seasons.values_mut().flatten() {
            if watched.contains(&episode.number) {
                episode.watched = true;
            }
        }
    }

    /// Marks one episode. A missing season list is created, and a missing
    /// episode is inserted in number order. Returns whether anything changed.
    pub(crate) fn set_watched(&mut self, season: &str, number: u32, watched: bool) -> bool {
        let episodes = self.seasons.entry(season.to_string()).or_default();

        match episodes.binary_search_by_key(&number, |e| e.number) {
            Ok(index) => {
                let changed = episodes[index].watched != watched;
                episodes[index].watched = watched;
                changed
            }
            Err(_) if episodes.iter().any(|e| e.number == number) => {
                // Out-of-order legacy list: fall back to a linear scan.
                let mut changed = false;
                for episode in episodes.iter_mut().filter(|e| e.number == number) {
                    changed |= episode.watched != watched;
                    episode.watched = watched;
                }
                changed
            }
            Err(index) => {
                episodes.insert(index, Episode { number, watched });
                true
            }
        }
    }

    /// Sets every episode of `season` numbered `<= up_to`. Returns how many
    /// episodes changed, or `None` when the season has no episode list.
    pub(crate) fn set_watched_through(
        &mut self,
        season: &str,
        up_to: u32,
        watched: bool,
    ) -> Option<usize> {
        let episodes = self.seasons.get_mut(season)?;
        let mut changed = 0;
        for episode in episodes.iter_mut().filter(|e| e.number <= up_to) {
            if episode.watched != watched {
                episode.watched = watched;
                changed += 1;
            }
        }
        Some(changed)
    }
}
