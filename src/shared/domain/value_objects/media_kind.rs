use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two partitions a watchlist is split into.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// Records saved without a kind are anime.
    #[default]
    Anime,
    Manga,
}

impl MediaKind {
    /// What a season is called in this partition.
    pub fn unit_label(&self) -> &'static str {
        match self {
            MediaKind::Anime => "Season",
            MediaKind::Manga => "Volume",
        }
    }

    /// What an episode is called in this partition.
    pub fn item_label(&self) -> &'static str {
        match self {
            MediaKind::Anime => "Episodes",
            MediaKind::Manga => "Chapters",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MediaKind::Anime => "anime",
            MediaKind::Manga => "manga",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "anime" => Ok(MediaKind::Anime),
            "manga" => Ok(MediaKind::Manga),
            other => Err(format!("Unknown media kind: {}", other)),
        }
    }
}
