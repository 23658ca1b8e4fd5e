use regex::Regex;
use std::sync::LazyLock;

use crate::shared::domain::MediaKind;

static NUMBERED_LABEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?i:season|volume)\s+(\d+)$").expect("season label pattern compiles")
});

/// Season labels as stored in a title's ledger ("Season 1", "Season 2", ...).
///
/// Manga partitions display the same seasons as volumes, so labels coming
/// back from the presentation layer may say "Volume 3"; they are folded onto
/// the stored form before lookup.
pub struct SeasonLabel;

impl SeasonLabel {
    /// Label of the season at `index` (0-based).
    pub fn nth(index: usize) -> String {
        format!("Season {}", index + 1)
    }

    /// Stored form of a label: "volume 3" and "Season  3" both become
    /// "Season 3". Labels that are not numbered pass through trimmed.
    pub fn canonical(label: &str) -> String {
        let trimmed = label.trim();
        match Self::number(trimmed) {
            Some(n) => format!("Season {}", n),
            None => trimmed.to_string(),
        }
    }

    /// Label as the partition shows it.
    pub fn display(label: &str, kind: MediaKind) -> String {
        match Self::number(label.trim()) {
            Some(n) => format!("{} {}", kind.unit_label(), n),
            None => label.trim().to_string(),
        }
    }

    /// Season number of a numbered label.
    pub fn number(label: &str) -> Option<u32> {
        NUMBERED_LABEL
            .captures(label.trim())
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse().ok())
    }
}
