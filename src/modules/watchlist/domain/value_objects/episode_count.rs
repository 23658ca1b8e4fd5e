use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;
use std::fmt;

const UNKNOWN: &str = "Unknown";

/// Total number of episodes (or chapters) of a title.
///
/// Catalogs report airing series without a count, so the total is either a
/// positive number or unknown. On disk the unknown case is the string
/// `"Unknown"`; numeric strings such as `"24"` are accepted on input, and a
/// count of zero is treated as unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EpisodeCount {
    Known(u32),
    #[default]
    Unknown,
}

impl EpisodeCount {
    pub fn new(count: u32) -> Self {
        if count == 0 {
            EpisodeCount::Unknown
        } else {
            EpisodeCount::Known(count)
        }
    }

    pub fn known(&self) -> Option<u32> {
        match self {
            EpisodeCount::Known(n) => Some(*n),
            EpisodeCount::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, EpisodeCount::Known(_))
    }

    /// Lenient interpretation of whatever a catalog or an older document
    /// stored in the episode count slot.
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::Number(n) => n
                .as_u64()
                .or_else(|| n.as_f64().filter(|f| *f >= 0.0).map(|f| f.trunc() as u64))
                .and_then(|n| u32::try_from(n).ok())
                .map(Self::new)
                .unwrap_or(EpisodeCount::Unknown),
            Value::String(s) => Self::parse_leading_digits(s),
            _ => EpisodeCount::Unknown,
        }
    }

    fn parse_leading_digits(raw: &str) -> Self {
        let digits: String = raw
            .trim()
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits
            .parse::<u32>()
            .map(Self::new)
            .unwrap_or(EpisodeCount::Unknown)
    }
}

impl From<Option<u32>> for EpisodeCount {
    fn from(count: Option<u32>) -> Self {
        count.map(Self::new).unwrap_or(EpisodeCount::Unknown)
    }
}

impl fmt::Display for EpisodeCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EpisodeCount::Known(n) => write!(f, "{}", n),
            EpisodeCount::Unknown => f.write_str(UNKNOWN),
        }
    }
}

impl Serialize for EpisodeCount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            EpisodeCount::Known(n) => serializer.serialize_u32(*n),
            EpisodeCount::Unknown => serializer.serialize_str(UNKNOWN),
        }
    }
}

impl<'de> Deserialize<'de> for EpisodeCount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}
