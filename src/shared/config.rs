use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::log_warn;

pub const WATCHLIST_FILE: &str = "watchlist.json";
pub const REVIEWS_FILE: &str = "reviews.json";

const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_CATALOG_CACHE_TTL_SECS: u64 = 300;

/// What `reorder` does with titles the caller did not name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReorderPolicy {
    /// Unnamed titles are removed from the watchlist.
    #[default]
    DropUnnamed,
    /// Unnamed titles keep their relative order after the named ones.
    AppendUnnamed,
}

impl FromStr for ReorderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drop" | "drop_unnamed" => Ok(ReorderPolicy::DropUnnamed),
            "append" | "append_unnamed" => Ok(ReorderPolicy::AppendUnnamed),
            other => Err(format!("Unknown reorder policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub reorder_policy: ReorderPolicy,
    pub catalog_cache_ttl: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            reorder_policy: ReorderPolicy::default(),
            catalog_cache_ttl: Duration::from_secs(DEFAULT_CATALOG_CACHE_TTL_SECS),
        }
    }
}

impl AppConfig {
    /// Build configuration from the process environment (after `.env` has
    /// been loaded). Unparseable values fall back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let data_dir = env::var("SHIORI_DATA_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.data_dir);

        let reorder_policy = match env::var("SHIORI_REORDER_POLICY") {
            Ok(raw) => raw.parse().unwrap_or_else(|e| {
                log_warn!("{}, using default", e);
                defaults.reorder_policy
            }),
            Err(_) => defaults.reorder_policy,
        };

        let catalog_cache_ttl = match env::var("SHIORI_CATALOG_CACHE_TTL_SECS") {
            Ok(raw) => raw.parse::<u64>().map(Duration::from_secs).unwrap_or_else(|_| {
                log_warn!("Invalid SHIORI_CATALOG_CACHE_TTL_SECS '{}', using default", raw);
                defaults.catalog_cache_ttl
            }),
            Err(_) => defaults.catalog_cache_ttl,
        };

        Self {
            data_dir,
            reorder_policy,
            catalog_cache_ttl,
        }
    }

    pub fn with_data_dir(mut self, data_dir: impl Into<PathBuf>) -> Self {
        self.data_dir = data_dir.into();
        self
    }

    pub fn with_reorder_policy(mut self, policy: ReorderPolicy) -> Self {
        self.reorder_policy = policy;
        self
    }

    pub fn watchlist_path(&self) -> PathBuf {
        self.data_dir.join(WATCHLIST_FILE)
    }

    pub fn reviews_path(&self) -> PathBuf {
        self.data_dir.join(REVIEWS_FILE)
    }
}
