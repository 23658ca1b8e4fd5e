pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{AddOutcome, ReorderOutcome, WatchlistService};
pub use domain::{
    DisplayOrder, EpisodeCount, EpisodeLedger, SeasonLabel, SeasonPartitioner, TitleDraft,
    TitleRecord, WatchlistRepository,
};
pub use infrastructure::{InMemoryWatchlistRepository, JsonWatchlistRepository};
