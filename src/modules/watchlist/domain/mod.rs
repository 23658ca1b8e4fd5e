pub mod entities;
pub mod repositories;
pub mod services;
pub mod value_objects;

// Re-exports for easy access
pub use entities::{Episode, EpisodeLedger, TitleDraft, TitleRecord};
pub use repositories::WatchlistRepository;
pub use services::{DisplayOrder, Progress, ProgressAggregator, SeasonLayout, SeasonPartitioner};
pub use value_objects::{EpisodeCount, SeasonLabel};
