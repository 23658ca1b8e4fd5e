pub mod episode_count;
pub mod season_label;

pub use episode_count::EpisodeCount;
pub use season_label::SeasonLabel;
