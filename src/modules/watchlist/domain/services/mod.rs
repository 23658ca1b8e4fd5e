pub mod display_order;
pub mod progress_aggregator;
pub mod season_partitioner;

pub use display_order::DisplayOrder;
pub use progress_aggregator::{Progress, ProgressAggregator};
pub use season_partitioner::{SeasonLayout, SeasonPartitioner};
