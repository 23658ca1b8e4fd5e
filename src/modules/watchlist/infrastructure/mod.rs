pub mod persistence;

pub use persistence::{InMemoryWatchlistRepository, JsonWatchlistRepository};
