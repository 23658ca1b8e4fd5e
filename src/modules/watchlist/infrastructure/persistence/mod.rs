pub mod in_memory_watchlist_repository;
pub mod json_watchlist_repository;

pub use in_memory_watchlist_repository::InMemoryWatchlistRepository;
pub use json_watchlist_repository::JsonWatchlistRepository;
