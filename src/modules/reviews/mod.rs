pub mod application;
pub mod commands;
pub mod domain;
pub mod infrastructure;

pub use application::ReviewService;
pub use domain::{ReviewBook, ReviewRecord, ReviewRepository};
pub use infrastructure::{InMemoryReviewRepository, JsonReviewRepository};
