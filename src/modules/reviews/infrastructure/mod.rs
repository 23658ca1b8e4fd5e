pub mod persistence;

pub use persistence::{InMemoryReviewRepository, JsonReviewRepository};
