pub mod in_memory_review_repository;
pub mod json_review_repository;

pub use in_memory_review_repository::InMemoryReviewRepository;
pub use json_review_repository::JsonReviewRepository;
