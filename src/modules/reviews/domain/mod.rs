pub mod entities;
pub mod repositories;

pub use entities::{ReviewBook, ReviewRecord};
pub use repositories::ReviewRepository;
