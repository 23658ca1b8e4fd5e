// Shared Kernel
// Cross-cutting pieces every bounded context builds on.

pub mod config; // Environment-driven configuration
pub mod domain; // Shared domain concepts (value objects)
pub mod errors; // Shared error types
pub mod infrastructure; // Shared infrastructure (JSON documents on disk)
pub mod utils; // Shared utilities (logging, validation)

// Re-exports for convenience
pub use config::{AppConfig, ReorderPolicy};
pub use errors::{AppError, AppResult};
pub use infrastructure::JsonDocumentFile;
