/// Shared infrastructure concerns
///
/// This module contains infrastructure implementations that are shared across
/// multiple bounded contexts (modules).
pub mod json_file;

// Re-exports for convenience
pub use json_file::JsonDocumentFile;
