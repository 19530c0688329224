//! Cross-cutting error types for sitelog.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `StorageError`) are defined in
//! their respective crates. They converge in `site-dashboard` (as
//! `RepositoryError`) and finally in `site-cli` through `anyhow`.

use thiserror::Error;

/// Errors that can be raised by any sitelog crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A required field was empty or otherwise unusable.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A value could not be parsed into one of the known variants.
    #[error("Unknown {field} '{value}'")]
    UnknownVariant { field: String, value: String },
}
