use thiserror::Error;

/// Failure kinds surfaced by the issue repository.
///
/// None of these are fatal: the caller keeps its previous state and shows the
/// message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("not signed in")]
    Unauthenticated,

    #[error("{0}")]
    Validation(String),

    #[error("photo upload failed: {0}")]
    UploadFailed(String),

    #[error("issue store unavailable: {0}")]
    BackendUnavailable(String),

    #[error("no issue with id {0}")]
    NotFound(String),
}

impl RepositoryError {
    /// Short machine-readable kind, for logs and JSON error output.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "unauthenticated",
            Self::Validation(_) => "validation",
            Self::UploadFailed(_) => "upload_failed",
            Self::BackendUnavailable(_) => "backend_unavailable",
            Self::NotFound(_) => "not_found",
        }
    }
}
