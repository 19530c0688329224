use thiserror::Error;

/// Errors from the issue store.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("issue query failed: {0}")]
    Query(String),

    #[error("schema migration failed: {0}")]
    Migration(String),

    /// A lookup or insert produced no row.
    #[error("no row returned")]
    NoResult,

    /// Stored data could not be decoded, or a draft was rejected before insert.
    #[error("invalid issue data: {0}")]
    InvalidState(String),

    #[error(transparent)]
    LibSql(#[from] libsql::Error),
}
