use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("photo storage is not configured: {0}")]
    NotConfigured(String),

    #[error("photo is empty: {0}")]
    EmptyPhoto(String),

    #[error("invalid object path: {0}")]
    InvalidPath(String),

    #[error("URL is not served by this photo store: {0}")]
    ForeignUrl(String),

    #[error("random name generation failed: {0}")]
    Random(String),

    #[error("object store error: {0}")]
    ObjectStore(#[from] object_store::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
