//! # site-storage
//!
//! Photo uploads for sitelog issues over `object_store` (local filesystem,
//! in-memory, or S3-compatible buckets).

pub mod error;
pub mod naming;
pub mod photo;
pub mod store;

pub use error::StorageError;
pub use photo::Photo;
pub use store::{PhotoStorage, PhotoStore};
