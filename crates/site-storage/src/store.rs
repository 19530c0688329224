//! `object_store`-backed photo storage.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use object_store::aws::AmazonS3Builder;
use object_store::local::LocalFileSystem;
use object_store::memory::InMemory;
use object_store::path::Path as ObjectPath;
use object_store::{Attribute, Attributes, ObjectStore, PutOptions, PutPayload};
use site_config::{PhotoBackend, PhotosConfig};

use crate::error::StorageError;
use crate::naming::object_name;
use crate::photo::Photo;

/// Base URL reported for the in-memory backend.
pub const MEMORY_BASE_URL: &str = "memory://photos";

/// Upload target for issue photos.
#[async_trait]
pub trait PhotoStorage: Send + Sync {
    /// Upload `photo` and return its durable retrieval URL.
    async fn upload(&self, photo: &Photo, submitted_at: DateTime<Utc>)
    -> Result<String, StorageError>;
}

/// Photo store over any `ObjectStore` backend.
///
/// Retrieval URLs are `{public_base_url}/{object path}`.
#[derive(Debug, Clone)]
pub struct PhotoStore {
    store: Arc<dyn ObjectStore>,
    public_base_url: String,
    prefix: String,
    content_type_attributes: bool,
}

impl PhotoStore {
    /// Build the store described by `[photos]` config.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotConfigured` if the backend is missing required
    /// fields, or a backend error if it cannot be constructed.
    pub fn from_config(config: &PhotosConfig) -> Result<Self, StorageError> {
        if !config.is_configured() {
            return Err(StorageError::NotConfigured(format!(
                "{:?} backend needs more settings under [photos]",
                config.backend
            )));
        }
        let mut photos = match config.backend {
            PhotoBackend::Memory => Self::in_memory(&config.prefix),
            PhotoBackend::Local => Self::local(&config.root, &config.prefix)?,
            PhotoBackend::S3 => {
                let mut builder = AmazonS3Builder::new()
                    .with_bucket_name(&config.bucket_name)
                    .with_region(&config.region)
                    .with_access_key_id(&config.access_key_id)
                    .with_secret_access_key(&config.secret_access_key);
                if !config.endpoint.is_empty() {
                    builder = builder
                        .with_endpoint(&config.endpoint)
                        .with_allow_http(config.endpoint.starts_with("http://"));
                }
                let store = builder.build()?;
                let mut photos = Self::new(Arc::new(store), config.s3_base_url(), &config.prefix);
                photos.content_type_attributes = true;
                photos
            }
        };
        if !config.public_base_url.is_empty() {
            photos.public_base_url = config.public_base_url.trim_end_matches('/').to_string();
        }
        Ok(photos)
    }

    #[must_use]
    pub fn new(store: Arc<dyn ObjectStore>, public_base_url: impl Into<String>, prefix: &str) -> Self {
        Self {
            store,
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
            prefix: prefix.trim_matches('/').to_string(),
            content_type_attributes: false,
        }
    }

    /// Process-local store; URLs use [`MEMORY_BASE_URL`].
    #[must_use]
    pub fn in_memory(prefix: &str) -> Self {
        Self::new(Arc::new(InMemory::new()), MEMORY_BASE_URL, prefix)
    }

    /// Filesystem store rooted at `root` (created if missing); URLs are
    /// `file://` URLs of the stored files.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the root cannot be created or resolved.
    pub fn local(root: &str, prefix: &str) -> Result<Self, StorageError> {
        std::fs::create_dir_all(root)?;
        let root = std::fs::canonicalize(root)?;
        let store = LocalFileSystem::new_with_prefix(&root)?;
        let base = format!("file://{}", root.display());
        Ok(Self::new(Arc::new(store), base, prefix))
    }

    #[must_use]
    pub fn public_base_url(&self) -> &str {
        &self.public_base_url
    }

    #[must_use]
    pub fn url_for(&self, path: &ObjectPath) -> String {
        format!("{}/{path}", self.public_base_url)
    }

    /// Map a retrieval URL back to its object path.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ForeignUrl` if the URL is not under this store's
    /// base URL.
    pub fn resolve(&self, url: &str) -> Result<ObjectPath, StorageError> {
        let rest = url
            .strip_prefix(&self.public_base_url)
            .and_then(|r| r.strip_prefix('/'))
            .ok_or_else(|| StorageError::ForeignUrl(url.to_string()))?;
        ObjectPath::parse(rest).map_err(|e| StorageError::InvalidPath(e.to_string()))
    }

    /// Download the object behind a retrieval URL.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::ForeignUrl` for URLs of another store, or an
    /// object store error if the object is missing.
    pub async fn fetch(&self, url: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.resolve(url)?;
        let bytes = self.store.get(&path).await?.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl PhotoStorage for PhotoStore {
    async fn upload(
        &self,
        photo: &Photo,
        submitted_at: DateTime<Utc>,
    ) -> Result<String, StorageError> {
        if photo.is_empty() {
            return Err(StorageError::EmptyPhoto(photo.file_name.clone()));
        }
        let name = object_name(&self.prefix, submitted_at, &photo.file_name)?;
        let path = ObjectPath::parse(&name).map_err(|e| StorageError::InvalidPath(e.to_string()))?;

        let mut options = PutOptions::default();
        if self.content_type_attributes
            && let Some(content_type) = &photo.content_type
        {
            let mut attributes = Attributes::new();
            attributes.insert(Attribute::ContentType, content_type.clone().into());
            options.attributes = attributes;
        }

        self.store
            .put_opts(&path, PutPayload::from(photo.bytes.clone()), options)
            .await?;

        let url = self.url_for(&path);
        tracing::info!(%url, size = photo.len(), "uploaded photo");
        Ok(url)
    }
}
