//! Photo object storage configuration.

use serde::{Deserialize, Serialize};

/// Which object store backs photo uploads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PhotoBackend {
    /// Files under `root` on the local filesystem.
    #[default]
    Local,
    /// Process-local memory; uploads vanish on exit.
    Memory,
    /// S3-compatible bucket (AWS S3, Cloudflare R2, MinIO).
    S3,
}

fn default_root() -> String {
    String::from(".sitelog/photos")
}

fn default_prefix() -> String {
    String::from("issue-photos")
}

fn default_region() -> String {
    String::from("auto")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PhotosConfig {
    #[serde(default)]
    pub backend: PhotoBackend,

    /// Root directory for the `local` backend.
    #[serde(default = "default_root")]
    pub root: String,

    /// Object key prefix every upload lands under.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Bucket name for the `s3` backend.
    #[serde(default)]
    pub bucket_name: String,

    /// Custom endpoint URL for S3-compatible services. Empty means AWS.
    #[serde(default)]
    pub endpoint: String,

    #[serde(default = "default_region")]
    pub region: String,

    #[serde(default)]
    pub access_key_id: String,

    #[serde(default)]
    pub secret_access_key: String,

    /// Base URL under which uploaded objects are publicly retrievable.
    /// Empty means derive it from the backend.
    #[serde(default)]
    pub public_base_url: String,
}

impl Default for PhotosConfig {
    fn default() -> Self {
        Self {
            backend: PhotoBackend::default(),
            root: default_root(),
            prefix: default_prefix(),
            bucket_name: String::new(),
            endpoint: String::new(),
            region: default_region(),
            access_key_id: String::new(),
            secret_access_key: String::new(),
            public_base_url: String::new(),
        }
    }
}

impl PhotosConfig {
    /// Check if the selected backend has the fields it needs.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        match self.backend {
            PhotoBackend::Local => !self.root.is_empty(),
            PhotoBackend::Memory => true,
            PhotoBackend::S3 => {
                !self.bucket_name.is_empty()
                    && !self.access_key_id.is_empty()
                    && !self.secret_access_key.is_empty()
            }
        }
    }

    /// Public base URL for the `s3` backend when none is set explicitly.
    ///
    /// Path-style: `{endpoint}/{bucket}`, or the virtual-hosted AWS form when
    /// no custom endpoint is configured.
    #[must_use]
    pub fn s3_base_url(&self) -> String {
        if self.endpoint.is_empty() {
            format!(
                "https://{}.s3.{}.amazonaws.com",
                self.bucket_name, self.region
            )
        } else {
            format!(
                "{}/{}",
                self.endpoint.trim_end_matches('/'),
                self.bucket_name
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_is_local_and_configured() {
        let config = PhotosConfig::default();
        assert_eq!(config.backend, PhotoBackend::Local);
        assert!(config.is_configured());
        assert_eq!(config.prefix, "issue-photos");
    }

    #[test]
    fn s3_requires_bucket_and_keys() {
        let mut config = PhotosConfig {
            backend: PhotoBackend::S3,
            bucket_name: "site-photos".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
        config.access_key_id = "key".into();
        config.secret_access_key = "secret".into();
        assert!(config.is_configured());
    }

    #[test]
    fn s3_base_url_uses_custom_endpoint() {
        let config = PhotosConfig {
            backend: PhotoBackend::S3,
            bucket_name: "site-photos".into(),
            endpoint: "http://localhost:9000/".into(),
            ..Default::default()
        };
        assert_eq!(config.s3_base_url(), "http://localhost:9000/site-photos");
    }

    #[test]
    fn s3_base_url_defaults_to_aws() {
        let config = PhotosConfig {
            backend: PhotoBackend::S3,
            bucket_name: "site-photos".into(),
            region: "us-east-1".into(),
            ..Default::default()
        };
        assert_eq!(
            config.s3_base_url(),
            "https://site-photos.s3.us-east-1.amazonaws.com"
        );
    }
}
