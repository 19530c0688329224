//! Issue repository: session-gated access to issue documents and photos.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use site_auth::SessionState;
use site_core::entities::{Issue, IssueDraft};
use site_core::identity::Identity;
use site_db::IssueDocuments;
use site_storage::{Photo, PhotoStorage};
use tokio::sync::watch;

use crate::error::RepositoryError;

#[async_trait]
pub trait IssueRepository: Send + Sync {
    /// Every stored issue, in insertion order.
    async fn fetch_all(&self) -> Result<Vec<Issue>, RepositoryError>;

    /// Validate, upload the photo (if any), then create the record.
    async fn append(
        &self,
        draft: &IssueDraft,
        photo: Option<&Photo>,
    ) -> Result<Issue, RepositoryError>;

    /// Remove an issue permanently.
    async fn delete(&self, id: &str) -> Result<(), RepositoryError>;
}

/// Repository over a document store and a photo store, gated on the live
/// session state.
pub struct BackendIssueRepository {
    session: watch::Receiver<SessionState>,
    documents: Arc<dyn IssueDocuments>,
    photos: Arc<dyn PhotoStorage>,
}

impl BackendIssueRepository {
    #[must_use]
    pub fn new(
        session: watch::Receiver<SessionState>,
        documents: Arc<dyn IssueDocuments>,
        photos: Arc<dyn PhotoStorage>,
    ) -> Self {
        Self {
            session,
            documents,
            photos,
        }
    }

    fn require_session(&self) -> Result<Identity, RepositoryError> {
        self.session
            .borrow()
            .identity()
            .cloned()
            .ok_or(RepositoryError::Unauthenticated)
    }
}

#[async_trait]
impl IssueRepository for BackendIssueRepository {
    async fn fetch_all(&self) -> Result<Vec<Issue>, RepositoryError> {
        self.require_session()?;
        let issues = self
            .documents
            .list_all()
            .await
            .map_err(|e| RepositoryError::BackendUnavailable(e.to_string()))?;
        tracing::debug!(count = issues.len(), "fetched issues");
        Ok(issues)
    }

    async fn append(
        &self,
        draft: &IssueDraft,
        photo: Option<&Photo>,
    ) -> Result<Issue, RepositoryError> {
        draft
            .validate()
            .map_err(|e| RepositoryError::Validation(e.to_string()))?;
        let identity = self.require_session()?;
        let submitted_at = Utc::now();

        // Upload first so no stored record can point at a missing photo.
        let image_url = match photo {
            Some(photo) => Some(
                self.photos
                    .upload(photo, submitted_at)
                    .await
                    .map_err(|e| RepositoryError::UploadFailed(e.to_string()))?,
            ),
            None => None,
        };

        let issue = self
            .documents
            .create(draft, image_url.as_deref(), submitted_at)
            .await
            .map_err(|e| RepositoryError::BackendUnavailable(e.to_string()))?;
        tracing::info!(id = %issue.id, user = %identity.user_id, "issue logged");
        Ok(issue)
    }

    async fn delete(&self, id: &str) -> Result<(), RepositoryError> {
        let identity = self.require_session()?;
        let deleted = self
            .documents
            .delete(id)
            .await
            .map_err(|e| RepositoryError::BackendUnavailable(e.to_string()))?;
        if !deleted {
            return Err(RepositoryError::NotFound(id.to_string()));
        }
        tracing::info!(%id, user = %identity.user_id, "issue deleted");
        Ok(())
    }
}
