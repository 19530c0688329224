//! Issue entry form state.
//!
//! Holds a draft and an optional photo locally until submission. Validation
//! happens here, before the repository is ever called.

use site_core::entities::{Issue, IssueDraft};
use site_core::enums::IssueStatus;
use site_storage::Photo;
use thiserror::Error;

use crate::error::RepositoryError;
use crate::repository::IssueRepository;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("{0}")]
    Validation(String),

    #[error("a submission is already in progress")]
    InFlight,

    #[error("'{0}' is not on the logger roster")]
    UnknownLogger(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// What gets handed to the repository for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub draft: IssueDraft,
    pub photo: Option<Photo>,
}

#[derive(Debug, Clone)]
pub struct IssueEntryForm {
    draft: IssueDraft,
    photo: Option<Photo>,
    roster: Vec<String>,
    in_flight: bool,
    last_error: Option<FormError>,
}

impl IssueEntryForm {
    #[must_use]
    pub fn new(roster: Vec<String>) -> Self {
        Self {
            draft: IssueDraft::default(),
            photo: None,
            roster,
            in_flight: false,
            last_error: None,
        }
    }

    #[must_use]
    pub const fn draft(&self) -> &IssueDraft {
        &self.draft
    }

    #[must_use]
    pub const fn photo(&self) -> Option<&Photo> {
        self.photo.as_ref()
    }

    #[must_use]
    pub fn roster(&self) -> &[String] {
        &self.roster
    }

    #[must_use]
    pub const fn is_submitting(&self) -> bool {
        self.in_flight
    }

    /// Error from the most recent rejected or failed submission.
    #[must_use]
    pub const fn last_error(&self) -> Option<&FormError> {
        self.last_error.as_ref()
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.draft.description = description.into();
    }

    pub const fn set_status(&mut self, status: IssueStatus) {
        self.draft.status = status;
    }

    /// Pick the reporter. Only roster names are accepted.
    ///
    /// # Errors
    ///
    /// Returns `FormError::UnknownLogger` and leaves the current choice as is.
    pub fn choose_logger(&mut self, name: &str) -> Result<(), FormError> {
        let name = name.trim();
        let Some(known) = self.roster.iter().find(|r| r.as_str() == name) else {
            return Err(FormError::UnknownLogger(name.to_string()));
        };
        self.draft.logger_name.clone_from(known);
        Ok(())
    }

    pub fn attach_photo(&mut self, photo: Photo) {
        self.photo = Some(photo);
    }

    pub fn clear_photo(&mut self) {
        self.photo = None;
    }

    /// Start a submission: validate and mark in flight.
    ///
    /// # Errors
    ///
    /// `FormError::InFlight` while a previous submission is pending, or
    /// `FormError::Validation` if a required field is empty. Fields are kept.
    pub fn begin_submit(&mut self) -> Result<Submission, FormError> {
        if self.in_flight {
            return Err(FormError::InFlight);
        }
        if let Err(e) = self.draft.validate() {
            let error = FormError::Validation(e.to_string());
            self.last_error = Some(error.clone());
            return Err(error);
        }
        self.in_flight = true;
        self.last_error = None;
        Ok(Submission {
            draft: self.draft.clone(),
            photo: self.photo.clone(),
        })
    }

    /// Apply the repository's answer. Success resets the form; failure keeps
    /// every entered value and records the error.
    pub fn finish_submit(&mut self, result: &Result<Issue, RepositoryError>) {
        self.in_flight = false;
        match result {
            Ok(_) => {
                self.draft = IssueDraft::default();
                self.photo = None;
                self.last_error = None;
            }
            Err(error) => self.last_error = Some(FormError::Repository(error.clone())),
        }
    }

    /// Drop an in-flight submission whose result will never be applied.
    pub const fn abandon_submit(&mut self) {
        self.in_flight = false;
    }

    /// Validate, append through `repository`, then apply the result.
    ///
    /// # Errors
    ///
    /// See [`Self::begin_submit`]; repository failures come back as
    /// `FormError::Repository`.
    pub async fn submit(&mut self, repository: &dyn IssueRepository) -> Result<Issue, FormError> {
        let submission = self.begin_submit()?;
        let result = repository
            .append(&submission.draft, submission.photo.as_ref())
            .await;
        self.finish_submit(&result);
        Ok(result?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    use super::*;

    fn roster() -> Vec<String> {
        vec!["Shaheer Syed".into(), "Site Supervisor".into()]
    }

    /// Records every append and answers with a canned result.
    struct ScriptedRepository {
        appended: Mutex<Vec<(IssueDraft, bool)>>,
        fail_with: Option<RepositoryError>,
    }

    impl ScriptedRepository {
        fn ok() -> Self {
            Self {
                appended: Mutex::new(Vec::new()),
                fail_with: None,
            }
        }

        fn failing(error: RepositoryError) -> Self {
            Self {
                appended: Mutex::new(Vec::new()),
                fail_with: Some(error),
            }
        }

        fn calls(&self) -> usize {
            self.appended.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl IssueRepository for ScriptedRepository {
        async fn fetch_all(&self) -> Result<Vec<Issue>, RepositoryError> {
            Ok(Vec::new())
        }

        async fn append(
            &self,
            draft: &IssueDraft,
            photo: Option<&Photo>,
        ) -> Result<Issue, RepositoryError> {
            self.appended
                .lock()
                .unwrap()
                .push((draft.clone(), photo.is_some()));
            if let Some(error) = &self.fail_with {
                return Err(error.clone());
            }
            Ok(Issue {
                id: "iss-0000000000000001".into(),
                description: draft.description.clone(),
                status: draft.status,
                logger_name: draft.logger_name.clone(),
                timestamp: Utc::now(),
                image_url: photo.map(|p| format!("memory://photos/{}", p.file_name)),
            })
        }

        async fn delete(&self, _id: &str) -> Result<(), RepositoryError> {
            Ok(())
        }
    }

    fn filled_form() -> IssueEntryForm {
        let mut form = IssueEntryForm::new(roster());
        form.set_description("Crane malfunction");
        form.choose_logger("Shaheer Syed").unwrap();
        form
    }

    #[test]
    fn starts_with_default_draft() {
        let form = IssueEntryForm::new(roster());
        assert_eq!(form.draft(), &IssueDraft::new("", IssueStatus::Pending, ""));
        assert!(form.photo().is_none());
    }

    #[test]
    fn choose_logger_rejects_names_off_roster() {
        let mut form = IssueEntryForm::new(roster());
        form.choose_logger("Site Supervisor").unwrap();
        let err = form.choose_logger("Random Visitor").unwrap_err();
        assert_eq!(err, FormError::UnknownLogger("Random Visitor".into()));
        assert_eq!(form.draft().logger_name, "Site Supervisor");
    }

    #[tokio::test]
    async fn empty_description_never_reaches_repository() {
        let repo = ScriptedRepository::ok();
        let mut form = IssueEntryForm::new(roster());
        form.choose_logger("Shaheer Syed").unwrap();
        form.set_status(IssueStatus::Resolved);

        let err = form.submit(&repo).await.unwrap_err();
        assert!(matches!(err, FormError::Validation(_)));
        assert_eq!(repo.calls(), 0);
        assert_eq!(form.draft().logger_name, "Shaheer Syed");
        assert_eq!(form.draft().status, IssueStatus::Resolved);
        assert!(!form.is_submitting());
    }

    #[tokio::test]
    async fn success_resets_form() {
        let repo = ScriptedRepository::ok();
        let mut form = filled_form();
        form.attach_photo(Photo::new("crane.jpg", vec![1]));

        let issue = form.submit(&repo).await.unwrap();
        assert_eq!(issue.description, "Crane malfunction");
        assert!(issue.image_url.is_some());
        assert_eq!(form.draft(), &IssueDraft::default());
        assert!(form.photo().is_none());
        assert!(form.last_error().is_none());
    }

    #[tokio::test]
    async fn failure_keeps_entered_values() {
        let repo = ScriptedRepository::failing(RepositoryError::UploadFailed("timeout".into()));
        let mut form = filled_form();
        form.attach_photo(Photo::new("crane.jpg", vec![1]));

        let err = form.submit(&repo).await.unwrap_err();
        assert_eq!(
            err,
            FormError::Repository(RepositoryError::UploadFailed("timeout".into()))
        );
        assert_eq!(form.draft().description, "Crane malfunction");
        assert!(form.photo().is_some());
        assert_eq!(form.last_error(), Some(&err));
        assert!(!form.is_submitting());
    }

    #[test]
    fn second_begin_while_in_flight_is_rejected() {
        let mut form = filled_form();
        form.begin_submit().unwrap();
        assert_eq!(form.begin_submit().unwrap_err(), FormError::InFlight);

        form.abandon_submit();
        assert!(form.begin_submit().is_ok());
    }
}
