use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::IssueStatus;
use crate::errors::CoreError;

/// A single logged construction-site problem.
///
/// `id` and `timestamp` are assigned by the document store; the record is never
/// mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Issue {
    pub id: String,
    pub description: String,
    pub status: IssueStatus,
    pub logger_name: String,
    pub timestamp: DateTime<Utc>,
    /// Retrieval URL of the attached photo. Omitted entirely when no photo was
    /// attached, so "no photo" is never confused with "photo at empty path".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

impl Issue {
    /// Whether the stored fields match the draft this issue was created from.
    #[must_use]
    pub fn matches_draft(&self, draft: &IssueDraft) -> bool {
        self.description == draft.description
            && self.status == draft.status
            && self.logger_name == draft.logger_name
    }
}

/// User-entered, not-yet-persisted issue data.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IssueDraft {
    pub description: String,
    pub status: IssueStatus,
    pub logger_name: String,
}

impl IssueDraft {
    #[must_use]
    pub fn new(
        description: impl Into<String>,
        status: IssueStatus,
        logger_name: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            status,
            logger_name: logger_name.into(),
        }
    }

    /// Required-field check. Whitespace-only values count as empty.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` naming the first empty field.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.description.trim().is_empty() {
            return Err(CoreError::Validation("description is required".into()));
        }
        if self.logger_name.trim().is_empty() {
            return Err(CoreError::Validation("logger name is required".into()));
        }
        Ok(())
    }
}
