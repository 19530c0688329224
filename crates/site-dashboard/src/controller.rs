//! Dashboard controller.
//!
//! Reacts to session transitions, keeps the in-memory issue list, and routes
//! form submissions and deletes through the repository. Every async operation
//! takes a [`Ticket`] first; a result whose ticket is stale (unmounted, or the
//! session changed meanwhile) is dropped instead of applied.

use std::sync::Arc;

use chrono::NaiveDate;
use site_auth::SessionState;
use site_core::entities::Issue;
use site_core::enums::IssueStatus;
use site_core::identity::Identity;
use site_core::responses::{DashboardResponse, DashboardSummary};
use tokio::sync::watch;

use crate::entry_form::IssueEntryForm;
use crate::error::RepositoryError;
use crate::navigation::Navigation;
use crate::repository::IssueRepository;

/// Snapshot of the controller epoch when an operation started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

/// What the view should do after an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Update {
    /// State changed; re-render.
    Rendered,
    /// Leave the dashboard.
    Navigate(Navigation),
    /// Operation failed; state is unchanged apart from the notice.
    Notice(String),
    /// A late result was ignored.
    Discarded,
}

pub struct DashboardController {
    repository: Arc<dyn IssueRepository>,
    form: IssueEntryForm,
    issues: Vec<Issue>,
    identity: Option<Identity>,
    epoch: u64,
    mounted: bool,
    notice: Option<String>,
}

impl DashboardController {
    #[must_use]
    pub fn new(repository: Arc<dyn IssueRepository>, roster: Vec<String>) -> Self {
        Self {
            repository,
            form: IssueEntryForm::new(roster),
            issues: Vec::new(),
            identity: None,
            epoch: 0,
            mounted: true,
            notice: None,
        }
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    #[must_use]
    pub const fn form(&self) -> &IssueEntryForm {
        &self.form
    }

    pub const fn form_mut(&mut self) -> &mut IssueEntryForm {
        &mut self.form
    }

    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.mounted
    }

    #[must_use]
    pub const fn ticket(&self) -> Ticket {
        Ticket(self.epoch)
    }

    /// Tear down the view. Results still in flight will be discarded.
    pub const fn unmount(&mut self) {
        self.mounted = false;
        self.epoch += 1;
    }

    fn is_current(&self, ticket: Ticket) -> bool {
        self.mounted && ticket.0 == self.epoch
    }

    /// Apply a session transition. `Authenticated` for a new identity starts a
    /// fresh epoch and loads the list; `Unauthenticated` clears everything and
    /// navigates to login.
    pub async fn on_session(&mut self, state: &SessionState) -> Update {
        match state {
            SessionState::Unauthenticated => self.sign_out_locally(),
            SessionState::Authenticated(identity) => {
                if self.identity.as_ref() != Some(identity) {
                    tracing::debug!(user = %identity.user_id, "dashboard session started");
                    self.epoch += 1;
                    self.identity = Some(identity.clone());
                    self.issues.clear();
                }
                self.refresh().await
            }
        }
    }

    /// Wait for the next session transition on `rx` and apply it.
    ///
    /// Returns `None` when the gate has been dropped.
    pub async fn follow_session(
        &mut self,
        rx: &mut watch::Receiver<SessionState>,
    ) -> Option<Update> {
        rx.changed().await.ok()?;
        let state = rx.borrow_and_update().clone();
        Some(self.on_session(&state).await)
    }

    fn sign_out_locally(&mut self) -> Update {
        self.epoch += 1;
        self.identity = None;
        self.issues.clear();
        self.form.abandon_submit();
        Update::Navigate(Navigation::Login)
    }

    fn fail(&mut self, error: &RepositoryError) -> Update {
        if *error == RepositoryError::Unauthenticated {
            return self.sign_out_locally();
        }
        tracing::warn!(kind = error.kind(), %error, "dashboard operation failed");
        self.notice = Some(error.to_string());
        Update::Notice(error.to_string())
    }

    /// Replace the in-memory list with a fresh `fetch_all`.
    pub async fn refresh(&mut self) -> Update {
        let ticket = self.ticket();
        let result = self.repository.fetch_all().await;
        self.apply_fetch(ticket, result)
    }

    pub fn apply_fetch(
        &mut self,
        ticket: Ticket,
        result: Result<Vec<Issue>, RepositoryError>,
    ) -> Update {
        if !self.is_current(ticket) {
            return Update::Discarded;
        }
        match result {
            Ok(issues) => {
                self.issues = issues;
                self.notice = None;
                Update::Rendered
            }
            Err(error) => self.fail(&error),
        }
    }

    /// Submit the entry form. On success exactly one row is appended.
    pub async fn submit(&mut self) -> Update {
        let submission = match self.form.begin_submit() {
            Ok(submission) => submission,
            Err(error) => {
                self.notice = Some(error.to_string());
                return Update::Notice(error.to_string());
            }
        };
        let ticket = self.ticket();
        let result = self
            .repository
            .append(&submission.draft, submission.photo.as_ref())
            .await;
        self.apply_append(ticket, result)
    }

    pub fn apply_append(&mut self, ticket: Ticket, result: Result<Issue, RepositoryError>) -> Update {
        if !self.is_current(ticket) {
            self.form.abandon_submit();
            return Update::Discarded;
        }
        self.form.finish_submit(&result);
        match result {
            Ok(issue) => {
                self.issues.push(issue);
                self.notice = None;
                Update::Rendered
            }
            Err(error) => self.fail(&error),
        }
    }

    /// Delete persistently, then drop the row locally.
    pub async fn delete(&mut self, id: &str) -> Update {
        let ticket = self.ticket();
        let result = self.repository.delete(id).await;
        self.apply_delete(ticket, id, result)
    }

    pub fn apply_delete(
        &mut self,
        ticket: Ticket,
        id: &str,
        result: Result<(), RepositoryError>,
    ) -> Update {
        if !self.is_current(ticket) {
            return Update::Discarded;
        }
        match result {
            Ok(()) => {
                self.issues.retain(|issue| issue.id != id);
                self.notice = None;
                Update::Rendered
            }
            Err(error @ RepositoryError::NotFound(_)) => {
                // Already gone remotely; keep the local list in step.
                self.issues.retain(|issue| issue.id != id);
                self.fail(&error)
            }
            Err(error) => self.fail(&error),
        }
    }

    /// Per-status counts of the loaded list. "Resolved today" compares the
    /// record's UTC date with `today`.
    #[must_use]
    pub fn summary(&self, today: NaiveDate) -> DashboardSummary {
        summarize(&self.issues, today)
    }

    /// Everything the dashboard page shows, or `None` when signed out.
    #[must_use]
    pub fn response(&self, today: NaiveDate) -> Option<DashboardResponse> {
        let identity = self.identity.as_ref()?;
        Some(DashboardResponse {
            welcome: format!("Welcome, {}", identity.display_name()),
            today,
            summary: self.summary(today),
            issues: self.issues.clone(),
        })
    }
}

#[must_use]
pub fn summarize(issues: &[Issue], today: NaiveDate) -> DashboardSummary {
    let mut summary = DashboardSummary::default();
    for issue in issues {
        summary.total += 1;
        match issue.status {
            IssueStatus::Pending => summary.pending += 1,
            IssueStatus::InProgress => summary.in_progress += 1,
            IssueStatus::Resolved => {
                summary.resolved += 1;
                if issue.timestamp.date_naive() == today {
                    summary.resolved_today += 1;
                }
            }
        }
    }
    summary
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    use super::*;

    fn issue(id: &str, status: IssueStatus, day: u32) -> Issue {
        Issue {
            id: id.into(),
            description: "Scaffold loose".into(),
            status,
            logger_name: "Safety Officer".into(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, day, 9, 0, 0).unwrap(),
            image_url: None,
        }
    }

    #[test]
    fn summarize_counts_each_status() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        let issues = vec![
            issue("a", IssueStatus::Pending, 1),
            issue("b", IssueStatus::InProgress, 2),
            issue("c", IssueStatus::Resolved, 1),
            issue("d", IssueStatus::Resolved, 2),
            issue("e", IssueStatus::Pending, 2),
        ];
        assert_eq!(
            summarize(&issues, today),
            DashboardSummary {
                total: 5,
                pending: 2,
                in_progress: 1,
                resolved: 2,
                resolved_today: 1,
            }
        );
    }

    #[test]
    fn summarize_empty_is_zero() {
        let today = NaiveDate::from_ymd_opt(2026, 3, 2).unwrap();
        assert_eq!(summarize(&[], today), DashboardSummary::default());
    }
}
