use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeDelta, Utc};
use pretty_assertions::assert_eq;
use site_auth::{
    AuthError, IdentityProvider, SessionGate, SessionState, SessionTokens, TokenStore,
};
use site_core::entities::IssueDraft;
use site_core::enums::IssueStatus;
use site_core::identity::Identity;
use site_core::ids::{PREFIX_ISSUE, is_valid_id};
use site_dashboard::{
    BackendIssueRepository, DashboardController, IssueRepository, LoginForm, LoginMode,
    Navigation, Update,
};
use site_db::SiteDb;
use site_storage::{Photo, PhotoStore};
use tokio::sync::watch;

fn roster() -> Vec<String> {
    vec![
        "Shaheer Syed".into(),
        "Site Supervisor".into(),
        "Safety Officer".into(),
    ]
}

fn foreman() -> Identity {
    Identity {
        user_id: "uid-foreman".into(),
        email: "foreman@duplex.test".into(),
    }
}

struct Harness {
    session: watch::Sender<SessionState>,
    repo: Arc<BackendIssueRepository>,
    controller: DashboardController,
}

async fn harness() -> Harness {
    let (session, rx) = watch::channel(SessionState::Authenticated(foreman()));
    let db = Arc::new(SiteDb::open_local(":memory:").await.unwrap());
    let photos = Arc::new(PhotoStore::in_memory("issue-photos"));
    let repo = Arc::new(BackendIssueRepository::new(rx, db, photos));
    let controller = DashboardController::new(repo.clone(), roster());
    Harness {
        session,
        repo,
        controller,
    }
}

async fn seed(repo: &BackendIssueRepository, descriptions: &[&str]) {
    for description in descriptions {
        let draft = IssueDraft::new(*description, IssueStatus::InProgress, "Site Supervisor");
        repo.append(&draft, None).await.unwrap();
    }
}

#[tokio::test]
async fn crane_malfunction_is_logged_and_form_resets() {
    let mut h = harness().await;
    seed(&h.repo, &["Scaffold loose", "Water leak"]).await;

    let update = h
        .controller
        .on_session(&SessionState::Authenticated(foreman()))
        .await;
    assert_eq!(update, Update::Rendered);
    let before = h.controller.issues().len();
    assert_eq!(before, 2);

    let form = h.controller.form_mut();
    form.set_description("Crane malfunction");
    form.set_status(IssueStatus::Pending);
    form.choose_logger("Shaheer Syed").unwrap();

    let started = Utc::now();
    assert_eq!(h.controller.submit().await, Update::Rendered);

    let issues = h.controller.issues();
    assert_eq!(issues.len(), before + 1);
    let logged = issues.last().unwrap();
    assert!(is_valid_id(&logged.id, PREFIX_ISSUE));
    assert_eq!(logged.description, "Crane malfunction");
    assert_eq!(logged.status, IssueStatus::Pending);
    assert_eq!(logged.logger_name, "Shaheer Syed");
    assert_eq!(logged.image_url, None);
    assert!(logged.timestamp >= started - TimeDelta::seconds(1));
    assert!(logged.timestamp <= Utc::now());

    assert_eq!(
        h.controller.form().draft(),
        &IssueDraft::new("", IssueStatus::Pending, "")
    );
    // The in-memory list matches what the store now holds.
    assert_eq!(h.repo.fetch_all().await.unwrap(), h.controller.issues());
}

#[tokio::test]
async fn submit_with_photo_appends_row_with_image() {
    let mut h = harness().await;
    h.controller
        .on_session(&SessionState::Authenticated(foreman()))
        .await;

    let form = h.controller.form_mut();
    form.set_description("Cracked beam");
    form.choose_logger("Safety Officer").unwrap();
    form.attach_photo(Photo::new("beam.jpg", vec![1, 2, 3]));

    assert_eq!(h.controller.submit().await, Update::Rendered);
    let url = h.controller.issues()[0].image_url.clone().unwrap();
    assert!(url.ends_with("-beam.jpg"), "{url}");
    assert!(h.controller.form().photo().is_none());
}

#[tokio::test]
async fn empty_description_shows_notice_without_touching_list() {
    let mut h = harness().await;
    seed(&h.repo, &["Scaffold loose"]).await;
    h.controller
        .on_session(&SessionState::Authenticated(foreman()))
        .await;

    h.controller.form_mut().choose_logger("Shaheer Syed").unwrap();
    let update = h.controller.submit().await;

    assert!(matches!(update, Update::Notice(ref msg) if msg.contains("description")));
    assert_eq!(h.controller.issues().len(), 1);
    assert_eq!(h.repo.fetch_all().await.unwrap().len(), 1);
    assert_eq!(h.controller.form().draft().logger_name, "Shaheer Syed");
}

#[tokio::test]
async fn unauthenticated_state_navigates_to_login() {
    let mut h = harness().await;
    seed(&h.repo, &["Scaffold loose"]).await;
    h.controller
        .on_session(&SessionState::Authenticated(foreman()))
        .await;

    let update = h.controller.on_session(&SessionState::Unauthenticated).await;
    assert_eq!(update, Update::Navigate(Navigation::Login));
    assert!(h.controller.issues().is_empty());
    assert!(h.controller.identity().is_none());
    assert!(h.controller.response(Utc::now().date_naive()).is_none());
}

#[tokio::test]
async fn repository_unauthenticated_navigates_to_login() {
    let mut h = harness().await;
    h.controller
        .on_session(&SessionState::Authenticated(foreman()))
        .await;

    // Session expires behind the controller's back.
    h.session.send_replace(SessionState::Unauthenticated);
    assert_eq!(
        h.controller.refresh().await,
        Update::Navigate(Navigation::Login)
    );
}

#[tokio::test]
async fn results_after_unmount_are_discarded() {
    let mut h = harness().await;
    h.controller
        .on_session(&SessionState::Authenticated(foreman()))
        .await;

    let ticket = h.controller.ticket();
    seed(&h.repo, &["Late arrival"]).await;
    let late = h.repo.fetch_all().await;
    h.controller.unmount();

    assert_eq!(h.controller.apply_fetch(ticket, late), Update::Discarded);
    assert!(h.controller.issues().is_empty());
}

#[tokio::test]
async fn append_from_previous_session_is_discarded() {
    let mut h = harness().await;
    h.controller
        .on_session(&SessionState::Authenticated(foreman()))
        .await;

    let form = h.controller.form_mut();
    form.set_description("Crane malfunction");
    form.choose_logger("Shaheer Syed").unwrap();
    let submission = h.controller.form_mut().begin_submit().unwrap();
    let ticket = h.controller.ticket();
    let result = h.repo.append(&submission.draft, None).await;

    let other = Identity {
        user_id: "uid-other".into(),
        email: "other@duplex.test".into(),
    };
    h.controller
        .on_session(&SessionState::Authenticated(other))
        .await;
    let rows_for_new_session = h.controller.issues().len();

    assert_eq!(h.controller.apply_append(ticket, result), Update::Discarded);
    assert_eq!(h.controller.issues().len(), rows_for_new_session);
    assert!(!h.controller.form().is_submitting());
}

#[tokio::test]
async fn delete_removes_row_locally_and_remotely() {
    let mut h = harness().await;
    seed(&h.repo, &["Scaffold loose", "Water leak"]).await;
    h.controller
        .on_session(&SessionState::Authenticated(foreman()))
        .await;
    let target = h.controller.issues()[0].id.clone();

    assert_eq!(h.controller.delete(&target).await, Update::Rendered);
    assert_eq!(h.controller.issues().len(), 1);
    assert!(h.repo.fetch_all().await.unwrap().iter().all(|i| i.id != target));

    let again = h.controller.delete(&target).await;
    assert!(matches!(again, Update::Notice(ref msg) if msg.contains(&target)));
}

#[tokio::test]
async fn response_greets_user_and_summarizes() {
    let mut h = harness().await;
    seed(&h.repo, &["Scaffold loose"]).await;
    let resolved = IssueDraft::new("Water leak", IssueStatus::Resolved, "Safety Officer");
    h.repo.append(&resolved, None).await.unwrap();
    h.controller
        .on_session(&SessionState::Authenticated(foreman()))
        .await;

    let today = Utc::now().date_naive();
    let response = h.controller.response(today).unwrap();
    assert_eq!(response.welcome, "Welcome, foreman@duplex.test");
    assert_eq!(response.summary.total, 2);
    assert_eq!(response.summary.in_progress, 1);
    assert_eq!(response.summary.resolved, 1);
    assert_eq!(response.issues.len(), 2);
}

// --- Login page and live session stream ---

struct AcceptAll;

#[async_trait]
impl IdentityProvider for AcceptAll {
    async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SessionTokens, AuthError> {
        if password != "correct-horse" {
            return Err(AuthError::InvalidCredentials("INVALID_PASSWORD".into()));
        }
        self.sign_up(email, password).await
    }

    async fn sign_up(&self, email: &str, _password: &str) -> Result<SessionTokens, AuthError> {
        Ok(SessionTokens {
            id_token: "id".into(),
            refresh_token: "refresh".into(),
            user_id: format!("uid-{email}"),
            email: email.into(),
            expires_at: Utc::now() + TimeDelta::hours(1),
        })
    }

    async fn refresh(&self, _refresh_token: &str, email: &str) -> Result<SessionTokens, AuthError> {
        self.sign_up(email, "").await
    }
}

#[tokio::test]
async fn login_then_sign_out_drives_controller_through_gate() {
    let tmp = tempfile::TempDir::new().unwrap();
    let gate = SessionGate::new(
        Arc::new(AcceptAll),
        TokenStore::file_only(tmp.path().join("credentials")),
    );
    let db = Arc::new(SiteDb::open_local(":memory:").await.unwrap());
    let photos = Arc::new(PhotoStore::in_memory("issue-photos"));
    let repo = Arc::new(BackendIssueRepository::new(gate.subscribe(), db, photos));
    let mut controller = DashboardController::new(repo, roster());
    let mut rx = gate.subscribe();

    let mut login = LoginForm::new();
    login.set_email("foreman@duplex.test");
    login.set_password("wrong");
    assert!(login.submit(&gate).await.is_err());
    assert!(login.error().is_some());

    login.set_password("correct-horse");
    let nav = login.submit(&gate).await.unwrap();
    assert_eq!(nav.path(), "/dashboard?user=foreman%40duplex.test");

    assert_eq!(controller.follow_session(&mut rx).await, Some(Update::Rendered));
    assert_eq!(
        controller.identity().map(|i| i.email.as_str()),
        Some("foreman@duplex.test")
    );

    gate.sign_out().await.unwrap();
    assert_eq!(
        controller.follow_session(&mut rx).await,
        Some(Update::Navigate(Navigation::Login))
    );
}

#[tokio::test]
async fn sign_up_mode_creates_account() {
    let tmp = tempfile::TempDir::new().unwrap();
    let gate = SessionGate::new(
        Arc::new(AcceptAll),
        TokenStore::file_only(tmp.path().join("credentials")),
    );
    let mut login = LoginForm::new();
    login.toggle_mode();
    assert_eq!(login.mode(), LoginMode::SignUp);
    login.set_email("new@duplex.test");
    login.set_password("anything");

    let nav = login.submit(&gate).await.unwrap();
    assert_eq!(nav, Navigation::dashboard_for("new@duplex.test"));
    assert_eq!(gate.current_identity().unwrap().user_id, "uid-new@duplex.test");
}
