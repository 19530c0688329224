//! # site-dashboard
//!
//! The issue-tracking surface of sitelog, independent of any UI toolkit:
//!
//! - [`IssueRepository`]: session-gated fetch / append / delete over the
//!   document store and photo store
//! - [`list_view`]: status filter, timestamp sort, aligned table
//! - [`IssueEntryForm`]: draft state, roster-limited logger choice, one
//!   submission in flight at a time
//! - [`LoginForm`]: sign-in / sign-up toggle
//! - [`DashboardController`]: session gating, list lifecycle, navigation

pub mod controller;
pub mod entry_form;
pub mod error;
pub mod list_view;
pub mod login;
pub mod navigation;
pub mod repository;
pub mod table;

pub use controller::{DashboardController, Ticket, Update};
pub use entry_form::{FormError, IssueEntryForm};
pub use error::RepositoryError;
pub use list_view::{ListQuery, SortOrder};
pub use login::{LoginForm, LoginMode};
pub use navigation::Navigation;
pub use repository::{BackendIssueRepository, IssueRepository};
