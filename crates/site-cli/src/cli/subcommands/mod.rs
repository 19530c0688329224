pub mod auth;
pub mod issue;

pub use auth::{AuthCommands, CredentialArgs};
pub use issue::{IssueCommands, ListArgs};
