pub mod auth;
pub mod dashboard;
pub mod dispatch;
pub mod issue;
pub mod loggers;
