//! CLI response types returned as JSON by `sitelog` commands.
//!
//! These structs define the shape of JSON output for `sitelog issue add`,
//! `sitelog issue list`, `sitelog issue delete`, and `sitelog dashboard`.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Issue;

/// Response from `sitelog issue add`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IssueCreateResponse {
    pub issue: Issue,
}

/// Response from `sitelog issue delete`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IssueDeleteResponse {
    pub id: String,
    pub deleted: bool,
}

/// Per-status counts shown on the dashboard cards.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DashboardSummary {
    pub total: u32,
    pub pending: u32,
    pub in_progress: u32,
    pub resolved: u32,
    /// Resolved issues whose timestamp falls on the current UTC day.
    pub resolved_today: u32,
}

impl DashboardSummary {
    /// Issues that still need attention.
    #[must_use]
    pub const fn active(&self) -> u32 {
        self.pending + self.in_progress
    }
}

/// Response from `sitelog dashboard`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DashboardResponse {
    pub welcome: String,
    pub today: NaiveDate,
    pub summary: DashboardSummary,
    pub issues: Vec<Issue>,
}
