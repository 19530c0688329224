//! Issue list view: filter, sort, and tabulate fetched issues.
//!
//! Pure functions over a borrowed slice; nothing here touches the network or
//! mutates the issues it is given.

use std::str::FromStr;

use site_core::entities::Issue;
use site_core::enums::IssueStatus;

use crate::table::{TableOptions, render_table};

pub const COLUMNS: [&str; 6] = ["id", "description", "status", "logger", "timestamp", "image"];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest first.
    Ascending,
    /// Newest first.
    Descending,
}

impl SortOrder {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" | "oldest" => Ok(Self::Ascending),
            "desc" | "descending" | "newest" => Ok(Self::Descending),
            other => Err(format!("unknown sort order '{other}' (expected asc or desc)")),
        }
    }
}

/// Filter and ordering for the list view. The default shows everything in
/// insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub status: Option<IssueStatus>,
    pub sort: Option<SortOrder>,
}

impl ListQuery {
    #[must_use]
    pub const fn with_status(mut self, status: IssueStatus) -> Self {
        self.status = Some(status);
        self
    }

    #[must_use]
    pub const fn sorted(mut self, order: SortOrder) -> Self {
        self.sort = Some(order);
        self
    }
}

/// Issues matching `query`, ordered by it. Ties on timestamp keep insertion
/// order in both directions.
#[must_use]
pub fn select<'a>(issues: &'a [Issue], query: &ListQuery) -> Vec<&'a Issue> {
    let mut rows: Vec<&Issue> = issues
        .iter()
        .filter(|issue| query.status.is_none_or(|status| issue.status == status))
        .collect();
    match query.sort {
        Some(SortOrder::Ascending) => rows.sort_by(|a, b| a.timestamp.cmp(&b.timestamp)),
        Some(SortOrder::Descending) => rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp)),
        None => {}
    }
    rows
}

/// Table cells for one issue, in [`COLUMNS`] order.
#[must_use]
pub fn cells(issue: &Issue) -> Vec<String> {
    vec![
        issue.id.clone(),
        issue.description.clone(),
        issue.status.label().to_string(),
        issue.logger_name.clone(),
        issue.timestamp.format(TIMESTAMP_FORMAT).to_string(),
        issue.image_url.clone().unwrap_or_else(|| String::from("-")),
    ]
}

/// Render the issues selected by `query` as an aligned table.
#[must_use]
pub fn render(issues: &[Issue], query: &ListQuery, options: TableOptions) -> String {
    let rows: Vec<Vec<String>> = select(issues, query).into_iter().map(cells).collect();
    if rows.is_empty() {
        return String::from("(no issues)");
    }
    render_table(&COLUMNS, &rows, options)
}
