use std::path::PathBuf;

use clap::{Args, Subcommand};
use site_core::enums::IssueStatus;
use site_dashboard::SortOrder;

/// Issue commands.
#[derive(Clone, Debug, Subcommand)]
pub enum IssueCommands {
    /// List issues.
    List(ListArgs),
    /// Log a new issue.
    Add {
        #[arg(long)]
        description: String,
        /// Reporter; must be on the roster (`sitelog loggers`).
        #[arg(long)]
        logger: String,
        /// pending, in_progress, or resolved (default pending).
        #[arg(long)]
        status: Option<IssueStatus>,
        /// Photo to attach.
        #[arg(long)]
        photo: Option<PathBuf>,
    },
    /// Delete an issue permanently.
    Delete { id: String },
}

#[derive(Clone, Debug, Default, Args)]
pub struct ListArgs {
    /// Only issues with this status.
    #[arg(long)]
    pub status: Option<IssueStatus>,
    /// Timestamp order: asc or desc (default: `general.newest_first`).
    #[arg(long)]
    pub sort: Option<SortOrder>,
}
