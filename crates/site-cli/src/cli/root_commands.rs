use clap::{Args, Subcommand};

use crate::cli::subcommands::{AuthCommands, IssueCommands, ListArgs};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Sign in, sign up, sign out, or show the session.
    Auth {
        #[command(subcommand)]
        action: AuthCommands,
    },
    /// Log, list, and delete issues.
    Issue {
        #[command(subcommand)]
        action: IssueCommands,
    },
    /// Welcome line, status summary, and the issue list.
    Dashboard(DashboardArgs),
    /// Show the logger roster.
    Loggers,
}

#[derive(Clone, Debug, Args)]
pub struct DashboardArgs {
    #[command(flatten)]
    pub list: ListArgs,
}
