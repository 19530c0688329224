mod add;
mod delete;
mod list;

use site_core::identity::Identity;
use site_dashboard::ListQuery;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{IssueCommands, ListArgs};
use crate::context::AppContext;

/// Handle `sitelog issue <subcommand>`.
pub async fn handle(
    action: &IssueCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        IssueCommands::List(args) => list::run(args, ctx, flags).await,
        IssueCommands::Add {
            description,
            logger,
            status,
            photo,
        } => add::run(description, logger, *status, photo.as_deref(), ctx, flags).await,
        IssueCommands::Delete { id } => delete::run(id, ctx, flags).await,
    }
}

/// Restore the stored session or fail with a hint to sign in.
pub async fn require_identity(ctx: &AppContext) -> anyhow::Result<Identity> {
    ctx.restore_session()
        .await
        .identity()
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("not signed in; run `sitelog auth login`"))
}

/// List query from CLI flags, falling back to the configured default order.
pub fn list_query(args: &ListArgs, ctx: &AppContext) -> ListQuery {
    let sort = args.sort.unwrap_or_else(|| {
        if ctx.config.general.newest_first {
            site_dashboard::SortOrder::Descending
        } else {
            site_dashboard::SortOrder::Ascending
        }
    });
    ListQuery {
        status: args.status,
        sort: Some(sort),
    }
}
