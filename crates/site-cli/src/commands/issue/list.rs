use site_dashboard::IssueRepository;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::ListArgs;
use crate::commands::issue::{list_query, require_identity};
use crate::context::AppContext;
use crate::output::output_issues;

pub async fn run(args: &ListArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    require_identity(ctx).await?;
    let issues = ctx.repository.fetch_all().await?;
    output_issues(&issues, &list_query(args, ctx), flags.format)
}
