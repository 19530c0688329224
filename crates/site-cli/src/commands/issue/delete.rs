use site_core::responses::IssueDeleteResponse;
use site_dashboard::IssueRepository;

use crate::cli::GlobalFlags;
use crate::commands::issue::require_identity;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    require_identity(ctx).await?;
    ctx.repository.delete(id).await?;
    output(
        &IssueDeleteResponse {
            id: id.to_string(),
            deleted: true,
        },
        flags.format,
    )
}
