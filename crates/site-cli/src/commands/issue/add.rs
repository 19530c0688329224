use std::path::Path;

use anyhow::Context;
use site_core::enums::IssueStatus;
use site_core::responses::IssueCreateResponse;
use site_dashboard::IssueEntryForm;
use site_storage::Photo;

use crate::cli::GlobalFlags;
use crate::commands::issue::require_identity;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(
    description: &str,
    logger: &str,
    status: Option<IssueStatus>,
    photo: Option<&Path>,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    require_identity(ctx).await?;

    let mut form = IssueEntryForm::new(ctx.roster());
    form.set_description(description);
    form.set_status(status.unwrap_or_default());
    form.choose_logger(logger)
        .with_context(|| format!("known loggers: {}", form.roster().join(", ")))?;

    if let Some(path) = photo {
        let photo = Photo::from_path(path)
            .await
            .with_context(|| format!("failed to read photo {}", path.display()))?;
        form.attach_photo(photo);
    }

    let issue = form.submit(ctx.repository.as_ref()).await?;
    output(&IssueCreateResponse { issue }, flags.format)
}
