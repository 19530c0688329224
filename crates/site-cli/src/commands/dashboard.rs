use std::sync::Arc;

use chrono::Utc;
use site_dashboard::{DashboardController, IssueRepository, Navigation, Update, list_view};

use crate::cli::GlobalFlags;
use crate::cli::OutputFormat;
use crate::cli::root_commands::DashboardArgs;
use crate::commands::issue::list_query;
use crate::context::AppContext;
use crate::output::output;
use crate::ui;

/// Handle `sitelog dashboard`: welcome line, status cards, and the list.
pub async fn handle(
    args: &DashboardArgs,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let state = ctx.restore_session().await;
    let repository: Arc<dyn IssueRepository> = ctx.repository.clone();
    let mut controller = DashboardController::new(repository, ctx.roster());

    match controller.on_session(&state).await {
        Update::Navigate(Navigation::Login) => {
            anyhow::bail!("not signed in; run `sitelog auth login`")
        }
        Update::Notice(message) => anyhow::bail!("{message}"),
        Update::Rendered | Update::Navigate(_) | Update::Discarded => {}
    }

    let today = Utc::now().date_naive();
    let Some(mut response) = controller.response(today) else {
        anyhow::bail!("not signed in; run `sitelog auth login`");
    };

    let query = list_query(&args.list, ctx);
    if flags.format != OutputFormat::Table {
        response.issues = list_view::select(&response.issues, &query)
            .into_iter()
            .cloned()
            .collect();
        return output(&response, flags.format);
    }

    let summary = response.summary;
    println!("{}", response.welcome);
    println!(
        "{} issues: {} pending, {} in progress, {} resolved ({} today)",
        summary.total,
        summary.pending,
        summary.in_progress,
        summary.resolved,
        summary.resolved_today
    );
    println!();
    println!(
        "{}",
        list_view::render(controller.issues(), &query, ui::table_options())
    );
    Ok(())
}
