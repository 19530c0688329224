use serde::Serialize;
use site_config::SiteConfig;

use crate::cli::GlobalFlags;
use crate::output::output;

#[derive(Serialize)]
struct LoggerRow<'a> {
    name: &'a str,
}

/// Handle `sitelog loggers`. Needs no session or backend.
pub fn handle(config: &SiteConfig, flags: &GlobalFlags) -> anyhow::Result<()> {
    let rows = config
        .general
        .loggers
        .iter()
        .map(|name| LoggerRow { name })
        .collect::<Vec<_>>();
    output(&rows, flags.format)
}
