use serde::Serialize;
use site_auth::TokenStore;
use site_auth::token_store::TOKEN_ENV_VAR;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLogoutResponse {
    cleared: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    note: Option<String>,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    ctx.gate.sign_out().await?;

    // Stored credentials are gone either way; an env token still signs in.
    let note = TokenStore::env_token_present()
        .then(|| format!("{TOKEN_ENV_VAR} is set; unset it to stay signed out"));
    output(
        &AuthLogoutResponse {
            cleared: note.is_none(),
            note,
        },
        flags.format,
    )
}
