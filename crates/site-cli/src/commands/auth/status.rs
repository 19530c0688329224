use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthStatusResponse {
    authenticated: bool,
    user_id: Option<String>,
    email: Option<String>,
    expires_at: Option<String>,
    token_source: Option<&'static str>,
    note: Option<String>,
}

pub async fn handle(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let state = ctx.restore_session().await;
    let stored = ctx.gate.token_store().load_with_source();

    let status = match (state.identity(), stored) {
        (Some(identity), Some((tokens, source))) => AuthStatusResponse {
            authenticated: true,
            user_id: Some(identity.user_id.clone()),
            email: Some(identity.email.clone()),
            expires_at: Some(tokens.expires_at.to_rfc3339()),
            token_source: Some(source.as_str()),
            note: None,
        },
        (Some(identity), None) => AuthStatusResponse {
            authenticated: true,
            user_id: Some(identity.user_id.clone()),
            email: Some(identity.email.clone()),
            expires_at: None,
            token_source: None,
            note: Some("session is not persisted".into()),
        },
        (None, stored) => AuthStatusResponse {
            authenticated: false,
            user_id: None,
            email: None,
            expires_at: None,
            token_source: None,
            note: Some(if stored.is_some() {
                "stored session could not be refreshed".into()
            } else {
                "no stored session; run `sitelog auth login`".into()
            }),
        },
    };

    output(&status, flags.format)
}
