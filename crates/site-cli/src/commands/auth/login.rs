use serde::Serialize;
use site_dashboard::LoginForm;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::CredentialArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct AuthLoginResponse {
    authenticated: bool,
    user_id: String,
    email: String,
    redirect: String,
}

pub async fn handle(
    args: &CredentialArgs,
    create_account: bool,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    if !ctx.config.auth.is_configured() {
        anyhow::bail!("auth: SITELOG_AUTH__API_KEY is not configured");
    }

    let mut form = LoginForm::new();
    if create_account {
        form.toggle_mode();
    }
    form.set_email(args.email.as_str());
    form.set_password(args.password.as_str());

    let verb = form.mode().action_label().to_lowercase();
    let navigation = form
        .submit(&ctx.gate)
        .await
        .map_err(|error| anyhow::anyhow!("{verb} failed: {error}"))?;

    let identity = ctx
        .gate
        .current_identity()
        .ok_or_else(|| anyhow::anyhow!("{verb} succeeded but no session was established"))?;

    output(
        &AuthLoginResponse {
            authenticated: true,
            user_id: identity.user_id,
            email: identity.email,
            redirect: navigation.path(),
        },
        flags.format,
    )
}
