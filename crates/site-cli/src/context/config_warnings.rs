use site_config::SiteConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &SiteConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &SiteConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    if !config.auth.is_configured() && has_single_underscore(&env_keys, "SITELOG_AUTH") {
        warnings.push(
            "auth config appears default while SITELOG_AUTH* env vars exist. Use double underscores (example: SITELOG_AUTH__API_KEY)."
                .to_string(),
        );
    }

    if !config.store.is_remote() && has_single_underscore(&env_keys, "SITELOG_STORE") {
        warnings.push(
            "store config appears default while SITELOG_STORE* env vars exist. Use double underscores (example: SITELOG_STORE__URL)."
                .to_string(),
        );
    }

    if !config.photos.is_configured() {
        warnings.push(format!(
            "photo storage backend '{:?}' is missing settings under [photos]; uploads will fail",
            config.photos.backend
        ));
    }

    warnings
}

/// True if some key starts with `prefix` but not with `prefix__`.
fn has_single_underscore(keys: &[String], prefix: &str) -> bool {
    let nested = format!("{prefix}__");
    keys.iter()
        .any(|key| key.starts_with(prefix) && !key.starts_with(&nested))
}
