use glance_config::GlanceConfig;

const SECTIONS: [&str; 4] = ["SERVICE", "SESSION", "HISTORY", "EXPORT"];

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &GlanceConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &GlanceConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();
    let mut warnings = Vec::new();

    for section in SECTIONS {
        let prefix = format!("GLANCE_{section}_");
        let nested = format!("GLANCE_{section}__");
        if let Some(key) = env_keys
            .iter()
            .find(|key| key.starts_with(&prefix) && !key.starts_with(&nested))
        {
            warnings.push(format!(
                "{key} is ignored. Use double underscores between section and field (example: {nested}{}).",
                example_field(section)
            ));
        }
    }

    let default_url = GlanceConfig::default().service.base_url;
    if config.service.base_url == default_url && env_keys.iter().any(|key| key == "GLANCE_BASE_URL")
    {
        warnings.push(
            "GLANCE_BASE_URL is ignored and the backend defaults to localhost. Use GLANCE_SERVICE__BASE_URL."
                .to_string(),
        );
    }

    warnings
}

fn example_field(section: &str) -> &'static str {
    match section {
        "SERVICE" => "BASE_URL",
        "SESSION" => "DEFAULT_LENGTH",
        "HISTORY" => "LIMIT",
        _ => "FILENAME",
    }
}
