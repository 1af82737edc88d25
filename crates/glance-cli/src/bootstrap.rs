use anyhow::Context;

/// Load `.env` from the working directory, then the layered configuration.
pub fn load_config() -> anyhow::Result<glance_config::GlanceConfig> {
    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let env_path = cwd.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
    }

    glance_config::GlanceConfig::load().context("failed to load paperglance configuration")
}
