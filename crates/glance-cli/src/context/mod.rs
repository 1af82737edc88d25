mod config_warnings;

use glance_client::GlanceClient;
use glance_config::GlanceConfig;
use glance_session::SessionSettings;

pub use config_warnings::warn_unconfigured;

/// Configuration and the backend client, shared by every command.
pub struct AppContext {
    pub config: GlanceConfig,
    pub client: GlanceClient,
}

impl AppContext {
    pub fn init(config: GlanceConfig) -> anyhow::Result<Self> {
        let client = GlanceClient::new(&config)?;
        tracing::debug!(base_url = client.base_url(), "backend client ready");
        Ok(Self { config, client })
    }

    /// Settings for the interactive shell.
    pub fn session_settings(&self) -> SessionSettings {
        SessionSettings::from(&self.config)
    }

    /// Settings for one-shot commands, which never upload on stage: the
    /// command itself decides which single request to send.
    pub fn one_shot_settings(&self) -> SessionSettings {
        let mut settings = self.session_settings();
        settings.session.upload_on_stage = false;
        settings
    }
}
