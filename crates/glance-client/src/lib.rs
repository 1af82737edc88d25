//! # glance-client
//!
//! HTTP client for the Paperglance summarization backend.
//!
//! One [`GlanceClient`] covers every collaborator the session consumes:
//! - summarization and upload-only (`/summarize/`, `/upload/`)
//! - chat (`/chat/`)
//! - history listing and deletion (`/summaries/`, `/delete-summary/{id}`)
//! - PDF export (`/download-summary/`)
//! - dictionary lookup (`/api/define`)
//!
//! [`GlanceClient`] implements [`glance_session::Backend`], so a
//! `Session<GlanceClient>` drives the real service.

pub mod chat;
pub mod define;
pub mod export;
pub mod history;
pub mod summarize;

mod backend;
mod error;
mod http;

pub use error::ClientError;

use glance_config::{GlanceConfig, ServiceConfig};

/// HTTP client for the summarization backend.
#[derive(Debug, Clone)]
pub struct GlanceClient {
    http: reqwest::Client,
    service: ServiceConfig,
    history_limit: u32,
}

impl GlanceClient {
    /// Build a client from loaded configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Config`] if the service section has no usable
    /// base URL, or [`ClientError::Http`] if the `reqwest` client fails to build.
    pub fn new(config: &GlanceConfig) -> Result<Self, ClientError> {
        if !config.service.is_configured() {
            return Err(glance_config::ConfigError::NotConfigured {
                section: "service".to_string(),
            }
            .into());
        }
        let http = reqwest::Client::builder()
            .user_agent(&config.service.user_agent)
            .timeout(config.service.timeout())
            .build()?;
        Ok(Self {
            http,
            service: config.service.clone(),
            history_limit: config.history.limit,
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.service.base_url
    }

    fn url(&self, path: &str) -> String {
        self.service.endpoint(path)
    }
}
