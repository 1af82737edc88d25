//! Summarization backend connection settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    String::from("http://localhost:8000")
}

const fn default_timeout_secs() -> u64 {
    60
}

fn default_user_agent() -> String {
    String::from("paperglance/0.1")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServiceConfig {
    /// Base URL of the summarization backend (no trailing slash needed).
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout. Summaries of long papers are slow.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl ServiceConfig {
    /// The base URL must be an `http` or `https` URL.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.base_url.starts_with("http://") || self.base_url.starts_with("https://")
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Join an endpoint path onto the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_local_backend() {
        let config = ServiceConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout(), Duration::from_secs(60));
        assert!(config.is_configured());
    }

    #[test]
    fn endpoint_joins_without_double_slash() {
        let config = ServiceConfig {
            base_url: "http://api.example.com/".into(),
            ..Default::default()
        };
        assert_eq!(config.endpoint("/upload/"), "http://api.example.com/upload/");
    }

    #[test]
    fn non_http_base_url_is_not_configured() {
        let config = ServiceConfig {
            base_url: "localhost:8000".into(),
            ..Default::default()
        };
        assert!(!config.is_configured());
    }
}
