//! Client error types.

use glance_config::ConfigError;
use glance_session::ServiceFailure;
use thiserror::Error;

/// Errors that can occur when talking to the summarization backend.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP transport error, including timeouts.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the backend.
        status: u16,
        /// `detail` of the error body, or the raw body.
        message: String,
    },

    /// Failed to parse a backend response.
    #[error("parse error: {0}")]
    Parse(String),

    /// The backend returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// Rejected before sending.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<ClientError> for ServiceFailure {
    fn from(err: ClientError) -> Self {
        match err {
            ClientError::Api { status, message } => Self::status(status, message),
            ClientError::RateLimited { .. } => Self::status(429, err.to_string()),
            ClientError::Http(ref source) if source.is_timeout() => {
                Self::transport(format!("request timed out: {source}"))
            }
            ClientError::Http(ref source) => match source.status() {
                Some(status) => Self::status(status.as_u16(), source.to_string()),
                None => Self::transport(err.to_string()),
            },
            ClientError::Parse(_) | ClientError::InvalidInput(_) | ClientError::Config(_) => {
                Self::transport(err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_keep_their_status() {
        let failure = ServiceFailure::from(ClientError::Api {
            status: 404,
            message: "Summary not found".into(),
        });
        assert!(failure.is_not_found());
        assert_eq!(failure.message, "Summary not found");
    }

    #[test]
    fn parse_errors_become_transport_failures() {
        let failure = ServiceFailure::from(ClientError::Parse("missing field `summary`".into()));
        assert_eq!(failure.status, None);
        assert_eq!(failure.message, "parse error: missing field `summary`");
    }

    #[test]
    fn rate_limits_map_to_429() {
        let failure = ServiceFailure::from(ClientError::RateLimited {
            retry_after_secs: 30,
        });
        assert_eq!(failure.status, Some(429));
    }
}
