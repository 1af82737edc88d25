//! Shared HTTP response helpers.
//!
//! Centralizes status-code checks (429 rate limiting with `Retry-After`
//! parsing, non-success -> [`ClientError::Api`]) so the endpoint modules
//! stay focused on request construction and response mapping.

use serde::Deserialize;

use crate::error::ClientError;

/// Error body of the backend: `{"detail": ...}` for most endpoints,
/// `{"error": ...}` for the dictionary lookup.
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
    error: Option<String>,
}

/// Check an HTTP response for common error conditions.
///
/// Returns the response unchanged on success. Handles:
/// - **429 Too Many Requests** -> [`ClientError::RateLimited`] with
///   `Retry-After` header parsing (falls back to 60 s if absent or
///   unparseable).
/// - **Non-success status** -> [`ClientError::Api`] with status code and
///   the body's error message.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    if resp.status() == 429 {
        return Err(ClientError::RateLimited {
            retry_after_secs: parse_retry_after(&resp),
        });
    }
    if !resp.status().is_success() {
        let status = resp.status().as_u16();
        let body = resp.text().await.unwrap_or_default();
        return Err(ClientError::Api {
            status,
            message: error_message(body),
        });
    }
    Ok(resp)
}

/// Decode a JSON body, reporting malformed payloads as [`ClientError::Parse`].
pub async fn json<T: serde::de::DeserializeOwned>(resp: reqwest::Response) -> Result<T, ClientError> {
    let body = resp.text().await?;
    serde_json::from_str(&body).map_err(|e| ClientError::Parse(e.to_string()))
}

fn error_message(body: String) -> String {
    serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|parsed| parsed.detail.or(parsed.error))
        .unwrap_or(body)
}

/// Parse the `Retry-After` header as seconds, falling back to 60 s.
fn parse_retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<u64>().ok())
        .unwrap_or(60)
}
