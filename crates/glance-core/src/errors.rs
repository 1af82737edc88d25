//! Cross-cutting error types for Paperglance.
//!
//! Errors specific to one layer (`ClientError`, `SessionError`, `ConfigError`)
//! live in their own crates.

use thiserror::Error;

/// Errors that can be raised by any Paperglance crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),
}
