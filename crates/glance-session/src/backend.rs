//! Contracts of the external collaborators the session consumes.
//!
//! The summarization service, chat service, history store, and export
//! service are reached through one [`Backend`]. `glance-client` provides the
//! HTTP implementation; tests provide scripted ones.

use std::fmt;
use std::future::Future;

use chrono::{DateTime, Utc};
use glance_core::document::Document;
use glance_core::entities::{SessionRecord, SummaryResult};
use glance_core::enums::LengthPreference;
use glance_core::ids::RecordId;

/// A failed collaborator call, reduced to what the session needs to know.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceFailure {
    /// HTTP status when the service answered; `None` for transport failures
    /// and timeouts.
    pub status: Option<u16>,
    pub message: String,
}

impl fmt::Display for ServiceFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(f, "service returned {status}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

impl std::error::Error for ServiceFailure {}

impl ServiceFailure {
    #[must_use]
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            message: message.into(),
        }
    }

    #[must_use]
    pub fn transport(message: impl Into<String>) -> Self {
        Self {
            status: None,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn is_not_found(&self) -> bool {
        self.status == Some(404)
    }
}

/// Reply of the upload-only call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReceipt {
    pub id: RecordId,
    pub filename: String,
    pub summary: String,
    pub created_at: Option<DateTime<Utc>>,
}

/// Reply of the summarize call. `record_id` is set when the service
/// persisted the result as a new history record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummarizeReply {
    pub record_id: Option<RecordId>,
    pub result: SummaryResult,
}

/// External services consumed by the session machine.
pub trait Backend {
    /// Submit a document for summarization with a length preference.
    fn summarize(
        &self,
        document: &Document,
        length: LengthPreference,
    ) -> impl Future<Output = Result<SummarizeReply, ServiceFailure>> + Send;

    /// Upload a document so it can be chatted about; returns its new record.
    fn upload(
        &self,
        document: &Document,
    ) -> impl Future<Output = Result<UploadReceipt, ServiceFailure>> + Send;

    /// Ask a question about the last uploaded or summarized document.
    fn ask(
        &self,
        question: &str,
        record: Option<&RecordId>,
    ) -> impl Future<Output = Result<String, ServiceFailure>> + Send;

    /// List stored records.
    fn list_history(&self) -> impl Future<Output = Result<Vec<SessionRecord>, ServiceFailure>> + Send;

    /// Delete one stored record.
    fn delete_history(&self, id: &RecordId) -> impl Future<Output = Result<(), ServiceFailure>> + Send;

    /// Render summary text into a downloadable document.
    fn export(&self, summary_text: &str) -> impl Future<Output = Result<Vec<u8>, ServiceFailure>> + Send;
}
