//! Session error types.
//!
//! Validation errors are returned synchronously from an intent and leave the
//! machine untouched. Service errors never escape an intent: the machine
//! records their message in the snapshot's `last_error`.

use glance_core::ids::RecordId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("unsupported file type '{0}': upload a PDF or Word document")]
    UnsupportedFileType(String),

    #[error("no file is staged")]
    NoFileStaged,

    #[error("a summarization is already in progress")]
    SummarizationInFlight,

    #[error("question text is empty")]
    EmptyQuestion,

    #[error("no summary is displayed")]
    NoSummaryDisplayed,

    #[error("history record {0} is not in the collection")]
    UnknownRecord(RecordId),

    #[error("history record {0} is not in the store's listing yet; refresh history and try again")]
    UnconfirmedRecord(RecordId),

    #[error("summarization failed: {0}")]
    SummarizationFailed(String),

    #[error("upload failed: {0}")]
    UploadFailed(String),

    #[error("history unavailable: {0}")]
    HistoryUnavailable(String),

    #[error("failed to delete history record {id}: {message}")]
    DeleteFailed { id: RecordId, message: String },

    #[error("failed to export summary: {0}")]
    ExportFailed(String),
}

impl SessionError {
    /// Validation errors are rejected before any network call.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedFileType(_)
                | Self::NoFileStaged
                | Self::SummarizationInFlight
                | Self::EmptyQuestion
                | Self::NoSummaryDisplayed
                | Self::UnknownRecord(_)
                | Self::UnconfirmedRecord(_)
        )
    }
}
