use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{ChatTurn, SummaryResult};
use crate::ids::RecordId;

/// One persisted document analysis, as held by the history store.
///
/// Fields are populated once and never retracted. A record created by the
/// upload-only path may carry summary text but no findings yet.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SessionRecord {
    pub id: RecordId,
    /// Id of the uploaded document the summary was produced from. Chat
    /// questions about this record are scoped to it.
    #[serde(default)]
    pub document_id: Option<RecordId>,
    pub document_name: String,
    pub created_at: DateTime<Utc>,
    pub summary_text: String,
    #[serde(default)]
    pub advantages: Vec<String>,
    #[serde(default)]
    pub disadvantages: Vec<String>,
    #[serde(default)]
    pub insights: Vec<String>,
    /// Question/answer pairs the store kept for this document.
    #[serde(default)]
    pub questions: Vec<ChatTurn>,
}

impl SessionRecord {
    /// The record's content as it appears in the result slot when replayed.
    #[must_use]
    pub fn result(&self) -> SummaryResult {
        SummaryResult {
            summary: self.summary_text.clone(),
            advantages: self.advantages.clone(),
            disadvantages: self.disadvantages.clone(),
            insights: self.insights.clone(),
        }
    }
}
