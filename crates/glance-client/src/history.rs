//! History store endpoints: listing and deletion.

use chrono::{DateTime, NaiveDateTime, Utc};
use glance_core::entities::{ChatTurn, SessionRecord};
use glance_core::ids::RecordId;
use serde::Deserialize;

use crate::http::{check_response, json};
use crate::{ClientError, GlanceClient};

#[derive(Debug, Deserialize)]
struct SummaryRow {
    #[serde(rename = "_id")]
    id: String,
    paper_id: Option<String>,
    filename: Option<String>,
    #[serde(default)]
    summary: String,
    created_at: String,
    #[serde(default)]
    advantages: Vec<String>,
    #[serde(default)]
    disadvantages: Vec<String>,
    #[serde(default)]
    insights: Vec<String>,
    #[serde(default)]
    qa_history: Vec<QaRow>,
}

#[derive(Debug, Deserialize)]
struct QaRow {
    question: String,
    #[serde(default)]
    answer: String,
}

/// Parse a store timestamp. The store writes naive UTC ISO-8601 values
/// (`2025-04-02T10:15:30.123456`); offsets are accepted too.
fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

impl SummaryRow {
    fn into_record(self) -> Option<SessionRecord> {
        let Some(created_at) = parse_timestamp(&self.created_at) else {
            tracing::warn!(id = %self.id, created_at = %self.created_at, "skipping record with unreadable timestamp");
            return None;
        };
        // Stored newest first; the record keeps them in the order asked.
        let questions = self
            .qa_history
            .into_iter()
            .rev()
            .map(|qa| ChatTurn {
                question: qa.question,
                answer: qa.answer,
            })
            .collect();
        Some(SessionRecord {
            id: RecordId::new(self.id),
            document_id: self.paper_id.map(RecordId::new),
            document_name: self.filename.unwrap_or_else(|| "Unknown".to_string()),
            created_at,
            summary_text: self.summary,
            advantages: self.advantages,
            disadvantages: self.disadvantages,
            insights: self.insights,
            questions,
        })
    }
}

impl GlanceClient {
    /// List stored records, most recent first, up to the configured limit.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the backend returns a
    /// non-success status, or the response cannot be parsed.
    pub async fn list_history(&self) -> Result<Vec<SessionRecord>, ClientError> {
        let url = format!("{}?limit={}", self.url("/summaries/"), self.history_limit);
        let resp = check_response(self.http.get(&url).send().await?).await?;

        let rows: Vec<SummaryRow> = json(resp).await?;
        let mut records: Vec<SessionRecord> =
            rows.into_iter().filter_map(SummaryRow::into_record).collect();
        records.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(records)
    }

    /// Delete one stored record.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::Api`] with status 404 if the store does not
    /// know `id`, or another [`ClientError`] if the request fails.
    pub async fn delete_history(&self, id: &RecordId) -> Result<(), ClientError> {
        let url = self.url(&format!(
            "/delete-summary/{}",
            urlencoding::encode(id.as_str())
        ));
        check_response(self.http.delete(&url).send().await?).await?;
        Ok(())
    }
}
