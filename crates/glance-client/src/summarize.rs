//! Summarization and upload-only endpoints.

use glance_core::document::Document;
use glance_core::entities::SummaryResult;
use glance_core::enums::LengthPreference;
use glance_core::ids::RecordId;
use reqwest::multipart::{Form, Part};
use serde::Deserialize;

use crate::http::{check_response, json};
use crate::{ClientError, GlanceClient};

#[derive(Debug, Deserialize)]
struct SummarizeResponse {
    paper_id: Option<String>,
    #[serde(default)]
    summary: String,
    #[serde(default)]
    advantages: Vec<String>,
    #[serde(default)]
    disadvantages: Vec<String>,
    #[serde(default)]
    insights: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    paper_id: String,
    filename: Option<String>,
    #[serde(default)]
    summary: String,
}

/// A summarized document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Id of the record the backend stored for this document.
    pub paper_id: Option<RecordId>,
    pub result: SummaryResult,
}

/// Reply of the upload-only call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub paper_id: RecordId,
    pub filename: String,
    pub summary: String,
}

fn file_part(document: &Document) -> Result<Part, ClientError> {
    Ok(Part::bytes(document.bytes.to_vec())
        .file_name(document.name.clone())
        .mime_str(document.kind.media_type())?)
}

impl GlanceClient {
    /// Submit a document for summarization.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the backend returns a
    /// non-success status, or the response cannot be parsed.
    pub async fn summarize(
        &self,
        document: &Document,
        length: LengthPreference,
    ) -> Result<Summary, ClientError> {
        let form = Form::new()
            .part("file", file_part(document)?)
            .text("summary_length", length.as_str());
        tracing::debug!(file = %document.name, %length, "POST /summarize/");
        let resp = check_response(
            self.http
                .post(self.url("/summarize/"))
                .multipart(form)
                .send()
                .await?,
        )
        .await?;

        let data: SummarizeResponse = json(resp).await?;
        Ok(Summary {
            paper_id: data.paper_id.map(RecordId::new),
            result: SummaryResult {
                summary: data.summary,
                advantages: data.advantages,
                disadvantages: data.disadvantages,
                insights: data.insights,
            },
        })
    }

    /// Upload a document without choosing a length. The backend stores it
    /// and prepares it for chat.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the backend returns a
    /// non-success status, or the response cannot be parsed.
    pub async fn upload(&self, document: &Document) -> Result<Upload, ClientError> {
        let form = Form::new().part("file", file_part(document)?);
        tracing::debug!(file = %document.name, "POST /upload/");
        let resp = check_response(
            self.http
                .post(self.url("/upload/"))
                .multipart(form)
                .send()
                .await?,
        )
        .await?;

        let data: UploadResponse = json(resp).await?;
        Ok(Upload {
            paper_id: RecordId::new(data.paper_id),
            filename: data.filename.unwrap_or_else(|| document.name.clone()),
            summary: data.summary,
        })
    }
}
