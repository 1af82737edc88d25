//! Chat endpoint.

use glance_core::ids::RecordId;
use reqwest::multipart::Form;
use serde::Deserialize;

use crate::http::{check_response, json};
use crate::{ClientError, GlanceClient};

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    answer: String,
}

impl GlanceClient {
    /// Ask a question about a document.
    ///
    /// With `record` set the question is scoped to that document; otherwise
    /// the backend answers about the document it processed last.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError`] if the request fails, the backend returns a
    /// non-success status, or the response cannot be parsed.
    pub async fn ask(&self, question: &str, record: Option<&RecordId>) -> Result<String, ClientError> {
        let mut form = Form::new().text("question", question.to_string());
        if let Some(id) = record {
            form = form.text("paper_id", id.to_string());
        }
        tracing::debug!(?record, "POST /chat/");
        let resp = check_response(
            self.http
                .post(self.url("/chat/"))
                .multipart(form)
                .send()
                .await?,
        )
        .await?;

        let data: ChatResponse = json(resp).await?;
        Ok(data.answer)
    }
}
