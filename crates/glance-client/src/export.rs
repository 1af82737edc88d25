//! PDF export endpoint.

use serde::Serialize;

use crate::http::check_response;
use crate::{ClientError, GlanceClient};

#[derive(Serialize)]
struct ExportRequest<'a> {
    summary_text: &'a str,
}

impl GlanceClient {
    /// Render summary text into a PDF.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidInput`] for blank text, or another
    /// [`ClientError`] if the request fails or the backend returns a
    /// non-success status.
    pub async fn export(&self, summary_text: &str) -> Result<Vec<u8>, ClientError> {
        if summary_text.trim().is_empty() {
            return Err(ClientError::InvalidInput("no summary text provided".into()));
        }
        let resp = check_response(
            self.http
                .post(self.url("/download-summary/"))
                .json(&ExportRequest { summary_text })
                .send()
                .await?,
        )
        .await?;
        Ok(resp.bytes().await?.to_vec())
    }
}
