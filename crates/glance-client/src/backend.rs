use glance_core::document::Document;
use glance_core::entities::SessionRecord;
use glance_core::enums::LengthPreference;
use glance_core::ids::RecordId;
use glance_session::{Backend, ServiceFailure, SummarizeReply, UploadReceipt};

use crate::GlanceClient;

impl Backend for GlanceClient {
    async fn summarize(
        &self,
        document: &Document,
        length: LengthPreference,
    ) -> Result<SummarizeReply, ServiceFailure> {
        let summary = Self::summarize(self, document, length).await?;
        Ok(SummarizeReply {
            record_id: summary.paper_id,
            result: summary.result,
        })
    }

    async fn upload(&self, document: &Document) -> Result<UploadReceipt, ServiceFailure> {
        let upload = Self::upload(self, document).await?;
        Ok(UploadReceipt {
            id: upload.paper_id,
            filename: upload.filename,
            summary: upload.summary,
            created_at: None,
        })
    }

    async fn ask(&self, question: &str, record: Option<&RecordId>) -> Result<String, ServiceFailure> {
        Ok(Self::ask(self, question, record).await?)
    }

    async fn list_history(&self) -> Result<Vec<SessionRecord>, ServiceFailure> {
        Ok(Self::list_history(self).await?)
    }

    async fn delete_history(&self, id: &RecordId) -> Result<(), ServiceFailure> {
        Ok(Self::delete_history(self, id).await?)
    }

    async fn export(&self, summary_text: &str) -> Result<Vec<u8>, ServiceFailure> {
        Ok(Self::export(self, summary_text).await?)
    }
}
