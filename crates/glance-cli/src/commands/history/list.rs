use glance_core::entities::SessionRecord;
use serde::Serialize;

use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

/// One line of `history list --format table`.
#[derive(Debug, Serialize)]
pub struct HistoryRow {
    pub id: String,
    pub document: String,
    pub created_at: String,
    pub questions: usize,
    pub summary: String,
}

impl From<&SessionRecord> for HistoryRow {
    fn from(record: &SessionRecord) -> Self {
        Self {
            id: record.id.to_string(),
            document: record.document_name.clone(),
            created_at: record.created_at.format("%Y-%m-%d %H:%M").to_string(),
            questions: record.questions.len(),
            summary: record.summary_text.clone(),
        }
    }
}

pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let records = ctx.client.list_history().await?;
    match flags.format {
        OutputFormat::Table => {
            let rows: Vec<HistoryRow> = records.iter().map(HistoryRow::from).collect();
            output(&rows, flags.format)
        }
        OutputFormat::Json | OutputFormat::Raw => output(&records, flags.format),
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};
    use glance_core::entities::ChatTurn;
    use glance_core::ids::RecordId;
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn row_summarizes_record() {
        let record = SessionRecord {
            id: RecordId::new("s1"),
            document_id: Some(RecordId::new("p1")),
            document_name: "paper1.pdf".into(),
            created_at: Utc.with_ymd_and_hms(2025, 4, 2, 10, 15, 30).unwrap(),
            summary_text: "S1".into(),
            advantages: vec![],
            disadvantages: vec![],
            insights: vec![],
            questions: vec![ChatTurn {
                question: "q".into(),
                answer: "a".into(),
            }],
        };

        let row = HistoryRow::from(&record);
        assert_eq!(row.id, "s1");
        assert_eq!(row.created_at, "2025-04-02 10:15");
        assert_eq!(row.questions, 1);
    }
}
