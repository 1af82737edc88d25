//! In-memory backend for session tests.
//!
//! The fake behaves like a small history store: uploads and summaries
//! create records with fresh ids, listings return what the store holds, and
//! deletes of unknown ids answer 404. Individual calls can be held back
//! with a gate so tests decide the order in which responses arrive.
//!
//! By default a record has one id. [`FakeBackend::with_split_ids`] makes the
//! store behave like the real service: records are listed and deleted by a
//! summary id (`sum-N`) while upload and summarize answer with the
//! document id (`doc-N`).

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Duration, TimeZone, Utc};
use glance_core::document::Document;
use glance_core::entities::{SessionRecord, SummaryResult};
use glance_core::enums::LengthPreference;
use glance_core::ids::RecordId;
use glance_session::{Backend, ServiceFailure, SummarizeReply, UploadReceipt};
use tokio::sync::oneshot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Summarize(String, LengthPreference),
    Upload(String),
    Ask(String, Option<RecordId>),
    List,
    Delete(RecordId),
    Export(String),
}

#[derive(Default)]
struct Store {
    next_id: i64,
    split_ids: bool,
    records: Vec<SessionRecord>,
    summaries: HashMap<String, String>,
    failing: HashMap<&'static str, ServiceFailure>,
    gates: HashMap<String, oneshot::Receiver<()>>,
    calls: Vec<Call>,
}

#[derive(Default)]
pub struct FakeBackend {
    store: Mutex<Store>,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Summary text returned for documents named `name`.
    pub fn with_summary(self, name: &str, summary: &str) -> Self {
        self.store
            .lock()
            .unwrap()
            .summaries
            .insert(name.to_string(), summary.to_string());
        self
    }

    pub fn with_split_ids(self) -> Self {
        self.store.lock().unwrap().split_ids = true;
        self
    }

    /// Make every call of `operation` fail.
    pub fn fail(&self, operation: &'static str, failure: ServiceFailure) {
        self.store.lock().unwrap().failing.insert(operation, failure);
    }

    pub fn recover(&self, operation: &'static str) {
        self.store.lock().unwrap().failing.remove(operation);
    }

    /// Hold back the next call keyed by `key` (a document name, a question,
    /// or `"list"`) until the returned sender fires.
    pub fn gate(&self, key: &str) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.store.lock().unwrap().gates.insert(key.to_string(), rx);
        tx
    }

    pub fn calls(&self) -> Vec<Call> {
        self.store.lock().unwrap().calls.clone()
    }

    pub fn stored_ids(&self) -> Vec<RecordId> {
        self.store
            .lock()
            .unwrap()
            .records
            .iter()
            .map(|record| record.id.clone())
            .collect()
    }

    /// Remove a record behind the session's back.
    pub fn forget(&self, id: &RecordId) {
        self.store.lock().unwrap().records.retain(|record| &record.id != id);
    }

    fn enter(&self, call: Call, key: &str) -> Option<oneshot::Receiver<()>> {
        let mut store = self.store.lock().unwrap();
        store.calls.push(call);
        store.gates.remove(key)
    }

    fn failure(&self, operation: &str) -> Option<ServiceFailure> {
        self.store.lock().unwrap().failing.get(operation).cloned()
    }

    fn create(&self, name: &str) -> SessionRecord {
        let mut store = self.store.lock().unwrap();
        store.next_id += 1;
        let summary = store
            .summaries
            .get(name)
            .cloned()
            .unwrap_or_else(|| format!("summary of {name}"));
        let n = store.next_id;
        let (id, document_id) = if store.split_ids {
            (format!("sum-{n}"), Some(RecordId::new(format!("doc-{n}"))))
        } else {
            (format!("rec-{n}"), None)
        };
        let record = SessionRecord {
            id: RecordId::new(id),
            document_id,
            document_name: name.to_string(),
            created_at: Utc.with_ymd_and_hms(2025, 4, 2, 9, 0, 0).unwrap()
                + Duration::minutes(store.next_id),
            summary_text: summary,
            advantages: vec![],
            disadvantages: vec![],
            insights: vec![],
            questions: vec![],
        };
        store.records.push(record.clone());
        record
    }
}

/// The id upload and summarize replies carry.
fn reply_id(record: &SessionRecord) -> RecordId {
    record.document_id.clone().unwrap_or_else(|| record.id.clone())
}

async fn wait(gate: Option<oneshot::Receiver<()>>) {
    if let Some(gate) = gate {
        let _ = gate.await;
    }
}

impl Backend for FakeBackend {
    async fn summarize(
        &self,
        document: &Document,
        length: LengthPreference,
    ) -> Result<SummarizeReply, ServiceFailure> {
        let gate = self.enter(Call::Summarize(document.name.clone(), length), &document.name);
        wait(gate).await;
        if let Some(failure) = self.failure("summarize") {
            return Err(failure);
        }
        let record = self.create(&document.name);
        Ok(SummarizeReply {
            record_id: Some(reply_id(&record)),
            result: SummaryResult::text(record.summary_text),
        })
    }

    async fn upload(&self, document: &Document) -> Result<UploadReceipt, ServiceFailure> {
        let gate = self.enter(Call::Upload(document.name.clone()), &format!("upload:{}", document.name));
        wait(gate).await;
        if let Some(failure) = self.failure("upload") {
            return Err(failure);
        }
        let record = self.create(&document.name);
        Ok(UploadReceipt {
            id: reply_id(&record),
            filename: record.document_name,
            summary: record.summary_text,
            created_at: Some(record.created_at),
        })
    }

    async fn ask(&self, question: &str, record: Option<&RecordId>) -> Result<String, ServiceFailure> {
        let gate = self.enter(Call::Ask(question.to_string(), record.cloned()), question);
        wait(gate).await;
        if let Some(failure) = self.failure("ask") {
            return Err(failure);
        }
        Ok(format!("answer to {question}"))
    }

    async fn list_history(&self) -> Result<Vec<SessionRecord>, ServiceFailure> {
        // The listing reflects the store at the moment the request arrived.
        let gate = self.enter(Call::List, "list");
        let records = self.store.lock().unwrap().records.clone();
        wait(gate).await;
        if let Some(failure) = self.failure("list") {
            return Err(failure);
        }
        Ok(records)
    }

    async fn delete_history(&self, id: &RecordId) -> Result<(), ServiceFailure> {
        let gate = self.enter(Call::Delete(id.clone()), &format!("delete:{id}"));
        wait(gate).await;
        if let Some(failure) = self.failure("delete") {
            return Err(failure);
        }
        let mut store = self.store.lock().unwrap();
        let before = store.records.len();
        store.records.retain(|record| &record.id != id);
        if store.records.len() == before {
            return Err(ServiceFailure::status(404, "Summary not found"));
        }
        Ok(())
    }

    async fn export(&self, summary_text: &str) -> Result<Vec<u8>, ServiceFailure> {
        let gate = self.enter(Call::Export(summary_text.to_string()), "export");
        wait(gate).await;
        if let Some(failure) = self.failure("export") {
            return Err(failure);
        }
        Ok(format!("%PDF-1.4 {summary_text}").into_bytes())
    }
}
