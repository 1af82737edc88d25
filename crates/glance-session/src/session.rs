//! Async driver around [`SessionMachine`].
//!
//! The machine lock is never held across a backend call: each intent takes
//! the lock to begin, releases it while the request is outstanding, and
//! takes it again to apply the response. Several intents may therefore be
//! awaiting the backend at once, and the machine's tokens decide which
//! responses still count when they land.

use std::sync::Arc;

use glance_core::enums::LengthPreference;
use glance_core::ids::RecordId;
use tokio::sync::{Mutex, MutexGuard, watch};

use crate::backend::Backend;
use crate::error::SessionError;
use crate::machine::{ExportedFile, Outcome, SessionMachine, SessionSettings};
use crate::snapshot::Snapshot;

pub struct Session<B> {
    backend: B,
    machine: Mutex<SessionMachine>,
    updates: watch::Sender<Snapshot>,
}

impl<B: Backend + Sync> Session<B> {
    pub fn new(backend: B, settings: SessionSettings) -> Self {
        let machine = SessionMachine::new(settings);
        let (updates, _) = watch::channel(machine.snapshot());
        Self {
            backend,
            machine: Mutex::new(machine),
            updates,
        }
    }

    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Receive a new [`Snapshot`] after every change.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.updates.subscribe()
    }

    /// The most recently published snapshot.
    pub fn snapshot(&self) -> Snapshot {
        self.updates.borrow().clone()
    }

    fn publish(&self, machine: &MutexGuard<'_, SessionMachine>) {
        self.updates.send_replace(machine.snapshot());
    }

    /// Stage a file and, when configured, upload it.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnsupportedFileType`] for anything other than
    /// PDF, DOC, or DOCX.
    pub async fn stage_file(
        &self,
        name: &str,
        media_type: &str,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Result<Outcome, SessionError> {
        let ticket = {
            let mut machine = self.machine.lock().await;
            let ticket = machine.stage_file(name, media_type, bytes)?;
            self.publish(&machine);
            ticket
        };
        let Some(ticket) = ticket else {
            return Ok(Outcome::NoOp);
        };

        let reply = self.backend.upload(&ticket.document).await;
        let mut machine = self.machine.lock().await;
        let outcome = machine.complete_upload(ticket, reply);
        self.publish(&machine);
        Ok(outcome)
    }

    /// Summarize the staged file.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoFileStaged`] or
    /// [`SessionError::SummarizationInFlight`]. Service failures are
    /// reported through the snapshot instead.
    pub async fn summarize(
        &self,
        length: Option<LengthPreference>,
    ) -> Result<Outcome, SessionError> {
        let ticket = {
            let mut machine = self.machine.lock().await;
            let ticket = machine.begin_summarize(length)?;
            self.publish(&machine);
            ticket
        };

        let reply = self.backend.summarize(&ticket.document, ticket.length).await;
        let mut machine = self.machine.lock().await;
        let outcome = machine.complete_summarize(ticket, reply);
        self.publish(&machine);
        Ok(outcome)
    }

    /// Replay a record from the history collection.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnknownRecord`] if `id` is not in the collection.
    pub async fn select_history(&self, id: &RecordId) -> Result<(), SessionError> {
        let mut machine = self.machine.lock().await;
        machine.select_history(id)?;
        self.publish(&machine);
        Ok(())
    }

    /// Delete a history record, by its store id or by the id of the
    /// document it was made from.
    ///
    /// A record this session appended is not known to the store under that
    /// id, so the collection is refreshed first to learn the store id.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::UnconfirmedRecord`] if the refreshed listing
    /// still does not include the record.
    pub async fn delete_history(&self, id: &RecordId) -> Result<Outcome, SessionError> {
        let first = self.machine.lock().await.begin_delete(id);
        let ticket = match first {
            Err(SessionError::UnconfirmedRecord(_)) => {
                tracing::debug!(%id, "resolving store id before delete");
                self.refresh_history().await;
                self.machine.lock().await.begin_delete(id)?
            }
            other => other?,
        };
        let Some(ticket) = ticket else {
            return Ok(Outcome::NoOp);
        };

        let reply = self.backend.delete_history(&ticket.id).await;
        let mut machine = self.machine.lock().await;
        let outcome = machine.complete_delete(ticket, reply);
        self.publish(&machine);
        Ok(outcome)
    }

    /// Ask about the displayed summary.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::EmptyQuestion`] or
    /// [`SessionError::NoSummaryDisplayed`].
    pub async fn ask_question(&self, text: &str) -> Result<Outcome, SessionError> {
        let ticket = {
            let mut machine = self.machine.lock().await;
            let ticket = machine.begin_question(text)?;
            self.publish(&machine);
            ticket
        };

        let reply = self
            .backend
            .ask(&ticket.question, ticket.record.as_ref())
            .await;
        let mut machine = self.machine.lock().await;
        let outcome = machine.complete_question(ticket, reply);
        self.publish(&machine);
        Ok(outcome)
    }

    /// Render the displayed summary for download. `Ok(None)` means the
    /// export service failed and the snapshot carries the error.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::NoSummaryDisplayed`] when there is nothing to export.
    pub async fn download(&self) -> Result<Option<ExportedFile>, SessionError> {
        let ticket = self.machine.lock().await.begin_download()?;

        let reply = self.backend.export(&ticket.summary_text).await;
        let mut machine = self.machine.lock().await;
        let file = machine.complete_download(ticket, reply);
        self.publish(&machine);
        Ok(file)
    }

    pub async fn refresh_history(&self) -> Outcome {
        let ticket = self.machine.lock().await.begin_refresh();

        let reply = self.backend.list_history().await;
        let mut machine = self.machine.lock().await;
        let outcome = machine.complete_refresh(ticket, reply);
        self.publish(&machine);
        outcome
    }
}
