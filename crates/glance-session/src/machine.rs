//! The session state machine.
//!
//! Every intent is split in two: a synchronous `begin_*` that validates,
//! transitions, and hands back a ticket describing the request to send, and
//! a `complete_*` that applies the response carried with that ticket. The
//! machine never awaits anything itself, so any number of requests can be
//! outstanding and their responses can be applied in whatever order they
//! arrive. Tickets carry the token that was current when they were issued;
//! responses for tickets the machine has moved past are discarded.

use std::sync::Arc;

use chrono::Utc;
use glance_config::{GlanceConfig, SessionConfig};
use glance_core::document::Document;
use glance_core::entities::{SessionRecord, SummaryResult};
use glance_core::enums::{LengthPreference, MachineState};
use glance_core::ids::RecordId;

use crate::backend::{ServiceFailure, SummarizeReply, UploadReceipt};
use crate::error::SessionError;
use crate::history::{HistorySync, ListTicket};
use crate::snapshot::Snapshot;
use crate::token::OperationToken;
use crate::view::ViewState;

/// How a response was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The response changed the session.
    Applied,
    /// The response arrived for an operation that is no longer wanted.
    Discarded,
    /// The service failed; the message is in `last_error`.
    Failed,
    /// Nothing to do (e.g. deleting an id that is not in the collection).
    NoOp,
}

/// Settings the machine needs from configuration.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    pub session: SessionConfig,
    pub export_filename: String,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from(&GlanceConfig::default())
    }
}

impl From<&GlanceConfig> for SessionSettings {
    fn from(config: &GlanceConfig) -> Self {
        Self {
            session: config.session.clone(),
            export_filename: config.export.filename.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SummarizeTicket {
    token: OperationToken,
    pub document: Document,
    pub length: LengthPreference,
}

#[derive(Debug, Clone)]
pub struct UploadTicket {
    display_session: OperationToken,
    pub document: Document,
}

#[derive(Debug, Clone)]
pub struct ChatTicket {
    display_session: OperationToken,
    seq: u64,
    pub question: String,
    pub record: Option<RecordId>,
}

#[derive(Debug, Clone)]
pub struct DeleteTicket {
    pub id: RecordId,
}

#[derive(Debug, Clone)]
pub struct ExportTicket {
    pub summary_text: String,
}

/// Rendered summary ready to be saved by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    pub filename: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug)]
pub struct SessionMachine {
    view: ViewState,
    history: HistorySync,
    last_error: Option<String>,
    settings: SessionSettings,
}

impl SessionMachine {
    #[must_use]
    pub fn new(settings: SessionSettings) -> Self {
        Self {
            view: ViewState::new(settings.session.default_length),
            history: HistorySync::default(),
            last_error: None,
            settings,
        }
    }

    #[must_use]
    pub const fn state(&self) -> MachineState {
        self.view.state
    }

    #[must_use]
    pub const fn history(&self) -> &HistorySync {
        &self.history
    }

    // ── stage ──────────────────────────────────────────────────────────

    /// Stage a dropped or picked file. Starts a new display session.
    ///
    /// Returns an upload ticket when uploads on stage are enabled.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnsupportedFileType`] if the media type is not PDF,
    /// DOC, or DOCX. The machine is left unchanged.
    pub fn stage_file(
        &mut self,
        name: &str,
        media_type: &str,
        bytes: impl Into<Arc<[u8]>>,
    ) -> Result<Option<UploadTicket>, SessionError> {
        let document = Document::new(name, media_type, bytes)
            .map_err(|_| SessionError::UnsupportedFileType(media_type.to_string()))?;

        tracing::debug!(file = %document.name, kind = ?document.kind, "staging file");
        self.view.begin_upload(document.clone());
        self.last_error = None;

        Ok(self.settings.session.upload_on_stage.then(|| UploadTicket {
            display_session: self.view.display_session,
            document,
        }))
    }

    /// Apply the upload-only reply. The store created the record either
    /// way, so it is appended even if the user has moved on.
    pub fn complete_upload(
        &mut self,
        ticket: UploadTicket,
        reply: Result<UploadReceipt, ServiceFailure>,
    ) -> Outcome {
        let current = ticket.display_session == self.view.display_session;
        match reply {
            Ok(receipt) => {
                if current && let Some(staged) = self.view.staged.as_mut() {
                    staged.record_id = Some(receipt.id.clone());
                }
                self.history.append(SessionRecord {
                    document_id: Some(receipt.id.clone()),
                    id: receipt.id,
                    document_name: receipt.filename,
                    created_at: receipt.created_at.unwrap_or_else(Utc::now),
                    summary_text: receipt.summary,
                    advantages: Vec::new(),
                    disadvantages: Vec::new(),
                    insights: Vec::new(),
                    questions: Vec::new(),
                });
                Outcome::Applied
            }
            Err(failure) if current => {
                tracing::warn!(file = %ticket.document.name, %failure, "upload failed");
                self.report(SessionError::UploadFailed(failure.to_string()));
                Outcome::Failed
            }
            Err(failure) => {
                tracing::debug!(%failure, "discarding failed upload for a past display session");
                Outcome::Discarded
            }
        }
    }

    // ── summarize ──────────────────────────────────────────────────────

    /// Start summarizing the staged file.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoFileStaged`] when nothing is staged and
    /// [`SessionError::SummarizationInFlight`] while a previous request for
    /// this machine is still outstanding.
    pub fn begin_summarize(
        &mut self,
        length: Option<LengthPreference>,
    ) -> Result<SummarizeTicket, SessionError> {
        if self.view.in_flight.is_some() {
            return Err(SessionError::SummarizationInFlight);
        }
        let Some(staged) = self.view.staged.as_ref() else {
            return Err(SessionError::NoFileStaged);
        };
        let document = staged.document.clone();

        let length = length.unwrap_or(self.view.length);
        self.view.length = length;
        let token = self.view.current_op.advance();
        self.view.in_flight = Some(token);
        self.view.result = None;
        self.last_error = None;
        self.view.transition(MachineState::Summarizing);

        tracing::debug!(file = %document.name, %length, %token, "summarize requested");
        Ok(SummarizeTicket {
            token,
            document,
            length,
        })
    }

    /// Apply a summarize reply. A reply for a superseded operation leaves
    /// the view alone, but the record the store created is still appended,
    /// matching [`Self::complete_upload`].
    pub fn complete_summarize(
        &mut self,
        ticket: SummarizeTicket,
        reply: Result<SummarizeReply, ServiceFailure>,
    ) -> Outcome {
        if self.view.in_flight != Some(ticket.token) || self.view.current_op != ticket.token {
            tracing::debug!(token = %ticket.token, current = %self.view.current_op, "discarding stale summary");
            if let Ok(SummarizeReply {
                record_id: Some(id),
                result,
            }) = reply
            {
                let result = self.with_summary_fallback(result);
                self.history.append(summary_record(id, &ticket.document.name, &result));
            }
            return Outcome::Discarded;
        }
        self.view.in_flight = None;

        match reply {
            Ok(SummarizeReply { record_id, result }) => {
                let result = self.with_summary_fallback(result);
                if let Some(id) = record_id {
                    if let Some(staged) = self.view.staged.as_mut() {
                        staged.record_id = Some(id.clone());
                    }
                    self.history.append(summary_record(id, &ticket.document.name, &result));
                }
                self.view.result = Some(result);
                self.view.transition(MachineState::ResultReady);
                Outcome::Applied
            }
            Err(failure) => {
                tracing::warn!(file = %ticket.document.name, %failure, "summarization failed");
                self.report(SessionError::SummarizationFailed(failure.to_string()));
                self.view.transition(MachineState::Error);
                Outcome::Failed
            }
        }
    }

    fn with_summary_fallback(&self, mut result: SummaryResult) -> SummaryResult {
        if !result.has_summary() {
            result.summary.clone_from(&self.settings.session.empty_summary_text);
        }
        result
    }

    // ── history ────────────────────────────────────────────────────────

    /// Replay a record from the collection. Starts a new display session.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnknownRecord`] if `id` is not in the collection.
    pub fn select_history(&mut self, id: &RecordId) -> Result<(), SessionError> {
        let record = self
            .history
            .find(id)
            .cloned()
            .ok_or_else(|| SessionError::UnknownRecord(id.clone()))?;
        self.view.begin_replay(&record);
        self.last_error = None;
        Ok(())
    }

    /// Returns `Ok(None)` when `id` is not in the collection: there is
    /// nothing to delete and no request is needed.
    ///
    /// The ticket always names the id the store lists the record under.
    ///
    /// # Errors
    ///
    /// [`SessionError::UnconfirmedRecord`] for a local append no listing has
    /// returned yet. Its store id is unknown until then.
    pub fn begin_delete(&self, id: &RecordId) -> Result<Option<DeleteTicket>, SessionError> {
        let Some(record) = self.history.find(id) else {
            tracing::debug!(%id, "delete ignored: id not in collection");
            return Ok(None);
        };
        let store_id = record.id.clone();
        if !self.history.is_confirmed(&store_id) {
            return Err(SessionError::UnconfirmedRecord(store_id));
        }
        Ok(Some(DeleteTicket { id: store_id }))
    }

    /// Remove the record once the store acknowledged the delete. Tickets
    /// only carry listed ids, so a 404 means the store already lost the
    /// record and the local entry goes too. Any other failure leaves the
    /// collection untouched.
    pub fn complete_delete(
        &mut self,
        ticket: DeleteTicket,
        reply: Result<(), ServiceFailure>,
    ) -> Outcome {
        match reply {
            Ok(()) => {
                self.history.remove(&ticket.id, &mut self.view);
                Outcome::Applied
            }
            Err(failure) if failure.is_not_found() => {
                tracing::debug!(id = %ticket.id, "store no longer has record; removing locally");
                self.history.remove(&ticket.id, &mut self.view);
                Outcome::Applied
            }
            Err(failure) => {
                tracing::warn!(id = %ticket.id, %failure, "delete failed");
                self.report(SessionError::DeleteFailed {
                    id: ticket.id,
                    message: failure.to_string(),
                });
                Outcome::Failed
            }
        }
    }

    pub fn begin_refresh(&mut self) -> ListTicket {
        self.history.begin_refresh()
    }

    pub fn complete_refresh(
        &mut self,
        ticket: ListTicket,
        reply: Result<Vec<SessionRecord>, ServiceFailure>,
    ) -> Outcome {
        let outcome = match reply {
            Ok(records) => {
                if !self.history.apply_listing(ticket, records) {
                    return Outcome::Discarded;
                }
                Outcome::Applied
            }
            Err(failure) => {
                if !self.history.apply_listing_failure(ticket) {
                    return Outcome::Discarded;
                }
                tracing::warn!(%failure, "history listing failed");
                self.report(SessionError::HistoryUnavailable(failure.to_string()));
                Outcome::Failed
            }
        };
        self.reconcile_replay();
        outcome
    }

    /// Keep the replay pointing at a record in the collection. A local append
    /// the listing replaced is followed to the store's row. A record that is
    /// gone altogether ends the replay.
    fn reconcile_replay(&mut self) {
        if self.view.state != MachineState::Replaying {
            return;
        }
        let Some(replayed) = self.view.replay.clone() else {
            return;
        };
        if self.history.contains(&replayed) {
            return;
        }
        match self.history.find(&replayed).map(|record| record.id.clone()) {
            Some(listed) => {
                tracing::debug!(from = %replayed, to = %listed, "replay follows listed record");
                self.view.rebind_replay(listed);
            }
            None => {
                tracing::debug!(id = %replayed, "replayed record left the collection");
                self.view.reset_to_idle();
            }
        }
    }

    // ── chat ───────────────────────────────────────────────────────────

    /// Queue a question about the displayed summary.
    ///
    /// # Errors
    ///
    /// [`SessionError::EmptyQuestion`] for blank text and
    /// [`SessionError::NoSummaryDisplayed`] when there is nothing to ask about.
    pub fn begin_question(&mut self, text: &str) -> Result<ChatTicket, SessionError> {
        let question = text.trim();
        if question.is_empty() {
            return Err(SessionError::EmptyQuestion);
        }
        if self.view.displayed_summary().is_none() {
            return Err(SessionError::NoSummaryDisplayed);
        }
        let seq = self.view.transcript.ask(question.to_string());
        Ok(ChatTicket {
            display_session: self.view.display_session,
            seq,
            question: question.to_string(),
            record: self.view.scoped_record(),
        })
    }

    /// Record the answer. A failed call still produces a turn carrying the
    /// fallback answer.
    pub fn complete_question(
        &mut self,
        ticket: ChatTicket,
        reply: Result<String, ServiceFailure>,
    ) -> Outcome {
        if ticket.display_session != self.view.display_session {
            tracing::debug!(question = %ticket.question, "discarding answer for a past display session");
            return Outcome::Discarded;
        }
        let answer = match reply {
            Ok(answer) if answer.trim().is_empty() => {
                self.settings.session.empty_answer_text.clone()
            }
            Ok(answer) => answer,
            Err(failure) => {
                tracing::warn!(%failure, "chat request failed; recording fallback answer");
                self.settings.session.chat_fallback_answer.clone()
            }
        };
        if self.view.transcript.answer(ticket.seq, answer) {
            Outcome::Applied
        } else {
            Outcome::Discarded
        }
    }

    // ── export ─────────────────────────────────────────────────────────

    /// # Errors
    ///
    /// [`SessionError::NoSummaryDisplayed`] when there is nothing to export.
    pub fn begin_download(&self) -> Result<ExportTicket, SessionError> {
        self.view
            .displayed_summary()
            .map(|summary| ExportTicket {
                summary_text: summary.to_string(),
            })
            .ok_or(SessionError::NoSummaryDisplayed)
    }

    pub fn complete_download(
        &mut self,
        _ticket: ExportTicket,
        reply: Result<Vec<u8>, ServiceFailure>,
    ) -> Option<ExportedFile> {
        match reply {
            Ok(bytes) => Some(ExportedFile {
                filename: self.settings.export_filename.clone(),
                bytes,
            }),
            Err(failure) => {
                tracing::warn!(%failure, "export failed");
                self.report(SessionError::ExportFailed(failure.to_string()));
                None
            }
        }
    }

    // ── snapshot ───────────────────────────────────────────────────────

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.view.state,
            staged_file: self
                .view
                .staged
                .as_ref()
                .map(|staged| staged.document.name.clone()),
            length: self.view.length,
            replaying: match self.view.state {
                MachineState::Replaying => self.view.replay.clone(),
                _ => None,
            },
            result: self.view.result.clone(),
            transcript: self.view.transcript.turns().to_vec(),
            pending_questions: self.view.transcript.pending_len(),
            history: self.history.records(),
            last_error: self.last_error.clone(),
        }
    }

    /// Content of the result slot, if any.
    #[must_use]
    pub const fn result(&self) -> Option<&SummaryResult> {
        self.view.result.as_ref()
    }

    fn report(&mut self, error: SessionError) {
        self.last_error = Some(error.to_string());
    }
}

fn summary_record(id: RecordId, document_name: &str, result: &SummaryResult) -> SessionRecord {
    SessionRecord {
        document_id: Some(id.clone()),
        id,
        document_name: document_name.to_string(),
        created_at: Utc::now(),
        summary_text: result.summary.clone(),
        advantages: result.advantages.clone(),
        disadvantages: result.disadvantages.clone(),
        insights: result.insights.clone(),
        questions: Vec::new(),
    }
}
