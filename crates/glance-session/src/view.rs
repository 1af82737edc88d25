//! What is currently on screen.
//!
//! Exactly one of: an upload (a staged file, possibly with a result), a
//! replay of one history record, or nothing. Entering one mode clears the
//! other, and every change of mode starts a new display session, which
//! empties the chat transcript and retires outstanding operation tokens.

use glance_core::document::Document;
use glance_core::entities::{SessionRecord, SummaryResult};
use glance_core::enums::{LengthPreference, MachineState};
use glance_core::ids::RecordId;

use crate::token::OperationToken;
use crate::transcript::Transcript;

#[derive(Debug, Clone)]
pub(crate) struct StagedUpload {
    pub(crate) document: Document,
    /// Store id of this upload once the service reported one.
    pub(crate) record_id: Option<RecordId>,
}

#[derive(Debug, Default)]
pub(crate) struct ViewState {
    pub(crate) state: MachineState,
    pub(crate) staged: Option<StagedUpload>,
    pub(crate) replay: Option<RecordId>,
    /// Document id chat questions are scoped to while replaying.
    replay_scope: Option<RecordId>,
    pub(crate) result: Option<SummaryResult>,
    pub(crate) transcript: Transcript,
    pub(crate) length: LengthPreference,
    /// Identifies the current display session.
    pub(crate) display_session: OperationToken,
    /// Token of the most recent summarize request.
    pub(crate) current_op: OperationToken,
    pub(crate) in_flight: Option<OperationToken>,
}

impl ViewState {
    pub(crate) fn new(length: LengthPreference) -> Self {
        Self {
            length,
            ..Self::default()
        }
    }

    pub(crate) fn transition(&mut self, next: MachineState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "invalid transition {} -> {next}",
            self.state
        );
        if !self.state.can_transition_to(next) {
            tracing::error!(from = %self.state, to = %next, "invalid session transition");
        }
        tracing::debug!(from = %self.state, to = %next, "session transition");
        self.state = next;
    }

    pub(crate) fn is_replaying(&self, id: &RecordId) -> bool {
        self.state == MachineState::Replaying && self.replay.as_ref() == Some(id)
    }

    /// Drop everything tied to the current display session.
    fn start_display_session(&mut self) {
        self.display_session.advance();
        self.current_op.advance();
        self.in_flight = None;
        self.staged = None;
        self.replay = None;
        self.replay_scope = None;
        self.result = None;
        self.transcript = Transcript::default();
    }

    pub(crate) fn begin_upload(&mut self, document: Document) {
        if self.state == MachineState::Replaying {
            self.reset_to_idle();
        }
        self.start_display_session();
        self.staged = Some(StagedUpload {
            document,
            record_id: None,
        });
        self.transition(MachineState::FileStaged);
    }

    pub(crate) fn begin_replay(&mut self, record: &SessionRecord) {
        self.start_display_session();
        self.replay = Some(record.id.clone());
        self.replay_scope = Some(record.document_id.clone().unwrap_or_else(|| record.id.clone()));
        self.result = Some(record.result());
        self.transition(MachineState::Replaying);
    }

    /// Point the replay at the store's id for the same record. The display
    /// session, result and transcript are kept.
    pub(crate) fn rebind_replay(&mut self, id: RecordId) {
        if self.state == MachineState::Replaying {
            self.replay = Some(id);
        }
    }

    /// Leave replay mode and show nothing.
    pub(crate) fn reset_to_idle(&mut self) {
        self.transition(MachineState::Idle);
        self.start_display_session();
    }

    /// The record a chat question is scoped to, when known.
    pub(crate) fn scoped_record(&self) -> Option<RecordId> {
        match self.state {
            MachineState::Replaying => self.replay_scope.clone(),
            _ => self.staged.as_ref().and_then(|staged| staged.record_id.clone()),
        }
    }

    pub(crate) fn displayed_summary(&self) -> Option<&str> {
        self.result
            .as_ref()
            .filter(|result| result.has_summary())
            .map(|result| result.summary.as_str())
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    fn record(id: &str) -> SessionRecord {
        SessionRecord {
            id: RecordId::new(id),
            document_id: None,
            document_name: format!("{id}.pdf"),
            created_at: Utc::now(),
            summary_text: format!("summary of {id}"),
            advantages: vec![],
            disadvantages: vec![],
            insights: vec![],
            questions: vec![],
        }
    }

    fn pdf(name: &str) -> Document {
        Document::new(name, "application/pdf", b"%PDF".to_vec()).unwrap()
    }

    #[test]
    fn upload_clears_replay() {
        let mut view = ViewState::default();
        view.begin_replay(&record("r1"));
        view.begin_upload(pdf("paper2.pdf"));

        assert_eq!(view.state, MachineState::FileStaged);
        assert!(view.replay.is_none());
        assert!(view.result.is_none());
    }

    #[test]
    fn replay_clears_staged_file_and_in_flight_token() {
        let mut view = ViewState::default();
        view.begin_upload(pdf("paper1.pdf"));
        view.in_flight = Some(view.current_op.advance());
        view.begin_replay(&record("r1"));

        assert!(view.staged.is_none());
        assert!(view.in_flight.is_none());
        assert_eq!(view.displayed_summary(), Some("summary of r1"));
        assert_eq!(view.scoped_record(), Some(RecordId::new("r1")));
    }

    #[test]
    fn replay_scopes_chat_to_the_source_document() {
        let mut view = ViewState::default();
        let mut listed = record("summary-1");
        listed.document_id = Some(RecordId::new("paper-1"));
        view.begin_replay(&listed);

        assert_eq!(view.replay, Some(RecordId::new("summary-1")));
        assert_eq!(view.scoped_record(), Some(RecordId::new("paper-1")));
    }

    #[test]
    fn rebinding_replay_keeps_the_display_session() {
        let mut view = ViewState::default();
        let mut fresh = record("paper-1");
        fresh.document_id = Some(RecordId::new("paper-1"));
        view.begin_replay(&fresh);
        let session = view.display_session;

        view.rebind_replay(RecordId::new("summary-1"));
        assert_eq!(view.state, MachineState::Replaying);
        assert_eq!(view.replay, Some(RecordId::new("summary-1")));
        assert_eq!(view.display_session, session);
        assert!(view.result.is_some());
        assert_eq!(view.scoped_record(), Some(RecordId::new("paper-1")));
    }

    #[test]
    fn every_mode_change_opens_a_new_display_session() {
        let mut view = ViewState::default();
        let start = view.display_session;
        view.begin_upload(pdf("a.pdf"));
        let after_upload = view.display_session;
        view.begin_replay(&record("r1"));

        assert!(after_upload > start);
        assert!(view.display_session > after_upload);
    }
}
