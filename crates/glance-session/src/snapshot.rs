use glance_core::entities::{ChatTurn, SessionRecord, SummaryResult};
use glance_core::enums::{LengthPreference, MachineState};
use glance_core::ids::RecordId;
use serde::Serialize;

/// Read-only view of the session, published after every change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub state: MachineState,
    /// Name of the staged file, if any.
    pub staged_file: Option<String>,
    pub length: LengthPreference,
    /// Id of the record being replayed.
    pub replaying: Option<RecordId>,
    pub result: Option<SummaryResult>,
    pub transcript: Vec<ChatTurn>,
    /// Questions asked but not yet shown in the transcript.
    pub pending_questions: usize,
    /// History collection, most recent first.
    pub history: Vec<SessionRecord>,
    pub last_error: Option<String>,
}

impl Snapshot {
    #[must_use]
    pub fn history_ids(&self) -> Vec<&RecordId> {
        self.history.iter().map(|record| &record.id).collect()
    }

    #[must_use]
    pub fn summary(&self) -> Option<&str> {
        self.result.as_ref().map(|result| result.summary.as_str())
    }
}
