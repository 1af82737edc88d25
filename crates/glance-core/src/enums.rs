//! Document kinds, summary length preferences, and the session machine's state tag.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `MachineState` provides `allowed_next_states()` so the session machine can
//! check every transition it performs.

use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// DocumentKind
// ---------------------------------------------------------------------------

/// Document formats accepted for upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Doc,
    Docx,
}

impl DocumentKind {
    pub const ALL: [Self; 3] = [Self::Pdf, Self::Doc, Self::Docx];

    /// The media type sent with the multipart upload.
    #[must_use]
    pub const fn media_type(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Doc => "application/msword",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }

    /// Match a media type against the allow-list. Parameters such as
    /// `; charset=binary` are ignored.
    #[must_use]
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        let essence = media_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.media_type() == essence)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.media_type())
    }
}

// ---------------------------------------------------------------------------
// LengthPreference
// ---------------------------------------------------------------------------

/// Requested summary length.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum LengthPreference {
    Short,
    #[default]
    Medium,
    Long,
}

impl LengthPreference {
    /// Form value sent as `summary_length`.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

impl fmt::Display for LengthPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LengthPreference {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(Self::Short),
            "medium" => Ok(Self::Medium),
            "long" => Ok(Self::Long),
            other => Err(CoreError::Validation(format!(
                "unknown summary length '{other}' (expected short, medium, or long)"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// MachineState
// ---------------------------------------------------------------------------

/// State tag of the session machine.
///
/// ```text
/// idle ──stage──▶ file_staged ──summarize──▶ summarizing ──ok──▶ result_ready
///                      ▲                         │
///                      └────── retry ◀── error ◀─┘
/// (any) ──select──▶ replaying ──stage/delete──▶ idle
/// ```
///
/// Staging a new file from `summarizing`, `result_ready`, or `error`
/// restarts at `file_staged`; from `replaying` it passes through `idle`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum MachineState {
    #[default]
    Idle,
    FileStaged,
    Summarizing,
    ResultReady,
    Replaying,
    Error,
}

impl MachineState {
    /// Valid next states from the current state.
    #[must_use]
    pub const fn allowed_next_states(self) -> &'static [Self] {
        match self {
            Self::Idle => &[Self::FileStaged, Self::Replaying],
            Self::FileStaged => &[Self::FileStaged, Self::Summarizing, Self::Replaying],
            Self::Summarizing => &[
                Self::ResultReady,
                Self::Error,
                Self::FileStaged,
                Self::Replaying,
            ],
            Self::ResultReady | Self::Error => {
                &[Self::FileStaged, Self::Summarizing, Self::Replaying]
            }
            Self::Replaying => &[Self::Idle, Self::Replaying],
        }
    }

    #[must_use]
    pub fn can_transition_to(self, next: Self) -> bool {
        self.allowed_next_states().contains(&next)
    }

    /// Whether a staged file is retained in this state.
    #[must_use]
    pub const fn has_staged_file(self) -> bool {
        matches!(
            self,
            Self::FileStaged | Self::Summarizing | Self::ResultReady | Self::Error
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::FileStaged => "file_staged",
            Self::Summarizing => "summarizing",
            Self::ResultReady => "result_ready",
            Self::Replaying => "replaying",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for MachineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("application/pdf", DocumentKind::Pdf)]
    #[case("application/msword", DocumentKind::Doc)]
    #[case(
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        DocumentKind::Docx
    )]
    #[case("Application/PDF; charset=binary", DocumentKind::Pdf)]
    fn accepts_allow_listed_media_types(#[case] media_type: &str, #[case] expected: DocumentKind) {
        assert_eq!(DocumentKind::from_media_type(media_type), Some(expected));
    }

    #[rstest]
    #[case("text/plain")]
    #[case("image/png")]
    #[case("application/vnd.ms-excel")]
    #[case("")]
    fn rejects_other_media_types(#[case] media_type: &str) {
        assert_eq!(DocumentKind::from_media_type(media_type), None);
    }

    #[test]
    fn length_defaults_to_medium() {
        assert_eq!(LengthPreference::default(), LengthPreference::Medium);
    }

    #[test]
    fn length_parses_case_insensitively() {
        assert_eq!("LONG".parse::<LengthPreference>().unwrap(), LengthPreference::Long);
        assert!("tiny".parse::<LengthPreference>().is_err());
    }

    #[test]
    fn idle_cannot_jump_to_summarizing() {
        assert!(!MachineState::Idle.can_transition_to(MachineState::Summarizing));
        assert!(MachineState::Idle.can_transition_to(MachineState::FileStaged));
    }

    #[test]
    fn every_state_can_enter_replay() {
        for state in [
            MachineState::Idle,
            MachineState::FileStaged,
            MachineState::Summarizing,
            MachineState::ResultReady,
            MachineState::Replaying,
            MachineState::Error,
        ] {
            assert!(state.can_transition_to(MachineState::Replaying), "{state}");
        }
    }

    #[test]
    fn replaying_only_leaves_through_idle_or_another_replay() {
        assert_eq!(
            MachineState::Replaying.allowed_next_states(),
            &[MachineState::Idle, MachineState::Replaying]
        );
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&MachineState::ResultReady).unwrap();
        assert_eq!(json, "\"result_ready\"");
    }
}
