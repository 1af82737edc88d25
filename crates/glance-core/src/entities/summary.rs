use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Content of the current result slot: a summary plus structured findings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct SummaryResult {
    pub summary: String,
    #[serde(default)]
    pub advantages: Vec<String>,
    #[serde(default)]
    pub disadvantages: Vec<String>,
    #[serde(default)]
    pub insights: Vec<String>,
}

impl SummaryResult {
    /// A result that only carries summary text.
    #[must_use]
    pub fn text(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Self::default()
        }
    }

    /// Questions may only be asked about a result with non-blank summary text.
    #[must_use]
    pub fn has_summary(&self) -> bool {
        !self.summary.trim().is_empty()
    }
}
