//! History listing and export settings.

use serde::{Deserialize, Serialize};

const fn default_limit() -> u32 {
    10
}

fn default_filename() -> String {
    String::from("research_summary.pdf")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HistoryConfig {
    /// Page size passed to the history listing.
    #[serde(default = "default_limit")]
    pub limit: u32,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            limit: default_limit(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ExportConfig {
    /// File name suggested for a downloaded summary.
    #[serde(default = "default_filename")]
    pub filename: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            filename: default_filename(),
        }
    }
}
