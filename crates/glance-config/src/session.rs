//! Session behavior: default length, upload-on-stage, and fallback texts.

use glance_core::enums::LengthPreference;
use serde::{Deserialize, Serialize};

const fn default_upload_on_stage() -> bool {
    true
}

fn default_chat_fallback_answer() -> String {
    String::from("Something went wrong.")
}

fn default_empty_answer_text() -> String {
    String::from("No answer received.")
}

fn default_empty_summary_text() -> String {
    String::from("No summary available.")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Length used when `summarize` is called without one.
    #[serde(default)]
    pub default_length: LengthPreference,

    /// Issue the upload-only call as soon as a file is staged.
    #[serde(default = "default_upload_on_stage")]
    pub upload_on_stage: bool,

    /// Answer recorded when the chat service fails.
    #[serde(default = "default_chat_fallback_answer")]
    pub chat_fallback_answer: String,

    /// Answer recorded when the chat service replies with an empty answer.
    #[serde(default = "default_empty_answer_text")]
    pub empty_answer_text: String,

    /// Summary shown when the service replies with an empty summary.
    #[serde(default = "default_empty_summary_text")]
    pub empty_summary_text: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_length: LengthPreference::default(),
            upload_on_stage: default_upload_on_stage(),
            chat_fallback_answer: default_chat_fallback_answer(),
            empty_answer_text: default_empty_answer_text(),
            empty_summary_text: default_empty_summary_text(),
        }
    }
}
