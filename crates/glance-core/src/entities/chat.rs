use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One question and its answer, in the order the question was asked.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ChatTurn {
    pub question: String,
    pub answer: String,
}
