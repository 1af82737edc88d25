use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Dictionary lookup result for a single word.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct WordDefinition {
    /// The word as typed.
    pub word: String,
    /// Spelling correction the lookup used instead, if any.
    pub suggested: Option<String>,
    pub results: Vec<DefinitionEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DefinitionEntry {
    pub part_of_speech: String,
    pub definition: String,
    pub example: Option<String>,
}
