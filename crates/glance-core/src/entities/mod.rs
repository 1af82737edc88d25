//! Entity structs for Paperglance domain objects.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! output and schema validation.

mod chat;
mod definition;
mod record;
mod summary;

pub use chat::ChatTurn;
pub use definition::{DefinitionEntry, WordDefinition};
pub use record::SessionRecord;
pub use summary::SummaryResult;
