use anyhow::bail;
use glance_core::entities::{ChatTurn, SessionRecord, SummaryResult, WordDefinition};
use glance_core::enums::{DocumentKind, LengthPreference, MachineState};
use schemars::schema_for;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SchemaArgs;
use crate::output::output;

const TYPES: [&str; 7] = [
    "session-record",
    "summary-result",
    "chat-turn",
    "word-definition",
    "machine-state",
    "length-preference",
    "document-kind",
];

fn schema(type_name: &str) -> Option<schemars::Schema> {
    let schema = match type_name.replace('_', "-").as_str() {
        "session-record" => schema_for!(SessionRecord),
        "summary-result" => schema_for!(SummaryResult),
        "chat-turn" => schema_for!(ChatTurn),
        "word-definition" => schema_for!(WordDefinition),
        "machine-state" => schema_for!(MachineState),
        "length-preference" => schema_for!(LengthPreference),
        "document-kind" => schema_for!(DocumentKind),
        _ => return None,
    };
    Some(schema)
}

/// Handle `glance schema`.
pub fn handle(args: &SchemaArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let Some(schema) = schema(&args.type_name) else {
        bail!(
            "unknown type '{}'; expected one of: {}",
            args.type_name,
            TYPES.join(", ")
        );
    };
    output(&schema, flags.format)
}
