use std::path::PathBuf;

use clap::{Args, Subcommand};
use glance_core::enums::LengthPreference;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Summarize a PDF or Word document.
    Summarize(SummarizeArgs),
    /// Upload a document so it can be chatted about.
    Upload(UploadArgs),
    /// Ask a question about an uploaded document.
    Ask(AskArgs),
    /// Stored summaries.
    History {
        #[command(subcommand)]
        action: HistoryCommands,
    },
    /// Render summary text to a PDF.
    Export(ExportArgs),
    /// Look up a word in the dictionary.
    Define(DefineArgs),
    /// Print the JSON Schema of a data type.
    Schema(SchemaArgs),
    /// Interactive session: stage, summarize, replay, and chat.
    Shell,
}

#[derive(Clone, Debug, Args)]
pub struct SummarizeArgs {
    /// Document to summarize (.pdf, .doc, .docx).
    pub file: PathBuf,

    /// Summary length: short, medium, long.
    #[arg(short = 'L', long)]
    pub length: Option<LengthPreference>,
}

#[derive(Clone, Debug, Args)]
pub struct UploadArgs {
    pub file: PathBuf,
}

#[derive(Clone, Debug, Args)]
pub struct AskArgs {
    pub question: String,

    /// Id of the uploaded document to ask about. Without it the backend
    /// answers about the document it processed last.
    #[arg(short, long)]
    pub record: Option<String>,
}

#[derive(Clone, Debug, Subcommand)]
pub enum HistoryCommands {
    /// List stored summaries, most recent first.
    List,
    /// Show one stored summary with its questions and answers.
    Show { id: String },
    /// Delete a stored summary.
    Delete { id: String },
}

#[derive(Clone, Debug, Args)]
pub struct ExportArgs {
    /// Summary text, or a path to a text file holding it.
    pub input: String,

    /// Where to write the PDF (defaults to `export.filename`).
    #[arg(short, long)]
    pub out: Option<PathBuf>,
}

#[derive(Clone, Debug, Args)]
pub struct DefineArgs {
    pub word: String,
}

#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Type name, e.g. `session-record`.
    pub type_name: String,
}
