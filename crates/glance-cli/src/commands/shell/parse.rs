use std::path::PathBuf;
use std::str::FromStr;

use glance_core::enums::LengthPreference;
use glance_core::ids::RecordId;

/// One line typed into `glance shell`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Stage(PathBuf),
    Summarize(Option<LengthPreference>),
    Select(RecordId),
    Delete(RecordId),
    Ask(String),
    Download(Option<PathBuf>),
    Refresh,
    Show,
    History,
    Wait,
    Help,
    Quit,
}

impl ShellCommand {
    /// Commands that are answered from the current snapshot without a request.
    pub const fn is_local(&self) -> bool {
        matches!(
            self,
            Self::Show | Self::History | Self::Wait | Self::Help | Self::Quit
        )
    }
}

pub const HELP: &str = "\
commands:
  stage <path>          stage a PDF or Word document
  summarize [length]    summarize the staged file (short, medium, long)
  select <id>           replay a stored summary
  delete <id>           delete a stored summary
  ask <question>        ask about the displayed summary
  download [path]       save the displayed summary as a PDF
  refresh               reload stored summaries
  show                  print the session snapshot
  history               print stored summaries
  wait                  wait for outstanding requests
  quit";

/// Parse one input line. Blank lines and `#` comments yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let (word, rest) = line
        .split_once(char::is_whitespace)
        .map_or((line, ""), |(word, rest)| (word, rest.trim()));

    let command = match word {
        "stage" => ShellCommand::Stage(PathBuf::from(required(word, rest, "path")?)),
        "summarize" => ShellCommand::Summarize(
            optional(rest)
                .map(LengthPreference::from_str)
                .transpose()
                .map_err(|e| e.to_string())?,
        ),
        "select" => ShellCommand::Select(RecordId::new(required(word, rest, "id")?)),
        "delete" => ShellCommand::Delete(RecordId::new(required(word, rest, "id")?)),
        // Blank questions are left to the session to reject.
        "ask" => ShellCommand::Ask(rest.to_string()),
        "download" => ShellCommand::Download(optional(rest).map(PathBuf::from)),
        "refresh" => ShellCommand::Refresh,
        "show" => ShellCommand::Show,
        "history" => ShellCommand::History,
        "wait" => ShellCommand::Wait,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" => ShellCommand::Quit,
        other => return Err(format!("unknown command '{other}' (try 'help')")),
    };
    Ok(Some(command))
}

fn required<'a>(word: &str, rest: &'a str, what: &str) -> Result<&'a str, String> {
    optional(rest).ok_or_else(|| format!("usage: {word} <{what}>"))
}

fn optional(rest: &str) -> Option<&str> {
    (!rest.is_empty()).then_some(rest)
}
