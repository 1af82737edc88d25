use glance_session::Snapshot;

/// Lines describing what changed between two published snapshots.
pub fn describe_changes(previous: &Snapshot, next: &Snapshot) -> Vec<String> {
    let mut lines = Vec::new();

    if next.state != previous.state {
        match &next.staged_file {
            Some(file) if next.replaying.is_none() => {
                lines.push(format!("[{}] {file}", next.state));
            }
            _ => lines.push(format!("[{}]", next.state)),
        }
    }

    if next.result != previous.result
        && let Some(summary) = next.summary()
    {
        lines.push(format!("summary:\n{summary}"));
    }

    if next.transcript.len() > previous.transcript.len()
        && next.transcript.starts_with(&previous.transcript)
    {
        for turn in &next.transcript[previous.transcript.len()..] {
            lines.push(format!("Q: {}\nA: {}", turn.question, turn.answer));
        }
    }

    if next.history_ids() != previous.history_ids() {
        lines.push(format!("[history] {} stored summaries", next.history.len()));
    }

    if next.last_error != previous.last_error
        && let Some(error) = &next.last_error
    {
        lines.push(format!("[error] {error}"));
    }

    lines
}
