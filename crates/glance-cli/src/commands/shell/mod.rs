//! `glance shell`: an interactive session over stdin.
//!
//! Each line becomes one intent. Intents that talk to the service run as
//! tasks, so a slow summary never blocks the next line; the session decides
//! which responses still apply when they land. A printer task reports every
//! published snapshot change.

mod events;
mod parse;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use glance_client::GlanceClient;
use glance_session::{Outcome, Session, Snapshot};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tokio::task::{JoinError, JoinSet};

use self::events::describe_changes;
use self::parse::{HELP, ShellCommand, parse_line};
use super::history::HistoryRow;
use super::shared::document::{LocalFile, read_local_file};
use crate::cli::{GlobalFlags, OutputFormat};
use crate::context::AppContext;
use crate::output::output;

type ShellSession = Arc<Session<GlanceClient>>;

pub async fn run(ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let session: ShellSession = Arc::new(Session::new(ctx.client.clone(), ctx.session_settings()));
    let printer = tokio::spawn(print_changes(session.subscribe()));
    let mut tasks = JoinSet::new();

    if !flags.quiet {
        eprintln!("glance shell ({}), type 'help' for commands", ctx.client.base_url());
    }
    spawn_intent(&mut tasks, &session, ShellCommand::Refresh);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut quit = false;
    while let Some(line) = lines.next_line().await.context("failed to read stdin")? {
        while let Some(finished) = tasks.try_join_next() {
            report(finished);
        }

        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        match command {
            ShellCommand::Quit => {
                quit = true;
                break;
            }
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Wait => drain(&mut tasks).await,
            ShellCommand::Show => output(&session.snapshot(), flags.format)?,
            ShellCommand::History => print_history(&session.snapshot(), flags.format)?,
            // The file is read before the intent is spawned so that a
            // `summarize` on the next line always sees it staged.
            ShellCommand::Stage(path) => match read_local_file(&path).await {
                Ok(file) => {
                    tasks.spawn(stage(Arc::clone(&session), file));
                }
                Err(error) => eprintln!("error: {error:#}"),
            },
            command => spawn_intent(&mut tasks, &session, command),
        }
    }

    if quit {
        tasks.shutdown().await;
    } else {
        drain(&mut tasks).await;
    }
    drop(session);
    printer.await.context("snapshot printer stopped unexpectedly")?;
    Ok(())
}

fn spawn_intent(tasks: &mut JoinSet<anyhow::Result<()>>, session: &ShellSession, command: ShellCommand) {
    debug_assert!(!command.is_local());
    tracing::debug!(?command, "spawning intent");
    let session = Arc::clone(session);
    tasks.spawn(async move { perform(&session, command).await });
}

async fn stage(session: ShellSession, file: LocalFile) -> anyhow::Result<()> {
    session
        .stage_file(&file.name, &file.media_type, file.bytes)
        .await?;
    Ok(())
}

async fn perform(session: &ShellSession, command: ShellCommand) -> anyhow::Result<()> {
    match command {
        ShellCommand::Summarize(length) => {
            session.summarize(length).await?;
        }
        ShellCommand::Select(id) => session.select_history(&id).await?,
        ShellCommand::Delete(id) => {
            if session.delete_history(&id).await? == Outcome::NoOp {
                eprintln!("no stored summary with id {id}");
            }
        }
        ShellCommand::Ask(question) => {
            session.ask_question(&question).await?;
        }
        ShellCommand::Download(path) => {
            if let Some(file) = session.download().await? {
                let path = path.unwrap_or_else(|| PathBuf::from(&file.filename));
                tokio::fs::write(&path, &file.bytes)
                    .await
                    .with_context(|| format!("failed to write {}", path.display()))?;
                println!("saved {}", path.display());
            }
        }
        ShellCommand::Refresh => {
            session.refresh_history().await;
        }
        local => anyhow::bail!("'{local:?}' is handled by the shell itself"),
    }
    Ok(())
}

async fn drain(tasks: &mut JoinSet<anyhow::Result<()>>) {
    while let Some(finished) = tasks.join_next().await {
        report(finished);
    }
}

fn report(finished: Result<anyhow::Result<()>, JoinError>) {
    match finished {
        Ok(Ok(())) => {}
        Ok(Err(error)) => eprintln!("error: {error:#}"),
        Err(error) if error.is_cancelled() => {}
        Err(error) => eprintln!("error: intent task failed: {error}"),
    }
}

fn print_history(snapshot: &Snapshot, format: OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Table => {
            let rows: Vec<HistoryRow> = snapshot.history.iter().map(HistoryRow::from).collect();
            output(&rows, format)
        }
        OutputFormat::Json | OutputFormat::Raw => output(&snapshot.history, format),
    }
}

/// Print what changed for each snapshot until the session is dropped.
async fn print_changes(mut updates: watch::Receiver<Snapshot>) {
    let mut previous = updates.borrow_and_update().clone();
    while updates.changed().await.is_ok() {
        let next = updates.borrow_and_update().clone();
        for line in describe_changes(&previous, &next) {
            println!("{line}");
        }
        previous = next;
    }
}
