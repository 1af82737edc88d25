use glance_core::entities::ChatTurn;
use glance_core::ids::RecordId;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::AskArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

/// Handle `glance ask`.
///
/// Follows the session's chat rules: a blank question is rejected, an empty
/// answer and a failed request both produce the configured fallback text.
pub async fn handle(args: &AskArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let question = args.question.trim();
    if question.is_empty() {
        anyhow::bail!("question text is empty");
    }
    let record = args.record.as_deref().map(RecordId::new);

    let progress = Progress::spinner("Thinking");
    let reply = ctx.client.ask(question, record.as_ref()).await;
    progress.finish_clear();

    let settings = &ctx.config.session;
    let answer = match reply {
        Ok(answer) if answer.trim().is_empty() => settings.empty_answer_text.clone(),
        Ok(answer) => answer,
        Err(error) => {
            tracing::warn!(%error, "chat request failed");
            settings.chat_fallback_answer.clone()
        }
    };

    output(
        &ChatTurn {
            question: question.to_string(),
            answer,
        },
        flags.format,
    )
}
