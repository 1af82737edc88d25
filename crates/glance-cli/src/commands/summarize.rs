use glance_core::entities::SummaryResult;
use glance_core::enums::LengthPreference;
use glance_core::ids::RecordId;
use glance_session::Session;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SummarizeArgs;
use crate::commands::shared::document::read_local_file;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(Serialize)]
struct SummaryView {
    document: String,
    length: LengthPreference,
    record_id: Option<RecordId>,
    #[serde(flatten)]
    result: SummaryResult,
}

/// Handle `glance summarize`.
pub async fn handle(args: &SummarizeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let file = read_local_file(&args.file).await?;
    let session = Session::new(ctx.client.clone(), ctx.one_shot_settings());
    session.stage_file(&file.name, &file.media_type, file.bytes).await?;

    let progress = Progress::spinner(&format!("Summarizing {}", file.name));
    session.summarize(args.length).await?;
    let snapshot = session.snapshot();
    if let Some(error) = snapshot.last_error {
        progress.finish_err(&error);
        anyhow::bail!(error);
    }
    progress.finish_clear();

    let Some(result) = snapshot.result else {
        anyhow::bail!("summarization finished without a result");
    };
    output(
        &SummaryView {
            document: file.name,
            length: snapshot.length,
            record_id: snapshot.history.first().map(|record| record.id.clone()),
            result,
        },
        flags.format,
    )
}
