use glance_core::document::Document;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::UploadArgs;
use crate::commands::shared::document::read_local_file;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(serde::Serialize)]
struct UploadView {
    record_id: String,
    filename: String,
    summary: String,
}

/// Handle `glance upload`.
pub async fn handle(args: &UploadArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let file = read_local_file(&args.file).await?;
    let document = Document::new(file.name, &file.media_type, file.bytes)?;

    let progress = Progress::spinner(&format!("Uploading {}", document.name));
    let upload = ctx.client.upload(&document).await;
    progress.finish_clear();
    let upload = upload?;

    output(
        &UploadView {
            record_id: upload.paper_id.to_string(),
            filename: upload.filename,
            summary: upload.summary,
        },
        flags.format,
    )
}
