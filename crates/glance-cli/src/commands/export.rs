use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ExportArgs;
use crate::context::AppContext;
use crate::output::output;
use crate::progress::Progress;

#[derive(serde::Serialize)]
struct ExportView {
    path: String,
    bytes: usize,
}

/// Treat `input` as a path when such a file exists, otherwise as the text itself.
async fn summary_text(input: &str) -> anyhow::Result<String> {
    let path = Path::new(input);
    if tokio::fs::metadata(path).await.is_ok_and(|meta| meta.is_file()) {
        return tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read {}", path.display()));
    }
    Ok(input.to_string())
}

/// Handle `glance export`.
pub async fn handle(args: &ExportArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let text = summary_text(&args.input).await?;
    let out = args
        .out
        .clone()
        .unwrap_or_else(|| PathBuf::from(&ctx.config.export.filename));

    let progress = Progress::spinner("Rendering PDF");
    let bytes = ctx.client.export(&text).await;
    progress.finish_clear();
    let bytes = bytes?;

    tokio::fs::write(&out, &bytes)
        .await
        .with_context(|| format!("failed to write {}", out.display()))?;
    output(
        &ExportView {
            path: out.display().to_string(),
            bytes: bytes.len(),
        },
        flags.format,
    )
}
