use crate::cli::GlobalFlags;
use crate::cli::root_commands::DefineArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `glance define`.
pub async fn handle(args: &DefineArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let definition = ctx.client.define(&args.word).await?;
    if let Some(suggested) = &definition.suggested {
        tracing::info!(word = %definition.word, %suggested, "showing definitions for corrected spelling");
    }
    output(&definition, flags.format)
}
