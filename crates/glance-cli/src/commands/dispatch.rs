use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;

/// Route a parsed command to its handler.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Summarize(args) => super::summarize::handle(&args, ctx, flags).await,
        Commands::Upload(args) => super::upload::handle(&args, ctx, flags).await,
        Commands::Ask(args) => super::ask::handle(&args, ctx, flags).await,
        Commands::History { action } => super::history::handle(&action, ctx, flags).await,
        Commands::Export(args) => super::export::handle(&args, ctx, flags).await,
        Commands::Define(args) => super::define::handle(&args, ctx, flags).await,
        Commands::Schema(args) => super::schema::handle(&args, flags),
        Commands::Shell => super::shell::run(ctx, flags).await,
    }
}
