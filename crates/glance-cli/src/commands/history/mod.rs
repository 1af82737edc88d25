mod delete;
mod list;
mod show;

use crate::cli::{GlobalFlags, HistoryCommands};
use crate::context::AppContext;

/// Handle `glance history`.
pub async fn handle(action: &HistoryCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        HistoryCommands::List => list::run(ctx, flags).await,
        HistoryCommands::Show { id } => show::run(id, ctx, flags).await,
        HistoryCommands::Delete { id } => delete::run(id, ctx, flags).await,
    }
}

pub use list::HistoryRow;
