use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let records = ctx.client.list_history().await?;
    let Some(record) = records.iter().find(|record| record.id.as_str() == id) else {
        anyhow::bail!(
            "no stored summary with id '{id}' among the {} most recent",
            ctx.config.history.limit
        );
    };
    output(record, flags.format)
}
