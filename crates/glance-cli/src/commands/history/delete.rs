use glance_client::ClientError;
use glance_core::ids::RecordId;
use serde::Serialize;

use crate::cli::GlobalFlags;
use crate::context::AppContext;
use crate::output::output;

#[derive(Serialize)]
struct DeleteView {
    id: String,
    deleted: bool,
    already_gone: bool,
}

pub async fn run(id: &str, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let already_gone = match ctx.client.delete_history(&RecordId::new(id)).await {
        Ok(()) => false,
        Err(ClientError::Api { status: 404, .. }) => true,
        Err(error) => return Err(error.into()),
    };
    output(
        &DeleteView {
            id: id.to_string(),
            deleted: true,
            already_gone,
        },
        flags.format,
    )
}
