use std::path::Path;

use anyhow::Context;

/// A file read from disk, ready to be staged.
pub struct LocalFile {
    pub name: String,
    pub media_type: String,
    pub bytes: Vec<u8>,
}

/// Media type guessed from the file extension.
pub fn media_type_for(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_raw()
        .unwrap_or("application/octet-stream")
        .to_string()
}

pub async fn read_local_file(path: &Path) -> anyhow::Result<LocalFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .and_then(|name| name.to_str())
        .map_or_else(|| path.display().to_string(), ToString::to_string);
    Ok(LocalFile {
        name,
        media_type: media_type_for(path),
        bytes,
    })
}
