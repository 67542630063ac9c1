//! Writing the rendered digest to disk.

use crate::error::OutputWriteError;
use std::path::Path;
use tokio::fs;
use tracing::{info, instrument};

/// Write `document` to `path`, replacing any existing file.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn write_document(path: &Path, document: &str) -> Result<(), OutputWriteError> {
    fs::write(path, document)
        .await
        .map_err(|source| OutputWriteError {
            path: path.to_path_buf(),
            source,
        })?;
    info!(bytes = document.len(), "Wrote digest");
    Ok(())
}
