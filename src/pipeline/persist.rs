//! Persist stage: move the rendered PDF to its stable document path.
//!
//! The destination is overwritten on every successful assembly. A plain
//! rename is attempted first; when the temp location and the document
//! directory sit on different filesystems the rename fails with `EXDEV`, so
//! a copy-then-remove fallback covers that case.

use crate::error::SnapError;
use crate::pipeline::print::PrintedDocument;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Move `printed` to `dest`, replacing any prior file there.
pub async fn persist_document(
    printed: PrintedDocument,
    dest: &Path,
) -> Result<PathBuf, SnapError> {
    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| SnapError::PersistFailed {
                path: dest.to_path_buf(),
                source: e,
            })?;
    }

    let (source, temp_dir) = printed.into_parts();

    match tokio::fs::rename(&source, dest).await {
        Ok(()) => {}
        Err(rename_err) => {
            debug!("rename failed ({rename_err}), falling back to copy");
            tokio::fs::copy(&source, dest)
                .await
                .map_err(|e| SnapError::PersistFailed {
                    path: dest.to_path_buf(),
                    source: e,
                })?;
            // Source cleanup is best-effort; the temp dir drop handles it too.
            tokio::fs::remove_file(&source).await.ok();
        }
    }
    drop(temp_dir);

    info!("PDF saved to {}", dest.display());
    Ok(dest.to_path_buf())
}
