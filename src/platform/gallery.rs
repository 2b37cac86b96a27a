//! Gallery primitives: album writes and the multi-select picker.

use crate::error::SnapError;
use crate::state::SelectionResult;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Album-write seam: file an image into the device gallery.
pub trait Gallery: Send + Sync {
    /// Create a new asset in the album from the image at `source`.
    /// Returns the locator of the created asset.
    fn create_asset(&self, source: &Path) -> Result<PathBuf, SnapError>;
}

/// Multi-select picker seam.
pub trait GalleryPicker: Send + Sync {
    /// Present a selection of up to `limit` images, or report cancellation.
    fn pick_images(&self, limit: usize) -> Result<SelectionResult, SnapError>;
}

/// Desktop gallery: the album is a directory; creating an asset copies the
/// source file in under a collision-free name.
pub struct DirectoryGallery {
    album_dir: PathBuf,
}

impl DirectoryGallery {
    pub fn new(album_dir: PathBuf) -> Self {
        Self { album_dir }
    }

    /// First free destination path for `source`'s file name inside the album.
    fn free_slot(&self, source: &Path) -> PathBuf {
        let stem = source
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "photo".to_string());
        let ext = source
            .extension()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "jpg".to_string());

        let plain = self.album_dir.join(format!("{stem}.{ext}"));
        if !plain.exists() {
            return plain;
        }
        let mut n = 1u32;
        loop {
            let candidate = self.album_dir.join(format!("{stem}-{n}.{ext}"));
            if !candidate.exists() {
                return candidate;
            }
            n += 1;
        }
    }
}

impl Gallery for DirectoryGallery {
    fn create_asset(&self, source: &Path) -> Result<PathBuf, SnapError> {
        std::fs::create_dir_all(&self.album_dir).map_err(|e| SnapError::GalleryWriteFailed {
            path: self.album_dir.clone(),
            source: e,
        })?;

        let dest = self.free_slot(source);
        std::fs::copy(source, &dest).map_err(|e| SnapError::GalleryWriteFailed {
            path: dest.clone(),
            source: e,
        })?;

        info!("Photo saved to gallery: {}", dest.display());
        Ok(dest)
    }
}

/// Desktop picker: the "selection" is a list of paths supplied up front
/// (CLI arguments). Non-image paths are skipped with a warning, the list is
/// capped at `limit`, and an empty list means the user picked nothing —
/// i.e. cancelled.
pub struct PathPicker {
    paths: Vec<PathBuf>,
}

impl PathPicker {
    pub fn new(paths: Vec<PathBuf>) -> Self {
        Self { paths }
    }
}

/// Media-type constraint of the picker: accept only files whose extension
/// names a known raster image format.
fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| image::ImageFormat::from_extension(e).is_some())
        .unwrap_or(false)
}

impl GalleryPicker for PathPicker {
    fn pick_images(&self, limit: usize) -> Result<SelectionResult, SnapError> {
        if self.paths.is_empty() {
            return Ok(SelectionResult::Cancelled);
        }

        let mut picked = Vec::new();
        for path in &self.paths {
            if !path.exists() {
                return Err(SnapError::PickerFailed {
                    detail: format!("'{}' does not exist", path.display()),
                });
            }
            if !is_image_path(path) {
                warn!("Skipping non-image path: {}", path.display());
                continue;
            }
            picked.push(path.clone());
            if picked.len() == limit {
                let skipped = self.paths.len() - limit;
                if skipped > 0 {
                    warn!("Selection limit {limit} reached, ignoring {skipped} more");
                }
                break;
            }
        }

        if picked.is_empty() {
            return Ok(SelectionResult::Cancelled);
        }
        Ok(SelectionResult::Selected(picked))
    }
}
