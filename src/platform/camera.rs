//! Camera capture primitive.
//!
//! Returns a locator for one freshly captured still image. The capture lands
//! in a scratch location; filing it into the gallery album is the gallery's
//! job, not the camera's.

use crate::error::SnapError;
use crate::state::CameraFacing;
use std::path::PathBuf;
use std::process::Command;
use tracing::{debug, info};

/// Still-image capture seam.
pub trait Camera: Send + Sync {
    /// Acquire one still image using the given lens and return its locator.
    fn capture(&self, facing: CameraFacing) -> Result<PathBuf, SnapError>;
}

/// Desktop capture: run a configured external program with the destination
/// path as its final argument (the convention of `imagesnap`, `fswebcam`,
/// and most capture tools).
pub struct CommandCamera {
    program: Option<String>,
}

impl CommandCamera {
    pub fn new(program: Option<String>) -> Self {
        Self { program }
    }
}

impl Camera for CommandCamera {
    fn capture(&self, facing: CameraFacing) -> Result<PathBuf, SnapError> {
        let program = self.program.as_deref().ok_or_else(|| SnapError::CaptureFailed {
            detail: "no capture command configured".to_string(),
        })?;

        let dest = tempfile::Builder::new()
            .prefix("snap2pdf-capture-")
            .suffix(".jpg")
            .tempfile()
            .map_err(|e| SnapError::CaptureFailed {
                detail: format!("could not allocate capture file: {e}"),
            })?
            // The gallery copies the capture into the album; leak the temp
            // entry so the file survives until then.
            .keep()
            .map_err(|e| SnapError::CaptureFailed {
                detail: format!("could not persist capture file: {e}"),
            })?
            .1;

        debug!("Capturing ({facing:?} lens) via '{program}' → {}", dest.display());

        let status = Command::new(program)
            .arg(&dest)
            .status()
            .map_err(|e| SnapError::CaptureFailed {
                detail: format!("could not run '{program}': {e}"),
            })?;

        if !status.success() {
            return Err(SnapError::CaptureFailed {
                detail: format!("'{program}' exited with {status}"),
            });
        }

        info!("Captured photo: {}", dest.display());
        Ok(dest)
    }
}
