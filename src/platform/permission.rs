//! Permission gate: granted/denied checks ahead of camera and gallery use.
//!
//! On mobile this is a real OS prompt; the whole screen is blocked until the
//! user grants access. The desktop analog is whether the album directory is
//! usable and whether a capture command exists at all. Operations call
//! [`PermissionGate::ensure`] first and refuse to start when denied — denial
//! is recoverable only by fixing the environment and retrying, mirroring the
//! re-request flow.

use crate::error::{PermissionScope, SnapError};
use std::path::PathBuf;

/// Result of a permission probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    /// Denied, with a hint describing how to obtain access.
    Denied { hint: String },
}

/// Gate consulted before any camera or gallery operation.
pub trait PermissionGate: Send + Sync {
    /// Probe the current grant state for one capability.
    fn status(&self, scope: PermissionScope) -> PermissionStatus;

    /// Fail with [`SnapError::PermissionDenied`] unless granted.
    fn ensure(&self, scope: PermissionScope) -> Result<(), SnapError> {
        match self.status(scope) {
            PermissionStatus::Granted => Ok(()),
            PermissionStatus::Denied { hint } => {
                Err(SnapError::PermissionDenied { scope, hint })
            }
        }
    }
}

/// Desktop gate: gallery access means the album directory can be created
/// and written; camera access means a capture command is configured.
pub struct DirAccessGate {
    album_dir: PathBuf,
    capture_command: Option<String>,
}

impl DirAccessGate {
    pub fn new(album_dir: PathBuf, capture_command: Option<String>) -> Self {
        Self {
            album_dir,
            capture_command,
        }
    }
}

impl PermissionGate for DirAccessGate {
    fn status(&self, scope: PermissionScope) -> PermissionStatus {
        match scope {
            PermissionScope::Camera => match &self.capture_command {
                Some(_) => PermissionStatus::Granted,
                None => PermissionStatus::Denied {
                    hint: "configure a capture command (e.g. --capture-cmd imagesnap)"
                        .to_string(),
                },
            },
            PermissionScope::Gallery => match std::fs::create_dir_all(&self.album_dir) {
                Ok(()) => PermissionStatus::Granted,
                Err(e) => PermissionStatus::Denied {
                    hint: format!(
                        "album directory '{}' is not writable: {e}",
                        self.album_dir.display()
                    ),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn camera_denied_without_capture_command() {
        let gate = DirAccessGate::new(std::env::temp_dir(), None);
        let err = gate.ensure(PermissionScope::Camera).unwrap_err();
        assert!(matches!(
            err,
            SnapError::PermissionDenied {
                scope: PermissionScope::Camera,
                ..
            }
        ));
    }

    #[test]
    fn gallery_granted_for_writable_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let gate = DirAccessGate::new(tmp.path().join("album"), None);
        assert_eq!(
            gate.status(PermissionScope::Gallery),
            PermissionStatus::Granted
        );
    }
}
