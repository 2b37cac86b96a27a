//! Share surface: hand the rendered PDF to the platform share facility.

use crate::error::SnapError;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

/// Share-sheet seam. Availability is probed before invoking, matching the
/// platform API shape (`isAvailable` then `share`).
pub trait ShareSheet: Send + Sync {
    /// Whether any share surface exists on this system.
    fn is_available(&self) -> bool;

    /// Invoke the share surface with the given file.
    fn share(&self, path: &Path) -> Result<(), SnapError>;
}

/// Desktop share surface: pass the file to the platform opener program
/// (`open` on macOS, `xdg-open` on Linux). Availability means the program
/// is configured and resolvable on `PATH`.
pub struct CommandShare {
    program: Option<String>,
}

impl CommandShare {
    pub fn new(program: Option<String>) -> Self {
        Self { program }
    }
}

/// Resolve `program` against `PATH` the way the shell would.
fn on_path(program: &str) -> bool {
    if program.contains(std::path::MAIN_SEPARATOR) {
        return Path::new(program).exists();
    }
    let Some(path) = std::env::var_os("PATH") else {
        return false;
    };
    std::env::split_paths(&path).any(|dir| dir.join(program).is_file())
}

impl ShareSheet for CommandShare {
    fn is_available(&self) -> bool {
        match &self.program {
            Some(program) => on_path(program),
            None => false,
        }
    }

    fn share(&self, path: &Path) -> Result<(), SnapError> {
        let program = self.program.as_deref().ok_or(SnapError::ShareUnavailable)?;

        debug!("Sharing {} via '{program}'", path.display());
        let status = Command::new(program)
            .arg(path)
            .status()
            .map_err(|e| SnapError::ShareFailed {
                detail: format!("could not run '{program}': {e}"),
            })?;

        if !status.success() {
            return Err(SnapError::ShareFailed {
                detail: format!("'{program}' exited with {status}"),
            });
        }

        info!("Shared {}", path.display());
        Ok(())
    }
}
