//! Platform capability seams.
//!
//! The pipeline treats camera, gallery, permission gate, and share surface
//! as external collaborators. Each one is a small `Send + Sync` trait held
//! as an `Arc<dyn …>`, so tests inject mocks and the CLI injects the desktop
//! implementations below. Blocking implementations are fine: the operations
//! in [`crate::app`] wrap every platform call in `spawn_blocking`.
//!
//! Desktop renditions of the mobile primitives:
//!
//! | Primitive        | Desktop implementation                              |
//! |------------------|-----------------------------------------------------|
//! | camera capture   | configured external command writing a still image   |
//! | gallery album    | directory under the platform pictures folder        |
//! | gallery picker   | caller-supplied paths, filtered to images, capped   |
//! | permission gate  | directory accessibility + capture-command presence  |
//! | share surface    | platform opener command (`open` / `xdg-open`)       |

pub mod camera;
pub mod gallery;
pub mod permission;
pub mod share;

pub use camera::{Camera, CommandCamera};
pub use gallery::{DirectoryGallery, Gallery, GalleryPicker, PathPicker};
pub use permission::{DirAccessGate, PermissionGate, PermissionStatus};
pub use share::{CommandShare, ShareSheet};

use crate::config::AppConfig;
use crate::pipeline::print::{PdfPrinter, PrintService};
use std::sync::Arc;

/// Bundle of every capability the operations need.
///
/// Construct with [`Platform::desktop`] for real use, or assemble the fields
/// by hand with mocks in tests.
#[derive(Clone)]
pub struct Platform {
    pub permissions: Arc<dyn PermissionGate>,
    pub camera: Arc<dyn Camera>,
    pub gallery: Arc<dyn Gallery>,
    pub picker: Arc<dyn GalleryPicker>,
    pub share: Arc<dyn ShareSheet>,
    pub printer: Arc<dyn PrintService>,
}

impl Platform {
    /// Desktop implementations for every seam, wired from the config.
    ///
    /// `photos` is the locator list the picker will offer — on a desktop
    /// there is no interactive picker UI, so the "selection" is whatever the
    /// caller (typically the CLI argument list) passes in.
    pub fn desktop(config: &AppConfig, photos: Vec<std::path::PathBuf>) -> Self {
        Self {
            permissions: Arc::new(DirAccessGate::new(
                config.album_dir.clone(),
                config.capture_command.clone(),
            )),
            camera: Arc::new(CommandCamera::new(config.capture_command.clone())),
            gallery: Arc::new(DirectoryGallery::new(config.album_dir.clone())),
            picker: Arc::new(PathPicker::new(photos)),
            share: Arc::new(CommandShare::new(config.opener_command.clone())),
            printer: Arc::new(PdfPrinter::new(config.page_size)),
        }
    }
}

impl std::fmt::Debug for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Platform").finish_non_exhaustive()
    }
}
