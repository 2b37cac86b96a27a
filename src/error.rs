//! Error types for the snap2pdf library.
//!
//! Every operation returns `Result<_, SnapError>`. Each failure an operation
//! can hit has its own variant, so callers (and the CLI) can match on the
//! kind instead of parsing message strings. A failure is terminal for the
//! triggering action only — the [`crate::state::AppState`] it ran against
//! stays valid and every other operation remains usable.
//!
//! The `Display` texts of the precondition variants double as the user-facing
//! notices the CLI prints ("No Photos", "No PDF Found", …).

use std::path::PathBuf;
use thiserror::Error;

/// Which platform capability a permission gate refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionScope {
    /// The camera capture primitive.
    Camera,
    /// The photo gallery (album directory and picker).
    Gallery,
}

impl std::fmt::Display for PermissionScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PermissionScope::Camera => write!(f, "camera"),
            PermissionScope::Gallery => write!(f, "gallery"),
        }
    }
}

/// All errors returned by the snap2pdf library.
#[derive(Debug, Error)]
pub enum SnapError {
    // ── Preconditions ─────────────────────────────────────────────────────
    /// A capability gate reported denied; the operation never started.
    #[error("Permission to use the {scope} was denied.\n{hint}")]
    PermissionDenied { scope: PermissionScope, hint: String },

    /// PDF assembly was requested with an empty photo selection.
    #[error("No Photos: select photos from the gallery before creating a PDF")]
    EmptySelection,

    /// Share or upload was requested before any assembly succeeded.
    #[error("No PDF Found: create a PDF before sharing or uploading it")]
    NoRenderedDocument,

    // ── Capture / selection ───────────────────────────────────────────────
    /// The capture primitive failed to produce a still image.
    #[error("Failed to take photo: {detail}")]
    CaptureFailed { detail: String },

    /// The captured image could not be written into the gallery album.
    #[error("Failed to save photo to '{path}': {source}")]
    GalleryWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The gallery picker itself failed (distinct from a cancellation).
    #[error("Failed to select photos from the gallery: {detail}")]
    PickerFailed { detail: String },

    // ── Assembly ──────────────────────────────────────────────────────────
    /// A selected photo no longer exists at its locator.
    #[error("Photo not found: '{path}'")]
    PhotoNotFound { path: PathBuf },

    /// A selected photo exists but its bytes could not be read.
    #[error("Failed to read photo '{path}': {source}")]
    PhotoReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The print-to-file service could not render the HTML document.
    #[error("Failed to create PDF: {detail}")]
    RenderFailed { detail: String },

    /// The rendered PDF could not be moved to its stable path.
    #[error("Failed to save PDF to '{path}': {source}")]
    PersistFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Delivery ──────────────────────────────────────────────────────────
    /// No share surface is available on this system.
    #[error("Sharing Not Available: this system does not support sharing")]
    ShareUnavailable,

    /// The share surface was invoked but reported failure.
    #[error("Failed to share the PDF: {detail}")]
    ShareFailed { detail: String },

    /// The upload request never completed (connect error, timeout, …).
    #[error("Failed to upload PDF: {reason}\nCheck your internet connection.")]
    UploadFailed { reason: String },

    /// The upload endpoint answered with a non-2xx status.
    #[error("Failed to upload PDF: endpoint returned HTTP {status}")]
    UploadRejected { status: u16 },

    // ── Config / catch-all ────────────────────────────────────────────────
    /// Builder validation failed.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Unexpected internal error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SnapError {
    /// True when the error is one of the fail-fast precondition notices
    /// rather than a platform-call failure.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            SnapError::PermissionDenied { .. }
                | SnapError::EmptySelection
                | SnapError::NoRenderedDocument
        )
    }
}
