//! # snap2pdf
//!
//! Assemble photos into a single PDF and deliver it — by share surface or by
//! a bearer-authenticated upload.
//!
//! ## Pipeline Overview
//!
//! ```text
//! photos
//!  │
//!  ├─ 1. Capture/Select  camera shot into the album, or a capped multi-pick
//!  ├─ 2. Encode          concurrent reads → base64 data URIs
//!  ├─ 3. Render          one full-width <img> per photo → print-to-file PDF
//!  ├─ 4. Persist         move to <document-dir>/photos.pdf, replacing prior
//!  └─ 5. Deliver         share sheet, or POST {"file": <base64>} + bearer
//! ```
//!
//! Platform capabilities — camera, gallery, permission gate, share surface,
//! print service — are trait seams in [`platform`] and [`pipeline::print`].
//! The crate ships desktop implementations; tests and embedders can inject
//! their own.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snap2pdf::{app, AppConfig, AppState, Platform, SelectionResult};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::default();
//!     let photos = vec!["a.jpg".into(), "b.jpg".into()];
//!     let platform = Platform::desktop(&config, photos);
//!
//!     let mut state = AppState::new();
//!     app::select_photos(&mut state, &platform, &config).await?;
//!     let pdf = app::create_pdf(&mut state, &platform, &config).await?;
//!     println!("PDF saved to: {}", pdf.display());
//!
//!     app::share_pdf(&state, &platform).await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `cli`   | on      | Enables the `snap2pdf` binary (clap + anyhow + tracing-subscriber) |
//!
//! Disable `cli` when using only the library:
//! ```toml
//! snap2pdf = { version = "0.3", default-features = false }
//! ```

// ── Modules ──────────────────────────────────────────────────────────────

pub mod app;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod platform;
pub mod state;
pub mod upload;

// ── Re-exports ───────────────────────────────────────────────────────────

pub use config::{AppConfig, AppConfigBuilder, PageSize, ALBUM_NAME, OUTPUT_FILE_NAME};
pub use error::{PermissionScope, SnapError};
pub use pipeline::print::{PdfPrinter, PrintService, PrintedDocument};
pub use platform::Platform;
pub use state::{AppState, CameraFacing, SelectedPhotos, SelectionResult, MAX_SELECTION};
