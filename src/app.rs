//! The user-triggerable operations.
//!
//! Each function is one user action: take a picture, select photos, create
//! the PDF, share it, upload it. Every operation is
//! independently triggerable given its precondition; the only state shared
//! between them is the [`AppState`] value the caller owns. Blocking platform
//! calls run under `spawn_blocking` so the async caller is never stalled.

use crate::config::AppConfig;
use crate::error::{PermissionScope, SnapError};
use crate::pipeline::{encode, html, persist};
use crate::platform::Platform;
use crate::state::{AppState, SelectionResult};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info};

/// Capture one still image and file it into the gallery album.
///
/// Gated on both camera and gallery permission, since the shot is filed
/// into the album immediately. Does not touch the photo selection.
pub async fn take_picture(state: &AppState, platform: &Platform) -> Result<PathBuf, SnapError> {
    platform.permissions.ensure(PermissionScope::Camera)?;
    platform.permissions.ensure(PermissionScope::Gallery)?;

    let camera = Arc::clone(&platform.camera);
    let facing = state.facing;
    let shot = tokio::task::spawn_blocking(move || camera.capture(facing))
        .await
        .map_err(|e| SnapError::Internal(format!("capture task panicked: {e}")))??;

    let gallery = Arc::clone(&platform.gallery);
    let asset = tokio::task::spawn_blocking(move || gallery.create_asset(&shot))
        .await
        .map_err(|e| SnapError::Internal(format!("gallery task panicked: {e}")))??;

    info!("Photo saved to gallery: {}", asset.display());
    Ok(asset)
}

/// Present the gallery picker and apply its outcome to the selection.
///
/// A confirmed choice replaces the Selected Photo Set wholesale; a
/// cancellation leaves it exactly as it was.
pub async fn select_photos(
    state: &mut AppState,
    platform: &Platform,
    config: &AppConfig,
) -> Result<SelectionResult, SnapError> {
    platform.permissions.ensure(PermissionScope::Gallery)?;

    let picker = Arc::clone(&platform.picker);
    let limit = config.selection_limit;
    let result = tokio::task::spawn_blocking(move || picker.pick_images(limit))
        .await
        .map_err(|e| SnapError::Internal(format!("picker task panicked: {e}")))??;

    match &result {
        SelectionResult::Selected(locators) => {
            info!("Selected {} photo(s)", locators.len())
        }
        SelectionResult::Cancelled => debug!("Selection cancelled, keeping prior set"),
    }
    state.apply_selection(result.clone());
    Ok(result)
}

/// Assemble the current selection into the rendered document.
///
/// Encode → render → persist; any stage failure aborts the whole assembly
/// and leaves `state.rendered_pdf` untouched.
pub async fn create_pdf(
    state: &mut AppState,
    platform: &Platform,
    config: &AppConfig,
) -> Result<PathBuf, SnapError> {
    if state.selected.is_empty() {
        return Err(SnapError::EmptySelection);
    }
    let start = Instant::now();
    info!("Creating PDF from {} photo(s)", state.selected.len());

    // ── Encode: concurrent reads, all-or-nothing ─────────────────────────
    let data_uris = encode::encode_photos(&state.selected).await?;

    // ── Render: HTML document through the print-to-file service ─────────
    let document = html::build_document(&data_uris);
    let printer = Arc::clone(&platform.printer);
    let printed = tokio::task::spawn_blocking(move || printer.print_to_file(&document))
        .await
        .map_err(|e| SnapError::Internal(format!("print task panicked: {e}")))??;

    // ── Persist: replace the prior output at the stable path ─────────────
    let dest = config.output_path();
    let path = persist::persist_document(printed, &dest).await?;

    state.rendered_pdf = Some(path.clone());
    info!(
        "PDF created: {} ({}ms)",
        path.display(),
        start.elapsed().as_millis()
    );
    Ok(path)
}

/// Hand the rendered document to the platform share surface.
pub async fn share_pdf(state: &AppState, platform: &Platform) -> Result<(), SnapError> {
    let path = state
        .rendered_pdf
        .clone()
        .ok_or(SnapError::NoRenderedDocument)?;

    if !platform.share.is_available() {
        return Err(SnapError::ShareUnavailable);
    }

    let share = Arc::clone(&platform.share);
    tokio::task::spawn_blocking(move || share.share(&path))
        .await
        .map_err(|e| SnapError::Internal(format!("share task panicked: {e}")))??;
    Ok(())
}

/// Deliver the rendered document to the upload endpoint.
pub async fn upload_pdf(state: &AppState, config: &AppConfig) -> Result<(), SnapError> {
    let path = state
        .rendered_pdf
        .as_deref()
        .ok_or(SnapError::NoRenderedDocument)?;
    crate::upload::upload_file(path, config).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::print::{PrintService, PrintedDocument};
    use crate::platform::{Camera, Gallery, GalleryPicker, PermissionGate, PermissionStatus, ShareSheet};
    use crate::state::CameraFacing;
    use std::path::Path;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    struct GrantAll;
    impl PermissionGate for GrantAll {
        fn status(&self, _scope: PermissionScope) -> PermissionStatus {
            PermissionStatus::Granted
        }
    }

    struct DenyAll;
    impl PermissionGate for DenyAll {
        fn status(&self, _scope: PermissionScope) -> PermissionStatus {
            PermissionStatus::Denied {
                hint: "denied in test".into(),
            }
        }
    }

    struct StubCamera;
    impl Camera for StubCamera {
        fn capture(&self, _facing: CameraFacing) -> Result<PathBuf, SnapError> {
            Ok(PathBuf::from("/tmp/shot.jpg"))
        }
    }

    struct StubGallery;
    impl Gallery for StubGallery {
        fn create_asset(&self, source: &Path) -> Result<PathBuf, SnapError> {
            Ok(source.to_path_buf())
        }
    }

    struct StubPicker(SelectionResult);
    impl GalleryPicker for StubPicker {
        fn pick_images(&self, _limit: usize) -> Result<SelectionResult, SnapError> {
            Ok(self.0.clone())
        }
    }

    /// Counts invocations so tests can assert the render primitive was never
    /// reached on the empty-selection path.
    struct CountingPrinter {
        calls: AtomicUsize,
    }
    impl PrintService for CountingPrinter {
        fn print_to_file(&self, _html: &str) -> Result<PrintedDocument, SnapError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(SnapError::RenderFailed {
                detail: "counting printer never renders".into(),
            })
        }
    }

    struct RecordingShare {
        available: bool,
        shared: Mutex<Vec<PathBuf>>,
    }
    impl ShareSheet for RecordingShare {
        fn is_available(&self) -> bool {
            self.available
        }
        fn share(&self, path: &Path) -> Result<(), SnapError> {
            self.shared.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }
    }

    fn test_platform(
        gate: Arc<dyn PermissionGate>,
        picker: SelectionResult,
        printer: Arc<CountingPrinter>,
        share: Arc<RecordingShare>,
    ) -> Platform {
        Platform {
            permissions: gate,
            camera: Arc::new(StubCamera),
            gallery: Arc::new(StubGallery),
            picker: Arc::new(StubPicker(picker)),
            share,
            printer,
        }
    }

    fn counting_printer() -> Arc<CountingPrinter> {
        Arc::new(CountingPrinter {
            calls: AtomicUsize::new(0),
        })
    }

    fn recording_share(available: bool) -> Arc<RecordingShare> {
        Arc::new(RecordingShare {
            available,
            shared: Mutex::new(vec![]),
        })
    }

    fn config() -> AppConfig {
        AppConfig::builder()
            .document_dir(std::env::temp_dir())
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn empty_selection_never_reaches_the_printer() {
        let printer = counting_printer();
        let platform = test_platform(
            Arc::new(GrantAll),
            SelectionResult::Cancelled,
            Arc::clone(&printer),
            recording_share(true),
        );
        let mut state = AppState::new();

        let err = create_pdf(&mut state, &platform, &config()).await.unwrap_err();
        assert!(matches!(err, SnapError::EmptySelection));
        assert_eq!(printer.calls.load(Ordering::SeqCst), 0);
        assert!(state.rendered_pdf.is_none());
    }

    #[tokio::test]
    async fn share_fails_fast_without_a_rendered_pdf() {
        let share = recording_share(true);
        let platform = test_platform(
            Arc::new(GrantAll),
            SelectionResult::Cancelled,
            counting_printer(),
            Arc::clone(&share),
        );
        let state = AppState::new();

        let err = share_pdf(&state, &platform).await.unwrap_err();
        assert!(matches!(err, SnapError::NoRenderedDocument));
        assert!(share.shared.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn share_reports_unavailability() {
        let platform = test_platform(
            Arc::new(GrantAll),
            SelectionResult::Cancelled,
            counting_printer(),
            recording_share(false),
        );
        let mut state = AppState::new();
        state.rendered_pdf = Some(PathBuf::from("/tmp/photos.pdf"));

        let err = share_pdf(&state, &platform).await.unwrap_err();
        assert!(matches!(err, SnapError::ShareUnavailable));
    }

    #[tokio::test]
    async fn share_passes_the_rendered_path() {
        let share = recording_share(true);
        let platform = test_platform(
            Arc::new(GrantAll),
            SelectionResult::Cancelled,
            counting_printer(),
            Arc::clone(&share),
        );
        let mut state = AppState::new();
        state.rendered_pdf = Some(PathBuf::from("/tmp/photos.pdf"));

        share_pdf(&state, &platform).await.unwrap();
        assert_eq!(
            share.shared.lock().unwrap().as_slice(),
            &[PathBuf::from("/tmp/photos.pdf")]
        );
    }

    #[tokio::test]
    async fn upload_fails_fast_without_a_rendered_pdf() {
        let state = AppState::new();
        let err = upload_pdf(&state, &config()).await.unwrap_err();
        assert!(matches!(err, SnapError::NoRenderedDocument));
    }

    #[tokio::test]
    async fn selection_updates_state_and_cancellation_does_not() {
        let picked = SelectionResult::Selected(vec![PathBuf::from("a.jpg")]);
        let platform = test_platform(
            Arc::new(GrantAll),
            picked,
            counting_printer(),
            recording_share(true),
        );
        let mut state = AppState::new();

        select_photos(&mut state, &platform, &config()).await.unwrap();
        assert_eq!(state.selected.len(), 1);

        let cancelling = test_platform(
            Arc::new(GrantAll),
            SelectionResult::Cancelled,
            counting_printer(),
            recording_share(true),
        );
        select_photos(&mut state, &cancelling, &config()).await.unwrap();
        assert_eq!(state.selected.len(), 1, "cancellation keeps the prior set");
    }

    #[tokio::test]
    async fn denied_permission_blocks_capture_and_selection() {
        let platform = test_platform(
            Arc::new(DenyAll),
            SelectionResult::Cancelled,
            counting_printer(),
            recording_share(true),
        );
        let mut state = AppState::new();

        let err = take_picture(&state, &platform).await.unwrap_err();
        assert!(matches!(err, SnapError::PermissionDenied { .. }));

        let err = select_photos(&mut state, &platform, &config()).await.unwrap_err();
        assert!(matches!(
            err,
            SnapError::PermissionDenied {
                scope: PermissionScope::Gallery,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn capture_files_the_shot_into_the_gallery() {
        let platform = test_platform(
            Arc::new(GrantAll),
            SelectionResult::Cancelled,
            counting_printer(),
            recording_share(true),
        );
        let state = AppState::new();

        let asset = take_picture(&state, &platform).await.unwrap();
        assert_eq!(asset, PathBuf::from("/tmp/shot.jpg"));
    }
}
