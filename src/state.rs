//! Application state shared across operations.
//!
//! Camera facing, photo selection, and the rendered PDF path live in one
//! explicit [`AppState`] value that every operation receives and updates
//! through plain assignment, so a reader can see exactly which operation
//! touches which field. One `AppState` models one session; nothing in it is
//! persisted across processes.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Hard cap on how many photos a single selection may contain.
///
/// The gallery picker is configured with this limit; [`SelectedPhotos`]
/// truncates to it as a second line of defence so a misbehaving picker
/// implementation cannot overfill the set.
pub const MAX_SELECTION: usize = 10;

/// Which camera lens the capture primitive should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CameraFacing {
    /// Rear lens (default).
    #[default]
    Back,
    /// Front (selfie) lens.
    Front,
}

impl CameraFacing {
    /// The other lens.
    pub fn toggled(self) -> Self {
        match self {
            CameraFacing::Back => CameraFacing::Front,
            CameraFacing::Front => CameraFacing::Back,
        }
    }
}

/// Outcome of presenting the gallery picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionResult {
    /// The user confirmed a non-empty choice of image locators.
    Selected(Vec<PathBuf>),
    /// The user dismissed the picker; the current selection must be kept.
    Cancelled,
}

/// Ordered, size-capped set of photo locators chosen for PDF assembly.
///
/// Replaced wholesale on each confirmed selection — there is no append or
/// remove operation, matching the picker's all-or-nothing result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectedPhotos(Vec<PathBuf>);

impl SelectedPhotos {
    /// Build a selection from picker output, preserving order and
    /// truncating anything beyond [`MAX_SELECTION`].
    pub fn new(locators: Vec<PathBuf>) -> Self {
        let mut locators = locators;
        locators.truncate(MAX_SELECTION);
        Self(locators)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Locators in selection order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.0.iter().map(PathBuf::as_path)
    }

    pub fn as_slice(&self) -> &[PathBuf] {
        &self.0
    }
}

/// Per-session mutable state: camera facing, current selection, and the
/// path of the last successfully rendered PDF.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    /// Lens the next capture will use.
    pub facing: CameraFacing,
    /// Photos queued for the next assembly.
    pub selected: SelectedPhotos,
    /// Set only by a successful assembly; required by share and upload.
    pub rendered_pdf: Option<PathBuf>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip between the back and front lens.
    pub fn toggle_facing(&mut self) {
        self.facing = self.facing.toggled();
    }

    /// Apply a picker outcome: a confirmed selection replaces the set
    /// wholesale, a cancellation leaves it untouched.
    pub fn apply_selection(&mut self, result: SelectionResult) {
        if let SelectionResult::Selected(locators) = result {
            self.selected = SelectedPhotos::new(locators);
        }
    }
}
