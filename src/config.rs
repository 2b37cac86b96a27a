//! Configuration for the photo-to-PDF pipeline.
//!
//! All behaviour is controlled through [`AppConfig`], built via its
//! [`AppConfigBuilder`]. Keeping every knob in one struct makes it trivial
//! to share a config across operations and to diff two runs.
//!
//! # Design choice: builder over constructor
//! Callers set only what they care about and rely on documented defaults for
//! the rest; adding a field never breaks an existing call site.

use crate::error::SnapError;
use crate::state::MAX_SELECTION;
use crate::upload::{DEFAULT_API_KEY, DEFAULT_ENDPOINT};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Name of the album directory captured photos are filed under.
pub const ALBUM_NAME: &str = "My Photos";

/// File name of the rendered document inside the document directory.
pub const OUTPUT_FILE_NAME: &str = "photos.pdf";

/// Page geometry used by the print-to-file service.
///
/// The print service renders one photo per page at full page width, so the
/// page size decides the output's aspect handling, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PageSize {
    /// US Letter, 612 × 792 pt (default).
    #[default]
    Letter,
    /// ISO A4, 595 × 842 pt.
    A4,
    /// Custom size in PDF points.
    Custom(f64, f64),
}

impl PageSize {
    /// Width and height in PDF points.
    pub fn points(self) -> (f64, f64) {
        match self {
            PageSize::Letter => (612.0, 792.0),
            PageSize::A4 => (595.0, 842.0),
            PageSize::Custom(w, h) => (w, h),
        }
    }
}

/// Configuration for one snap2pdf session.
///
/// Built via [`AppConfig::builder()`] or [`AppConfig::default()`].
///
/// # Example
/// ```rust
/// use snap2pdf::AppConfig;
///
/// let config = AppConfig::builder()
///     .document_dir("/tmp/docs")
///     .selection_limit(5)
///     .build()
///     .unwrap();
/// ```
#[derive(Clone)]
pub struct AppConfig {
    /// Directory the rendered PDF is persisted into. Default: the platform
    /// documents directory, falling back to the system temp directory.
    pub document_dir: PathBuf,

    /// Album directory captured photos are written into. Default:
    /// `<platform pictures dir>/My Photos`, falling back under `document_dir`.
    pub album_dir: PathBuf,

    /// Maximum photos per selection. Clamped to 1..=10. Default: 10.
    pub selection_limit: usize,

    /// File name of the rendered document. Default: `photos.pdf`.
    pub output_name: String,

    /// Page geometry for the print service. Default: US Letter.
    pub page_size: PageSize,

    /// External program used by the desktop capture implementation.
    /// `None` means capture is unavailable on this system.
    pub capture_command: Option<String>,

    /// External program the desktop share surface hands the PDF to.
    /// Defaults per platform (`open` on macOS, `xdg-open` elsewhere).
    pub opener_command: Option<String>,

    /// Upload endpoint URL. Default: [`DEFAULT_ENDPOINT`].
    pub endpoint: String,

    /// Static bearer credential sent with uploads. Default: [`DEFAULT_API_KEY`].
    pub api_key: String,

    /// Timeout for the single upload POST, in seconds. Default: 60.
    pub upload_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let document_dir = dirs::document_dir().unwrap_or_else(std::env::temp_dir);
        let album_dir = dirs::picture_dir()
            .unwrap_or_else(|| document_dir.clone())
            .join(ALBUM_NAME);
        Self {
            document_dir,
            album_dir,
            selection_limit: MAX_SELECTION,
            output_name: OUTPUT_FILE_NAME.to_string(),
            page_size: PageSize::default(),
            capture_command: None,
            opener_command: default_opener(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_key: DEFAULT_API_KEY.to_string(),
            upload_timeout_secs: 60,
        }
    }
}

impl fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppConfig")
            .field("document_dir", &self.document_dir)
            .field("album_dir", &self.album_dir)
            .field("selection_limit", &self.selection_limit)
            .field("output_name", &self.output_name)
            .field("page_size", &self.page_size)
            .field("capture_command", &self.capture_command)
            .field("opener_command", &self.opener_command)
            .field("endpoint", &self.endpoint)
            // Never log the credential.
            .field("api_key", &"<redacted>")
            .field("upload_timeout_secs", &self.upload_timeout_secs)
            .finish()
    }
}

impl AppConfig {
    /// Create a new builder seeded with defaults.
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder {
            config: Self::default(),
        }
    }

    /// Full path the rendered document is persisted to.
    pub fn output_path(&self) -> PathBuf {
        self.document_dir.join(&self.output_name)
    }
}

/// Default opener program per platform, if one is conventionally present.
fn default_opener() -> Option<String> {
    if cfg!(target_os = "macos") {
        Some("open".to_string())
    } else if cfg!(unix) {
        Some("xdg-open".to_string())
    } else {
        None
    }
}

/// Builder for [`AppConfig`].
#[derive(Debug)]
pub struct AppConfigBuilder {
    config: AppConfig,
}

impl AppConfigBuilder {
    pub fn document_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.document_dir = dir.into();
        self
    }

    pub fn album_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.album_dir = dir.into();
        self
    }

    pub fn selection_limit(mut self, n: usize) -> Self {
        self.config.selection_limit = n.clamp(1, MAX_SELECTION);
        self
    }

    pub fn output_name(mut self, name: impl Into<String>) -> Self {
        self.config.output_name = name.into();
        self
    }

    pub fn page_size(mut self, size: PageSize) -> Self {
        self.config.page_size = size;
        self
    }

    pub fn capture_command(mut self, program: impl Into<String>) -> Self {
        self.config.capture_command = Some(program.into());
        self
    }

    pub fn opener_command(mut self, program: impl Into<String>) -> Self {
        self.config.opener_command = Some(program.into());
        self
    }

    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.config.endpoint = url.into();
        self
    }

    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.config.api_key = key.into();
        self
    }

    pub fn upload_timeout_secs(mut self, secs: u64) -> Self {
        self.config.upload_timeout_secs = secs.max(1);
        self
    }

    /// Build the configuration, validating constraints.
    pub fn build(self) -> Result<AppConfig, SnapError> {
        let c = &self.config;
        if c.output_name.is_empty() || c.output_name.contains(['/', '\\']) {
            return Err(SnapError::InvalidConfig(format!(
                "output name must be a bare file name, got '{}'",
                c.output_name
            )));
        }
        let (w, h) = c.page_size.points();
        if w <= 0.0 || h <= 0.0 {
            return Err(SnapError::InvalidConfig(format!(
                "page size must be positive, got {w}x{h}"
            )));
        }
        if c.endpoint.is_empty() {
            return Err(SnapError::InvalidConfig("endpoint must not be empty".into()));
        }
        Ok(self.config)
    }
}
