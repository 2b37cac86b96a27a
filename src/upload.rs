//! Upload delivery: POST the rendered PDF to the configured endpoint.
//!
//! A single best-effort request: the PDF is read back as base64, wrapped in
//! a JSON body, and sent with the static bearer credential. Any 2xx answer
//! is success; everything else — connect failure, timeout, serialisation,
//! non-2xx — surfaces as one typed upload error with no retry and no
//! partial-progress reporting.

use crate::config::AppConfig;
use crate::error::SnapError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;
use tracing::{debug, info};

/// Default delivery endpoint. A placeholder — override via the config
/// builder or `SNAP2PDF_ENDPOINT`.
pub const DEFAULT_ENDPOINT: &str = "https://api.scantofhir.com/upload";

/// Default bearer credential, likewise a placeholder.
pub const DEFAULT_API_KEY: &str = "your-api-key-here";

/// JSON request body: `{"file": "<base64 PDF>"}`.
#[derive(Serialize)]
struct UploadRequest {
    file: String,
}

/// Read `path` and deliver it to the configured endpoint.
pub async fn upload_file(path: &Path, config: &AppConfig) -> Result<(), SnapError> {
    let start = Instant::now();

    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| SnapError::UploadFailed {
            reason: format!("could not read '{}': {e}", path.display()),
        })?;
    let body = UploadRequest {
        file: STANDARD.encode(&bytes),
    };
    debug!(
        "Uploading {} ({} bytes, {} base64) to {}",
        path.display(),
        bytes.len(),
        body.file.len(),
        config.endpoint
    );

    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(config.upload_timeout_secs))
        .build()
        .map_err(|e| SnapError::UploadFailed {
            reason: e.to_string(),
        })?;

    let response = client
        .post(&config.endpoint)
        .bearer_auth(&config.api_key)
        .json(&body)
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                SnapError::UploadFailed {
                    reason: format!("timed out after {}s", config.upload_timeout_secs),
                }
            } else {
                SnapError::UploadFailed {
                    reason: e.to_string(),
                }
            }
        })?;

    let status = response.status();
    if !status.is_success() {
        return Err(SnapError::UploadRejected {
            status: status.as_u16(),
        });
    }

    info!(
        "PDF uploaded successfully (HTTP {}, {}ms)",
        status.as_u16(),
        start.elapsed().as_millis()
    );
    Ok(())
}
