//! Encode stage: photo locators → base64 data URIs.
//!
//! Reads run concurrently across the whole selection and the stage waits for
//! all of them; a single failed read aborts the assembly rather than
//! producing a partial document. The MIME type is sniffed from the magic
//! bytes — the locator's extension is not trusted — and falls back to
//! `image/jpeg` when the bytes are not a recognised format, leaving it to
//! the render stage to reject payloads it cannot draw.

use crate::error::SnapError;
use crate::state::SelectedPhotos;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use futures::future::try_join_all;
use std::path::Path;
use tracing::debug;

/// Read one photo and wrap it as a `data:` URI.
async fn read_as_data_uri(path: &Path) -> Result<String, SnapError> {
    let bytes = tokio::fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            SnapError::PhotoNotFound {
                path: path.to_path_buf(),
            }
        } else {
            SnapError::PhotoReadFailed {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    let mime = image::guess_format(&bytes)
        .map(|f| f.to_mime_type())
        .unwrap_or("image/jpeg");

    let b64 = STANDARD.encode(&bytes);
    debug!("Encoded {} → {} bytes base64 ({mime})", path.display(), b64.len());

    Ok(format!("data:{mime};base64,{b64}"))
}

/// Encode every photo in the selection, preserving selection order.
pub async fn encode_photos(photos: &SelectedPhotos) -> Result<Vec<String>, SnapError> {
    try_join_all(photos.iter().map(read_as_data_uri)).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::SelectedPhotos;
    use image::{Rgb, RgbImage};
    use std::io::Cursor;
    use std::path::PathBuf;

    fn write_image(dir: &Path, name: &str, format: image::ImageFormat) -> PathBuf {
        let img = RgbImage::from_pixel(4, 4, Rgb([10, 200, 30]));
        let mut buf = Vec::new();
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut Cursor::new(&mut buf), format)
            .unwrap();
        let path = dir.join(name);
        std::fs::write(&path, buf).unwrap();
        path
    }

    #[tokio::test]
    async fn mime_is_sniffed_from_bytes() {
        let tmp = tempfile::tempdir().unwrap();
        // A PNG hiding behind a .jpg extension is still encoded as image/png.
        let png = write_image(tmp.path(), "sneaky.jpg", image::ImageFormat::Png);
        let jpeg = write_image(tmp.path(), "real.jpg", image::ImageFormat::Jpeg);

        let photos = SelectedPhotos::new(vec![png, jpeg]);
        let uris = encode_photos(&photos).await.unwrap();

        assert!(uris[0].starts_with("data:image/png;base64,"));
        assert!(uris[1].starts_with("data:image/jpeg;base64,"));
    }

    #[tokio::test]
    async fn unknown_bytes_default_to_jpeg_mime() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("mystery.bin");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let photos = SelectedPhotos::new(vec![path]);
        let uris = encode_photos(&photos).await.unwrap();
        assert!(uris[0].starts_with("data:image/jpeg;base64,"));
    }

    #[tokio::test]
    async fn missing_photo_aborts_the_whole_encode() {
        let tmp = tempfile::tempdir().unwrap();
        let good = write_image(tmp.path(), "ok.png", image::ImageFormat::Png);
        let photos = SelectedPhotos::new(vec![good, PathBuf::from("/no/such/photo.jpg")]);

        let err = encode_photos(&photos).await.unwrap_err();
        assert!(matches!(err, SnapError::PhotoNotFound { .. }));
    }

    #[tokio::test]
    async fn order_matches_selection_order() {
        let tmp = tempfile::tempdir().unwrap();
        let a = write_image(tmp.path(), "a.png", image::ImageFormat::Png);
        let b = write_image(tmp.path(), "b.jpg", image::ImageFormat::Jpeg);

        let photos = SelectedPhotos::new(vec![b.clone(), a.clone()]);
        let uris = encode_photos(&photos).await.unwrap();
        assert_eq!(uris.len(), 2);
        assert!(uris[0].contains("image/jpeg"));
        assert!(uris[1].contains("image/png"));
    }
}
