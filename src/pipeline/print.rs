//! Print stage: the HTML-to-PDF seam and the shipped PDF writer.
//!
//! [`PrintService`] mirrors a platform print-to-file facility: it accepts an
//! HTML string and yields a PDF at a temporary location. The returned
//! [`PrintedDocument`] owns its temp directory so the file survives exactly
//! until the persist stage moves it out (or the value is dropped).
//!
//! The shipped backend, [`PdfPrinter`], handles the dialect the assembler
//! emits — stacked full-width data-URI `<img>` tags — and lays out one photo
//! per page at full page width, aspect preserved. JPEG payloads embed
//! unmodified as `DCTDecode` streams; anything else is decoded and embedded
//! as zlib-compressed RGB (`FlateDecode`), the same two encodings a PDF
//! viewer is guaranteed to support without extra codecs.

use crate::config::PageSize;
use crate::error::SnapError;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use flate2::write::ZlibEncoder;
use flate2::Compression;
use image::ImageFormat;
use lopdf::{dictionary, Document, Object, Stream};
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::Write as _;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use tracing::{debug, info};

/// A rendered PDF parked at a temporary location.
///
/// Keeps its `TempDir` alive so the file is cleaned up automatically if the
/// caller drops the value instead of persisting it.
#[derive(Debug)]
pub struct PrintedDocument {
    path: PathBuf,
    _temp_dir: TempDir,
}

impl PrintedDocument {
    /// Path of the rendered PDF inside the temp directory.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Consume the handle, releasing the file for a manual move.
    ///
    /// The temp directory stops being cleaned up; the persist stage calls
    /// this only after the file has already been moved out.
    pub(crate) fn into_parts(self) -> (PathBuf, TempDir) {
        (self.path, self._temp_dir)
    }
}

/// Print-to-file seam: HTML in, PDF at a temporary path out.
pub trait PrintService: Send + Sync {
    fn print_to_file(&self, html: &str) -> Result<PrintedDocument, SnapError>;
}

/// `src="data:<mime>;base64,<payload>"` attributes, in document order.
static IMG_DATA_URI: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<img[^>]*\bsrc="data:([A-Za-z0-9.+-]+/[A-Za-z0-9.+-]+);base64,([A-Za-z0-9+/=]+)""#)
        .expect("img data-URI pattern must compile")
});

/// One image payload lifted out of the HTML document.
#[derive(Debug)]
struct EmbeddedImage {
    /// Stream bytes as they will appear in the PDF.
    data: Vec<u8>,
    /// PDF filter name matching `data`.
    filter: &'static str,
    color_space: &'static str,
    width: u32,
    height: u32,
}

impl EmbeddedImage {
    /// Decode a data-URI payload into an embeddable stream.
    fn from_payload(bytes: Vec<u8>) -> Result<Self, SnapError> {
        let reader = image::ImageReader::new(std::io::Cursor::new(&bytes))
            .with_guessed_format()
            .map_err(|e| SnapError::RenderFailed {
                detail: format!("unreadable image payload: {e}"),
            })?;
        let format = reader.format();
        let img = reader.decode().map_err(|e| SnapError::RenderFailed {
            detail: format!("undecodable image payload: {e}"),
        })?;
        let (width, height) = (img.width(), img.height());

        if format == Some(ImageFormat::Jpeg) {
            // JPEG bytes are already a valid DCTDecode stream.
            let color_space = if img.color().has_color() {
                "DeviceRGB"
            } else {
                "DeviceGray"
            };
            return Ok(Self {
                data: bytes,
                filter: "DCTDecode",
                color_space,
                width,
                height,
            });
        }

        let raw = img.to_rgb8().into_raw();
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&raw).map_err(|e| SnapError::RenderFailed {
            detail: format!("flate encode failed: {e}"),
        })?;
        let data = encoder.finish().map_err(|e| SnapError::RenderFailed {
            detail: format!("flate encode failed: {e}"),
        })?;

        Ok(Self {
            data,
            filter: "FlateDecode",
            color_space: "DeviceRGB",
            width,
            height,
        })
    }
}

/// Pull every embedded image out of the HTML body, in document order.
fn extract_images(html: &str) -> Result<Vec<EmbeddedImage>, SnapError> {
    IMG_DATA_URI
        .captures_iter(html)
        .map(|cap| {
            let payload = STANDARD
                .decode(cap[2].as_bytes())
                .map_err(|e| SnapError::RenderFailed {
                    detail: format!("invalid base64 image data: {e}"),
                })?;
            EmbeddedImage::from_payload(payload)
        })
        .collect()
}

/// Shipped print backend: writes the photo pages directly as PDF objects.
pub struct PdfPrinter {
    page_size: PageSize,
}

impl PdfPrinter {
    pub fn new(page_size: PageSize) -> Self {
        Self { page_size }
    }

    /// Placement of an image on the page: full page width, aspect preserved,
    /// top-aligned; oversized portrait images shrink to fit the page height
    /// and are centred horizontally.
    fn placement(&self, img: &EmbeddedImage) -> (f64, f64, f64, f64) {
        let (page_w, page_h) = self.page_size.points();
        let aspect = img.height as f64 / img.width as f64;

        let mut draw_w = page_w;
        let mut draw_h = page_w * aspect;
        if draw_h > page_h {
            draw_w *= page_h / draw_h;
            draw_h = page_h;
        }
        let x = (page_w - draw_w) / 2.0;
        let y = page_h - draw_h;
        (draw_w, draw_h, x, y)
    }

    /// Assemble the PDF document for a list of extracted images.
    fn build_document(&self, images: &[EmbeddedImage]) -> Document {
        let (page_w, page_h) = self.page_size.points();
        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let mut kids: Vec<Object> = Vec::with_capacity(images.len());
        for img in images {
            let xobject_id = doc.add_object(Object::Stream(Stream::new(
                dictionary! {
                    "Type" => "XObject",
                    "Subtype" => "Image",
                    "Width" => img.width as i64,
                    "Height" => img.height as i64,
                    "ColorSpace" => img.color_space,
                    "BitsPerComponent" => 8,
                    "Filter" => img.filter,
                },
                img.data.clone(),
            )));

            let resources_id = doc.add_object(dictionary! {
                "XObject" => dictionary! {
                    "Im0" => Object::Reference(xobject_id),
                },
            });

            let (w, h, x, y) = self.placement(img);
            let content = format!("q {w:.2} 0 0 {h:.2} {x:.2} {y:.2} cm /Im0 Do Q");
            let content_id = doc.add_object(Object::Stream(Stream::new(
                dictionary! {},
                content.into_bytes(),
            )));

            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "MediaBox" => vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Real(page_w as f32),
                    Object::Real(page_h as f32),
                ],
                "Resources" => resources_id,
                "Contents" => content_id,
            });
            kids.push(page_id.into());
        }

        let count = kids.len() as i64;
        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => kids,
                "Count" => count,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc
    }
}

impl PrintService for PdfPrinter {
    fn print_to_file(&self, html: &str) -> Result<PrintedDocument, SnapError> {
        let images = extract_images(html)?;
        if images.is_empty() {
            return Err(SnapError::RenderFailed {
                detail: "document contains no embedded images".to_string(),
            });
        }
        debug!("Printing {} photo page(s)", images.len());

        let mut doc = self.build_document(&images);

        let temp_dir = TempDir::new().map_err(|e| SnapError::Internal(e.to_string()))?;
        let path = temp_dir.path().join("print.pdf");
        doc.save(&path).map_err(|e| SnapError::RenderFailed {
            detail: format!("could not write PDF: {e}"),
        })?;

        info!("Rendered {} page(s) → {}", images.len(), path.display());
        Ok(PrintedDocument {
            path,
            _temp_dir: temp_dir,
        })
    }
}
