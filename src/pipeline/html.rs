//! Render-stage input: concatenate data URIs into a minimal HTML document.
//!
//! The dialect is deliberately tiny — one full-width `<img>` per photo,
//! stacked in selection order, no reordering, no dedup. The shipped print
//! backend ([`crate::pipeline::print::PdfPrinter`]) understands exactly this
//! dialect; a platform print service would accept it as ordinary HTML.

/// Inline style applied to every embedded photo.
const IMG_STYLE: &str = "width:100%; height:auto; margin-bottom:10px;";

/// Build the HTML document for a list of already-encoded photos.
pub fn build_document(data_uris: &[String]) -> String {
    let body: String = data_uris
        .iter()
        .map(|uri| format!(r#"<img src="{uri}" style="{IMG_STYLE}" />"#))
        .collect();
    format!("<html><body>{body}</body></html>")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uris(n: usize) -> Vec<String> {
        (0..n)
            .map(|i| format!("data:image/jpeg;base64,AAA{i}"))
            .collect()
    }

    #[test]
    fn one_img_tag_per_photo() {
        for n in 1..=10 {
            let html = build_document(&uris(n));
            assert_eq!(html.matches("<img ").count(), n, "n = {n}");
        }
    }

    #[test]
    fn empty_selection_yields_empty_body() {
        assert_eq!(build_document(&[]), "<html><body></body></html>");
    }

    #[test]
    fn photos_appear_in_selection_order() {
        let html = build_document(&uris(3));
        let p0 = html.find("AAA0").unwrap();
        let p1 = html.find("AAA1").unwrap();
        let p2 = html.find("AAA2").unwrap();
        assert!(p0 < p1 && p1 < p2);
    }

    #[test]
    fn images_are_full_width() {
        let html = build_document(&uris(1));
        assert!(html.contains("width:100%"));
    }
}
