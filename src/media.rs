// ABOUTME: Media handling for images placed on slides
// ABOUTME: Decodes data URIs and rasterizes SVG payloads into PNG fallbacks

use crate::errors::{DeckError, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use resvg::usvg;

/// Pixel size of the PNG rendered alongside each SVG image.
pub const FALLBACK_PX: u32 = 256;

/// Decoded image payload.
#[derive(Debug, Clone, PartialEq)]
pub struct MediaData {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaData {
    pub fn is_svg(&self) -> bool {
        self.content_type == "image/svg+xml"
    }

    /// File extension used inside the package.
    pub fn extension(&self) -> &str {
        match self.content_type.as_str() {
            "image/svg+xml" => "svg",
            "image/png" => "png",
            "image/jpeg" | "image/jpg" => "jpeg",
            "image/gif" => "gif",
            _ => "bin",
        }
    }
}

/// Decode `image/<type>;base64,<payload>`, with or without a `data:` scheme.
pub fn decode_data_uri(uri: &str) -> Result<MediaData> {
    let uri = uri.strip_prefix("data:").unwrap_or(uri);
    let (header, payload) = uri
        .split_once(',')
        .ok_or_else(|| DeckError::MediaError("Data URI has no payload".to_string()))?;
    let content_type = header.strip_suffix(";base64").ok_or_else(|| {
        DeckError::MediaError(format!("Data URI is not base64 encoded: {}", header))
    })?;

    let bytes = STANDARD
        .decode(payload.trim())
        .map_err(|e| DeckError::MediaError(format!("Invalid base64 payload: {}", e)))?;

    Ok(MediaData {
        content_type: content_type.to_lowercase(),
        bytes,
    })
}

/// Render SVG bytes to a square PNG of `size` pixels.
pub fn rasterize_svg(svg: &[u8], size: u32) -> Result<Vec<u8>> {
    let tree = usvg::Tree::from_data(svg, &usvg::Options::default())
        .map_err(|e| DeckError::MediaError(format!("Failed to parse SVG: {}", e)))?;

    let original = tree.size();
    let transform = tiny_skia::Transform::from_scale(
        size as f32 / original.width(),
        size as f32 / original.height(),
    );

    let mut pixmap = tiny_skia::Pixmap::new(size, size)
        .ok_or_else(|| DeckError::MediaError(format!("Invalid raster size: {}", size)))?;
    resvg::render(&tree, transform, &mut pixmap.as_mut());

    pixmap
        .encode_png()
        .map_err(|e| DeckError::MediaError(format!("Failed to encode PNG: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::svg::to_data_uri;

    const DOT: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 24 24" width="64" height="64"><circle cx="12" cy="12" r="10" fill="#FF0000"/></svg>"##;

    #[test]
    fn decodes_svg_data_uri() {
        let media = decode_data_uri(&to_data_uri(DOT)).unwrap();
        assert!(media.is_svg());
        assert_eq!(media.extension(), "svg");
        assert_eq!(media.bytes, DOT.as_bytes());
    }

    #[test]
    fn accepts_data_scheme() {
        let media = decode_data_uri("data:image/png;base64,iVBORw0KGgo=").unwrap();
        assert_eq!(media.content_type, "image/png");
        assert_eq!(media.extension(), "png");
    }

    #[test]
    fn rejects_non_base64_uris() {
        assert!(decode_data_uri("image/svg+xml,<svg/>").is_err());
        assert!(decode_data_uri("no payload").is_err());
    }

    #[test]
    fn rasterizes_to_png() {
        let png = rasterize_svg(DOT.as_bytes(), 32).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }
}
