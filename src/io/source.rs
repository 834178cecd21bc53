//! Image sources accepted by the synthesizer.

use image::RgbaImage;
use std::fmt;
use std::path::PathBuf;

/// Where an image comes from.
///
/// Every variant resolves to an RGBA8 pixel grid; see [`super::load_image`].
#[derive(Clone, Debug)]
pub enum ImageSource {
    /// Remote `http://` or `https://` address.
    Url(String),

    /// `data:<mime>;base64,<payload>` URI.
    DataUri(String),

    /// Local file.
    File(PathBuf),

    /// Encoded image bytes (PNG, JPEG, ...).
    Bytes(Vec<u8>),

    /// Already decoded pixels.
    Decoded(RgbaImage),
}

impl ImageSource {
    /// Classify a raw string the way the viewer does: URLs and data URIs by
    /// prefix, anything else is a file path.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            ImageSource::Url(trimmed.to_string())
        } else if lower.starts_with("data:") {
            ImageSource::DataUri(trimmed.to_string())
        } else {
            ImageSource::File(PathBuf::from(trimmed))
        }
    }

    /// Short label for logs and error messages.
    ///
    /// Query strings are dropped from URLs and data URIs are cut to their
    /// header, so payloads and tokens never end up in logs.
    pub fn label(&self) -> String {
        match self {
            ImageSource::Url(url) => match url.split_once('?') {
                Some((base, _)) => format!("{}?…", base),
                None => url.clone(),
            },
            ImageSource::DataUri(uri) => {
                let header = uri.split_once(',').map_or(uri.as_str(), |(h, _)| h);
                format!("{},… ({} bytes)", truncate(header, 48), uri.len())
            }
            ImageSource::File(path) => path.display().to_string(),
            ImageSource::Bytes(bytes) => format!("<{} encoded bytes>", bytes.len()),
            ImageSource::Decoded(img) => {
                format!("<decoded {}x{} image>", img.width(), img.height())
            }
        }
    }
}

fn truncate(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl From<RgbaImage> for ImageSource {
    fn from(img: RgbaImage) -> Self {
        ImageSource::Decoded(img)
    }
}

impl From<&str> for ImageSource {
    fn from(raw: &str) -> Self {
        ImageSource::parse(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_classifies_by_prefix() {
        assert!(matches!(ImageSource::parse("https://example.com/a.png"), ImageSource::Url(_)));
        assert!(matches!(ImageSource::parse("HTTP://example.com/a.png"), ImageSource::Url(_)));
        assert!(matches!(
            ImageSource::parse("data:image/png;base64,AAAA"),
            ImageSource::DataUri(_)
        ));
        assert!(matches!(ImageSource::parse("photos/cat.jpg"), ImageSource::File(_)));
    }

    #[test]
    fn test_label_hides_query_and_payload() {
        let url = ImageSource::parse("https://example.com/a.png?token=secret");
        assert_eq!(url.label(), "https://example.com/a.png?…");

        let payload = "A".repeat(500);
        let data = ImageSource::parse(&format!("data:image/png;base64,{}", payload));
        let label = data.label();
        assert!(label.starts_with("data:image/png;base64,…"));
        assert!(!label.contains(&payload));
    }

    #[test]
    fn test_label_for_buffers() {
        assert_eq!(ImageSource::Bytes(vec![0; 12]).label(), "<12 encoded bytes>");
        assert_eq!(
            ImageSource::from(RgbaImage::new(3, 2)).label(),
            "<decoded 3x2 image>"
        );
    }
}
