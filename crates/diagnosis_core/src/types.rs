//! Core types for a single diagnosis request
//!
//! A request is made of two ephemeral values: the selected [`Mode`] and
//! the uploaded [`Screenshot`]. Neither outlives the request.

use crate::error::{ImageError, ModeError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Cursor;
use std::path::Path;
use std::str::FromStr;

/// Observation persona used for the diagnosis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// 🌶️ 锐评: sharp, sarcastic and absurdly funny
    #[default]
    Roast,
    /// 🔮 洞悉: warm, literary cold reading
    Insight,
}

impl Mode {
    pub const ALL: [Mode; 2] = [Mode::Roast, Mode::Insight];

    /// Label shown on the mode selector
    pub fn label(self) -> &'static str {
        match self {
            Mode::Roast => "🌶️ 锐评",
            Mode::Insight => "🔮 洞悉",
        }
    }

    /// Keyword interpolated into the directive sent to the model
    pub fn keyword(self) -> &'static str {
        match self {
            Mode::Roast => "锐评",
            Mode::Insight => "洞悉",
        }
    }

    /// Parse a selector value: a label, a keyword or the English name
    pub fn from_label(value: &str) -> Result<Self, ModeError> {
        let trimmed = value.trim();
        if trimmed.contains(Mode::Roast.keyword()) || trimmed.eq_ignore_ascii_case("roast") {
            Ok(Mode::Roast)
        } else if trimmed.contains(Mode::Insight.keyword())
            || trimmed.eq_ignore_ascii_case("insight")
        {
            Ok(Mode::Insight)
        } else {
            Err(ModeError(trimmed.to_string()))
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mode {
    type Err = ModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::from_label(s)
    }
}

/// Raster formats accepted by the upload control
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Jpeg,
    Png,
    Webp,
}

/// File extensions accepted by the upload control
pub const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "webp"];

impl ImageFormat {
    /// MIME type sent alongside the inline image data
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Webp => "image/webp",
        }
    }

    /// Look up an allow-listed extension (case-insensitive, no dot)
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "webp" => Some(ImageFormat::Webp),
            _ => None,
        }
    }

    fn from_codec(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Jpeg => Some(ImageFormat::Jpeg),
            image::ImageFormat::Png => Some(ImageFormat::Png),
            image::ImageFormat::WebP => Some(ImageFormat::Webp),
            _ => None,
        }
    }

    fn codec(self) -> image::ImageFormat {
        match self {
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
            ImageFormat::Png => image::ImageFormat::Png,
            ImageFormat::Webp => image::ImageFormat::WebP,
        }
    }
}

/// An uploaded screenshot, validated against the format allow-list
#[derive(Clone, PartialEq, Eq)]
pub struct Screenshot {
    bytes: Vec<u8>,
    format: ImageFormat,
}

impl Screenshot {
    /// Validate raw bytes as an allow-listed raster image
    ///
    /// The format is sniffed from the content rather than trusted from the
    /// upload, and the header must decode to a real image size.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::Empty);
        }

        let sniffed =
            image::guess_format(&bytes).map_err(|e| ImageError::Undecodable(e.to_string()))?;
        let format = ImageFormat::from_codec(sniffed)
            .ok_or_else(|| ImageError::UnsupportedFormat(format!("{:?}", sniffed)))?;

        image::ImageReader::with_format(Cursor::new(bytes.as_slice()), format.codec())
            .into_dimensions()
            .map_err(|e| ImageError::Undecodable(e.to_string()))?;

        Ok(Self { bytes, format })
    }

    /// Validate an upload, checking the file name against the allow-list first
    pub fn from_upload(bytes: Vec<u8>, filename: Option<&str>) -> Result<Self, ImageError> {
        if let Some(ext) = filename
            .map(Path::new)
            .and_then(|p| p.extension())
            .and_then(|e| e.to_str())
        {
            if ImageFormat::from_extension(ext).is_none() {
                return Err(ImageError::UnsupportedExtension(ext.to_string()));
            }
        }

        Self::from_bytes(bytes)
    }

    /// Load and validate a screenshot from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| ImageError::Read {
            path: path.display().to_string(),
            source,
        })?;

        Self::from_upload(bytes, path.file_name().and_then(|n| n.to_str()))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

impl fmt::Debug for Screenshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Screenshot")
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Encode a tiny image in memory
    fn encoded(format: image::ImageFormat) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(4, 3, image::Rgb([200, 40, 90]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_mode_labels_and_keywords() {
        assert_eq!(Mode::Roast.label(), "🌶️ 锐评");
        assert_eq!(Mode::Insight.label(), "🔮 洞悉");
        assert_eq!(Mode::Roast.keyword(), "锐评");
        assert_eq!(Mode::Insight.keyword(), "洞悉");
    }

    #[test]
    fn test_mode_from_label() {
        assert_eq!(Mode::from_label("🌶️ 锐评").unwrap(), Mode::Roast);
        assert_eq!(Mode::from_label("洞悉").unwrap(), Mode::Insight);
        assert_eq!(Mode::from_label(" ROAST ").unwrap(), Mode::Roast);
        assert_eq!("insight".parse::<Mode>().unwrap(), Mode::Insight);
        assert!(Mode::from_label("neutral").is_err());
        assert!(Mode::from_label("").is_err());
    }

    #[test]
    fn test_mode_serialization() {
        let json = serde_json::to_string(&Mode::Insight).unwrap();
        assert_eq!(json, "\"insight\"");
    }

    #[test]
    fn test_extension_allow_list() {
        for ext in ALLOWED_EXTENSIONS {
            assert!(ImageFormat::from_extension(ext).is_some(), "{ext}");
        }
        assert_eq!(ImageFormat::from_extension("JPG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension("gif"), None);
        assert_eq!(ImageFormat::from_extension("bmp"), None);
    }

    #[test]
    fn test_screenshot_accepts_allow_listed_formats() {
        let cases = [
            (image::ImageFormat::Png, ImageFormat::Png),
            (image::ImageFormat::Jpeg, ImageFormat::Jpeg),
            (image::ImageFormat::WebP, ImageFormat::Webp),
        ];

        for (codec, expected) in cases {
            let shot = Screenshot::from_bytes(encoded(codec)).unwrap();
            assert_eq!(shot.format(), expected);
            assert!(!shot.is_empty());
        }
    }

    #[test]
    fn test_screenshot_sniffs_content_over_name() {
        let shot = Screenshot::from_upload(encoded(image::ImageFormat::Png), Some("photo.jpg"))
            .unwrap();
        assert_eq!(shot.format(), ImageFormat::Png);
        assert_eq!(shot.format().mime_type(), "image/png");
    }

    #[test]
    fn test_screenshot_rejects_bad_input() {
        assert!(matches!(
            Screenshot::from_bytes(Vec::new()),
            Err(ImageError::Empty)
        ));
        assert!(matches!(
            Screenshot::from_bytes(b"definitely not an image".to_vec()),
            Err(ImageError::Undecodable(_))
        ));
        assert!(matches!(
            Screenshot::from_upload(encoded(image::ImageFormat::Png), Some("anim.gif")),
            Err(ImageError::UnsupportedExtension(ext)) if ext == "gif"
        ));
    }

    #[test]
    fn test_screenshot_rejects_gif_content() {
        // GIF magic bytes sniff as a known but disallowed format
        let gif = b"GIF89a\x01\x00\x01\x00\x00\x00\x00".to_vec();
        assert!(matches!(
            Screenshot::from_bytes(gif),
            Err(ImageError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_screenshot_rejects_truncated_png() {
        let mut png = encoded(image::ImageFormat::Png);
        png.truncate(12);
        assert!(matches!(
            Screenshot::from_bytes(png),
            Err(ImageError::Undecodable(_))
        ));
    }

    #[test]
    fn test_screenshot_from_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("moments.png");
        std::fs::write(&path, encoded(image::ImageFormat::Png)).unwrap();

        let shot = Screenshot::from_path(&path).unwrap();
        assert_eq!(shot.format(), ImageFormat::Png);

        let missing = dir.path().join("missing.png");
        assert!(matches!(
            Screenshot::from_path(missing),
            Err(ImageError::Read { .. })
        ));
    }
}
