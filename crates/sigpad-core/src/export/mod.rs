//! Document export formats.
//!
//! JSON and SVG are produced here; raster formats need a pixel surface and
//! live in the render crate, which shares [`ExportOptions`].

pub mod json;
pub mod svg;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};

pub use json::{from_json, parse_validated, to_json, validate};
pub use svg::to_svg;

/// Default quality for lossless raster output.
pub const DEFAULT_PNG_QUALITY: f64 = 1.0;
/// Default quality for JPEG output.
pub const DEFAULT_JPEG_QUALITY: f64 = 0.9;

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Png,
    Jpeg,
    Svg,
    Json,
}

impl ExportFormat {
    /// MIME type of the encoded output.
    pub fn mime_type(self) -> &'static str {
        match self {
            ExportFormat::Png => "image/png",
            ExportFormat::Jpeg => "image/jpeg",
            ExportFormat::Svg => "image/svg+xml",
            ExportFormat::Json => "application/json",
        }
    }

    /// Conventional file extension.
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Jpeg => "jpg",
            ExportFormat::Svg => "svg",
            ExportFormat::Json => "json",
        }
    }

    /// Guess the format from a file extension or MIME type.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "png" | "image/png" => Some(ExportFormat::Png),
            "jpg" | "jpeg" | "image/jpeg" => Some(ExportFormat::Jpeg),
            "svg" | "image/svg+xml" => Some(ExportFormat::Svg),
            "json" | "application/json" => Some(ExportFormat::Json),
            _ => None,
        }
    }

    /// Default encoder quality for this format.
    pub fn default_quality(self) -> f64 {
        match self {
            ExportFormat::Jpeg => DEFAULT_JPEG_QUALITY,
            _ => DEFAULT_PNG_QUALITY,
        }
    }
}

/// Export settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// Encoder quality in `[0, 1]`; the format default when absent.
    pub quality: Option<f64>,
    /// Background override for raster output.
    pub background_color: Option<String>,
}

impl ExportOptions {
    pub fn new(format: ExportFormat) -> Self {
        Self {
            format,
            ..Default::default()
        }
    }

    pub fn with_quality(mut self, quality: f64) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_background(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    /// Quality clamped into `[0, 1]`; a missing or non-finite value gives
    /// the format default.
    pub fn effective_quality(&self) -> f64 {
        match self.quality {
            Some(q) if q.is_finite() => q.clamp(0.0, 1.0),
            Some(q) => {
                log::warn!("Ignoring export quality {}, using default", q);
                self.format.default_quality()
            }
            None => self.format.default_quality(),
        }
    }
}

/// Encoded export result.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutput {
    Bytes { mime: &'static str, data: Vec<u8> },
    Text { mime: &'static str, text: String },
}

impl ExportOutput {
    /// MIME type of the payload.
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportOutput::Bytes { mime, .. } | ExportOutput::Text { mime, .. } => *mime,
        }
    }

    /// Raw payload bytes.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            ExportOutput::Bytes { data, .. } => data,
            ExportOutput::Text { text, .. } => text.as_bytes(),
        }
    }

    /// `data:` URL carrying the payload.
    pub fn to_data_url(&self) -> String {
        to_data_url(self.as_bytes(), self.mime_type())
    }
}

/// Encode bytes as a base64 `data:` URL.
pub fn to_data_url(bytes: &[u8], mime: &str) -> String {
    format!("data:{};base64,{}", mime, STANDARD.encode(bytes))
}
