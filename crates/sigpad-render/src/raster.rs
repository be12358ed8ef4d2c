//! Offscreen raster export.
//!
//! Documents are replayed onto a fresh [`PixmapSurface`] (background fill and
//! plain polylines) and encoded. The engine's live surface is never read, so
//! an export always reflects the snapshot it was given.

use crate::error::{RenderError, RenderResult};
use crate::pixmap::PixmapSurface;
use image::ExtendedColorType;
use image::ImageEncoder;
use image::codecs::jpeg::JpegEncoder;
use sigpad_core::color::Rgba;
use sigpad_core::export::{self, ExportFormat, ExportOptions, ExportOutput};
use sigpad_core::render::render_document;
use sigpad_core::{SignatureCanvas, SignatureData, Surface};

/// Background used for JPEG output when none is given.
pub const JPEG_BACKGROUND: &str = "#ffffff";

/// Raster output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RasterFormat {
    Png,
    Jpeg,
}

impl RasterFormat {
    pub fn mime_type(self) -> &'static str {
        self.export_format().mime_type()
    }

    pub fn export_format(self) -> ExportFormat {
        match self {
            RasterFormat::Png => ExportFormat::Png,
            RasterFormat::Jpeg => ExportFormat::Jpeg,
        }
    }

    /// The raster variant of an export format, if it has one.
    pub fn from_export(format: ExportFormat) -> Option<Self> {
        match format {
            ExportFormat::Png => Some(RasterFormat::Png),
            ExportFormat::Jpeg => Some(RasterFormat::Jpeg),
            ExportFormat::Svg | ExportFormat::Json => None,
        }
    }
}

/// Replay a document onto a new pixmap of the document's size.
///
/// `background` overrides the document background.
pub fn rasterize(document: &SignatureData, background: Option<&str>) -> RenderResult<PixmapSurface> {
    let mut surface = PixmapSurface::new(document.width, document.height)?;
    render_document(&mut surface, document, background);
    Ok(surface)
}

/// Render and encode a document.
///
/// `quality` applies to JPEG only and is clamped into `[0, 1]`; missing or
/// non-finite values fall back to the format default. JPEG output uses a
/// white background unless `background` overrides it, PNG uses the
/// document's own.
pub fn to_raster(
    document: &SignatureData,
    format: RasterFormat,
    quality: Option<f64>,
    background: Option<&str>,
) -> RenderResult<Vec<u8>> {
    let options = ExportOptions {
        format: format.export_format(),
        quality,
        background_color: background.map(str::to_string),
    };
    let quality = options.effective_quality();

    let bytes = match format {
        RasterFormat::Png => {
            let surface = rasterize(document, background)?;
            encode_png(&surface.to_rgba(), surface.width(), surface.height())?
        }
        RasterFormat::Jpeg => {
            let surface = rasterize(document, Some(background.unwrap_or(JPEG_BACKGROUND)))?;
            encode_jpeg(&surface.to_rgba(), surface.width(), surface.height(), quality)?
        }
    };

    log::info!(
        "Exported {}x{} {} ({} bytes)",
        document.width,
        document.height,
        format.mime_type(),
        bytes.len()
    );
    Ok(bytes)
}

/// Export a document in any supported format.
pub fn export(document: &SignatureData, options: &ExportOptions) -> RenderResult<ExportOutput> {
    let mime = options.format.mime_type();

    match RasterFormat::from_export(options.format) {
        Some(format) => {
            let data = to_raster(
                document,
                format,
                options.quality,
                options.background_color.as_deref(),
            )?;
            Ok(ExportOutput::Bytes { mime, data })
        }
        None if options.format == ExportFormat::Svg => Ok(ExportOutput::Text {
            mime,
            text: export::to_svg(document),
        }),
        None => Ok(ExportOutput::Text {
            mime,
            text: export::to_json(document)?,
        }),
    }
}

/// Encode straight-alpha RGBA data as PNG.
pub fn encode_png(rgba_data: &[u8], width: u32, height: u32) -> RenderResult<Vec<u8>> {
    let mut png_data = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut png_data, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);

        let mut writer = encoder
            .write_header()
            .map_err(|e| RenderError::Encode(format!("PNG header: {}", e)))?;
        writer
            .write_image_data(rgba_data)
            .map_err(|e| RenderError::Encode(format!("PNG data: {}", e)))?;
    }

    Ok(png_data)
}

/// Encode straight-alpha RGBA data as JPEG, compositing over white.
pub fn encode_jpeg(rgba_data: &[u8], width: u32, height: u32, quality: f64) -> RenderResult<Vec<u8>> {
    let rgb = flatten(rgba_data, Rgba::white());

    let mut jpeg_data = Vec::new();
    JpegEncoder::new_with_quality(&mut jpeg_data, jpeg_quality(quality))
        .write_image(&rgb, width, height, ExtendedColorType::Rgb8)
        .map_err(|e| RenderError::Encode(format!("JPEG: {}", e)))?;

    Ok(jpeg_data)
}

/// Map `[0, 1]` onto the encoder's `1..=100` scale.
fn jpeg_quality(quality: f64) -> u8 {
    (quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Drop the alpha channel by compositing over `matte`.
fn flatten(rgba_data: &[u8], matte: Rgba) -> Vec<u8> {
    let mut rgb = Vec::with_capacity(rgba_data.len() / 4 * 3);
    for px in rgba_data.chunks_exact(4) {
        let a = px[3] as u32;
        let blend = |c: u8, m: u8| ((c as u32 * a + m as u32 * (255 - a) + 127) / 255) as u8;
        rgb.push(blend(px[0], matte.r));
        rgb.push(blend(px[1], matte.g));
        rgb.push(blend(px[2], matte.b));
    }
    rgb
}

/// Raster output straight from an engine's current document.
pub trait CanvasRasterExt {
    /// Encode the current document as a `data:` URL.
    fn to_data_url(&self, format: RasterFormat, quality: Option<f64>) -> RenderResult<String>;

    /// Encode the current document as bytes.
    fn to_blob(&self, format: RasterFormat, quality: Option<f64>) -> RenderResult<Vec<u8>>;
}

impl<S: Surface> CanvasRasterExt for SignatureCanvas<S> {
    fn to_data_url(&self, format: RasterFormat, quality: Option<f64>) -> RenderResult<String> {
        let bytes = self.to_blob(format, quality)?;
        Ok(export::to_data_url(&bytes, format.mime_type()))
    }

    fn to_blob(&self, format: RasterFormat, quality: Option<f64>) -> RenderResult<Vec<u8>> {
        to_raster(&self.get_data(), format, quality, None)
    }
}
