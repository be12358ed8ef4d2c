//! CPU pixmap surface backed by tiny-skia.

use crate::error::{RenderError, RenderResult};
use kurbo::{BezPath, Cap, Join, PathEl};
use peniko::Color;
use sigpad_core::color::Rgba;
use sigpad_core::{SignatureError, SignatureResult, Surface};
use tiny_skia::{
    Color as SkiaColor, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform,
};

/// Largest accepted width or height, in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// Anti-aliased software surface.
#[derive(Debug, Clone)]
pub struct PixmapSurface {
    pixmap: Pixmap,
}

impl PixmapSurface {
    /// Allocate a transparent surface. Fails on a zero dimension or one
    /// above [`MAX_DIMENSION`].
    pub fn new(width: u32, height: u32) -> RenderResult<Self> {
        let pixmap = allocate(width, height).map_err(RenderError::Pixmap)?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Underlying pixmap (premultiplied RGBA).
    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    /// Straight-alpha RGBA bytes, row-major.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut data = Vec::with_capacity(self.pixmap.data().len());
        for pixel in self.pixmap.pixels() {
            let c = pixel.demultiply();
            data.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
        }
        data
    }

    /// Color of a single pixel, if in range.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some(Rgba::new(c.red(), c.green(), c.blue(), c.alpha()))
    }
}

impl Surface for PixmapSurface {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn resize(&mut self, width: u32, height: u32) -> SignatureResult<()> {
        if self.size() == (width, height) {
            return Ok(());
        }
        self.pixmap = allocate(width, height).map_err(SignatureError::Surface)?;
        Ok(())
    }

    fn fill(&mut self, color: Color) {
        self.pixmap.fill(to_skia_color(color));
    }

    fn stroke(&mut self, path: &BezPath, style: &kurbo::Stroke, color: Color) {
        let Some(path) = to_skia_path(path) else {
            return;
        };

        let mut paint = Paint::default();
        paint.set_color(to_skia_color(color));
        paint.anti_alias = true;

        let stroke = Stroke {
            width: style.width as f32,
            line_cap: match style.start_cap {
                Cap::Butt => LineCap::Butt,
                Cap::Square => LineCap::Square,
                Cap::Round => LineCap::Round,
            },
            line_join: match style.join {
                Join::Bevel => LineJoin::Bevel,
                Join::Miter => LineJoin::Miter,
                Join::Round => LineJoin::Round,
            },
            ..Stroke::default()
        };

        self.pixmap
            .stroke_path(&path, &paint, &stroke, Transform::identity(), None);
    }
}

/// Rejects sizes above [`MAX_DIMENSION`] before touching the allocator.
fn allocate(width: u32, height: u32) -> Result<Pixmap, String> {
    if width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(format!(
            "{}x{} pixmap exceeds the {} pixel limit",
            width, height, MAX_DIMENSION
        ));
    }
    Pixmap::new(width, height).ok_or_else(|| format!("cannot allocate {}x{} pixmap", width, height))
}

fn to_skia_color(color: Color) -> SkiaColor {
    let rgba: Rgba = color.into();
    SkiaColor::from_rgba8(rgba.r, rgba.g, rgba.b, rgba.a)
}

/// Convert a kurbo path. Returns `None` for paths tiny-skia cannot build
/// (empty or degenerate).
fn to_skia_path(path: &BezPath) -> Option<tiny_skia::Path> {
    let mut builder = PathBuilder::new();

    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => builder.move_to(p.x as f32, p.y as f32),
            PathEl::LineTo(p) => builder.line_to(p.x as f32, p.y as f32),
            PathEl::QuadTo(c, p) => builder.quad_to(c.x as f32, c.y as f32, p.x as f32, p.y as f32),
            PathEl::CurveTo(c1, c2, p) => builder.cubic_to(
                c1.x as f32,
                c1.y as f32,
                c2.x as f32,
                c2.y as f32,
                p.x as f32,
                p.y as f32,
            ),
            PathEl::ClosePath => builder.close(),
        }
    }

    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;
    use sigpad_core::surface::pen_style;

    #[test]
    fn test_zero_size_rejected() {
        assert!(PixmapSurface::new(0, 10).is_err());

        let mut surface = PixmapSurface::new(4, 4).unwrap();
        assert!(surface.resize(10, 0).is_err());
        assert_eq!(surface.size(), (4, 4));
    }

    #[test]
    fn test_oversized_rejected() {
        let result = PixmapSurface::new(100_000, 100_000);
        assert!(matches!(result, Err(RenderError::Pixmap(_))));
        assert!(PixmapSurface::new(MAX_DIMENSION + 1, 1).is_err());

        let mut surface = PixmapSurface::new(4, 4).unwrap();
        assert!(matches!(
            surface.resize(1, MAX_DIMENSION + 1),
            Err(SignatureError::Surface(_))
        ));
        assert_eq!(surface.size(), (4, 4));
    }

    #[test]
    fn test_fill() {
        let mut surface = PixmapSurface::new(4, 4).unwrap();
        assert_eq!(surface.pixel(0, 0), Some(Rgba::transparent()));

        surface.fill(Color::WHITE);
        assert_eq!(surface.pixel(3, 3), Some(Rgba::white()));
        assert!(surface.to_rgba().iter().all(|&b| b == 255));
    }

    #[test]
    fn test_stroke_paints_pixels() {
        let mut surface = PixmapSurface::new(20, 20).unwrap();
        surface.fill(Color::WHITE);

        let mut path = BezPath::new();
        path.move_to(Point::new(2.0, 10.0));
        path.line_to(Point::new(18.0, 10.0));
        surface.stroke(&path, &pen_style(4.0), Color::BLACK);

        assert_eq!(surface.pixel(10, 10), Some(Rgba::black()));
        assert_eq!(surface.pixel(10, 1), Some(Rgba::white()));
    }

    #[test]
    fn test_resize_reallocates() {
        let mut surface = PixmapSurface::new(4, 4).unwrap();
        surface.resize(8, 2).unwrap();
        assert_eq!(surface.size(), (8, 2));
        assert_eq!(surface.to_rgba().len(), 8 * 2 * 4);
    }
}
