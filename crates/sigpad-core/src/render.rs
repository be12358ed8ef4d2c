//! Incremental and full-redraw painting of strokes.

use crate::color;
use crate::document::SignatureData;
use crate::options::SignatureOptions;
use crate::stroke::{SignaturePoint, SignatureStroke};
use crate::surface::{Surface, pen_style};
use kurbo::{BezPath, Point};

/// Smoothed anchor for the newest point of an in-progress stroke.
///
/// Blends the middle of the last three points towards the midpoint of its
/// neighbours by `smoothing`. With fewer than three points the newest point is
/// returned unchanged.
pub fn smooth_point(points: &[SignaturePoint], smoothing: f64) -> Point {
    match points {
        [.., prev_prev, prev, last] => {
            let midpoint = prev_prev.pos().midpoint(last.pos());
            prev.pos().lerp(midpoint, smoothing)
        }
        [.., last] => last.pos(),
        [] => Point::ZERO,
    }
}

/// Paints strokes onto a [`Surface`].
///
/// Tracks the pen position of the stroke in progress so that each move event
/// paints only the newest segment.
#[derive(Debug, Clone, Default)]
pub struct RenderEngine {
    pen: Option<Point>,
}

impl RenderEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new path at the start point of a gesture.
    pub fn begin_stroke(&mut self, start: &SignaturePoint) {
        self.pen = Some(start.pos());
    }

    /// Forget the stroke in progress.
    pub fn end_stroke(&mut self) {
        self.pen = None;
    }

    /// Current pen position, if a stroke is in progress.
    pub fn pen(&self) -> Option<Point> {
        self.pen
    }

    /// Paint the segment ending at the newest point of `points`.
    ///
    /// With smoothing enabled and three points or more, draws a quadratic
    /// curve with the previous raw point as control and the smoothed anchor as
    /// end point; otherwise a straight segment to the newest raw point.
    pub fn draw_incremental<S: Surface>(
        &mut self,
        surface: &mut S,
        points: &[SignaturePoint],
        options: &SignatureOptions,
    ) {
        let [.., prev, last] = points else {
            return;
        };
        let start = self.pen.unwrap_or_else(|| prev.pos());
        let smoothing = options.smoothing_factor();

        let mut segment = BezPath::new();
        segment.move_to(start);
        let end = if smoothing > 0.0 && points.len() >= 3 {
            let anchor = smooth_point(points, smoothing);
            segment.quad_to(prev.pos(), anchor);
            anchor
        } else {
            segment.line_to(last.pos());
            last.pos()
        };

        let width = options.width_for_pressure(last.pressure);
        surface.stroke(&segment, &pen_style(width), color::resolve(&options.color));
        self.pen = Some(end);
    }

    /// Clear to `background` and replay every stroke as a plain polyline.
    pub fn redraw<S: Surface>(&mut self, surface: &mut S, strokes: &[SignatureStroke], background: &str) {
        self.pen = None;
        paint_strokes(surface, strokes, background);
        log::debug!("Redrew {} strokes", strokes.len());
    }
}

/// Fill with `background` and stroke every stroke with its stored color and
/// width, without smoothing.
pub fn paint_strokes<S: Surface>(surface: &mut S, strokes: &[SignatureStroke], background: &str) {
    surface.fill(color::resolve(background));

    for stroke in strokes.iter().filter(|s| s.is_drawable()) {
        surface.stroke(&stroke.to_path(), &pen_style(stroke.width), color::resolve(&stroke.color));
    }
}

/// Offscreen replay of a whole document.
pub fn render_document<S: Surface>(surface: &mut S, document: &SignatureData, background: Option<&str>) {
    let background = background.unwrap_or(document.background_color.as_str());
    paint_strokes(surface, &document.strokes, background);
}
