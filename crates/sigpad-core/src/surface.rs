//! Drawing surface abstraction.

use crate::color::Rgba;
use crate::error::{SignatureError, SignatureResult};
use kurbo::{BezPath, Cap, Join, Stroke};
use peniko::Color;

/// A pixel-addressable drawing target.
///
/// The engine owns its surface exclusively; implementations can paint into a
/// CPU pixmap, record commands, or forward to a platform canvas.
pub trait Surface {
    /// Pixel size as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Resize the backing store. Contents after a resize are unspecified
    /// until the next `fill`.
    fn resize(&mut self, width: u32, height: u32) -> SignatureResult<()>;

    /// Fill the whole surface with a color.
    fn fill(&mut self, color: Color);

    /// Stroke a path.
    fn stroke(&mut self, path: &BezPath, style: &Stroke, color: Color);
}

/// Stroke style used for every signature line: round caps and joins.
pub fn pen_style(width: f64) -> Stroke {
    Stroke::new(width).with_caps(Cap::Round).with_join(Join::Round)
}

/// A command captured by [`RecordingSurface`].
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Fill(Rgba),
    Stroke { path: BezPath, width: f64, color: Rgba },
}

/// Surface that records draw commands instead of producing pixels.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Create a recording surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Commands recorded so far.
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Forget recorded commands.
    pub fn clear_commands(&mut self) {
        self.commands.clear();
    }

    /// Recorded stroke commands only.
    pub fn strokes(&self) -> impl Iterator<Item = (&BezPath, f64, Rgba)> {
        self.commands.iter().filter_map(|c| match c {
            DrawCommand::Stroke { path, width, color } => Some((path, *width, *color)),
            DrawCommand::Fill(_) => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn resize(&mut self, width: u32, height: u32) -> SignatureResult<()> {
        if width == 0 || height == 0 {
            return Err(SignatureError::Surface(format!(
                "cannot resize to {}x{}",
                width, height
            )));
        }
        self.width = width;
        self.height = height;
        Ok(())
    }

    fn fill(&mut self, color: Color) {
        self.commands.push(DrawCommand::Fill(color.into()));
    }

    fn stroke(&mut self, path: &BezPath, style: &Stroke, color: Color) {
        self.commands.push(DrawCommand::Stroke {
            path: path.clone(),
            width: style.width,
            color: color.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_records_commands() {
        let mut surface = RecordingSurface::new(10, 10);
        surface.fill(Color::WHITE);

        let mut path = BezPath::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(5.0, 5.0));
        surface.stroke(&path, &pen_style(3.0), Color::BLACK);

        assert_eq!(surface.commands().len(), 2);
        assert_eq!(surface.commands()[0], DrawCommand::Fill(Rgba::white()));
        let (_, width, color) = surface.strokes().next().unwrap();
        assert!((width - 3.0).abs() < f64::EPSILON);
        assert_eq!(color, Rgba::black());
    }

    #[test]
    fn test_zero_resize_rejected() {
        let mut surface = RecordingSurface::new(10, 10);
        assert!(surface.resize(0, 10).is_err());
        assert_eq!(surface.size(), (10, 10));
    }

    #[test]
    fn test_pen_style_is_round() {
        let style = pen_style(2.0);
        assert_eq!(style.join, Join::Round);
        assert_eq!(style.start_cap, Cap::Round);
        assert_eq!(style.end_cap, Cap::Round);
    }
}
