//! Sample points and strokes.

use kurbo::{BezPath, Point, Rect};
use serde::{Deserialize, Serialize};

/// A canonical sample point in surface pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignaturePoint {
    pub x: f64,
    pub y: f64,
    /// Pen pressure in `[0, 1]`, present only when pressure capture is on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pressure: Option<f64>,
    /// Capture time in milliseconds since the Unix epoch.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<f64>,
}

impl SignaturePoint {
    /// A point without pressure or timestamp.
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            pressure: None,
            timestamp: None,
        }
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }

    pub fn with_timestamp(mut self, timestamp: f64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Position as a kurbo point.
    pub fn pos(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Euclidean distance to another sample.
    pub fn distance_to(&self, other: &SignaturePoint) -> f64 {
        self.pos().distance(other.pos())
    }
}

/// One continuous pointer-down-to-pointer-up gesture.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureStroke {
    /// Points in capture order.
    pub points: Vec<SignaturePoint>,
    /// CSS color captured when the stroke was committed.
    pub color: String,
    /// Line width captured when the stroke was committed.
    pub width: f64,
    /// Commit time in milliseconds since the Unix epoch.
    pub timestamp: f64,
}

impl SignatureStroke {
    /// Create a stroke from existing points.
    pub fn new(points: Vec<SignaturePoint>, color: impl Into<String>, width: f64, timestamp: f64) -> Self {
        Self {
            points,
            color: color.into(),
            width,
            timestamp,
        }
    }

    /// Get the number of points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the stroke has no points.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Whether the stroke produces a visible mark (two points or more).
    pub fn is_drawable(&self) -> bool {
        self.points.len() >= 2
    }

    /// Axis-aligned bounds of the points, if any.
    pub fn bounds(&self) -> Option<Rect> {
        let first = self.points.first()?;
        let mut rect = Rect::from_points(first.pos(), first.pos());
        for point in &self.points[1..] {
            rect = rect.union_pt(point.pos());
        }
        Some(rect)
    }

    /// Straight polyline through every point.
    pub fn to_path(&self) -> BezPath {
        let mut path = BezPath::new();

        let Some(first) = self.points.first() else {
            return path;
        };

        path.move_to(first.pos());
        for point in self.points.iter().skip(1) {
            path.line_to(point.pos());
        }

        path
    }

    /// Greedy distance-based decimation.
    ///
    /// The first and last point always survive. An interior point survives
    /// when it lies at least `tolerance` away from the previously kept point.
    /// Strokes with two points or fewer are returned unchanged.
    pub fn decimate(&self, tolerance: f64) -> SignatureStroke {
        if self.points.len() <= 2 {
            return self.clone();
        }

        let last_index = self.points.len() - 1;
        let mut kept = vec![self.points[0]];
        let mut anchor = self.points[0];

        for point in &self.points[1..last_index] {
            if point.distance_to(&anchor) >= tolerance {
                kept.push(*point);
                anchor = *point;
            }
        }

        kept.push(self.points[last_index]);

        SignatureStroke {
            points: kept,
            ..self.clone()
        }
    }
}
