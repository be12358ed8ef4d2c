//! Document statistics and point decimation.

use crate::document::SignatureData;
use serde::{Deserialize, Serialize};

/// Default decimation tolerance in surface pixels.
pub const DEFAULT_TOLERANCE: f64 = 2.0;

/// Axis-aligned bounding box of a document's points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    /// Whether the box encloses no point (min beyond max on either axis).
    pub fn is_degenerate(&self) -> bool {
        self.min_x > self.max_x || self.min_y > self.max_y
    }

    pub fn width(&self) -> f64 {
        (self.max_x - self.min_x).max(0.0)
    }

    pub fn height(&self) -> f64 {
        (self.max_y - self.min_y).max(0.0)
    }
}

/// Summary of a signature document.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureStats {
    pub stroke_count: usize,
    pub total_points: usize,
    /// Milliseconds between the earliest and latest recorded timestamp.
    pub duration: f64,
    pub bounds: Bounds,
}

/// Compute statistics for a document.
///
/// Bounds start at `(width, height)` / `(0, 0)`, so a document without points
/// reports `min_x == width` and `max_x == 0`; check `stroke_count` or
/// [`Bounds::is_degenerate`] before using them. Duration is `0.0` when no
/// timestamps exist.
pub fn stats(document: &SignatureData) -> SignatureStats {
    let mut bounds = Bounds {
        min_x: document.width as f64,
        min_y: document.height as f64,
        max_x: 0.0,
        max_y: 0.0,
    };
    let mut earliest = f64::INFINITY;
    let mut latest = f64::NEG_INFINITY;

    let mut record_time = |t: f64| {
        earliest = earliest.min(t);
        latest = latest.max(t);
    };

    for stroke in &document.strokes {
        record_time(stroke.timestamp);

        for point in &stroke.points {
            bounds.min_x = bounds.min_x.min(point.x);
            bounds.min_y = bounds.min_y.min(point.y);
            bounds.max_x = bounds.max_x.max(point.x);
            bounds.max_y = bounds.max_y.max(point.y);

            if let Some(t) = point.timestamp {
                record_time(t);
            }
        }
    }

    let duration = if earliest.is_finite() && latest.is_finite() {
        latest - earliest
    } else {
        0.0
    };

    SignatureStats {
        stroke_count: document.strokes.len(),
        total_points: document.total_points(),
        duration,
        bounds,
    }
}

/// Lossy copy of a document with nearby points dropped.
///
/// See [`SignatureStroke::decimate`](crate::stroke::SignatureStroke::decimate)
/// for the per-stroke rule.
pub fn optimize(document: &SignatureData, tolerance: f64) -> SignatureData {
    let optimized = SignatureData {
        strokes: document.strokes.iter().map(|s| s.decimate(tolerance)).collect(),
        ..document.clone()
    };

    log::debug!(
        "Optimized document from {} to {} points (tolerance {})",
        document.total_points(),
        optimized.total_points(),
        tolerance
    );

    optimized
}
