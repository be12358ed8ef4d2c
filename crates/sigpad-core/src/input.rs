//! Pointer/touch input and the mapping into surface pixel space.

use crate::stroke::SignaturePoint;
use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};

/// A raw pointer or touch sample in client (screen) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    pub client_x: f64,
    pub client_y: f64,
    /// Mouse/pen `pressure` or touch `force`, when the device reports it.
    #[serde(default)]
    pub pressure: Option<f64>,
}

impl PointerSample {
    pub fn new(client_x: f64, client_y: f64) -> Self {
        Self {
            client_x,
            client_y,
            pressure: None,
        }
    }

    pub fn with_pressure(mut self, pressure: f64) -> Self {
        self.pressure = Some(pressure);
        self
    }
}

/// Pointer event type for unified mouse/touch handling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    MouseDown(PointerSample),
    MouseMove(PointerSample),
    MouseUp,
    /// Pointer left the surface; ends any stroke in progress.
    MouseLeave,
    /// Touch start with every touch currently on the surface.
    TouchStart(Vec<PointerSample>),
    /// Touch move with every touch currently on the surface.
    TouchMove(Vec<PointerSample>),
    TouchEnd,
}

impl PointerEvent {
    /// Whether this event ends a gesture.
    pub fn is_end(&self) -> bool {
        matches!(
            self,
            PointerEvent::MouseUp | PointerEvent::MouseLeave | PointerEvent::TouchEnd
        )
    }
}

/// On-screen layout box of a surface together with its pixel size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceLayout {
    /// Left edge of the layout box in client coordinates.
    pub left: f64,
    /// Top edge of the layout box in client coordinates.
    pub top: f64,
    /// Displayed (CSS) width.
    pub display_width: f64,
    /// Displayed (CSS) height.
    pub display_height: f64,
    /// Backing pixel width.
    pub pixel_width: u32,
    /// Backing pixel height.
    pub pixel_height: u32,
}

impl SurfaceLayout {
    /// A surface displayed at its pixel size with its origin at `(0, 0)`.
    pub fn identity(width: u32, height: u32) -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            display_width: width as f64,
            display_height: height as f64,
            pixel_width: width,
            pixel_height: height,
        }
    }

    /// Move the layout box to a new client-space origin.
    pub fn at(mut self, left: f64, top: f64) -> Self {
        self.left = left;
        self.top = top;
        self
    }

    /// Set the displayed size of the layout box.
    pub fn displayed(mut self, width: f64, height: f64) -> Self {
        self.display_width = width;
        self.display_height = height;
        self
    }

    /// Pixel-per-display-unit scale on each axis.
    ///
    /// A collapsed layout box (zero or non-finite extent) maps 1:1.
    pub fn scale(&self) -> Vec2 {
        let axis = |pixels: u32, displayed: f64| {
            if displayed > 0.0 && displayed.is_finite() {
                pixels as f64 / displayed
            } else {
                1.0
            }
        };
        Vec2::new(
            axis(self.pixel_width, self.display_width),
            axis(self.pixel_height, self.display_height),
        )
    }

    /// Map a client-space position into surface pixel space.
    pub fn to_surface(&self, client: Point) -> Point {
        let scale = self.scale();
        Point::new(
            (client.x - self.left) * scale.x,
            (client.y - self.top) * scale.y,
        )
    }
}

/// Convert a raw sample into a canonical point.
///
/// Pressure is kept only when `pressure_enabled`, clamped into `[0, 1]`.
pub fn map_point(
    sample: &PointerSample,
    layout: &SurfaceLayout,
    pressure_enabled: bool,
    timestamp: f64,
) -> SignaturePoint {
    let pos = layout.to_surface(Point::new(sample.client_x, sample.client_y));
    let pressure = if pressure_enabled {
        sample
            .pressure
            .filter(|p| p.is_finite())
            .map(|p| p.clamp(0.0, 1.0))
    } else {
        None
    };

    SignaturePoint {
        x: pos.x,
        y: pos.y,
        pressure,
        timestamp: Some(timestamp),
    }
}

/// The touch to draw with, if exactly one finger is down.
pub fn single_touch(touches: &[PointerSample]) -> Option<&PointerSample> {
    match touches {
        [only] => Some(only),
        _ => None,
    }
}
