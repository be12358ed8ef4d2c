//! Engine options.

use crate::error::SignatureResult;
use serde::{Deserialize, Serialize};

/// Default surface width in pixels.
pub const DEFAULT_WIDTH: u32 = 400;
/// Default surface height in pixels.
pub const DEFAULT_HEIGHT: u32 = 200;
/// Default line width.
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;
/// Default smoothing factor.
pub const DEFAULT_SMOOTHING: f64 = 0.5;

/// Drawing options for a signature surface.
///
/// Color and line width apply to strokes drawn after the change; committed
/// strokes keep the values they were captured with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SignatureOptions {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
    /// Pen color (CSS text).
    pub color: String,
    /// Background color (CSS text).
    pub background_color: String,
    /// Base line width.
    pub line_width: f64,
    /// Live smoothing factor in `[0, 1]`; 0 disables smoothing.
    pub smoothing: f64,
    /// Capture pen pressure and scale line width with it.
    pub pressure: bool,
}

impl Default for SignatureOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            color: "#000000".to_string(),
            background_color: "#ffffff".to_string(),
            line_width: DEFAULT_LINE_WIDTH,
            smoothing: DEFAULT_SMOOTHING,
            pressure: false,
        }
    }
}

impl SignatureOptions {
    /// Load options from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> SignatureResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Smoothing factor clamped into `[0, 1]`.
    pub fn smoothing_factor(&self) -> f64 {
        if self.smoothing.is_finite() {
            self.smoothing.clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    /// Line width for a sample with the given pressure.
    pub fn width_for_pressure(&self, pressure: Option<f64>) -> f64 {
        match pressure {
            Some(p) => self.line_width * (0.5 + p * 0.5),
            None => self.line_width,
        }
    }

    /// Merge a partial update. Returns whether the surface size changed.
    pub fn apply(&mut self, patch: &OptionsPatch) -> bool {
        let old_size = (self.width, self.height);

        if let Some(width) = patch.width {
            self.width = width;
        }
        if let Some(height) = patch.height {
            self.height = height;
        }
        if let Some(color) = &patch.color {
            self.color = color.clone();
        }
        if let Some(background) = &patch.background_color {
            self.background_color = background.clone();
        }
        if let Some(line_width) = patch.line_width {
            self.line_width = line_width;
        }
        if let Some(smoothing) = patch.smoothing {
            self.smoothing = smoothing;
        }
        if let Some(pressure) = patch.pressure {
            self.pressure = pressure;
        }

        old_size != (self.width, self.height)
    }
}

/// Partial options update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OptionsPatch {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub color: Option<String>,
    pub background_color: Option<String>,
    pub line_width: Option<f64>,
    pub smoothing: Option<f64>,
    pub pressure: Option<bool>,
}

impl OptionsPatch {
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn background_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(color.into());
        self
    }

    pub fn line_width(mut self, width: f64) -> Self {
        self.line_width = Some(width);
        self
    }

    pub fn smoothing(mut self, smoothing: f64) -> Self {
        self.smoothing = Some(smoothing);
        self
    }

    pub fn pressure(mut self, enabled: bool) -> Self {
        self.pressure = Some(enabled);
        self
    }

    pub fn size(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }
}
