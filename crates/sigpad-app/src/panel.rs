//! Presentational panel configuration.
//!
//! The panel around a signature surface: pen palette, line width picker,
//! clear/undo buttons, export buttons and an optional guide grid. Only the
//! configuration and the mapping from button presses to actions live here;
//! drawing the widgets is up to the host toolkit.

use serde::{Deserialize, Serialize};
use sigpad_core::{ExportFormat, OptionsPatch, SignatureOptions};

/// Button labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelTexts {
    pub clear: String,
    pub undo: String,
    pub color: String,
    pub line_width: String,
    pub export: String,
}

impl Default for PanelTexts {
    fn default() -> Self {
        Self {
            clear: "Clear".to_string(),
            undo: "Undo".to_string(),
            color: "Color".to_string(),
            line_width: "Line width".to_string(),
            export: "Export".to_string(),
        }
    }
}

/// Panel flags, palettes and labels, plus the options of the surface it wraps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PanelConfig {
    #[serde(flatten)]
    pub options: SignatureOptions,
    pub show_controls: bool,
    pub show_color_picker: bool,
    pub show_line_width: bool,
    pub show_export: bool,
    pub show_grid: bool,
    /// Pen colors offered by the color picker.
    pub colors: Vec<String>,
    /// Line widths offered by the width picker.
    pub line_widths: Vec<f64>,
    /// Formats offered by the export buttons.
    pub export_formats: Vec<ExportFormat>,
    pub texts: PanelTexts,
    /// Hint shown over an empty surface.
    pub placeholder: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            options: SignatureOptions::default(),
            show_controls: true,
            show_color_picker: true,
            show_line_width: true,
            show_export: false,
            show_grid: false,
            colors: ["#000000", "#0000ff", "#ff0000", "#008000"]
                .iter()
                .map(|c| c.to_string())
                .collect(),
            line_widths: vec![1.0, 2.0, 3.0, 4.0],
            export_formats: vec![ExportFormat::Png, ExportFormat::Jpeg, ExportFormat::Svg],
            texts: PanelTexts::default(),
            placeholder: "Sign here".to_string(),
        }
    }
}

/// A control the user pressed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PanelAction {
    Clear,
    Undo,
    /// Index into [`PanelConfig::colors`].
    SelectColor(usize),
    /// Index into [`PanelConfig::line_widths`].
    SelectLineWidth(usize),
    Export(ExportFormat),
}

impl PanelConfig {
    /// Load a panel configuration from JSON; missing fields take defaults.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Whether the color picker is on screen.
    pub fn color_picker_visible(&self) -> bool {
        self.show_controls && self.show_color_picker && !self.colors.is_empty()
    }

    /// Whether the line width picker is on screen.
    pub fn line_width_picker_visible(&self) -> bool {
        self.show_controls && self.show_line_width && !self.line_widths.is_empty()
    }

    /// Whether the export buttons are on screen. They stay hidden while the
    /// document is empty.
    pub fn export_visible(&self, document_empty: bool) -> bool {
        self.show_export && !document_empty && !self.export_formats.is_empty()
    }

    /// Whether the placeholder hint is on screen.
    pub fn placeholder_visible(&self, document_empty: bool, drawing: bool) -> bool {
        document_empty && !drawing && !self.placeholder.is_empty()
    }

    /// Options change requested by a picker action. Out-of-range indices
    /// yield `None`.
    pub fn patch_for(&self, action: PanelAction) -> Option<OptionsPatch> {
        match action {
            PanelAction::SelectColor(i) => {
                let color = self.colors.get(i)?;
                Some(OptionsPatch::default().color(color.clone()))
            }
            PanelAction::SelectLineWidth(i) => {
                let width = *self.line_widths.get(i)?;
                Some(OptionsPatch::default().line_width(width))
            }
            PanelAction::Clear | PanelAction::Undo | PanelAction::Export(_) => None,
        }
    }

    /// Index of the palette entry matching `color`, for highlighting.
    pub fn selected_color(&self, color: &str) -> Option<usize> {
        self.colors.iter().position(|c| c.eq_ignore_ascii_case(color))
    }

    /// Index of the width entry matching `width`, for highlighting.
    pub fn selected_line_width(&self, width: f64) -> Option<usize> {
        self.line_widths
            .iter()
            .position(|w| (w - width).abs() < f64::EPSILON)
    }
}
