//! Reactive wrapper around the signature engine.

use crate::panel::{PanelAction, PanelConfig};
use sigpad_core::{
    EventKind, ExportOptions, ExportOutput, OptionsPatch, PointerEvent, RecorderOutcome,
    SignatureCanvas, SignatureData, SignatureEvent, SignatureOptions, SignatureResult,
    Subscription, Surface, SurfaceLayout,
};
use sigpad_render::{CanvasRasterExt, PixmapSurface, RasterFormat};

/// Signature engine plus the state a UI binds to.
///
/// `is_drawing`, `is_empty` and `signature_data` are refreshed on stroke
/// start and end, undo, clear and `set_data`. A pad built without a surface,
/// or whose engine failed to initialize, keeps working as a no-op.
#[derive(Debug)]
pub struct SignaturePad<S: Surface = PixmapSurface> {
    canvas: Option<SignatureCanvas<S>>,
    is_drawing: bool,
    is_empty: bool,
    signature_data: Option<SignatureData>,
}

impl<S: Surface> SignaturePad<S> {
    /// Bind the engine to `surface`. Initialization errors are logged and
    /// leave the pad without an engine.
    pub fn new(surface: Option<S>, options: SignatureOptions) -> Self {
        let canvas = surface.and_then(|surface| match SignatureCanvas::new(surface, options) {
            Ok(canvas) => Some(canvas),
            Err(e) => {
                log::error!("Failed to initialize signature canvas: {}", e);
                None
            }
        });

        Self {
            canvas,
            is_drawing: false,
            is_empty: true,
            signature_data: None,
        }
    }

    /// Whether an engine is attached.
    pub fn is_ready(&self) -> bool {
        self.canvas.is_some()
    }

    pub fn is_drawing(&self) -> bool {
        self.is_drawing
    }

    pub fn is_empty(&self) -> bool {
        self.is_empty
    }

    /// Document as of the last stroke end, undo or `set_data`; `None` after
    /// a clear.
    pub fn signature_data(&self) -> Option<&SignatureData> {
        self.signature_data.as_ref()
    }

    /// Engine access for hosts that need more than the passthroughs.
    pub fn canvas(&self) -> Option<&SignatureCanvas<S>> {
        self.canvas.as_ref()
    }

    /// Forward a pointer event to the engine.
    pub fn handle_event(&mut self, event: &PointerEvent, layout: &SurfaceLayout) -> RecorderOutcome {
        let Some(canvas) = self.canvas.as_mut() else {
            return RecorderOutcome::Ignored;
        };

        let outcome = canvas.handle_event(event, layout);
        if matches!(outcome, RecorderOutcome::Started(_)) {
            self.is_drawing = true;
        } else if event.is_end() {
            self.is_drawing = false;
            self.is_empty = canvas.is_empty();
            self.signature_data = Some(canvas.get_data());
        }
        outcome
    }

    pub fn clear(&mut self) {
        if let Some(canvas) = self.canvas.as_mut() {
            canvas.clear();
        }
        self.is_drawing = false;
        self.is_empty = true;
        self.signature_data = None;
    }

    pub fn undo(&mut self) {
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        canvas.undo();
        self.is_empty = canvas.is_empty();
        self.signature_data = Some(canvas.get_data());
    }

    /// Restore the most recently undone stroke.
    pub fn redo(&mut self) -> bool {
        let Some(canvas) = self.canvas.as_mut() else {
            return false;
        };
        let restored = canvas.redo_last();
        if restored {
            self.is_empty = canvas.is_empty();
            self.signature_data = Some(canvas.get_data());
        }
        restored
    }

    /// Fresh snapshot of the document, or `None` without an engine.
    pub fn get_data(&self) -> Option<SignatureData> {
        self.canvas.as_ref().map(SignatureCanvas::get_data)
    }

    pub fn set_data(&mut self, data: SignatureData) {
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };
        canvas.set_data(&data);
        self.is_empty = canvas.is_empty();
        self.signature_data = Some(data);
    }

    /// Raster `data:` URL of the current document; empty when unavailable.
    pub fn to_data_url(&self, format: RasterFormat, quality: Option<f64>) -> String {
        let Some(canvas) = self.canvas.as_ref() else {
            return String::new();
        };
        canvas.to_data_url(format, quality).unwrap_or_else(|e| {
            log::warn!("Raster export failed: {}", e);
            String::new()
        })
    }

    /// Encoded raster bytes of the current document.
    pub fn to_blob(&self, format: RasterFormat, quality: Option<f64>) -> Option<Vec<u8>> {
        let canvas = self.canvas.as_ref()?;
        canvas
            .to_blob(format, quality)
            .map_err(|e| log::warn!("Raster export failed: {}", e))
            .ok()
    }

    /// Export the current document in any format.
    pub fn export(&self, options: &ExportOptions) -> Option<ExportOutput> {
        let data = self.get_data()?;
        sigpad_render::export(&data, options)
            .map_err(|e| log::warn!("Export failed: {}", e))
            .ok()
    }

    pub fn update_options(&mut self, patch: &OptionsPatch) -> SignatureResult<()> {
        match self.canvas.as_mut() {
            Some(canvas) => canvas.update_options(patch),
            None => Ok(()),
        }
    }

    /// Subscribe to an engine event. `None` without an engine.
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> Option<Subscription>
    where
        F: FnMut(&SignatureEvent) + 'static,
    {
        self.canvas.as_mut().map(|canvas| canvas.on(kind, handler))
    }

    pub fn off(&mut self, subscription: Subscription) -> bool {
        self.canvas
            .as_mut()
            .is_some_and(|canvas| canvas.off(subscription))
    }

    /// Carry out a panel control. Returns the encoded document for export
    /// actions.
    pub fn dispatch(&mut self, panel: &PanelConfig, action: PanelAction) -> Option<ExportOutput> {
        match action {
            PanelAction::Clear => self.clear(),
            PanelAction::Undo => self.undo(),
            PanelAction::Export(format) => return self.export(&ExportOptions::new(format)),
            PanelAction::SelectColor(_) | PanelAction::SelectLineWidth(_) => {
                let patch = panel.patch_for(action)?;
                if let Err(e) = self.update_options(&patch) {
                    log::warn!("Option update rejected: {}", e);
                }
            }
        }
        None
    }

    /// Tear the engine down. Listeners are released; later calls are no-ops.
    pub fn destroy(&mut self) {
        if let Some(mut canvas) = self.canvas.take() {
            canvas.destroy();
        }
        self.is_drawing = false;
    }
}

impl SignaturePad<PixmapSurface> {
    /// Allocate a pixmap surface and bind it, using the panel's options.
    pub fn from_panel(panel: &PanelConfig) -> Self {
        let surface = PixmapSurface::new(panel.options.width, panel.options.height)
            .map_err(|e| log::error!("Failed to allocate signature surface: {}", e))
            .ok();
        Self::new(surface, panel.options.clone())
    }
}
