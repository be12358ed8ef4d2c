//! The signature engine: recorder, store and renderer bound to one surface.

use crate::document::{DocumentStore, SignatureData};
use crate::error::{SignatureError, SignatureResult};
use crate::events::{EventBus, EventKind, SignatureEvent, Subscription};
use crate::input::{PointerEvent, PointerSample, SurfaceLayout, map_point};
use crate::options::{OptionsPatch, SignatureOptions};
use crate::recorder::{RecorderOutcome, StrokeRecorder};
use crate::render::RenderEngine;
use crate::stroke::{SignaturePoint, SignatureStroke};
use crate::surface::Surface;
use crate::time::now_millis;

/// A signature surface together with its captured strokes.
///
/// The canvas owns `surface` exclusively. Pointer input arrives through
/// [`handle_event`](Self::handle_event); lifecycle events go out through the
/// subscriber lists registered with [`on`](Self::on).
#[derive(Debug)]
pub struct SignatureCanvas<S: Surface> {
    surface: S,
    options: SignatureOptions,
    recorder: StrokeRecorder,
    store: DocumentStore,
    renderer: RenderEngine,
    events: EventBus,
    detached: bool,
}

impl<S: Surface> SignatureCanvas<S> {
    /// Bind a surface, size it from `options` and clear it to the background.
    pub fn new(mut surface: S, options: SignatureOptions) -> SignatureResult<Self> {
        surface
            .resize(options.width, options.height)
            .map_err(|e| SignatureError::InitFailed(e.to_string()))?;

        let (width, height) = surface.size();
        if width == 0 || height == 0 {
            return Err(SignatureError::InitFailed(format!(
                "surface has no paint area ({}x{})",
                width, height
            )));
        }

        let mut canvas = Self {
            surface,
            options,
            recorder: StrokeRecorder::new(),
            store: DocumentStore::new(),
            renderer: RenderEngine::new(),
            events: EventBus::new(),
            detached: false,
        };
        canvas.redraw();

        log::debug!("Signature canvas ready at {}x{}", width, height);
        Ok(canvas)
    }

    /// Feed one pointer or touch event.
    ///
    /// Returns what the event did to the stroke in progress. After
    /// [`destroy`](Self::destroy) every event is ignored.
    pub fn handle_event(&mut self, event: &PointerEvent, layout: &SurfaceLayout) -> RecorderOutcome {
        if self.detached {
            return RecorderOutcome::Ignored;
        }

        let outcome = self.recorder.process(event, layout, &self.options, now_millis());

        match &outcome {
            RecorderOutcome::Started(point) => {
                self.renderer.begin_stroke(point);
                log::debug!("Stroke started at ({:.1}, {:.1})", point.x, point.y);
                self.events.emit(&SignatureEvent::Start(*point));
            }
            RecorderOutcome::Extended(point) => {
                self.renderer
                    .draw_incremental(&mut self.surface, self.recorder.points(), &self.options);
                self.events.emit(&SignatureEvent::Draw(*point));
            }
            RecorderOutcome::Committed(stroke) => {
                self.renderer.end_stroke();
                log::debug!("Stroke committed with {} points", stroke.len());
                self.store.commit(stroke.clone());
                if self.events.has_subscribers(EventKind::End) {
                    let data = self.get_data();
                    self.events.emit(&SignatureEvent::End(data));
                }
            }
            RecorderOutcome::Discarded { points } => {
                self.renderer.end_stroke();
                log::debug!("Discarded stroke with {} point(s)", points);
            }
            RecorderOutcome::Ignored => {}
        }

        outcome
    }

    /// Remove every stroke and repaint the background.
    pub fn clear(&mut self) {
        self.recorder.reset();
        self.store.clear();
        self.redraw();
        if !self.detached {
            self.events.emit(&SignatureEvent::Clear);
        }
    }

    /// Remove the newest stroke and repaint. No-op on an empty document.
    pub fn undo(&mut self) -> Option<SignatureStroke> {
        let removed = self.store.undo()?;
        self.redraw();
        Some(removed)
    }

    /// Append a caller-supplied stroke and repaint.
    ///
    /// The stroke is not checked against what [`undo`](Self::undo) removed;
    /// use [`redo_last`](Self::redo_last) to restore exactly that stroke.
    pub fn redo(&mut self, stroke: SignatureStroke) {
        self.store.redo(stroke);
        self.redraw();
    }

    /// Restore the most recently undone stroke. Returns false if none.
    pub fn redo_last(&mut self) -> bool {
        let restored = self.store.redo_last();
        if restored {
            self.redraw();
        }
        restored
    }

    pub fn can_undo(&self) -> bool {
        self.store.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.store.can_redo()
    }

    /// Whether no stroke is committed.
    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Whether a gesture is in progress.
    pub fn is_drawing(&self) -> bool {
        self.recorder.is_recording()
    }

    /// Committed strokes, oldest first.
    pub fn strokes(&self) -> &[SignatureStroke] {
        self.store.strokes()
    }

    /// Snapshot of the document at the current surface size.
    pub fn get_data(&self) -> SignatureData {
        let (width, height) = self.surface.size();
        self.store
            .snapshot(width, height, &self.options.background_color, now_millis())
    }

    /// Replace the strokes with those of `data` and repaint.
    ///
    /// Surface size and background keep their current values. Untrusted
    /// input should pass [`validate`](crate::export::validate) first.
    pub fn set_data(&mut self, data: &SignatureData) {
        self.recorder.reset();
        self.store.replace(data.strokes.clone());
        self.redraw();
    }

    /// Merge an options update and repaint, resizing the surface if its
    /// size changed.
    pub fn update_options(&mut self, patch: &OptionsPatch) -> SignatureResult<()> {
        let previous = self.options.clone();
        if self.options.apply(patch) {
            if let Err(e) = self.surface.resize(self.options.width, self.options.height) {
                self.options = previous;
                return Err(e);
            }
            log::debug!("Surface resized to {}x{}", self.options.width, self.options.height);
        }
        self.redraw();
        Ok(())
    }

    /// Map a raw sample as the engine would, without recording it.
    pub fn point_from_event(&self, sample: &PointerSample, layout: &SurfaceLayout) -> SignaturePoint {
        map_point(sample, layout, self.options.pressure, now_millis())
    }

    /// Layout of the surface when displayed at its pixel size at the origin.
    pub fn layout(&self) -> SurfaceLayout {
        let (width, height) = self.surface.size();
        SurfaceLayout::identity(width, height)
    }

    /// Subscribe to a lifecycle event.
    pub fn on<F>(&mut self, kind: EventKind, handler: F) -> Subscription
    where
        F: FnMut(&SignatureEvent) + 'static,
    {
        self.events.subscribe(kind, handler)
    }

    /// Unsubscribe. Returns false if the handler was already removed.
    pub fn off(&mut self, subscription: Subscription) -> bool {
        self.events.unsubscribe(subscription)
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn options(&self) -> &SignatureOptions {
        &self.options
    }

    /// Whether [`destroy`](Self::destroy) has run.
    pub fn is_detached(&self) -> bool {
        self.detached
    }

    /// Release every listener and drop the gesture in progress.
    ///
    /// Idempotent; also run on drop.
    pub fn destroy(&mut self) {
        if self.detached {
            return;
        }
        self.events.clear();
        self.recorder.reset();
        self.renderer.end_stroke();
        self.detached = true;
        log::debug!("Signature canvas detached");
    }

    fn redraw(&mut self) {
        self.renderer.redraw(
            &mut self.surface,
            self.store.strokes(),
            &self.options.background_color,
        );
    }
}

impl<S: Surface> Drop for SignatureCanvas<S> {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Rgba;
    use crate::surface::{DrawCommand, RecordingSurface};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn canvas() -> SignatureCanvas<RecordingSurface> {
        SignatureCanvas::new(RecordingSurface::new(1, 1), SignatureOptions::default()).unwrap()
    }

    fn down(x: f64, y: f64) -> PointerEvent {
        PointerEvent::MouseDown(PointerSample::new(x, y))
    }

    fn move_to(x: f64, y: f64) -> PointerEvent {
        PointerEvent::MouseMove(PointerSample::new(x, y))
    }

    fn draw_line(canvas: &mut SignatureCanvas<RecordingSurface>, from: (f64, f64), to: (f64, f64)) {
        let layout = canvas.layout();
        canvas.handle_event(&down(from.0, from.1), &layout);
        canvas.handle_event(&move_to(to.0, to.1), &layout);
        canvas.handle_event(&PointerEvent::MouseUp, &layout);
    }

    #[test]
    fn test_new_sizes_and_clears_surface() {
        let canvas = canvas();
        assert_eq!(canvas.surface().size(), (400, 200));
        assert_eq!(canvas.surface().commands(), &[DrawCommand::Fill(Rgba::white())]);
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_zero_size_fails_init() {
        let options = SignatureOptions {
            width: 0,
            ..Default::default()
        };
        let result = SignatureCanvas::new(RecordingSurface::new(10, 10), options);
        assert!(matches!(result, Err(SignatureError::InitFailed(_))));
    }

    #[test]
    fn test_press_move_release_scenario() {
        let mut canvas = canvas();
        draw_line(&mut canvas, (50.0, 50.0), (100.0, 50.0));

        assert!(!canvas.is_empty());
        assert!(!canvas.is_drawing());
        let data = canvas.get_data();
        assert_eq!(data.strokes.len(), 1);
        assert_eq!(data.strokes[0].len(), 2);
        assert_eq!(data.width, 400);
        assert_eq!(data.height, 200);
        assert_eq!(data.background_color, "#ffffff");
    }

    #[test]
    fn test_single_tap_not_committed() {
        let mut canvas = canvas();
        let layout = canvas.layout();

        canvas.handle_event(&down(10.0, 10.0), &layout);
        assert!(canvas.is_drawing());
        let outcome = canvas.handle_event(&PointerEvent::MouseUp, &layout);

        assert_eq!(outcome, RecorderOutcome::Discarded { points: 1 });
        assert!(canvas.is_empty());
    }

    #[test]
    fn test_incremental_draw_on_move() {
        let mut canvas = canvas();
        let layout = canvas.layout();

        canvas.handle_event(&down(0.0, 0.0), &layout);
        canvas.handle_event(&move_to(10.0, 0.0), &layout);
        canvas.handle_event(&move_to(20.0, 10.0), &layout);

        assert_eq!(canvas.surface().strokes().count(), 2);
    }

    #[test]
    fn test_undo_redraws_remaining_strokes() {
        let mut canvas = canvas();
        draw_line(&mut canvas, (0.0, 0.0), (10.0, 10.0));
        draw_line(&mut canvas, (20.0, 20.0), (30.0, 30.0));

        let removed = canvas.undo().unwrap();
        assert_eq!(canvas.strokes().len(), 1);

        let commands = canvas.surface().commands();
        let tail = &commands[commands.len() - 2..];
        assert_eq!(tail[0], DrawCommand::Fill(Rgba::white()));
        assert!(matches!(tail[1], DrawCommand::Stroke { .. }));

        canvas.redo(removed.clone());
        assert_eq!(canvas.strokes().last(), Some(&removed));
    }

    #[test]
    fn test_undo_on_empty_is_noop() {
        let mut canvas = canvas();
        let before = canvas.surface().commands().len();
        assert!(canvas.undo().is_none());
        assert_eq!(canvas.surface().commands().len(), before);
    }

    #[test]
    fn test_redo_last() {
        let mut canvas = canvas();
        draw_line(&mut canvas, (0.0, 0.0), (10.0, 10.0));
        let original = canvas.strokes().to_vec();

        canvas.undo();
        assert!(canvas.can_redo());
        assert!(canvas.redo_last());
        assert_eq!(canvas.strokes(), original.as_slice());
        assert!(!canvas.redo_last());
    }

    #[test]
    fn test_events_fire() {
        let mut canvas = canvas();
        let seen = Rc::new(RefCell::new(Vec::new()));

        for kind in [EventKind::Start, EventKind::Draw, EventKind::End, EventKind::Clear] {
            let log = seen.clone();
            canvas.on(kind, move |event| log.borrow_mut().push(event.kind()));
        }

        draw_line(&mut canvas, (0.0, 0.0), (10.0, 10.0));
        canvas.clear();

        assert_eq!(
            *seen.borrow(),
            vec![EventKind::Start, EventKind::Draw, EventKind::End, EventKind::Clear]
        );
    }

    #[test]
    fn test_end_event_carries_document() {
        let mut canvas = canvas();
        let strokes = Rc::new(RefCell::new(0));

        let count = strokes.clone();
        canvas.on(EventKind::End, move |event| {
            if let SignatureEvent::End(data) = event {
                *count.borrow_mut() = data.strokes.len();
            }
        });

        draw_line(&mut canvas, (0.0, 0.0), (10.0, 10.0));
        draw_line(&mut canvas, (5.0, 5.0), (15.0, 15.0));
        assert_eq!(*strokes.borrow(), 2);
    }

    #[test]
    fn test_off_stops_delivery() {
        let mut canvas = canvas();
        let count = Rc::new(RefCell::new(0));

        let counter = count.clone();
        let sub = canvas.on(EventKind::Clear, move |_| *counter.borrow_mut() += 1);
        canvas.clear();
        assert!(canvas.off(sub));
        canvas.clear();

        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_set_data_replaces_strokes() {
        let mut source = canvas();
        draw_line(&mut source, (0.0, 0.0), (10.0, 10.0));
        let data = source.get_data();

        let mut other = canvas();
        other.set_data(&data);

        assert_eq!(other.strokes(), data.strokes.as_slice());
        assert_eq!(other.surface().strokes().count(), 1);
    }

    #[test]
    fn test_update_options_resizes() {
        let mut canvas = canvas();
        canvas
            .update_options(&OptionsPatch::default().size(600, 300).background_color("#000000"))
            .unwrap();

        assert_eq!(canvas.surface().size(), (600, 300));
        assert_eq!(canvas.surface().commands().last(), Some(&DrawCommand::Fill(Rgba::black())));
        assert_eq!(canvas.get_data().width, 600);
    }

    #[test]
    fn test_update_options_rejected_resize_keeps_options() {
        let mut canvas = canvas();
        let result = canvas.update_options(&OptionsPatch::default().size(0, 0));

        assert!(result.is_err());
        assert_eq!(canvas.options().width, 400);
    }

    #[test]
    fn test_new_color_applies_to_next_stroke() {
        let mut canvas = canvas();
        draw_line(&mut canvas, (0.0, 0.0), (10.0, 10.0));
        canvas.update_options(&OptionsPatch::default().color("#ff0000")).unwrap();
        draw_line(&mut canvas, (0.0, 0.0), (10.0, 10.0));

        assert_eq!(canvas.strokes()[0].color, "#000000");
        assert_eq!(canvas.strokes()[1].color, "#ff0000");
    }

    #[test]
    fn test_destroy_detaches() {
        let mut canvas = canvas();
        let count = Rc::new(RefCell::new(0));

        let counter = count.clone();
        canvas.on(EventKind::Start, move |_| *counter.borrow_mut() += 1);
        let layout = canvas.layout();
        canvas.handle_event(&down(1.0, 1.0), &layout);

        canvas.destroy();
        canvas.destroy();

        assert!(canvas.is_detached());
        assert!(!canvas.is_drawing());
        let outcome = canvas.handle_event(&down(2.0, 2.0), &layout);
        assert_eq!(outcome, RecorderOutcome::Ignored);
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn test_point_from_event_scales() {
        let canvas = canvas();
        let layout = SurfaceLayout::identity(400, 200).at(10.0, 20.0).displayed(200.0, 100.0);
        let point = canvas.point_from_event(&PointerSample::new(60.0, 70.0), &layout);

        assert!((point.x - 100.0).abs() < f64::EPSILON);
        assert!((point.y - 100.0).abs() < f64::EPSILON);
        assert!(point.pressure.is_none());
    }
}
