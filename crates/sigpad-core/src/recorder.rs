//! Stroke recording state machine.

use crate::input::{PointerEvent, PointerSample, SurfaceLayout, map_point, single_touch};
use crate::options::SignatureOptions;
use crate::stroke::{SignaturePoint, SignatureStroke};

/// State of the recorder.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RecorderState {
    /// Waiting for a pointer-down or single-touch start.
    #[default]
    Idle,
    /// A gesture is in progress.
    Recording {
        /// Points captured so far, in capture order.
        points: Vec<SignaturePoint>,
    },
}

/// What a single event did to the recorder.
#[derive(Debug, Clone, PartialEq)]
pub enum RecorderOutcome {
    /// The event caused no transition.
    Ignored,
    /// A gesture began at this point.
    Started(SignaturePoint),
    /// A point was appended to the gesture.
    Extended(SignaturePoint),
    /// The gesture ended with at least two points.
    Committed(SignatureStroke),
    /// The gesture ended too short to keep.
    Discarded { points: usize },
}

/// Accumulates sample points into an in-progress stroke.
#[derive(Debug, Clone, Default)]
pub struct StrokeRecorder {
    state: RecorderState,
}

impl StrokeRecorder {
    /// Create an idle recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current state.
    pub fn state(&self) -> &RecorderState {
        &self.state
    }

    /// Whether a gesture is in progress.
    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecorderState::Recording { .. })
    }

    /// Points of the in-progress stroke (empty when idle).
    pub fn points(&self) -> &[SignaturePoint] {
        match &self.state {
            RecorderState::Recording { points } => points,
            RecorderState::Idle => &[],
        }
    }

    /// Start a gesture. A gesture already in progress is replaced.
    pub fn begin(&mut self, point: SignaturePoint) -> RecorderOutcome {
        self.state = RecorderState::Recording {
            points: vec![point],
        };
        RecorderOutcome::Started(point)
    }

    /// Append a point to the gesture in progress.
    pub fn extend(&mut self, point: SignaturePoint) -> RecorderOutcome {
        match &mut self.state {
            RecorderState::Recording { points } => {
                points.push(point);
                RecorderOutcome::Extended(point)
            }
            RecorderState::Idle => RecorderOutcome::Ignored,
        }
    }

    /// End the gesture, committing it when it has at least two points.
    ///
    /// Color and width are the values current at the time of the call.
    pub fn finish(&mut self, color: &str, width: f64, timestamp: f64) -> RecorderOutcome {
        match std::mem::take(&mut self.state) {
            RecorderState::Idle => RecorderOutcome::Ignored,
            RecorderState::Recording { points } if points.len() >= 2 => {
                RecorderOutcome::Committed(SignatureStroke::new(points, color, width, timestamp))
            }
            RecorderState::Recording { points } => RecorderOutcome::Discarded {
                points: points.len(),
            },
        }
    }

    /// Drop any gesture in progress without committing it.
    pub fn reset(&mut self) {
        self.state = RecorderState::Idle;
    }

    /// Feed a raw event through the mapper and the state machine.
    pub fn process(
        &mut self,
        event: &PointerEvent,
        layout: &SurfaceLayout,
        options: &SignatureOptions,
        now: f64,
    ) -> RecorderOutcome {
        let map = |sample: &PointerSample| map_point(sample, layout, options.pressure, now);

        match event {
            PointerEvent::MouseDown(sample) => self.begin(map(sample)),
            PointerEvent::TouchStart(touches) => match single_touch(touches) {
                Some(touch) => self.begin(map(touch)),
                None => RecorderOutcome::Ignored,
            },
            PointerEvent::MouseMove(sample) if self.is_recording() => self.extend(map(sample)),
            PointerEvent::TouchMove(touches) if self.is_recording() => match single_touch(touches) {
                Some(touch) => self.extend(map(touch)),
                None => RecorderOutcome::Ignored,
            },
            PointerEvent::MouseMove(_) | PointerEvent::TouchMove(_) => RecorderOutcome::Ignored,
            PointerEvent::MouseUp | PointerEvent::MouseLeave | PointerEvent::TouchEnd => {
                self.finish(&options.color, options.line_width, now)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> SurfaceLayout {
        SurfaceLayout::identity(400, 200)
    }

    #[test]
    fn test_press_move_release_commits() {
        let mut recorder = StrokeRecorder::new();
        let options = SignatureOptions::default();

        let started = recorder.process(&PointerEvent::MouseDown(PointerSample::new(50.0, 50.0)), &layout(), &options, 1.0);
        assert!(matches!(started, RecorderOutcome::Started(_)));
        assert!(recorder.is_recording());

        let moved = recorder.process(&PointerEvent::MouseMove(PointerSample::new(100.0, 50.0)), &layout(), &options, 2.0);
        assert!(matches!(moved, RecorderOutcome::Extended(_)));
        assert_eq!(recorder.points().len(), 2);

        match recorder.process(&PointerEvent::MouseUp, &layout(), &options, 3.0) {
            RecorderOutcome::Committed(stroke) => {
                assert_eq!(stroke.len(), 2);
                assert_eq!(stroke.color, "#000000");
                assert!((stroke.width - 2.0).abs() < f64::EPSILON);
                assert!((stroke.timestamp - 3.0).abs() < f64::EPSILON);
            }
            other => panic!("expected commit, got {:?}", other),
        }
        assert!(!recorder.is_recording());
    }

    #[test]
    fn test_tap_is_discarded() {
        let mut recorder = StrokeRecorder::new();
        let options = SignatureOptions::default();

        recorder.process(&PointerEvent::MouseDown(PointerSample::new(5.0, 5.0)), &layout(), &options, 0.0);
        let outcome = recorder.process(&PointerEvent::MouseUp, &layout(), &options, 0.0);

        assert_eq!(outcome, RecorderOutcome::Discarded { points: 1 });
        assert!(recorder.points().is_empty());
    }

    #[test]
    fn test_leave_ends_stroke() {
        let mut recorder = StrokeRecorder::new();
        let options = SignatureOptions::default();

        recorder.process(&PointerEvent::MouseDown(PointerSample::new(0.0, 0.0)), &layout(), &options, 0.0);
        recorder.process(&PointerEvent::MouseMove(PointerSample::new(10.0, 0.0)), &layout(), &options, 0.0);
        let outcome = recorder.process(&PointerEvent::MouseLeave, &layout(), &options, 0.0);

        assert!(matches!(outcome, RecorderOutcome::Committed(_)));
    }

    #[test]
    fn test_multi_touch_start_ignored() {
        let mut recorder = StrokeRecorder::new();
        let options = SignatureOptions::default();
        let touches = vec![PointerSample::new(1.0, 1.0), PointerSample::new(2.0, 2.0)];

        let outcome = recorder.process(&PointerEvent::TouchStart(touches), &layout(), &options, 0.0);
        assert_eq!(outcome, RecorderOutcome::Ignored);
        assert!(!recorder.is_recording());
    }

    #[test]
    fn test_multi_touch_move_ignored_while_recording() {
        let mut recorder = StrokeRecorder::new();
        let options = SignatureOptions::default();

        recorder.process(&PointerEvent::TouchStart(vec![PointerSample::new(1.0, 1.0)]), &layout(), &options, 0.0);
        let touches = vec![PointerSample::new(5.0, 5.0), PointerSample::new(9.0, 9.0)];
        let outcome = recorder.process(&PointerEvent::TouchMove(touches), &layout(), &options, 0.0);

        assert_eq!(outcome, RecorderOutcome::Ignored);
        assert_eq!(recorder.points().len(), 1);
    }

    #[test]
    fn test_events_while_idle_ignored() {
        let mut recorder = StrokeRecorder::new();
        let options = SignatureOptions::default();

        let moved = recorder.process(&PointerEvent::MouseMove(PointerSample::new(1.0, 1.0)), &layout(), &options, 0.0);
        let ended = recorder.process(&PointerEvent::TouchEnd, &layout(), &options, 0.0);

        assert_eq!(moved, RecorderOutcome::Ignored);
        assert_eq!(ended, RecorderOutcome::Ignored);
    }

    #[test]
    fn test_commit_captures_options_at_release() {
        let mut recorder = StrokeRecorder::new();
        let mut options = SignatureOptions::default();

        recorder.process(&PointerEvent::MouseDown(PointerSample::new(0.0, 0.0)), &layout(), &options, 0.0);
        recorder.process(&PointerEvent::MouseMove(PointerSample::new(5.0, 5.0)), &layout(), &options, 0.0);
        options.color = "#ff0000".to_string();
        options.line_width = 6.0;

        match recorder.process(&PointerEvent::MouseUp, &layout(), &options, 0.0) {
            RecorderOutcome::Committed(stroke) => {
                assert_eq!(stroke.color, "#ff0000");
                assert!((stroke.width - 6.0).abs() < f64::EPSILON);
            }
            other => panic!("expected commit, got {:?}", other),
        }
    }
}
