//! SigPad Core Library
//!
//! Platform-agnostic capture, replay and export of handwritten signatures.

pub mod color;
pub mod document;
pub mod engine;
pub mod error;
pub mod events;
pub mod export;
pub mod input;
pub mod options;
pub mod recorder;
pub mod render;
pub mod stats;
pub mod stroke;
pub mod surface;
pub mod time;

pub use document::{DocumentStore, SignatureData};
pub use engine::SignatureCanvas;
pub use error::{SignatureError, SignatureResult};
pub use events::{EventBus, EventKind, SignatureEvent, Subscription};
pub use export::{ExportFormat, ExportOptions, ExportOutput, to_data_url};
pub use input::{PointerEvent, PointerSample, SurfaceLayout};
pub use options::{OptionsPatch, SignatureOptions};
pub use recorder::{RecorderOutcome, StrokeRecorder};
pub use render::RenderEngine;
pub use stats::{Bounds, SignatureStats, optimize, stats};
pub use stroke::{SignaturePoint, SignatureStroke};
pub use surface::{RecordingSurface, Surface};
