//! SigPad Application
//!
//! The reactive wrapper a UI binds to, the configuration of the panel around
//! it, and the `sigpad` command line tool.

pub mod cli;
mod error;
mod pad;
pub mod panel;

pub use error::{AppError, AppResult};
pub use pad::SignaturePad;
pub use panel::{PanelAction, PanelConfig, PanelTexts};
