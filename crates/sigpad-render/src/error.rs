//! Render and encode errors.

use sigpad_core::SignatureError;
use thiserror::Error;

/// Raster export errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Pixmap error: {0}")]
    Pixmap(String),
    #[error("Encode failed: {0}")]
    Encode(String),
    #[error(transparent)]
    Core(#[from] SignatureError),
}

/// Result type for render operations.
pub type RenderResult<T> = Result<T, RenderError>;
