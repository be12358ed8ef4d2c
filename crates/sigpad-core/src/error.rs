//! Error types for the signature engine.

use thiserror::Error;

/// Engine and exporter errors.
#[derive(Debug, Error)]
pub enum SignatureError {
    /// The surface could not provide a paint context.
    #[error("Initialization failed: {0}")]
    InitFailed(String),
    /// Imported text is not well-formed JSON (or does not fit the document types).
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
    /// Well-formed JSON that fails the structural document check.
    #[error("Invalid signature document: {0}")]
    InvalidDocument(String),
    /// The drawing surface rejected an operation.
    #[error("Surface error: {0}")]
    Surface(String),
}

/// Result type for engine operations.
pub type SignatureResult<T> = Result<T, SignatureError>;
