//! Signature document and the stroke store.

use crate::error::SignatureResult;
use crate::export::json;
use crate::stroke::SignatureStroke;
use serde::{Deserialize, Serialize};

/// Maximum number of undone strokes kept for [`DocumentStore::redo_last`].
const MAX_REDO_HISTORY: usize = 50;

/// The full persisted state of a signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureData {
    /// Strokes, oldest first.
    pub strokes: Vec<SignatureStroke>,
    /// Surface pixel width at capture time.
    pub width: u32,
    /// Surface pixel height at capture time.
    pub height: u32,
    /// Background color (CSS text).
    pub background_color: String,
    /// Snapshot time in milliseconds since the Unix epoch.
    pub timestamp: f64,
}

impl SignatureData {
    /// Create an empty document.
    pub fn new(width: u32, height: u32, background_color: impl Into<String>) -> Self {
        Self {
            strokes: Vec::new(),
            width,
            height,
            background_color: background_color.into(),
            timestamp: 0.0,
        }
    }

    /// Builder-style stroke append.
    pub fn with_stroke(mut self, stroke: SignatureStroke) -> Self {
        self.strokes.push(stroke);
        self
    }

    /// Check if the document has no strokes.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Number of points across all strokes.
    pub fn total_points(&self) -> usize {
        self.strokes.iter().map(SignatureStroke::len).sum()
    }

    /// Serialize the document to pretty JSON.
    pub fn to_json(&self) -> SignatureResult<String> {
        json::to_json(self)
    }

    /// Deserialize a document from JSON.
    pub fn from_json(text: &str) -> SignatureResult<Self> {
        json::from_json(text)
    }
}

/// Ordered list of committed strokes with top-of-stack undo.
///
/// `redo` appends whatever stroke the caller supplies; it is not checked
/// against the stroke that was undone. `redo_last` is the strict variant and
/// only re-applies strokes this store removed itself. A loose redo of anything
/// but the most recently undone stroke counts as a new change and drops the
/// strict history.
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    strokes: Vec<SignatureStroke>,
    redo_stack: Vec<SignatureStroke>,
}

impl DocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Committed strokes, oldest first.
    pub fn strokes(&self) -> &[SignatureStroke] {
        &self.strokes
    }

    /// Check if no stroke is committed.
    pub fn is_empty(&self) -> bool {
        self.strokes.is_empty()
    }

    /// Get the number of strokes.
    pub fn len(&self) -> usize {
        self.strokes.len()
    }

    /// Append a finished stroke. Clears the redo history.
    pub fn commit(&mut self, stroke: SignatureStroke) {
        self.strokes.push(stroke);
        self.redo_stack.clear();
    }

    /// Remove and return the newest stroke; `None` when empty.
    pub fn undo(&mut self) -> Option<SignatureStroke> {
        let stroke = self.strokes.pop()?;

        self.redo_stack.push(stroke.clone());
        if self.redo_stack.len() > MAX_REDO_HISTORY {
            self.redo_stack.remove(0);
        }

        Some(stroke)
    }

    /// Append a caller-supplied stroke.
    pub fn redo(&mut self, stroke: SignatureStroke) {
        if self.redo_stack.last() == Some(&stroke) {
            self.redo_stack.pop();
        } else {
            self.redo_stack.clear();
        }
        self.strokes.push(stroke);
    }

    /// Re-apply the most recently undone stroke.
    /// Returns true if a stroke was restored.
    pub fn redo_last(&mut self) -> bool {
        match self.redo_stack.pop() {
            Some(stroke) => {
                self.strokes.push(stroke);
                true
            }
            None => false,
        }
    }

    /// Check if undo is available.
    pub fn can_undo(&self) -> bool {
        !self.strokes.is_empty()
    }

    /// Check if a strict redo is available.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Remove every stroke and the redo history.
    pub fn clear(&mut self) {
        self.strokes.clear();
        self.redo_stack.clear();
    }

    /// Substitute the whole stroke list. No validation is performed.
    pub fn replace(&mut self, strokes: Vec<SignatureStroke>) {
        self.strokes = strokes;
        self.redo_stack.clear();
    }

    /// Copy the current state into a document.
    pub fn snapshot(&self, width: u32, height: u32, background_color: &str, timestamp: f64) -> SignatureData {
        SignatureData {
            strokes: self.strokes.clone(),
            width,
            height,
            background_color: background_color.to_string(),
            timestamp,
        }
    }
}
