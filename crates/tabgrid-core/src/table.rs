//! Structured table output types.
//!
//! A [`RecognizedTable`] is the row-major text grid recovered from one
//! rendered table image; a [`DocumentResult`] collects every table recovered
//! from one source document together with the errors that aborted individual
//! tables. These are the serialization boundary of the pipeline: both types
//! serialize to JSON via serde.

use crate::error::Result;
use serde::{Deserialize, Serialize};

/// A cell whose OCR call failed.
///
/// The cell's text slot in the table is left empty; the failure is recorded
/// here so callers can distinguish "empty cell" from "unreadable cell".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellFailure {
    /// Zero-based row index of the failed cell.
    pub row: usize,
    /// Zero-based column index of the failed cell.
    pub col: usize,
    /// Failure description from the OCR collaborator.
    pub message: String,
}

/// One reconstructed table: recognized text in row-major order plus the
/// per-cell failures collected while recognizing it.
///
/// Partial-failure semantics: a failed cell yields empty text and an entry in
/// `failures`; it never discards the rest of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecognizedTable {
    /// `rows[r][c]` is the recognized text of the cell at row `r`, column `c`.
    pub rows: Vec<Vec<String>>,
    /// Cells whose OCR call failed, in row-major order.
    pub failures: Vec<CellFailure>,
}

impl RecognizedTable {
    /// Number of rows in the table.
    #[inline]
    #[must_use = "row count is returned but not used"]
    pub fn num_rows(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns in the table (0 for an empty table).
    #[inline]
    #[must_use = "column count is returned but not used"]
    pub fn num_cols(&self) -> usize {
        self.rows.first().map_or(0, Vec::len)
    }

    /// Recognized text at `(row, col)`, if in bounds.
    #[inline]
    #[must_use = "cell text is returned but not used"]
    pub fn text(&self, row: usize, col: usize) -> Option<&str> {
        self.rows.get(row)?.get(col).map(String::as_str)
    }

    /// True when the table has no cells.
    #[inline]
    #[must_use = "emptiness check result is returned but not used"]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Final output unit for one source document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentResult {
    /// Identifier of the source document (its file name).
    pub source: String,
    /// Every table successfully reconstructed from the document, in document
    /// order.
    pub tables: Vec<RecognizedTable>,
    /// Errors that aborted individual tables or the whole document. A
    /// document-level failure leaves `tables` empty and records the reason
    /// here; sibling documents in a batch are unaffected.
    pub errors: Vec<String>,
}

impl DocumentResult {
    /// Result for a document that failed before any table was reconstructed.
    #[must_use = "document result is created but not used"]
    pub fn failed(source: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            tables: Vec::new(),
            errors: vec![message.into()],
        }
    }

    /// Serialize this result to pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`crate::TabgridError::Json`] if serialization fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
