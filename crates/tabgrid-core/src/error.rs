//! Error types for table reconstruction operations.
//!
//! This module defines the error taxonomy shared by every tabgrid crate and
//! the [`Result`] alias used throughout the workspace.

use thiserror::Error;

/// Error types that can occur while recovering tables from rendered images.
///
/// Structural errors (`InvalidImage`, `NoGridDetected`, `DegenerateCell`)
/// abort the table currently being segmented and are caught at the
/// reconstruction boundary. `Ocr` failures are cell-local and never abort a
/// table. `Fetch` and `Render` failures abort only the affected document or
/// table fragment. None of these should ever terminate a batch run.
///
/// # Examples
///
/// ```rust,ignore
/// use tabgrid_core::{Result, TabgridError};
///
/// fn handle(result: Result<()>) {
///     match result {
///         Ok(()) => {}
///         Err(TabgridError::NoGridDetected(msg)) => eprintln!("no grid: {msg}"),
///         Err(TabgridError::Fetch { url, message, .. }) => eprintln!("{url}: {message}"),
///         Err(e) => eprintln!("error: {e}"),
///     }
/// }
/// ```
#[derive(Error, Debug)]
pub enum TabgridError {
    /// The input raster image cannot be segmented (zero width or height,
    /// or pixel data inconsistent with the declared dimensions).
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// Grid inference finished with fewer than two boundaries on an axis.
    ///
    /// Boundary synthesis guarantees the outer bounds are always present, so
    /// this indicates a malformed `GridLines` constructed by a caller rather
    /// than a normal detection outcome. A line-free image is NOT an error: it
    /// yields a single cell covering the whole image.
    #[error("No grid detected: {0}")]
    NoGridDetected(String),

    /// A cell produced by grid extraction has zero width or height.
    ///
    /// Surfaced rather than skipped: a degenerate cell means the inferred
    /// boundaries are inconsistent and the whole table must be rejected.
    #[error("Degenerate cell: {0}")]
    DegenerateCell(String),

    /// Document acquisition failed (HTTP error, disallowed content type, or
    /// transport failure).
    #[error("Fetch failed for {url}: {message}")]
    Fetch {
        /// The URL that was requested.
        url: String,
        /// HTTP status code, when a response was received.
        status: Option<u16>,
        /// Declared `Content-Type` header, when present.
        content_type: Option<String>,
        /// Human-readable failure description.
        message: String,
    },

    /// Rendering a markup fragment to a raster image failed.
    #[error("Render error: {0}")]
    Render(String),

    /// Optical character recognition of a single cell failed.
    #[error("OCR error: {0}")]
    Ocr(String),

    /// Markup parsing or table-fragment extraction failed.
    #[error("Markup error: {0}")]
    Markup(String),

    /// File I/O error while reading inputs or persisting artifacts.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error while writing structured results.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Type alias for [`Result<T, TabgridError>`].
pub type Result<T> = std::result::Result<T, TabgridError>;
