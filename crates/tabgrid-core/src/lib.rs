//! # Tabgrid Core - Shared Table Reconstruction Types
//!
//! Tabgrid recovers tabular data from HTML documents by rendering each
//! `<table>` fragment to a raster image, segmenting the image into a grid of
//! cells, and recognizing each cell's text. This crate holds the types shared
//! by every stage of that pipeline:
//!
//! - [`grid`] - intensity matrices, transitions, grid lines and cells
//! - [`table`] - recognized tables and per-document results
//! - [`config`] - explicit configuration for every tunable
//! - [`error`] - the workspace error taxonomy and `Result` alias
//!
//! ## Error Handling
//!
//! All fallible operations across the workspace return
//! [`Result<T, TabgridError>`](error::TabgridError). Structural segmentation
//! failures abort a single table, OCR failures a single cell, and fetch or
//! render failures a single document; batch processing never aborts as a
//! whole.

pub mod config;
pub mod error;
pub mod grid;
pub mod table;

// Re-exports for convenience
pub use config::*;
pub use error::*;
pub use grid::*;
pub use table::*;
