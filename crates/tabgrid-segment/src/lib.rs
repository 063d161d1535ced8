//! # Tabgrid Segment - Table Image Segmentation
//!
//! The algorithmic core of tabgrid-rs: given a rendered table image, recover
//! the grid of cell boundaries suitable for per-cell OCR.
//!
//! # Pipeline
//!
//! The four stages are pure, synchronous, in-memory transforms:
//!
//! 1. [`greyscale::intensity_matrix`] - RGB(A) image to single-channel
//!    intensity matrix (mean of color channels).
//! 2. [`transitions::detect_transitions`] - adjacent-pixel discontinuities
//!    along both axes, filtered by a noise threshold.
//! 3. [`grid::infer_grid`] - cluster transitions into row and column
//!    boundaries; a line-free image yields one whole-image cell.
//! 4. [`cells::extract_cells`] - crop one sub-image per cell, row-major.
//!
//! None of the stages mutates its input; each table's image, matrix and grid
//! are owned exclusively by the worker processing it, so tables can be
//! segmented in parallel without shared state.
//!
//! # Example
//!
//! ```no_run
//! use tabgrid_core::SegmentOptions;
//! use tabgrid_segment::{detect_transitions, extract_cells, infer_grid, intensity_matrix};
//!
//! # fn main() -> tabgrid_core::Result<()> {
//! let image = image::open("table.png").map_err(|e| {
//!     tabgrid_core::TabgridError::InvalidImage(e.to_string())
//! })?;
//! let options = SegmentOptions::default();
//!
//! let matrix = intensity_matrix(&image)?;
//! let transitions = detect_transitions(&matrix, options.noise_threshold);
//! let grid = infer_grid(&transitions, matrix.width(), matrix.height(), &options)?;
//! let cells = extract_cells(&image, &grid)?;
//! println!("{} cells", cells.len());
//! # Ok(())
//! # }
//! ```

pub mod cells;
pub mod greyscale;
pub mod grid;
pub mod transitions;

pub use cells::extract_cells;
pub use greyscale::intensity_matrix;
pub use grid::infer_grid;
pub use transitions::detect_transitions;
