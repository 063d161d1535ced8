//! Table reconstruction: segmentation plus per-cell recognition.

use image::DynamicImage;
use rayon::prelude::*;
use tabgrid_core::{CellFailure, RecognizedTable, Result, SegmentOptions};
use tabgrid_ocr::TextRecognizer;
use tabgrid_segment::{detect_transitions, extract_cells, infer_grid, intensity_matrix};

/// Drives one rendered table image through segmentation and OCR.
///
/// Segmentation failures (invalid image, degenerate cells) abort the table
/// and propagate to the caller. OCR failures do not: a failed cell is
/// recorded with empty text and an entry in the table's failure list, so one
/// unreadable cell never discards an otherwise good table.
#[derive(Debug, Clone, Copy)]
pub struct TableReconstructor {
    options: SegmentOptions,
}

impl TableReconstructor {
    /// Build a reconstructor with the given segmentation options.
    #[must_use = "reconstructor is created but not used"]
    pub const fn new(options: SegmentOptions) -> Self {
        Self { options }
    }

    /// Reconstruct the table in `image`, recognizing each cell with
    /// `recognizer`.
    ///
    /// Cells are recognized in parallel; OCR has no cross-cell state, and
    /// each cell image is owned by exactly one worker.
    ///
    /// # Errors
    ///
    /// Returns a structural error ([`tabgrid_core::TabgridError::InvalidImage`],
    /// [`tabgrid_core::TabgridError::NoGridDetected`] or
    /// [`tabgrid_core::TabgridError::DegenerateCell`]) when the grid cannot
    /// be recovered from this image.
    pub fn reconstruct(
        &self,
        image: &DynamicImage,
        recognizer: &dyn TextRecognizer,
    ) -> Result<RecognizedTable> {
        let matrix = intensity_matrix(image)?;
        let transitions = detect_transitions(&matrix, self.options.noise_threshold);
        let grid = infer_grid(&transitions, matrix.width(), matrix.height(), &self.options)?;
        let cells = extract_cells(image, &grid)?;

        let num_rows = grid.row_cells();
        let num_cols = grid.col_cells();
        log::debug!("reconstructing {num_rows}x{num_cols} table ({} cells)", cells.len());

        // One recognize call per cell; collect preserves the row-major cell
        // order, so recorded failures stay row-major too.
        let outcomes: Vec<(usize, usize, Result<String>)> = cells
            .par_iter()
            .map(|cell| (cell.row, cell.col, recognizer.recognize(&cell.image)))
            .collect();

        let mut rows = vec![vec![String::new(); num_cols]; num_rows];
        let mut failures = Vec::new();
        for (row, col, outcome) in outcomes {
            match outcome {
                Ok(text) => rows[row][col] = text,
                Err(e) => {
                    log::warn!("OCR failed for cell ({row},{col}): {e}");
                    failures.push(CellFailure {
                        row,
                        col,
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(RecognizedTable { rows, failures })
    }
}
