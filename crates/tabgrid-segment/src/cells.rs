//! Cell extraction: cropping the original image along the inferred grid.

use image::DynamicImage;
use tabgrid_core::{Cell, CellBounds, GridLines, Result, TabgridError};

/// Crop one sub-image per grid cell, in row-major order (row 0 col 0,
/// row 0 col 1, ...).
///
/// Each cell covers the inclusive-exclusive rectangle between consecutive row
/// and column boundaries. The source image is left untouched; crops are
/// independent copies.
///
/// # Errors
///
/// Returns [`TabgridError::DegenerateCell`] if any cell would have zero width
/// or height. That indicates inconsistent grid inference upstream and must be
/// surfaced, not skipped.
pub fn extract_cells(image: &DynamicImage, grid: &GridLines) -> Result<Vec<Cell>> {
    let mut cells = Vec::with_capacity(grid.cell_count());

    for (row, ys) in grid.rows().windows(2).enumerate() {
        for (col, xs) in grid.cols().windows(2).enumerate() {
            let bounds = CellBounds {
                x: xs[0],
                y: ys[0],
                width: xs[1] - xs[0],
                height: ys[1] - ys[0],
            };
            if bounds.width == 0 || bounds.height == 0 {
                return Err(TabgridError::DegenerateCell(format!(
                    "cell ({row},{col}) is {}x{}",
                    bounds.width, bounds.height
                )));
            }
            cells.push(Cell {
                row,
                col,
                image: image.crop_imm(bounds.x, bounds.y, bounds.width, bounds.height),
                bounds,
            });
        }
    }

    Ok(cells)
}
