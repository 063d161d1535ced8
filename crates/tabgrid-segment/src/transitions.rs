//! Pixel-intensity transition detection.
//!
//! One pass per axis over the intensity matrix, recording every place two
//! adjacent pixels differ by more than the configured noise threshold. The
//! resulting [`Transitions`] are the raw evidence grid inference works from.

use tabgrid_core::{Axis, IntensityMatrix, Transition, Transitions};

/// Detect intensity discontinuities along both axes of a matrix.
///
/// Vertical transitions are adjacent-column changes found scanning each row
/// left to right; horizontal transitions are adjacent-row changes found
/// scanning each column top to bottom. A transition is recorded where the
/// absolute intensity difference exceeds `noise_threshold` (0 records any
/// difference).
///
/// Deterministic, O(width x height) per axis, never fails for a valid matrix.
#[must_use = "detected transitions are returned but not used"]
pub fn detect_transitions(matrix: &IntensityMatrix, noise_threshold: u8) -> Transitions {
    let (width, height) = (matrix.width(), matrix.height());

    let mut vertical = Vec::new();
    for y in 0..height {
        for x in 0..width.saturating_sub(1) {
            let before = matrix.get(x, y);
            let after = matrix.get(x + 1, y);
            if before.abs_diff(after) > noise_threshold {
                vertical.push(Transition {
                    axis: Axis::Vertical,
                    line: y,
                    position: x,
                    before,
                    after,
                });
            }
        }
    }

    let mut horizontal = Vec::new();
    for x in 0..width {
        for y in 0..height.saturating_sub(1) {
            let before = matrix.get(x, y);
            let after = matrix.get(x, y + 1);
            if before.abs_diff(after) > noise_threshold {
                horizontal.push(Transition {
                    axis: Axis::Horizontal,
                    line: x,
                    position: y,
                    before,
                    after,
                });
            }
        }
    }

    log::debug!(
        "detected {} vertical and {} horizontal transitions in {width}x{height} matrix",
        vertical.len(),
        horizontal.len()
    );

    Transitions {
        vertical,
        horizontal,
    }
}
