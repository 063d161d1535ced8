//! Grid inference: turning a noisy cloud of transitions into clean grid
//! lines.
//!
//! Rule lines in a rendered table produce long runs of transitions stacked on
//! the same column (or row) index; text edges and noise do not. The inference
//! works in four steps per axis:
//!
//! 1. Project transitions onto the axis (a histogram of transition counts per
//!    coordinate).
//! 2. Keep coordinates whose count exceeds `boundary_fraction` of the
//!    opposite-axis dimension as candidate boundaries.
//! 3. Cluster candidates within `merge_distance` of each other into one
//!    boundary at their midpoint, collapsing multi-pixel anti-aliased lines.
//! 4. Add the outer bounds (0 and the image dimension) when missing, so a
//!    line-free image yields a single cell covering its own bounding box.

use tabgrid_core::{GridLines, Result, SegmentOptions, Transitions};

/// Infer the logical grid of a `width x height` table image from its detected
/// transitions.
///
/// # Errors
///
/// Returns [`tabgrid_core::TabgridError::NoGridDetected`] if fewer than two
/// boundaries remain on either axis. Outer-bound synthesis (step 4) makes
/// this unreachable in practice; the variant exists so callers can
/// distinguish a malformed grid from the legitimate "one giant cell" outcome.
pub fn infer_grid(
    transitions: &Transitions,
    width: u32,
    height: u32,
    options: &SegmentOptions,
) -> Result<GridLines> {
    let cols = infer_axis_boundaries(
        transitions.vertical.iter().map(|t| t.position),
        width,
        height,
        options,
    );
    let rows = infer_axis_boundaries(
        transitions.horizontal.iter().map(|t| t.position),
        height,
        width,
        options,
    );

    log::debug!(
        "inferred grid: {} row boundaries, {} column boundaries",
        rows.len(),
        cols.len()
    );

    GridLines::new(rows, cols)
}

/// Infer the boundary coordinates along one axis.
///
/// `dim` is the length of the axis the boundaries live on; `opposite_dim` is
/// the length a rule line would have to span, used for the candidate
/// threshold.
fn infer_axis_boundaries(
    positions: impl Iterator<Item = u32>,
    dim: u32,
    opposite_dim: u32,
    options: &SegmentOptions,
) -> Vec<u32> {
    // Step 1: histogram of transition counts per coordinate.
    let mut counts = vec![0u32; dim as usize];
    for position in positions {
        counts[position as usize] += 1;
    }

    // Step 2: a coordinate is a candidate when its transitions span more than
    // `boundary_fraction` of the opposite axis.
    #[allow(clippy::cast_precision_loss)] // image dimensions are far below f32 precision limits
    let min_count = options.boundary_fraction * opposite_dim as f32;
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let candidates: Vec<u32> = counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count as f32 > min_count)
        .map(|(coordinate, _)| coordinate as u32)
        .collect();

    // Step 3: collapse runs of adjacent candidates.
    let mut boundaries = cluster_candidates(&candidates, options.merge_distance);

    // Step 4: guarantee the outer bounds.
    if boundaries.first() != Some(&0) {
        boundaries.insert(0, 0);
    }
    if boundaries.last() != Some(&dim) {
        boundaries.push(dim);
    }

    boundaries
}

/// Merge candidate coordinates within `merge_distance` of each other into a
/// single boundary at the cluster midpoint.
///
/// Integer midpoint division floors, so when the two ends of a cluster are
/// equidistant from the center the boundary lands on the lower index.
fn cluster_candidates(candidates: &[u32], merge_distance: u32) -> Vec<u32> {
    let mut boundaries = Vec::new();
    let mut iter = candidates.iter().copied();
    let Some(first) = iter.next() else {
        return boundaries;
    };

    let mut cluster_start = first;
    let mut cluster_end = first;
    for candidate in iter {
        if candidate - cluster_end <= merge_distance {
            cluster_end = candidate;
        } else {
            boundaries.push((cluster_start + cluster_end) / 2);
            cluster_start = candidate;
            cluster_end = candidate;
        }
    }
    boundaries.push((cluster_start + cluster_end) / 2);

    boundaries
}
