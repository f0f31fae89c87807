//! Parallel implementation of grid contouring
//!
//! Corner rows are sampled in parallel, then every threshold is contoured and stitched on its
//! own worker. Levels share nothing mutable, so results match the serial implementation
//! exactly and come back in threshold order.

use crate::contour::grid::{ContourGrid, SampledGrid};
use crate::contour::traits::{ContourLevel, ContourOps, IsoLines, validate_thresholds};
use crate::errors::Result;
use crate::float_types::Real;
use rayon::prelude::*;

/// Parallel implementation of `ContourOps`
pub struct ParallelContourOps;

impl ParallelContourOps {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for ParallelContourOps {
    fn default() -> Self {
        Self::new()
    }
}

impl ContourOps for ParallelContourOps {
    fn contour_segments<F>(
        &self,
        field: F,
        grid: &ContourGrid,
        thresholds: &[Real],
    ) -> Result<Vec<ContourLevel>>
    where
        F: Fn(Real, Real) -> Real + Sync + Send,
    {
        validate_thresholds(thresholds)?;
        if thresholds.is_empty() {
            return Ok(Vec::new());
        }

        let mut sampled = SampledGrid::lattice(grid);
        let width = sampled.xs.len();
        let xs = &sampled.xs;
        sampled
            .values
            .par_chunks_exact_mut(width)
            .zip(sampled.ys.par_iter())
            .for_each(|(row, &y)| SampledGrid::sample_row(xs, y, row, &field));

        Ok(thresholds
            .par_iter()
            .map(|&threshold| {
                let segments = sampled.level_segments(grid, &field, threshold);
                log::debug!(
                    "threshold {}: {} segments over {}x{} cells",
                    threshold,
                    segments.len(),
                    grid.columns(),
                    grid.rows()
                );
                ContourLevel { threshold, segments }
            })
            .collect())
    }

    fn isolines<F>(
        &self,
        field: F,
        grid: &ContourGrid,
        thresholds: &[Real],
    ) -> Result<Vec<IsoLines>>
    where
        F: Fn(Real, Real) -> Real + Sync + Send,
    {
        // each level's stitch is sequential; levels are independent of each other
        Ok(self
            .contour_segments(field, grid, thresholds)?
            .par_iter()
            .map(IsoLines::from)
            .collect())
    }
}
