//! Serial implementation of grid contouring

use crate::contour::grid::{ContourGrid, SampledGrid};
use crate::contour::traits::{ContourLevel, ContourOps, validate_thresholds};
use crate::errors::Result;
use crate::float_types::Real;

/// Serial implementation of `ContourOps`
pub struct SerialContourOps;

impl SerialContourOps {
    pub const fn new() -> Self {
        Self
    }
}

impl Default for SerialContourOps {
    fn default() -> Self {
        Self::new()
    }
}

impl ContourOps for SerialContourOps {
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
        for (row, &y) in sampled.values.chunks_exact_mut(width).zip(&sampled.ys) {
            SampledGrid::sample_row(&sampled.xs, y, row, &field);
        }

        Ok(thresholds
            .iter()
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
}
