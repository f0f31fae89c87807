//! Marching-squares contouring of scalar fields
//!
//! This module provides grid contouring operations with dependency inversion,
//! allowing for different algorithm implementations (serial/parallel).

mod cases;
pub mod grid;
pub mod serial;
pub mod traits;

#[cfg(feature = "parallel")]
pub mod parallel;

// Re-export core types
pub use grid::{ContourGrid, EdgePlacement, MAX_CELLS_PER_AXIS};
pub use serial::SerialContourOps;
pub use traits::{ContourLevel, ContourOps, IsoLines};

#[cfg(feature = "parallel")]
pub use parallel::ParallelContourOps;

use crate::errors::Result;
use crate::float_types::Real;

impl ContourGrid {
    /// Unordered contour segments of `field` for every threshold, in threshold order.
    ///
    /// # Errors
    /// [`ContourError::InvalidThreshold`](crate::errors::ContourError::InvalidThreshold) when a
    /// threshold is not finite.
    pub fn contour_segments<F>(&self, field: F, thresholds: &[Real]) -> Result<Vec<ContourLevel>>
    where
        F: Fn(Real, Real) -> Real + Sync + Send,
    {
        #[cfg(not(feature = "parallel"))]
        let ops = SerialContourOps::new();
        #[cfg(feature = "parallel")]
        let ops = ParallelContourOps::new();

        ops.contour_segments(field, self, thresholds)
    }

    /// Contour `field` and stitch every level into polylines.
    ///
    /// # Example
    /// ```
    /// # use isolines::contour::ContourGrid;
    /// let grid = ContourGrid::new(-10.0..=10.0, -10.0..=10.0, 1.0)?;
    /// let levels = grid.isolines(|x, y| x * x + y * y - 25.0, &[0.0])?;
    /// assert_eq!(levels[0].polylines.len(), 1);
    /// assert!(levels[0].polylines[0].is_closed());
    /// # Ok::<(), isolines::errors::ContourError>(())
    /// ```
    pub fn isolines<F>(&self, field: F, thresholds: &[Real]) -> Result<Vec<IsoLines>>
    where
        F: Fn(Real, Real) -> Real + Sync + Send,
    {
        #[cfg(not(feature = "parallel"))]
        let ops = SerialContourOps::new();
        #[cfg(feature = "parallel")]
        let ops = ParallelContourOps::new();

        ops.isolines(field, self, thresholds)
    }
}
