//! Traits defining grid contouring operations for dependency inversion

use crate::contour::grid::ContourGrid;
use crate::errors::{ContourError, Result};
use crate::float_types::Real;
use crate::polyline::{PolyLine, Segment};
use crate::stitch::stitch;

/// The unordered segments approximating one iso-level.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourLevel {
    pub threshold: Real,
    pub segments: Vec<Segment>,
}

/// The stitched polylines of one iso-level.
#[derive(Debug, Clone, PartialEq)]
pub struct IsoLines {
    pub threshold: Real,
    pub polylines: Vec<PolyLine>,
}

impl From<&ContourLevel> for IsoLines {
    fn from(level: &ContourLevel) -> Self {
        Self {
            threshold: level.threshold,
            polylines: stitch(&level.segments),
        }
    }
}

/// Core grid contouring operations trait
pub trait ContourOps {
    /// Sample `field` over `grid` and return, per threshold and in the order given, the segment
    /// soup approximating the iso-line where the field equals that threshold.
    ///
    /// A cell corner counts as above a threshold when its value is strictly greater, so exact
    /// ties count as below. NaN samples count as below too; callers wanting otherwise must
    /// filter their field.
    fn contour_segments<F>(
        &self,
        field: F,
        grid: &ContourGrid,
        thresholds: &[Real],
    ) -> Result<Vec<ContourLevel>>
    where
        F: Fn(Real, Real) -> Real + Sync + Send;

    /// [`contour_segments`](Self::contour_segments) followed by stitching each level.
    fn isolines<F>(
        &self,
        field: F,
        grid: &ContourGrid,
        thresholds: &[Real],
    ) -> Result<Vec<IsoLines>>
    where
        F: Fn(Real, Real) -> Real + Sync + Send,
    {
        Ok(self
            .contour_segments(field, grid, thresholds)?
            .iter()
            .map(IsoLines::from)
            .collect())
    }
}

pub(crate) fn validate_thresholds(thresholds: &[Real]) -> Result<()> {
    match thresholds.iter().find(|t| !t.is_finite()) {
        Some(&bad) => Err(ContourError::InvalidThreshold(bad)),
        None => Ok(()),
    }
}
