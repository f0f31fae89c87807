//! Parameter validation errors

use crate::float_types::Real;

/// All the parameter problems rejected before an algorithm runs.
///
/// Degenerate geometry (zero-length segments, coincident points) and segments without a
/// stitching partner are *not* errors; the algorithms handle them locally.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContourError {
    /// (InvalidStep) A walk or grid step is zero, NaN or infinite, or too fine for its domain
    #[error("(InvalidStep) step must be finite, non-zero and not too fine for the domain, got {0}")]
    InvalidStep(Real),
    /// (InvalidRange) A sampling domain has min > max or a non-finite bound
    #[error("(InvalidRange) expected finite min <= max, got min {min} and max {max}")]
    InvalidRange { min: Real, max: Real },
    /// (InvalidThreshold) A contour level is NaN or infinite
    #[error("(InvalidThreshold) threshold must be finite, got {0}")]
    InvalidThreshold(Real),
}

pub type Result<T> = std::result::Result<T, ContourError>;
