// Our Real scalar type:
#[cfg(feature = "f32")]
pub type Real = f32;
#[cfg(feature = "f64")]
pub type Real = f64;

use core::str::FromStr;
use std::sync::OnceLock;

/// Lazily-initialized tolerance used wherever an exact float comparison would be too strict
/// (e.g. deciding whether a resampled path already ends on its true end point).
/// Defaults depend on precision (`f32` vs `f64`), but can be overridden:
///  1) **Build-time**: set env var `ISOLINES_TOLERANCE` (e.g. `ISOLINES_TOLERANCE=1e-6 cargo build`)
///  2) **Runtime**: call [`set_tolerance`] once before using the library
///
/// Endpoint matching in the stitcher never uses this value; it is exact by definition.
static TOLERANCE_CELL: OnceLock<Real> = OnceLock::new();

#[inline]
const fn default_tolerance() -> Real {
    #[cfg(feature = "f32")]
    {
        1e-4
    }
    #[cfg(feature = "f64")]
    {
        1e-9
    }
}

/// Returns the current tolerance value.
/// If not set yet, it tries `ISOLINES_TOLERANCE` (parsed as the active `Real`) and
/// falls back to a sensible default.
pub fn tolerance() -> Real {
    *TOLERANCE_CELL.get_or_init(|| {
        if let Some(environment_variable) = option_env!("ISOLINES_TOLERANCE") {
            if let Ok(value) = Real::from_str(environment_variable) {
                return value.max(Real::EPSILON);
            }
        }
        default_tolerance()
    })
}

/// Set the tolerance programmatically once (subsequent calls are ignored).
/// Call near program start: `isolines::float_types::set_tolerance(1e-6);`
pub fn set_tolerance(value: Real) {
    let _ = TOLERANCE_CELL.set(value.max(Real::EPSILON));
}

/// Bit pattern of `value` for exact-equality hashing. `-0.0` maps to `0.0` so the key agrees
/// with `==`.
#[inline]
pub(crate) fn real_bits(value: Real) -> u64 {
    if value == 0.0 {
        0
    } else {
        u64::from(value.to_bits())
    }
}

/// Corner angle (degrees) above which the distance normalizer refuses to merge segments.
pub const DEFAULT_ANGLE_CUTOFF: Real = 45.0;

/// Smallest width the normalizer allows between its clamped `min` and `max`.
pub const MIN_RANGE_WIDTH: Real = 0.1;

/// Iteration bound for threshold bisection. Every step halves the segment, so this is
/// far beyond what any finite `min_length` can require.
pub const MAX_BISECTION_DEPTH: usize = 64;
