//! Planar **iso-contouring** and polyline utilities: extract iso-lines of a scalar field with
//! [marching squares](contour), [stitch] the resulting segment soup into polylines, resample
//! them by [arc length](polyline::walk), and [normalize](polyline::normalize) their segment
//! lengths into a range a downstream consumer (a pen plotter, say) can handle.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **hashmap**: use hashbrown for the stitcher's endpoint index and the refinement cache
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon to sample the grid and contour thresholds concurrently

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod contour;
pub mod errors;
pub mod float_types;
pub mod polyline;
pub mod stitch;
pub mod threshold;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

#[cfg(feature = "hashmap")]
pub(crate) type HashMap<K, V> = hashbrown::HashMap<K, V>;
#[cfg(not(feature = "hashmap"))]
pub(crate) type HashMap<K, V> = std::collections::HashMap<K, V>;

pub use contour::{ContourGrid, ContourOps, EdgePlacement, IsoLines};
pub use errors::ContourError;
pub use polyline::{NormalizeOptions, Point, PolyLine, Segment};
pub use stitch::stitch;
pub use threshold::{RefinementCache, SegmentStatus};
