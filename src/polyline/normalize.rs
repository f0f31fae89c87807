//! Inter-point distance normalization.
//!
//! Short segments are merged and long segments are split until consecutive points are
//! between `min` and `max` apart, except across corners sharper than the angle cutoff, which
//! are kept as they are.

use crate::float_types::{DEFAULT_ANGLE_CUTOFF, MIN_RANGE_WIDTH, Real};
use crate::polyline::{PolyLine, Segment};

/// Target spacing for [`PolyLine::normalize_distances`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizeOptions {
    /// Smallest acceptable distance between consecutive points.
    pub min: Real,
    /// Largest acceptable distance between consecutive points.
    pub max: Real,
    /// Corners sharper than this (degrees between segment directions) are never merged across.
    pub angle_cutoff: Real,
}

impl Default for NormalizeOptions {
    /// The pen-plotter preset: no point closer than 1.5 units to the next.
    fn default() -> Self {
        Self {
            min: 1.5,
            max: 1000.0,
            angle_cutoff: DEFAULT_ANGLE_CUTOFF,
        }
    }
}

impl NormalizeOptions {
    pub const fn new(min: Real, max: Real) -> Self {
        Self {
            min,
            max,
            angle_cutoff: DEFAULT_ANGLE_CUTOFF,
        }
    }

    pub const fn with_angle_cutoff(mut self, degrees: Real) -> Self {
        self.angle_cutoff = degrees;
        self
    }

    /// The range actually used: `min` is raised to at least zero and `max` to at least
    /// `min + MIN_RANGE_WIDTH`. Invalid ranges are repaired, never rejected.
    pub fn clamped(&self) -> (Real, Real) {
        let min = self.min.max(0.0);
        let max = self.max.max(min + MIN_RANGE_WIDTH);
        (min, max)
    }
}

impl PolyLine {
    /// Combine short segments and split long ones so every spacing lies in the configured range
    /// wherever the geometry allows.
    ///
    /// Polylines with fewer than two points are returned unchanged.
    ///
    /// # Example
    /// ```
    /// # use isolines::polyline::{NormalizeOptions, Point, PolyLine};
    /// let line = PolyLine::new(vec![Point::new(0.0, 0.0), Point::new(0.0, 1.0)]);
    /// assert_eq!(line.normalize_distances(&NormalizeOptions::new(1.0, 2.0)), line);
    /// ```
    pub fn normalize_distances(&self, options: &NormalizeOptions) -> PolyLine {
        if self.points.len() < 2 {
            return self.clone();
        }

        let (min, max) = options.clamped();
        let in_range = |length: Real| length >= min && length <= max;

        let mut result: Vec<Segment> = Vec::with_capacity(self.points.len());
        let mut pending: Option<Segment> = None;

        for segment in self.segments() {
            if let Some(held) = pending {
                if held.angle_between(&segment) > options.angle_cutoff {
                    result.push(held);
                    pending = None;
                }
            }

            let combined = match pending {
                Some(held) => held
                    .combine(&segment)
                    .unwrap_or(Segment::new(held.p1, segment.p2)),
                None => segment,
            };
            let length = combined.length();

            pending = if in_range(length) {
                result.push(combined);
                None
            } else if length < min {
                Some(combined)
            } else {
                let mut pieces = split_to_max(&combined, max);
                match pieces.pop() {
                    Some(last) => {
                        result.append(&mut pieces);
                        if in_range(last.length()) {
                            result.push(last);
                            None
                        } else {
                            Some(last)
                        }
                    },
                    None => Some(combined),
                }
            };
        }

        if let Some(held) = pending {
            result.push(held);
        }

        PolyLine::from_segments(&result)
    }

    /// [`normalize_distances`](Self::normalize_distances) with the plotter preset.
    pub fn normalize_for_print(&self) -> PolyLine {
        self.normalize_distances(&NormalizeOptions::default())
    }
}

/// Pieces of `max` length along `segment`, the last one holding the remainder.
fn split_to_max(segment: &Segment, max: Real) -> Vec<Segment> {
    match segment.to_polyline().walk(max) {
        Ok(walked) => walked.segments().collect(),
        Err(_) => vec![*segment],
    }
}
