//! Clean-up passes run on finished polylines before they are handed to a line renderer.

use crate::float_types::Real;
use crate::polyline::{Point, PolyLine};
use geo::{LineString, Simplify};

impl PolyLine {
    /// Ramer–Douglas–Peucker simplification with tolerance `epsilon`, via `geo`.
    ///
    /// End points are always kept, so a closed polyline stays closed.
    pub fn simplify(&self, epsilon: Real) -> PolyLine {
        if self.points.len() < 3 {
            return self.clone();
        }
        let ls: LineString<Real> = self.into();
        PolyLine::from(ls.simplify(&epsilon))
    }
}

/// Concatenate consecutive polylines whenever one ends exactly where the next begins.
/// Empty polylines are dropped.
pub fn merge_connected(lines: &[PolyLine]) -> Vec<PolyLine> {
    join_consecutive(lines, |end, start| end == start)
}

/// Concatenate consecutive polylines whose gap (end of one to start of the next) is shorter
/// than `min_distance`, bridging the gap with a straight edge. Empty polylines are dropped.
pub fn remove_small_gaps(lines: &[PolyLine], min_distance: Real) -> Vec<PolyLine> {
    join_consecutive(lines, |end, start| {
        nalgebra::distance(end, start) < min_distance
    })
}

fn join_consecutive<F>(lines: &[PolyLine], should_join: F) -> Vec<PolyLine>
where
    F: Fn(&Point, &Point) -> bool,
{
    let mut result: Vec<PolyLine> = Vec::new();

    for line in lines.iter().filter(|l| !l.is_empty()) {
        let joined = match (result.last_mut(), line.first()) {
            (Some(previous), Some(start)) => match previous.last().copied() {
                Some(end) if should_join(&end, start) => {
                    for &point in &line.points {
                        previous.push_dedup(point);
                    }
                    true
                },
                _ => false,
            },
            _ => false,
        };
        if !joined {
            result.push(line.clone());
        }
    }

    result
}
