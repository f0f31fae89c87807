//! Stitching an unordered bag of segments into maximal connected polylines.
//!
//! Segments are joined wherever they share an endpoint exactly. The output is a partition of
//! the input: every segment becomes exactly one edge of exactly one polyline.
//!
//! Choices are deterministic. A new chain is seeded from the lowest-indexed unused segment,
//! and when several unused segments meet the chain's end (a fork), the lowest-indexed one is
//! attached. Chains are extended at their last point first, then at their first point.

use crate::HashMap;
use crate::float_types::real_bits;
use crate::polyline::{Point, PolyLine, Segment};
use std::collections::VecDeque;

type PointKey = (u64, u64);

fn key(p: &Point) -> PointKey {
    (real_bits(p.x), real_bits(p.y))
}

/// Endpoint → unused incident segments, as indices into the caller's slice in ascending order.
struct EndpointIndex<'a> {
    segments: &'a [Segment],
    incident: HashMap<PointKey, Vec<usize>>,
    used: Vec<bool>,
    remaining: usize,
}

impl<'a> EndpointIndex<'a> {
    fn new(segments: &'a [Segment]) -> Self {
        let mut incident: HashMap<PointKey, Vec<usize>> =
            HashMap::with_capacity(segments.len() * 2);
        for (i, segment) in segments.iter().enumerate() {
            let (k1, k2) = (key(&segment.p1), key(&segment.p2));
            incident.entry(k1).or_default().push(i);
            if k2 != k1 {
                incident.entry(k2).or_default().push(i);
            }
        }
        Self {
            segments,
            incident,
            used: vec![false; segments.len()],
            remaining: segments.len(),
        }
    }

    fn first_at(&self, p: &Point) -> Option<usize> {
        self.incident.get(&key(p)).and_then(|ids| ids.first().copied())
    }

    /// Lowest-indexed segment not yet taken, starting the scan at `from`.
    fn next_unused(&self, from: usize) -> Option<usize> {
        (from..self.segments.len()).find(|&i| !self.used[i])
    }

    /// Mark `id` used and drop it from both of its endpoints, pruning emptied entries.
    fn take(&mut self, id: usize) -> Segment {
        let segment = self.segments[id];
        self.used[id] = true;
        self.remaining -= 1;
        for k in [key(&segment.p1), key(&segment.p2)] {
            if let Some(ids) = self.incident.get_mut(&k) {
                ids.retain(|&other| other != id);
                if ids.is_empty() {
                    self.incident.remove(&k);
                }
            }
        }
        segment
    }
}

/// The endpoint of `segment` that is not `at`.
fn other_end(segment: &Segment, at: &Point) -> Point {
    if segment.p1 == *at { segment.p2 } else { segment.p1 }
}

/// Merge `segments` into polylines. Closed loops come back with their first point repeated at
/// the end; chains that run out of partners come back open.
///
/// # Example
/// ```
/// # use isolines::polyline::{Point, Segment};
/// # use isolines::stitch::stitch;
/// let p = |x, y| Point::new(x, y);
/// let lines = stitch(&[
///     Segment::new(p(0.0, 0.0), p(1.0, 0.0)),
///     Segment::new(p(1.0, 0.0), p(1.0, 1.0)),
/// ]);
/// assert_eq!(lines.len(), 1);
/// assert_eq!(lines[0].points, vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0)]);
/// ```
pub fn stitch(segments: &[Segment]) -> Vec<PolyLine> {
    let mut index = EndpointIndex::new(segments);
    let mut seed = 0;
    let mut result = Vec::new();

    while index.remaining > 0 {
        let Some(id) = index.next_unused(seed) else {
            break;
        };
        seed = id + 1;
        let first = index.take(id);
        let mut chain: VecDeque<Point> = VecDeque::from([first.p1, first.p2]);

        loop {
            let (Some(&head), Some(&tail)) = (chain.front(), chain.back()) else {
                break;
            };
            if head == tail {
                break;
            }
            if let Some(id) = index.first_at(&tail) {
                let segment = index.take(id);
                chain.push_back(other_end(&segment, &tail));
            } else if let Some(id) = index.first_at(&head) {
                let segment = index.take(id);
                chain.push_front(other_end(&segment, &head));
            } else {
                break;
            }
        }

        result.push(PolyLine::new(Vec::from(chain)));
    }

    log::debug!(
        "stitched {} segments into {} polylines ({} closed)",
        segments.len(),
        result.len(),
        result.iter().filter(|l| l.is_closed()).count()
    );
    result
}
