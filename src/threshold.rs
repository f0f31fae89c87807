//! Locating threshold crossings along known paths.
//!
//! Where the grid extractor contours a whole rectangle, this module works along a polyline
//! that already exists: given a classifier that says whether a point is *inside*, it finds
//! where the path crosses the boundary and cuts the path into its inside runs.
//!
//! A crossing is located by bisection. The segment is oriented inside-first, its midpoint is
//! classified, and whichever half still straddles the boundary is kept, until the segment is
//! no longer than `min_length`.

use crate::HashMap;
use crate::errors::Result;
use crate::float_types::{MAX_BISECTION_DEPTH, Real, real_bits};
use crate::polyline::{Point, PolyLine, Segment};
use std::collections::VecDeque;

/// How a single segment relates to the inside region, judged from its two endpoints and its
/// midpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentStatus {
    Inside,
    Outside,
    /// `p1` outside, `p2` inside
    Entering,
    /// `p1` inside, `p2` outside
    Exiting,
    /// Both ends inside, midpoint outside: leaves and re-enters within the segment.
    InOutIn,
    /// Both ends outside, midpoint inside: briefly enters and exits within the segment.
    OutInOut,
}

impl SegmentStatus {
    pub fn of<F>(segment: &Segment, inside: F) -> Self
    where
        F: Fn(&Point) -> bool,
    {
        let p1_inside = inside(&segment.p1);
        let mid_inside = inside(&segment.midpoint());
        let p2_inside = inside(&segment.p2);
        match (p1_inside, mid_inside, p2_inside) {
            (true, false, true) => SegmentStatus::InOutIn,
            (false, true, false) => SegmentStatus::OutInOut,
            (true, _, true) => SegmentStatus::Inside,
            (false, _, true) => SegmentStatus::Entering,
            (true, _, false) => SegmentStatus::Exiting,
            (false, _, false) => SegmentStatus::Outside,
        }
    }
}

impl Segment {
    /// The point on this segment nearest the inside/outside boundary, accurate to `min_length`.
    ///
    /// The endpoints are expected to classify differently. If they don't, the result is still a
    /// point on the segment, just not a meaningful one.
    pub fn point_at_threshold<F>(&self, inside: F, min_length: Real) -> Point
    where
        F: Fn(&Point) -> bool,
    {
        let mut s = if inside(&self.p1) { *self } else { self.flip() };

        for _ in 0..MAX_BISECTION_DEPTH {
            if s.length() <= min_length {
                return s.midpoint();
            }
            let mid = s.midpoint();
            s = if inside(&mid) {
                Segment::new(mid, s.p2)
            } else {
                Segment::new(s.p1, mid)
            };
        }

        log::trace!(
            "bisection depth exhausted at length {} (min_length {})",
            s.length(),
            min_length
        );
        s.midpoint()
    }

    /// Every crossing along the segment, found by walking it at `coarse_step` and re-walking
    /// each crossing piece at `fine_step`. Each crossing is reported as the midpoint of the fine
    /// piece it falls in, ordered from `p1` to `p2`.
    ///
    /// A coarse piece that crosses twice has matching endpoint classes and is missed.
    pub fn points_at_threshold<F>(
        &self,
        inside: F,
        coarse_step: Real,
        fine_step: Real,
    ) -> Result<Vec<Point>>
    where
        F: Fn(&Point) -> bool,
    {
        let crosses = |s: &Segment| inside(&s.p1) != inside(&s.p2);
        let mut found = Vec::new();

        let coarse = self.to_polyline().walk(coarse_step)?;
        for piece in coarse.segments().filter(|s| crosses(s)) {
            let fine = piece.to_polyline().walk(fine_step)?;
            found.extend(fine.segments().filter(|s| crosses(s)).map(|s| s.midpoint()));
        }

        Ok(found)
    }
}

type CacheKey = [u64; 5];

/// A bounded memo of refined crossings, keyed by segment and threshold.
///
/// The cache does not know which field or `min_length` produced an entry; keep one cache per
/// field and precision. When full, the oldest entry is evicted first.
#[derive(Debug, Clone)]
pub struct RefinementCache {
    capacity: usize,
    entries: HashMap<CacheKey, Point>,
    order: VecDeque<CacheKey>,
}

impl Default for RefinementCache {
    fn default() -> Self {
        Self::with_capacity(4096)
    }
}

impl RefinementCache {
    /// A capacity of zero disables caching.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            capacity,
            entries: HashMap::with_capacity(capacity.min(4096)),
            order: VecDeque::with_capacity(capacity.min(4096)),
        }
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
    }

    fn key(segment: &Segment, threshold: Real) -> CacheKey {
        [
            real_bits(segment.p1.x),
            real_bits(segment.p1.y),
            real_bits(segment.p2.x),
            real_bits(segment.p2.y),
            real_bits(threshold),
        ]
    }

    pub fn get(&self, segment: &Segment, threshold: Real) -> Option<Point> {
        self.entries.get(&Self::key(segment, threshold)).copied()
    }

    /// Return the cached point, or compute, store and return it.
    pub fn get_or_insert_with<F>(&mut self, segment: &Segment, threshold: Real, compute: F) -> Point
    where
        F: FnOnce() -> Point,
    {
        let key = Self::key(segment, threshold);
        if let Some(point) = self.entries.get(&key) {
            return *point;
        }

        let point = compute();
        if self.capacity == 0 {
            return point;
        }
        while self.entries.len() >= self.capacity {
            match self.order.pop_front() {
                Some(oldest) => {
                    self.entries.remove(&oldest);
                },
                None => break,
            }
        }
        self.entries.insert(key, point);
        self.order.push_back(key);
        point
    }
}

/// Shared driver for the threshold walks; `refine` locates the crossing on a straddling segment.
fn walk_inside_runs<I, R>(line: &PolyLine, inside: I, mut refine: R) -> Vec<PolyLine>
where
    I: Fn(&Point) -> bool,
    R: FnMut(&Segment) -> Point,
{
    let mut result = Vec::new();
    let mut current = PolyLine::default();

    fn complete(current: &mut PolyLine, result: &mut Vec<PolyLine>) {
        if !current.is_empty() {
            result.push(std::mem::take(current));
        }
    }

    for segment in line.segments() {
        match SegmentStatus::of(&segment, &inside) {
            SegmentStatus::Inside => {
                current.push_dedup(segment.p1);
                current.push_dedup(segment.p2);
            },
            SegmentStatus::Outside => complete(&mut current, &mut result),
            SegmentStatus::Entering => {
                complete(&mut current, &mut result);
                let crossing = refine(&segment);
                current.push_dedup(crossing);
                current.push_dedup(segment.p2);
            },
            SegmentStatus::Exiting => {
                let crossing = refine(&segment);
                current.push_dedup(segment.p1);
                current.push_dedup(crossing);
                complete(&mut current, &mut result);
            },
            SegmentStatus::InOutIn => {
                let (first, second) = segment.split_at_midpoint();
                let exit = refine(&first);
                current.push_dedup(first.p1);
                current.push_dedup(exit);
                complete(&mut current, &mut result);

                let entry = refine(&second);
                current.push_dedup(entry);
                current.push_dedup(second.p2);
            },
            SegmentStatus::OutInOut => {
                complete(&mut current, &mut result);
                let (first, second) = segment.split_at_midpoint();
                current.push_dedup(refine(&first));
                current.push_dedup(refine(&second));
                complete(&mut current, &mut result);
            },
        }
    }

    complete(&mut current, &mut result);
    result
}

impl PolyLine {
    /// Cut this polyline into its maximal inside runs, with refined boundary points where a run
    /// starts or ends part-way along a segment. Runs are returned in path order.
    pub fn walk_threshold<F>(&self, inside: F, min_length: Real) -> Vec<PolyLine>
    where
        F: Fn(&Point) -> bool,
    {
        walk_inside_runs(self, &inside, |segment| {
            segment.point_at_threshold(&inside, min_length)
        })
    }

    /// [`walk_threshold`](Self::walk_threshold) against a scalar field, where a point is inside
    /// when `field(x, y) < threshold`. Refined crossings are memoised in `cache`.
    pub fn walk_field_threshold<F>(
        &self,
        field: F,
        threshold: Real,
        min_length: Real,
        cache: &mut RefinementCache,
    ) -> Vec<PolyLine>
    where
        F: Fn(Real, Real) -> Real,
    {
        let inside = |p: &Point| field(p.x, p.y) < threshold;
        walk_inside_runs(self, inside, |segment| {
            cache.get_or_insert_with(segment, threshold, || {
                segment.point_at_threshold(inside, min_length)
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn pt(x: Real, y: Real) -> Point {
        Point::new(x, y)
    }

    fn left_of(limit: Real) -> impl Fn(&Point) -> bool {
        move |p: &Point| p.x < limit
    }

    #[test]
    fn statuses() {
        let inside = |p: &Point| p.x.abs() < 1.0;
        let s = |a: Real, b: Real| Segment::new(pt(a, 0.0), pt(b, 0.0));
        assert_eq!(SegmentStatus::of(&s(-0.5, 0.5), inside), SegmentStatus::Inside);
        assert_eq!(SegmentStatus::of(&s(2.0, 3.0), inside), SegmentStatus::Outside);
        assert_eq!(SegmentStatus::of(&s(2.0, 0.0), inside), SegmentStatus::Entering);
        assert_eq!(SegmentStatus::of(&s(0.0, 2.0), inside), SegmentStatus::Exiting);
        assert_eq!(SegmentStatus::of(&s(-3.0, 3.0), inside), SegmentStatus::OutInOut);

        let ring = |p: &Point| p.x.abs() > 1.0;
        assert_eq!(SegmentStatus::of(&s(-3.0, 3.0), ring), SegmentStatus::InOutIn);
    }

    #[test]
    fn bisection_finds_crossing() {
        let s = Segment::new(pt(0.0, 0.0), pt(10.0, 0.0));
        let p = s.point_at_threshold(left_of(3.3), 0.01);
        assert_abs_diff_eq!(p.x, 3.3, epsilon = 0.01);
        let q = s.flip().point_at_threshold(left_of(3.3), 0.01);
        assert_abs_diff_eq!(q.x, 3.3, epsilon = 0.01);
    }

    #[test]
    fn short_segment_returns_midpoint() {
        let s = Segment::new(pt(0.0, 0.0), pt(0.5, 0.0));
        assert_eq!(s.point_at_threshold(left_of(0.1), 1.0), pt(0.25, 0.0));
    }

    #[test]
    fn non_positive_min_length_still_terminates() {
        let s = Segment::new(pt(0.0, 0.0), pt(1.0, 0.0));
        let p = s.point_at_threshold(left_of(0.7), 0.0);
        assert_abs_diff_eq!(p.x, 0.7, epsilon = 1e-9);
    }

    #[test]
    fn crossings_along_a_segment() {
        let band = |p: &Point| (2.0..4.0).contains(&p.x);
        let s = Segment::new(pt(0.0, 0.0), pt(6.0, 0.0));
        let found = s.points_at_threshold(band, 1.0, 0.1).unwrap();
        assert_eq!(found.len(), 2);
        assert_abs_diff_eq!(found[0].x, 2.0, epsilon = 0.1);
        assert_abs_diff_eq!(found[1].x, 4.0, epsilon = 0.1);
    }

    #[test]
    fn cache_evicts_oldest() {
        let mut cache = RefinementCache::with_capacity(2);
        let seg = |x: Real| Segment::new(pt(x, 0.0), pt(x + 1.0, 0.0));
        cache.get_or_insert_with(&seg(0.0), 0.5, || pt(0.5, 0.0));
        cache.get_or_insert_with(&seg(1.0), 0.5, || pt(1.5, 0.0));
        cache.get_or_insert_with(&seg(2.0), 0.5, || pt(2.5, 0.0));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get(&seg(0.0), 0.5), None);
        assert_eq!(cache.get(&seg(2.0), 0.5), Some(pt(2.5, 0.0)));
        assert_eq!(cache.get(&seg(2.0), 0.6), None);
    }

    #[test]
    fn zero_capacity_cache_stores_nothing() {
        let mut cache = RefinementCache::with_capacity(0);
        let s = Segment::new(pt(0.0, 0.0), pt(1.0, 0.0));
        assert_eq!(cache.get_or_insert_with(&s, 0.0, || pt(0.3, 0.0)), pt(0.3, 0.0));
        assert!(cache.is_empty());
    }
}
