//! `Point`, `Segment` and `PolyLine`: the small set of planar types every algorithm in the
//! crate consumes and produces.
//!
//! Point equality is exact floating-point equality. The stitcher and [`PolyLine::is_closed`]
//! rely on that, so producers of segments (the grid extractor in particular) take care to
//! compute shared endpoints bit-for-bit identically.

use crate::float_types::Real;
use geo::{Coord, LineString};
use nalgebra::{Point2, Vector2};

pub mod normalize;
pub mod simplify;
pub mod walk;

pub use normalize::NormalizeOptions;
pub use walk::WalkSample;

/// A planar coordinate.
pub type Point = Point2<Real>;

/// An ordered pair of points.
///
/// Two segments with swapped endpoints compare unequal, but describe the same edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub p1: Point,
    pub p2: Point,
}

impl Segment {
    pub const fn new(p1: Point, p2: Point) -> Self {
        Self { p1, p2 }
    }

    pub fn length(&self) -> Real {
        nalgebra::distance(&self.p1, &self.p2)
    }

    /// Midpoint. A zero-length segment's midpoint is its (shared) endpoint.
    ///
    /// Symmetric in `p1`/`p2` bit-for-bit, so `s.midpoint() == s.flip().midpoint()`.
    pub fn midpoint(&self) -> Point {
        nalgebra::center(&self.p1, &self.p2)
    }

    /// Unit vector from `p1` to `p2`, or the zero vector for a degenerate segment.
    pub fn direction(&self) -> Vector2<Real> {
        let delta = self.p2 - self.p1;
        let len = delta.norm();
        if len > 0.0 { delta / len } else { Vector2::zeros() }
    }

    pub const fn flip(&self) -> Self {
        Self::new(self.p2, self.p1)
    }

    /// The point `distance` along the segment from `p1`. Not clamped to the segment.
    pub fn point_at_distance(&self, distance: Real) -> Point {
        self.p1 + self.direction() * distance
    }

    pub fn split_at_midpoint(&self) -> (Segment, Segment) {
        let mid = self.midpoint();
        (Segment::new(self.p1, mid), Segment::new(mid, self.p2))
    }

    /// Joins `self` and a following segment into `self.p1 → other.p2`.
    ///
    /// Returns `None` when `other` does not start where `self` ends.
    pub fn combine(&self, other: &Segment) -> Option<Segment> {
        (self.p2 == other.p1).then(|| Segment::new(self.p1, other.p2))
    }

    /// Smallest angle in degrees (`0..=180`) between the two segment directions.
    /// Degenerate segments have no direction and report `0`.
    pub fn angle_between(&self, other: &Segment) -> Real {
        let a = self.p2 - self.p1;
        let b = other.p2 - other.p1;
        if a.norm_squared() == 0.0 || b.norm_squared() == 0.0 {
            return 0.0;
        }
        let cross = a.perp(&b);
        let dot = a.dot(&b);
        cross.abs().atan2(dot).to_degrees()
    }

    pub fn to_polyline(&self) -> PolyLine {
        PolyLine::new(vec![self.p1, self.p2])
    }
}

impl approx::AbsDiffEq for Segment {
    type Epsilon = Real;

    fn default_epsilon() -> Self::Epsilon {
        <Real as approx::AbsDiffEq>::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        approx::AbsDiffEq::abs_diff_eq(&self.p1, &other.p1, epsilon)
            && approx::AbsDiffEq::abs_diff_eq(&self.p2, &other.p2, epsilon)
    }
}

/// An ordered chain of points, read as the segments between consecutive points.
///
/// Algorithms never mutate a `PolyLine` they are handed; they return new ones.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolyLine {
    pub points: Vec<Point>,
}

impl PolyLine {
    pub const fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    /// Build a polyline from a chain of consecutive segments: every `p1`, then the last `p2`.
    ///
    /// No connectivity check is made; a gap between segments becomes an edge.
    pub fn from_segments(segments: &[Segment]) -> Self {
        let mut points: Vec<Point> = segments.iter().map(|s| s.p1).collect();
        if let Some(last) = segments.last() {
            points.push(last.p2);
        }
        Self::new(points)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&Point> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&Point> {
        self.points.last()
    }

    /// A polyline with at least one point whose first point equals its last point (exactly).
    pub fn is_closed(&self) -> bool {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => first == last,
            _ => false,
        }
    }

    /// Number of edges, `len() - 1` for non-empty polylines.
    pub fn edge_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    pub fn segments(&self) -> impl Iterator<Item = Segment> + '_ {
        self.points.windows(2).map(|w| Segment::new(w[0], w[1]))
    }

    /// Total arc length.
    pub fn length(&self) -> Real {
        self.segments().map(|s| s.length()).sum()
    }

    pub fn reversed(&self) -> Self {
        Self::new(self.points.iter().rev().copied().collect())
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    /// Append `point` unless it equals the current last point.
    pub fn push_dedup(&mut self, point: Point) {
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }
}

impl FromIterator<Point> for PolyLine {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<Point>> for PolyLine {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl From<&PolyLine> for LineString<Real> {
    fn from(line: &PolyLine) -> Self {
        LineString::new(
            line.points
                .iter()
                .map(|p| Coord { x: p.x, y: p.y })
                .collect(),
        )
    }
}

impl From<PolyLine> for LineString<Real> {
    fn from(line: PolyLine) -> Self {
        LineString::from(&line)
    }
}

impl From<&LineString<Real>> for PolyLine {
    fn from(line: &LineString<Real>) -> Self {
        line.0.iter().map(|c| Point::new(c.x, c.y)).collect()
    }
}

impl From<LineString<Real>> for PolyLine {
    fn from(line: LineString<Real>) -> Self {
        PolyLine::from(&line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn pt(x: Real, y: Real) -> Point {
        Point::new(x, y)
    }

    #[test]
    fn segment_basics() {
        let s = Segment::new(pt(0.0, 0.0), pt(3.0, 4.0));
        assert_eq!(s.length(), 5.0);
        assert_eq!(s.midpoint(), pt(1.5, 2.0));
        assert_eq!(s.flip(), Segment::new(pt(3.0, 4.0), pt(0.0, 0.0)));
        assert_abs_diff_eq!(s.direction(), Vector2::new(0.6, 0.8), epsilon = 1e-12);
        assert_abs_diff_eq!(s.point_at_distance(2.5), pt(1.5, 2.0), epsilon = 1e-12);
    }

    #[test]
    fn degenerate_segment_falls_back_to_its_point() {
        let s = Segment::new(pt(2.0, 2.0), pt(2.0, 2.0));
        assert_eq!(s.midpoint(), pt(2.0, 2.0));
        assert_eq!(s.direction(), Vector2::zeros());
        assert_eq!(s.point_at_distance(10.0), pt(2.0, 2.0));
        assert_eq!(s.angle_between(&Segment::new(pt(0.0, 0.0), pt(1.0, 0.0))), 0.0);
    }

    #[test]
    fn midpoint_is_symmetric() {
        let s = Segment::new(pt(0.1, 0.7), pt(0.3, -1.9));
        assert_eq!(s.midpoint(), s.flip().midpoint());
    }

    #[test]
    fn angle_between_is_unsigned() {
        let right = Segment::new(pt(0.0, 0.0), pt(1.0, 0.0));
        let up = Segment::new(pt(1.0, 0.0), pt(1.0, 1.0));
        let down = Segment::new(pt(1.0, 0.0), pt(1.0, -1.0));
        let back = Segment::new(pt(1.0, 0.0), pt(0.0, 0.0));
        assert_abs_diff_eq!(right.angle_between(&up), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(right.angle_between(&down), 90.0, epsilon = 1e-9);
        assert_abs_diff_eq!(right.angle_between(&back), 180.0, epsilon = 1e-9);
        assert_abs_diff_eq!(right.angle_between(&right), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn combine_requires_shared_point() {
        let a = Segment::new(pt(0.0, 0.0), pt(1.0, 0.0));
        let b = Segment::new(pt(1.0, 0.0), pt(2.0, 1.0));
        assert_eq!(a.combine(&b), Some(Segment::new(pt(0.0, 0.0), pt(2.0, 1.0))));
        assert_eq!(b.combine(&a), None);
    }

    #[test]
    fn closedness() {
        assert!(!PolyLine::default().is_closed());
        assert!(PolyLine::new(vec![pt(1.0, 1.0)]).is_closed());
        let tri = PolyLine::new(vec![pt(0.0, 0.0), pt(1.0, 0.0), pt(0.0, 1.0), pt(0.0, 0.0)]);
        assert!(tri.is_closed());
        assert_eq!(tri.edge_count(), 3);
        assert!(!tri.reversed().points.is_empty());
    }

    #[test]
    fn from_segments_chains_points() {
        let segments = [
            Segment::new(pt(0.0, 0.0), pt(1.0, 0.0)),
            Segment::new(pt(1.0, 0.0), pt(1.0, 1.0)),
        ];
        let line = PolyLine::from_segments(&segments);
        assert_eq!(line.points, vec![pt(0.0, 0.0), pt(1.0, 0.0), pt(1.0, 1.0)]);
        assert_eq!(line.segments().collect::<Vec<_>>(), segments.to_vec());
        assert!(PolyLine::from_segments(&[]).is_empty());
    }

    #[test]
    fn push_dedup_skips_repeats() {
        let mut line = PolyLine::default();
        line.push_dedup(pt(0.0, 0.0));
        line.push_dedup(pt(0.0, 0.0));
        line.push_dedup(pt(1.0, 0.0));
        assert_eq!(line.len(), 2);
    }

    #[test]
    fn geo_round_trip_keeps_points() {
        let line = PolyLine::new(vec![pt(0.0, 0.0), pt(2.0, 1.0), pt(3.0, -1.0)]);
        let ls: LineString<Real> = (&line).into();
        assert_eq!(ls.0.len(), 3);
        assert_eq!(PolyLine::from(ls), line);
    }
}
