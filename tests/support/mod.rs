//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use isolines::{
    float_types::Real,
    polyline::{Point, PolyLine, Segment},
};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

pub fn pt(x: Real, y: Real) -> Point {
    Point::new(x, y)
}

pub fn seg(a: (Real, Real), b: (Real, Real)) -> Segment {
    Segment::new(pt(a.0, a.1), pt(b.0, b.1))
}

pub fn line(points: &[(Real, Real)]) -> PolyLine {
    points.iter().map(|&(x, y)| pt(x, y)).collect()
}

type EdgeKey = ((u64, u64), (u64, u64));

fn point_key(p: &Point) -> (u64, u64) {
    ((p.x as f64).to_bits(), (p.y as f64).to_bits())
}

fn edge_key(a: &Point, b: &Point) -> EdgeKey {
    let (ka, kb) = (point_key(a), point_key(b));
    if ka <= kb { (ka, kb) } else { (kb, ka) }
}

/// Sorted, orientation-free edges of a segment soup.
pub fn segment_multiset(segments: &[Segment]) -> Vec<EdgeKey> {
    let mut edges: Vec<EdgeKey> = segments.iter().map(|s| edge_key(&s.p1, &s.p2)).collect();
    edges.sort_unstable();
    edges
}

/// Sorted, orientation-free edges of every consecutive point pair across `lines`.
pub fn edge_multiset(lines: &[PolyLine]) -> Vec<EdgeKey> {
    let mut edges: Vec<EdgeKey> = lines
        .iter()
        .flat_map(|l| l.points.windows(2).map(|w| edge_key(&w[0], &w[1])))
        .collect();
    edges.sort_unstable();
    edges
}

/// Distance from the origin.
pub fn radius(p: &Point) -> Real {
    p.coords.norm()
}
