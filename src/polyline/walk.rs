//! Arc-length walking and resampling.
//!
//! A walk emits the start point, then a sample every `step` units of arc length, and finally
//! the true end point whenever the last sample fell short of it. Spacing carries across
//! segment boundaries: the distance left over at the end of one segment is consumed at the
//! start of the next, so a sample may land anywhere along the path, not only on vertices.
//!
//! A negative step walks the reversed polyline.

use crate::errors::{ContourError, Result};
use crate::float_types::{Real, tolerance};
use crate::polyline::{Point, PolyLine, Segment};

/// Everything known about one sample of a walk.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WalkSample {
    /// Index of the segment the sample lies on (the final end point reports the last point index).
    pub index: usize,
    /// Fraction of the total arc length travelled, `0.0..=1.0`.
    pub percent: Real,
    /// The segment the sample lies on.
    pub segment: Segment,
    pub point: Point,
}

fn validate_step(step: Real) -> Result<()> {
    if step == 0.0 || !step.is_finite() {
        return Err(ContourError::InvalidStep(step));
    }
    Ok(())
}

/// Walks `line` front to back. `step` must be positive.
fn walk_forwards<T, F>(line: &PolyLine, step: Real, mut block: F) -> Vec<T>
where
    F: FnMut(WalkSample) -> T,
{
    let points = &line.points;
    let Some(&first) = points.first() else {
        return Vec::new();
    };

    let total_length = line.length();
    let second = points.get(1).copied().unwrap_or(first);

    let mut walked = vec![block(WalkSample {
        index: 0,
        percent: 0.0,
        segment: Segment::new(first, second),
        point: first,
    })];
    if points.len() < 2 || total_length == 0.0 {
        return walked;
    }

    let eps = tolerance();
    let mut length_so_far: Real = 0.0;
    // arc length between the latest sample and the end of the segment walked so far
    let mut unused: Real = 0.0;

    for (index, segment) in line.segments().enumerate() {
        let segment_length = segment.length();
        let segment_end = length_so_far + segment_length;
        // a sample deferred past the previous corner starts this segment, never precedes it
        let mut current = (length_so_far + step - unused).max(length_so_far);
        let mut last_sample: Option<Point> = None;

        // samples landing within tolerance of the segment end belong to the next segment
        while current < segment_end - eps {
            let point = segment.point_at_distance(current - length_so_far);
            walked.push(block(WalkSample {
                index,
                percent: current / total_length,
                segment,
                point,
            }));
            last_sample = Some(point);
            current += step;
        }

        match last_sample {
            Some(point) => unused = nalgebra::distance(&point, &segment.p2),
            None => unused += segment_length,
        }
        length_so_far = segment_end;
    }

    if unused > 0.0 {
        let last_index = points.len() - 1;
        walked.push(block(WalkSample {
            index: last_index,
            percent: 1.0,
            segment: Segment::new(points[last_index - 1], points[last_index]),
            point: points[last_index],
        }));
    }

    walked
}

impl PolyLine {
    /// Resample at even arc-length intervals of `step`.
    ///
    /// # Errors
    /// [`ContourError::InvalidStep`] when `step` is zero or not finite.
    ///
    /// # Example
    /// ```
    /// # use isolines::polyline::{Point, PolyLine};
    /// let line = PolyLine::new(vec![Point::new(0.0, 0.0), Point::new(0.0, 3.0)]);
    /// let walked = line.walk(2.0).unwrap();
    /// assert_eq!(
    ///     walked.points,
    ///     vec![Point::new(0.0, 0.0), Point::new(0.0, 2.0), Point::new(0.0, 3.0)]
    /// );
    /// ```
    pub fn walk(&self, step: Real) -> Result<PolyLine> {
        self.walk_map(step, |p| p)
    }

    /// Resample like [`walk`](Self::walk), passing every sample through `transform`.
    pub fn walk_map<F>(&self, step: Real, mut transform: F) -> Result<PolyLine>
    where
        F: FnMut(Point) -> Point,
    {
        Ok(self.walk_with(step, |sample| transform(sample.point))?.into_iter().collect())
    }

    /// The most general walk: `block` sees the segment index, travelled fraction, segment and
    /// point of each sample and may produce anything.
    pub fn walk_with<T, F>(&self, step: Real, block: F) -> Result<Vec<T>>
    where
        F: FnMut(WalkSample) -> T,
    {
        validate_step(step)?;
        if step < 0.0 {
            Ok(walk_forwards(&self.reversed(), -step, block))
        } else {
            Ok(walk_forwards(self, step, block))
        }
    }

    /// Cut the polyline into consecutive pieces of `step` arc length. Pieces share their cut
    /// points; the final piece holds whatever length remains.
    pub fn chunked_by_distance(&self, step: Real) -> Result<Vec<PolyLine>> {
        validate_step(step)?;
        let line = if step < 0.0 { self.reversed() } else { self.clone() };
        let step = step.abs();

        let Some(&first) = line.points.first() else {
            return Ok(Vec::new());
        };

        let mut chunks = Vec::new();
        let mut current = PolyLine::new(vec![first]);
        let mut remaining = step;

        for segment in line.segments() {
            let mut start = segment.p1;
            let mut left = segment.length();

            while left >= remaining {
                let cut = Segment::new(start, segment.p2).point_at_distance(remaining);
                current.push_dedup(cut);
                chunks.push(std::mem::replace(&mut current, PolyLine::new(vec![cut])));
                start = cut;
                left -= remaining;
                remaining = step;
            }

            remaining -= left;
            current.push_dedup(segment.p2);
        }

        if current.len() > 1 {
            chunks.push(current);
        }
        Ok(chunks)
    }
}
