//! Sampling domain and corner lattice for marching squares

use crate::contour::cases::{CASES, Edge, case_index};
use crate::errors::{ContourError, Result};
use crate::float_types::{Real, tolerance};
use crate::polyline::{Point, Segment};
use std::ops::RangeInclusive;

/// Upper bound on cells along either axis; finer steps are rejected as [`ContourError::InvalidStep`].
pub const MAX_CELLS_PER_AXIS: usize = 1 << 24;

/// Where a contour crosses a cell edge.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum EdgePlacement {
    /// Halfway between the two corners. Cheap; every crossing is off by up to half a step.
    #[default]
    Midpoint,
    /// Bisect the edge against the field until the bracket is at most `min_length` long.
    Refined { min_length: Real },
}

/// A rectangular sampling domain cut into square cells of side `step`.
///
/// Cell centres run from the domain minimum in steps of `step` up to the maximum; each cell's
/// corners sit half a step either side of its centre. Corners are computed once, from their
/// lattice index, so cells sharing an edge share its corner coordinates bit for bit.
#[derive(Debug, Clone, PartialEq)]
pub struct ContourGrid {
    min: Point,
    max: Point,
    step: Real,
    edge_placement: EdgePlacement,
}

impl ContourGrid {
    /// # Errors
    /// [`ContourError::InvalidStep`] unless `step` is positive and finite and yields at most
    /// [`MAX_CELLS_PER_AXIS`] cells per axis;
    /// [`ContourError::InvalidRange`] when a range is reversed or has a non-finite bound.
    pub fn new(
        x_range: RangeInclusive<Real>,
        y_range: RangeInclusive<Real>,
        step: Real,
    ) -> Result<Self> {
        Self::from_bounds(
            Point::new(*x_range.start(), *y_range.start()),
            Point::new(*x_range.end(), *y_range.end()),
            step,
        )
    }

    pub fn from_bounds(min: Point, max: Point, step: Real) -> Result<Self> {
        if !(step > 0.0 && step.is_finite()) {
            return Err(ContourError::InvalidStep(step));
        }
        for (lo, hi) in [(min.x, max.x), (min.y, max.y)] {
            if !(lo.is_finite() && hi.is_finite() && lo <= hi) {
                return Err(ContourError::InvalidRange { min: lo, max: hi });
            }
            // also catches `hi - lo` overflowing to infinity
            if !((hi - lo) / step < MAX_CELLS_PER_AXIS as Real) {
                return Err(ContourError::InvalidStep(step));
            }
        }
        Ok(Self {
            min,
            max,
            step,
            edge_placement: EdgePlacement::default(),
        })
    }

    pub const fn with_edge_placement(mut self, edge_placement: EdgePlacement) -> Self {
        self.edge_placement = edge_placement;
        self
    }

    pub const fn min(&self) -> Point {
        self.min
    }

    pub const fn max(&self) -> Point {
        self.max
    }

    pub const fn step(&self) -> Real {
        self.step
    }

    pub const fn edge_placement(&self) -> EdgePlacement {
        self.edge_placement
    }

    fn cells_along(&self, lo: Real, hi: Real) -> usize {
        (((hi - lo) / self.step + tolerance()).floor() as usize).saturating_add(1)
    }

    /// Number of cells along x.
    pub fn columns(&self) -> usize {
        self.cells_along(self.min.x, self.max.x)
    }

    /// Number of cells along y.
    pub fn rows(&self) -> usize {
        self.cells_along(self.min.y, self.max.y)
    }

    /// Centre of cell `(column, row)`.
    pub fn cell_center(&self, column: usize, row: usize) -> Point {
        Point::new(
            self.min.x + column as Real * self.step,
            self.min.y + row as Real * self.step,
        )
    }

    fn corner_lattice(&self, lo: Real, cells: usize) -> Vec<Real> {
        (0..=cells)
            .map(|i| lo + (i as Real - 0.5) * self.step)
            .collect()
    }

    pub(crate) fn clamp(&self, p: Point) -> Point {
        Point::new(
            p.x.clamp(self.min.x, self.max.x),
            p.y.clamp(self.min.y, self.max.y),
        )
    }
}

/// Field values at every cell corner, sampled once and shared by all thresholds.
///
/// Values are stored row-major, `values[row * xs.len() + column]`, with row 0 at the
/// smallest y ("top").
pub(crate) struct SampledGrid {
    pub xs: Vec<Real>,
    pub ys: Vec<Real>,
    pub values: Vec<Real>,
}

impl SampledGrid {
    /// The corner lattice with every value still unset (`0.0`).
    pub fn lattice(grid: &ContourGrid) -> Self {
        let xs = grid.corner_lattice(grid.min.x, grid.columns());
        let ys = grid.corner_lattice(grid.min.y, grid.rows());
        let values = vec![0.0; xs.len() * ys.len()];
        Self { xs, ys, values }
    }

    /// Fill one lattice row with field samples.
    pub fn sample_row<F>(xs: &[Real], y: Real, row: &mut [Real], field: &F)
    where
        F: Fn(Real, Real) -> Real,
    {
        for (value, &x) in row.iter_mut().zip(xs) {
            *value = field(x, y);
        }
    }

    #[inline]
    fn value(&self, column: usize, row: usize) -> Real {
        self.values[row * self.xs.len() + column]
    }

    #[inline]
    fn corner(&self, column: usize, row: usize) -> Point {
        Point::new(self.xs[column], self.ys[row])
    }

    /// All segments for one threshold, cells visited row by row.
    pub fn level_segments<F>(&self, grid: &ContourGrid, field: &F, threshold: Real) -> Vec<Segment>
    where
        F: Fn(Real, Real) -> Real,
    {
        let mut segments = Vec::new();
        let above = |value: Real| value > threshold;

        for row in 0..self.ys.len().saturating_sub(1) {
            for column in 0..self.xs.len().saturating_sub(1) {
                let case = case_index(
                    above(self.value(column, row)),
                    above(self.value(column + 1, row)),
                    above(self.value(column + 1, row + 1)),
                    above(self.value(column, row + 1)),
                );
                for &(from, to) in CASES[case] {
                    segments.push(Segment::new(
                        self.crossing(grid, field, threshold, column, row, from),
                        self.crossing(grid, field, threshold, column, row, to),
                    ));
                }
            }
        }

        segments
    }

    /// Where the contour crosses `edge` of cell `(column, row)`.
    fn crossing<F>(
        &self,
        grid: &ContourGrid,
        field: &F,
        threshold: Real,
        column: usize,
        row: usize,
        edge: Edge,
    ) -> Point
    where
        F: Fn(Real, Real) -> Real,
    {
        let top_left = self.corner(column, row);
        let top_right = self.corner(column + 1, row);
        let bottom_right = self.corner(column + 1, row + 1);
        let bottom_left = self.corner(column, row + 1);

        // canonical orientation: left to right, top to bottom
        let edge_segment = match edge {
            Edge::Top => Segment::new(top_left, top_right),
            Edge::Bottom => Segment::new(bottom_left, bottom_right),
            Edge::Left => Segment::new(top_left, bottom_left),
            Edge::Right => Segment::new(top_right, bottom_right),
        };

        let point = match grid.edge_placement {
            EdgePlacement::Midpoint => edge_segment.midpoint(),
            EdgePlacement::Refined { min_length } => edge_segment
                .point_at_threshold(|p: &Point| field(p.x, p.y) > threshold, min_length),
        };
        grid.clamp(point)
    }
}
