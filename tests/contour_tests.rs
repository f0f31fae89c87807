mod support;

use isolines::{
    contour::{ContourGrid, ContourOps, EdgePlacement, SerialContourOps},
    errors::ContourError,
    float_types::Real,
};
use support::{approx_eq, line, radius, segment_multiset};

fn circle(x: Real, y: Real) -> Real {
    x * x + y * y - 25.0
}

fn ripples(x: Real, y: Real) -> Real {
    (0.7 * x).sin() * (0.5 * y).cos() + 0.05 * x
}

#[test]
fn circle_contour_is_one_closed_loop_near_radius_five() {
    let grid = ContourGrid::new(-10.0..=10.0, -10.0..=10.0, 1.0).unwrap();
    let levels = grid.isolines(circle, &[0.0]).unwrap();
    assert_eq!(levels.len(), 1);
    assert_eq!(levels[0].threshold, 0.0);

    let loops = &levels[0].polylines;
    assert_eq!(loops.len(), 1);
    for polyline in loops {
        assert!(polyline.is_closed(), "contour loop not closed: {polyline:?}");
        for p in &polyline.points {
            assert!(
                (radius(p) - 5.0).abs() < grid.step(),
                "point {p:?} is {} from the origin",
                radius(p)
            );
        }
    }
}

#[test]
fn refined_crossings_still_close_and_hug_the_circle() {
    let grid = ContourGrid::new(-10.0..=10.0, -10.0..=10.0, 1.0)
        .unwrap()
        .with_edge_placement(EdgePlacement::Refined { min_length: 1e-4 });
    let levels = grid.isolines(circle, &[0.0]).unwrap();

    let loops = &levels[0].polylines;
    assert_eq!(loops.len(), 1);
    assert!(loops[0].is_closed());
    for p in &loops[0].points {
        assert!(approx_eq(radius(p), 5.0, 1e-3), "{p:?} strayed off the circle");
    }
}

#[test]
fn negated_field_and_threshold_give_the_same_segments() {
    let grid = ContourGrid::new(-8.0..=8.0, -6.0..=6.0, 0.5).unwrap();
    for threshold in [-0.3, 0.1, 0.45] {
        let direct = grid.contour_segments(ripples, &[threshold]).unwrap();
        let negated = grid
            .contour_segments(|x, y| -ripples(x, y), &[-threshold])
            .unwrap();
        assert_eq!(direct[0].segments.len(), negated[0].segments.len());
        assert_eq!(
            segment_multiset(&direct[0].segments),
            segment_multiset(&negated[0].segments),
            "threshold {threshold}"
        );
    }
}

#[test]
fn tied_corners_count_as_below() {
    // corner x-coordinates are -0.5, 0.5, 1.5, 2.5; the middle-left one equals the threshold
    let grid = ContourGrid::new(0.0..=2.0, 0.0..=2.0, 1.0).unwrap();
    let direct = grid.contour_segments(|x, _| x, &[0.5]).unwrap();
    let negated = grid.contour_segments(|x, _| -x, &[-0.5]).unwrap();

    assert!(!direct[0].segments.is_empty());
    assert!(
        direct[0].segments.iter().all(|s| s.p1.x == 1.0 && s.p2.x == 1.0),
        "tied corner should fall below for f: {:?}",
        direct[0].segments
    );
    assert!(
        negated[0].segments.iter().all(|s| s.p1.x == 0.0 && s.p2.x == 0.0),
        "tied corner should fall below for -f: {:?}",
        negated[0].segments
    );
    assert_ne!(
        segment_multiset(&direct[0].segments),
        segment_multiset(&negated[0].segments)
    );
}

#[test]
fn contour_leaving_the_domain_is_open_and_clamped() {
    let grid = ContourGrid::new(0.0..=2.0, 0.0..=2.0, 1.0).unwrap();
    let levels = grid.isolines(|x, _| x, &[0.3]).unwrap();
    assert_eq!(
        levels[0].polylines,
        vec![line(&[(0.0, 0.0), (0.0, 0.5), (0.0, 1.5), (0.0, 2.0)])]
    );
    assert!(!levels[0].polylines[0].is_closed());
}

#[test]
fn levels_follow_threshold_order() {
    let grid = ContourGrid::new(-10.0..=10.0, -10.0..=10.0, 1.0).unwrap();
    let thresholds = [11.0, -9.0, 0.0, 500.0];
    let levels = grid.contour_segments(circle, &thresholds).unwrap();
    let order: Vec<Real> = levels.iter().map(|l| l.threshold).collect();
    assert_eq!(order, thresholds);
    assert!(levels[3].segments.is_empty(), "no level above the field maximum");
    assert!(levels[1].segments.len() < levels[0].segments.len());
}

#[test]
fn flat_field_has_no_contour() {
    let grid = ContourGrid::new(0.0..=5.0, 0.0..=5.0, 1.0).unwrap();
    let levels = grid.isolines(|_, _| 1.0, &[1.0, 0.0, 2.0]).unwrap();
    assert!(levels.iter().all(|l| l.polylines.is_empty()));
}

#[test]
fn non_finite_thresholds_are_rejected() {
    let grid = ContourGrid::new(0.0..=1.0, 0.0..=1.0, 0.5).unwrap();
    assert!(matches!(
        grid.isolines(circle, &[0.0, Real::NAN]),
        Err(ContourError::InvalidThreshold(t)) if t.is_nan()
    ));
    assert_eq!(
        grid.contour_segments(circle, &[Real::INFINITY]),
        Err(ContourError::InvalidThreshold(Real::INFINITY))
    );
    assert_eq!(grid.isolines(circle, &[]), Ok(Vec::new()));
}

#[test]
fn grid_rejects_bad_steps_and_ranges() {
    assert_eq!(
        ContourGrid::new(0.0..=1.0, 0.0..=1.0, 0.0),
        Err(ContourError::InvalidStep(0.0))
    );
    assert!(matches!(
        ContourGrid::new(0.0..=1.0, 5.0..=1.0, 1.0),
        Err(ContourError::InvalidRange { .. })
    ));
}

#[test]
fn serial_ops_match_the_convenience_api() {
    let grid = ContourGrid::new(-5.0..=5.0, -5.0..=5.0, 0.25).unwrap();
    let thresholds = [-0.5, 0.0, 0.5];
    let direct = SerialContourOps::new()
        .isolines(ripples, &grid, &thresholds)
        .unwrap();
    assert_eq!(grid.isolines(ripples, &thresholds).unwrap(), direct);
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_matches_serial() {
    use isolines::contour::ParallelContourOps;

    let grid = ContourGrid::new(-12.0..=12.0, -7.0..=9.0, 0.3)
        .unwrap()
        .with_edge_placement(EdgePlacement::Refined { min_length: 1e-3 });
    let thresholds = [-0.6, -0.2, 0.0, 0.25, 0.9];
    let serial = SerialContourOps::new()
        .isolines(ripples, &grid, &thresholds)
        .unwrap();
    let parallel = ParallelContourOps::new()
        .isolines(ripples, &grid, &thresholds)
        .unwrap();
    assert_eq!(serial, parallel);
}
