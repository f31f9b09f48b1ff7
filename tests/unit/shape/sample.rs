use super::*;
use crate::foundation::core::is_normalized;
use crate::foundation::rng::garden_rng;

#[test]
fn stride_follows_area_over_target() {
    assert_eq!(direct_stride(100, 100, 100), 10);
    assert_eq!(direct_stride(10, 10, 1000), 1);
    assert_eq!(direct_stride(800, 600, 500), 30);
    assert_eq!(direct_stride(5, 5, 0), 1);
}

#[test]
fn direct_on_full_mask_returns_every_stride_cell() {
    let mask = BinaryMask::from_fn(100, 100, |_, _| true).unwrap();
    let mut rng = garden_rng(Some(1));
    let report = sample_direct(&mask, 100, &mut rng);
    assert_eq!(report.points.len(), 100);
    assert_eq!(report.padded, 0);
    assert!(report.points.iter().all(|p| is_normalized(*p)));
}

#[test]
fn direct_caps_at_target() {
    // Stride 1 on a 30x30 mask reaches 900 cells, far above the target.
    let mask = BinaryMask::from_fn(30, 30, |_, _| true).unwrap();
    let mut rng = garden_rng(Some(2));
    let report = sample_direct(&mask, 850, &mut rng);
    assert_eq!(direct_stride(30, 30, 850), 1);
    assert_eq!(report.points.len(), 850);
}

#[test]
fn direct_below_target_keeps_reachable_count() {
    // 7x7 with stride 2 reaches 4x4 = 16 cells, target 20: 16 >= 10 so no padding.
    let mask = BinaryMask::from_fn(7, 7, |_, _| true).unwrap();
    let mut rng = garden_rng(Some(3));
    assert_eq!(direct_stride(7, 7, 12), 2);
    let report = sample_direct(&mask, 12, &mut rng);
    assert_eq!(report.points.len(), 12);

    let report = sample_direct(&mask, 20, &mut rng);
    assert_eq!(direct_stride(7, 7, 20), 1);
    assert_eq!(report.points.len(), 20);
}

#[test]
fn direct_pads_sparse_shapes() {
    let mask = BinaryMask::from_fn(100, 100, |x, y| (x, y) == (0, 0)).unwrap();
    let mut rng = garden_rng(Some(4));
    let report = sample_direct(&mask, 100, &mut rng);
    assert_eq!(report.points.len(), 100);
    assert_eq!(report.padded, 99);
    assert!(report.points.iter().all(|p| is_normalized(*p)));
}

#[test]
fn direct_on_empty_mask_returns_nothing() {
    let mask = BinaryMask::from_fn(50, 50, |_, _| false).unwrap();
    let mut rng = garden_rng(Some(5));
    let report = sample_direct(&mask, 100, &mut rng);
    assert!(report.points.is_empty());
    assert_eq!(report.padded, 0);
}

#[test]
fn rejection_respects_attempt_budget_on_zero_area() {
    let line = Polygon::new(vec![Point::new(10.0, 10.0), Point::new(90.0, 10.0)]);
    let mut rng = garden_rng(Some(6));
    let report = sample_rejection(&line, 50, &mut rng);
    assert!(report.points.is_empty());
    assert_eq!(report.attempts, 50 * REJECTION_ATTEMPT_FACTOR);
}

#[test]
fn rejection_fills_convex_polygon() {
    let poly = Polygon::new(vec![
        Point::new(20.0, 20.0),
        Point::new(80.0, 20.0),
        Point::new(80.0, 80.0),
        Point::new(20.0, 80.0),
    ]);
    let mut rng = garden_rng(Some(7));
    let report = sample_rejection(&poly, 200, &mut rng);
    assert_eq!(report.points.len(), 200);
    assert!(report.attempts <= 200 * REJECTION_ATTEMPT_FACTOR);
    assert!(report.points.iter().all(|p| poly.contains(*p)));
}

#[test]
fn rejection_on_empty_polygon_is_empty() {
    let mut rng = garden_rng(Some(8));
    let report = sample_rejection(&Polygon::default(), 10, &mut rng);
    assert_eq!(report, SampleReport::default());
}

#[test]
fn seeded_runs_agree_on_count_and_positions() {
    let mask = BinaryMask::from_fn(64, 64, |x, y| (x + y) % 3 == 0).unwrap();
    let a = sample_direct(&mask, 200, &mut garden_rng(Some(9)));
    let b = sample_direct(&mask, 200, &mut garden_rng(Some(9)));
    assert_eq!(a, b);
}

#[test]
fn odd_target_pads_just_below_half() {
    let mask = BinaryMask::from_fn(101, 1, |x, _| x < 50).unwrap();
    let report = sample_direct(&mask, 101, &mut garden_rng(Some(10)));
    assert_eq!(report.points.len(), 101);
    assert_eq!(report.padded, 51);
    assert!(report.points.iter().all(|p| is_normalized(*p)));

    let half = BinaryMask::from_fn(100, 1, |x, _| x < 50).unwrap();
    let report = sample_direct(&half, 100, &mut garden_rng(Some(10)));
    assert_eq!(report.points.len(), 50);
    assert_eq!(report.padded, 0);
}
