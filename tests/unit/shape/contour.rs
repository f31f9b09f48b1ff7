use super::*;
use crate::foundation::core::{Point, is_normalized};

#[test]
fn all_background_gives_empty_polygon() {
    let mask = BinaryMask::from_fn(8, 8, |_, _| false).unwrap();
    assert!(trace_contour(&mask).is_empty());
}

#[test]
fn isolated_pixel_terminates_with_single_vertex() {
    let mask = BinaryMask::from_fn(5, 5, |x, y| (x, y) == (2, 2)).unwrap();
    let poly = trace_contour(&mask);
    assert_eq!(poly.points(), &[Point::new(40.0, 40.0)]);
}

#[test]
fn square_boundary_is_walked_clockwise_once() {
    let mask =
        BinaryMask::from_fn(5, 5, |x, y| (1..4).contains(&x) && (1..4).contains(&y)).unwrap();
    let poly = trace_contour(&mask);
    let px: Vec<(f64, f64)> = poly.points().iter().map(|p| (p.x / 20.0, p.y / 20.0)).collect();
    assert_eq!(
        px,
        vec![
            (1.0, 1.0),
            (2.0, 1.0),
            (3.0, 1.0),
            (3.0, 2.0),
            (3.0, 3.0),
            (2.0, 3.0),
            (1.0, 3.0),
            (1.0, 2.0),
        ]
    );
    // Interior pixel is never visited.
    assert!(!poly.points().contains(&Point::new(40.0, 40.0)));
}

#[test]
fn shape_touching_the_border_is_traced_and_normalized() {
    let mask = BinaryMask::from_fn(4, 4, |_, _| true).unwrap();
    let poly = trace_contour(&mask);
    assert_eq!(poly.len(), 12);
    assert!(poly.points().iter().all(|p| is_normalized(*p)));
    assert_eq!(poly.points()[0], Point::new(0.0, 0.0));
}

#[test]
fn thin_diagonal_line_terminates() {
    let mask = BinaryMask::from_fn(6, 6, |x, y| x == y).unwrap();
    let poly = trace_contour(&mask);
    assert!(!poly.is_empty());
    assert!(poly.len() <= 6);
}

#[test]
fn traced_polygon_contains_interior() {
    let mask =
        BinaryMask::from_fn(20, 20, |x, y| (4..16).contains(&x) && (4..16).contains(&y)).unwrap();
    let poly = trace_contour(&mask);
    assert!(poly.contains(Point::new(50.0, 50.0)));
    assert!(!poly.contains(Point::new(5.0, 5.0)));
}
