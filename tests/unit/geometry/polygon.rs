use super::*;

fn square(label: &str, x0: f64, y0: f64, side: f64) -> Polygon {
    Polygon::new(
        label,
        vec![
            Point::new(x0, y0),
            Point::new(x0 + side, y0),
            Point::new(x0 + side, y0 + side),
            Point::new(x0, y0 + side),
        ],
    )
}

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-9, "{a} != {b}");
}

#[test]
fn area_ignores_orientation() {
    let cw = square("a", 0.0, 0.0, 4.0);
    let mut ccw = cw.clone();
    ccw.points.reverse();
    approx(cw.area(), 16.0);
    approx(ccw.area(), 16.0);
    assert_eq!(cw.signed_area(), -ccw.signed_area());
}

#[test]
fn intersection_of_disjoint_squares_is_zero() {
    let a = square("a", 0.0, 0.0, 10.0);
    let b = square("b", 20.0, 20.0, 5.0);
    approx(a.intersection_area(&b), 0.0);
    approx(a.uncovered_fraction(&b), 1.0);
}

#[test]
fn contained_subject_is_fully_covered() {
    let small = square("s", 2.0, 2.0, 3.0);
    let big = square("b", 0.0, 0.0, 10.0);
    approx(small.intersection_area(&big), 9.0);
    approx(small.uncovered_fraction(&big), 0.0);
}

#[test]
fn half_overlap_is_exact() {
    let subject = square("s", 0.0, 0.0, 10.0);
    let cover = Polygon::new(
        "c",
        vec![
            Point::new(5.0, -5.0),
            Point::new(20.0, -5.0),
            Point::new(20.0, 15.0),
            Point::new(5.0, 15.0),
        ],
    );
    assert_eq!(subject.intersection_area(&cover), 50.0);
    assert_eq!(subject.uncovered_fraction(&cover), 0.5);
}

#[test]
fn rotated_clip_matches_known_area() {
    // Diamond inscribed in the unit-ish square covers exactly half of it.
    let subject = square("s", 0.0, 0.0, 2.0);
    let diamond = Polygon::new(
        "d",
        vec![
            Point::new(1.0, 0.0),
            Point::new(2.0, 1.0),
            Point::new(1.0, 2.0),
            Point::new(0.0, 1.0),
        ],
    );
    approx(subject.intersection_area(&diamond), 2.0);
}

#[test]
fn clip_orientation_does_not_matter() {
    let subject = square("s", 0.0, 0.0, 10.0);
    let cover = square("c", 5.0, 5.0, 10.0);
    let mut reversed = cover.clone();
    reversed.points.reverse();
    approx(subject.intersection_area(&cover), 25.0);
    approx(subject.intersection_area(&reversed), 25.0);
}

#[test]
fn degenerate_polygon_is_fully_occluded() {
    let line = Polygon::new("l", vec![Point::new(0.0, 0.0), Point::new(5.0, 5.0)]);
    let flat = Polygon::new(
        "f",
        vec![
            Point::new(0.0, 0.0),
            Point::new(5.0, 0.0),
            Point::new(10.0, 0.0),
        ],
    );
    let far = square("c", 100.0, 100.0, 1.0);
    assert!(line.is_degenerate());
    assert!(flat.is_degenerate());
    assert_eq!(line.uncovered_fraction(&far), 0.0);
    assert_eq!(flat.uncovered_fraction(&far), 0.0);
}

#[test]
fn transform_and_projection_move_points() {
    let p = square("s", 1.0, 1.0, 2.0);
    let moved = p.translated(Vec2::new(3.0, -1.0));
    assert_eq!(moved.points[0], Point::new(4.0, 0.0));
    assert_eq!(moved.label, "s");

    let from = Canvas::new(100, 50).unwrap();
    let to = Canvas::new(200, 200).unwrap();
    let projected = p.projected(from, to);
    assert_eq!(projected.points[2], Point::new(6.0, 12.0));
}

#[test]
fn bounding_box_uses_point_extrema() {
    let p = Polygon::new(
        "k",
        vec![
            Point::new(3.0, 7.0),
            Point::new(-1.0, 2.0),
            Point::new(5.0, 4.0),
        ],
    );
    let b = p.bounding_box().unwrap();
    assert_eq!((b.x1, b.y1, b.x2, b.y2), (-1.0, 2.0, 5.0, 7.0));
    assert_eq!(b.label, "k");
}
