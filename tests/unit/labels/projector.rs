use super::*;
use crate::{
    foundation::core::{Point, Vec2},
    geometry::polygon::Polygon,
};

fn square(label: &str, x: f64, y: f64, side: f64) -> Polygon {
    Polygon::rect(label, side, side).translated(Vec2::new(x, y))
}

fn classes() -> ClassMap {
    ClassMap::from_pairs([("Ah", 0), ("Kh", 12)])
}

#[test]
fn projects_working_boxes_into_output_frame() {
    let classes = classes();
    let ledger = VisibilityLedger::default().with_card("Kh", vec![square("Kh", 100.0, 200.0, 100.0)]);
    let projector = LabelProjector::new(&classes, 0.0).unwrap();
    let lines = projector.project(&ledger, 1000, 500).unwrap();
    assert_eq!(lines.len(), 1);
    let l = lines[0];
    assert_eq!(l.class_id, 12);
    assert!((l.center_x - 0.15).abs() < 1e-12);
    assert!((l.center_y - 0.25).abs() < 1e-12);
    assert!((l.width - 0.1).abs() < 1e-12);
    assert!((l.height - 0.1).abs() < 1e-12);
}

#[test]
fn padding_is_applied_in_output_pixels() {
    let classes = classes();
    let ledger = VisibilityLedger::default().with_card("Ah", vec![square("Ah", 10.0, 10.0, 20.0)]);
    let projector = LabelProjector::new(&classes, 3.0).unwrap();
    let boxes = projector.boxes(&ledger, 100, 100).unwrap();
    let (_, b) = &boxes[0];
    assert_eq!((b.x1, b.y1, b.x2, b.y2), (7.0, 7.0, 33.0, 33.0));
}

#[test]
fn emitted_boxes_stay_on_canvas() {
    let classes = classes();
    let ledger = VisibilityLedger::default()
        .with_card("Ah", vec![square("Ah", -15.0, -5.0, 30.0)])
        .with_card("Kh", vec![square("Kh", 190.0, 180.0, 40.0)]);
    let projector = LabelProjector::new(&classes, 3.0).unwrap();
    let lines = projector.project(&ledger, 200, 640).unwrap();
    assert_eq!(lines.len(), 2);
    for l in &lines {
        let b = l.normalized().denormalized(640.0, "x");
        assert!(b.x1 >= -1e-9 && b.y1 >= -1e-9);
        assert!(b.x2 <= 640.0 + 1e-9 && b.y2 <= 640.0 + 1e-9);
    }
}

#[test]
fn boxes_clamped_to_nothing_are_skipped() {
    let classes = classes();
    let ledger = VisibilityLedger::default().with_card("Ah", vec![square("Ah", 300.0, 300.0, 10.0)]);
    let projector = LabelProjector::new(&classes, 0.0).unwrap();
    assert!(projector.project(&ledger, 200, 200).unwrap().is_empty());
}

#[test]
fn unknown_class_aborts_projection() {
    let classes = classes();
    let ledger = VisibilityLedger::default()
        .with_card("Ah", vec![square("Ah", 0.0, 0.0, 10.0)])
        .with_card("Zz", vec![square("Zz", 20.0, 0.0, 10.0)]);
    let projector = LabelProjector::new(&classes, 0.0).unwrap();
    let err = projector.project(&ledger, 100, 100).unwrap_err();
    assert!(matches!(err, CardsceneError::Label(_)));
}

#[test]
fn one_line_per_retained_symbol() {
    let classes = classes();
    let ledger = VisibilityLedger::default().with_card(
        "Ah",
        vec![
            square("Ah", 0.0, 0.0, 10.0),
            Polygon::new(
                "Ah",
                vec![
                    Point::new(50.0, 50.0),
                    Point::new(60.0, 55.0),
                    Point::new(52.0, 70.0),
                ],
            ),
        ],
    );
    let projector = LabelProjector::new(&classes, 0.0).unwrap();
    let lines = projector.project(&ledger, 100, 100).unwrap();
    assert_eq!(lines.len(), 2);
    assert!((lines[1].width - 0.1).abs() < 1e-12);
    assert!((lines[1].height - 0.2).abs() < 1e-12);
}

#[test]
fn line_format_uses_six_decimals() {
    let l = LabelLine {
        class_id: 7,
        center_x: 0.5,
        center_y: 0.25,
        width: 0.125,
        height: 1.0 / 3.0,
    };
    assert_eq!(l.to_line(), "7 0.500000 0.250000 0.125000 0.333333");
    assert_eq!(format_labels(&[l, l]).lines().count(), 2);
}

#[test]
fn negative_padding_is_rejected() {
    let classes = classes();
    assert!(LabelProjector::new(&classes, -1.0).is_err());
}
