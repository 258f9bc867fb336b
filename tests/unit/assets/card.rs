use rand::SeedableRng;

use super::*;

fn corner_hull(x: f64, y: f64) -> Vec<Point> {
    vec![
        Point::new(x, y),
        Point::new(x + 8.0, y),
        Point::new(x + 8.0, y + 12.0),
        Point::new(x, y + 12.0),
    ]
}

fn blank(w: u32, h: u32) -> RgbaImage {
    RgbaImage::from_pixel(w, h, image::Rgba([240, 240, 240, 255]))
}

#[test]
fn valid_card_exposes_geometry() {
    let card = Card::new("Kh", blank(40, 60), vec![corner_hull(2.0, 2.0)]).unwrap();
    assert_eq!(card.value(), "Kh");
    assert_eq!(card.size(), (40, 60));
    assert!((card.radius() - 36.055_512_754_639_89).abs() < 1e-9);
    assert_eq!(card.symbol_polygons().len(), 1);
    assert_eq!(card.symbol_polygons()[0].label, "Kh");
    assert_eq!(card.outline().area(), 2400.0);
}

#[test]
fn card_without_hulls_is_rejected() {
    let err = Card::new("Kh", blank(40, 60), vec![]).unwrap_err();
    assert!(matches!(err, CardsceneError::Validation(_)));
}

#[test]
fn card_with_empty_raster_is_rejected() {
    let err = Card::new("Kh", RgbaImage::new(0, 10), vec![corner_hull(0.0, 0.0)]).unwrap_err();
    assert!(err.to_string().contains("non-positive size"));
}

#[test]
fn hull_outside_card_is_rejected() {
    let err = Card::new("Kh", blank(40, 60), vec![corner_hull(35.0, 2.0)]).unwrap_err();
    assert!(err.to_string().contains("outside"));

    let err = Card::new(
        "Kh",
        blank(40, 60),
        vec![vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)]],
    )
    .unwrap_err();
    assert!(err.to_string().contains("fewer than 3"));
}

#[test]
fn annotation_size_must_match_image() {
    let annotation = CardAnnotation {
        hulls: vec![vec![[1.0, 1.0], [5.0, 1.0], [5.0, 5.0]]],
        width: 41,
        height: 60,
    };
    assert!(annotation.clone().into_card("Qs", blank(40, 60)).is_err());

    let ok = CardAnnotation {
        width: 40,
        ..annotation
    };
    let card = ok.into_card("Qs", blank(40, 60)).unwrap();
    assert_eq!(card.hulls()[0][1], Point::new(5.0, 1.0));
}

#[test]
fn deck_sample_draws_distinct_cards() {
    let cards = ["As", "2s", "3s", "4s"]
        .iter()
        .map(|v| Card::new(*v, blank(20, 30), vec![corner_hull(1.0, 1.0)]).unwrap())
        .collect();
    let deck = CardDeck::new(cards);
    let mut rng = rand::rngs::StdRng::seed_from_u64(3);

    let drawn = deck.sample(&mut rng, 3).unwrap();
    let mut values: Vec<&str> = drawn.iter().map(Card::value).collect();
    values.sort_unstable();
    values.dedup();
    assert_eq!(values.len(), 3);

    assert!(deck.sample(&mut rng, 5).is_err());
    assert!(deck.sample(&mut rng, 0).is_err());
}
