use std::path::PathBuf;

use crate::foundation::core::Point;

use super::*;

fn card(value: &str) -> Card {
    Card::new(
        value,
        RgbaImage::from_pixel(48, 72, image::Rgba([250, 250, 250, 255])),
        vec![
            vec![
                Point::new(2.0, 2.0),
                Point::new(12.0, 2.0),
                Point::new(12.0, 18.0),
                Point::new(2.0, 18.0),
            ],
            vec![
                Point::new(36.0, 54.0),
                Point::new(46.0, 54.0),
                Point::new(46.0, 70.0),
                Point::new(36.0, 70.0),
            ],
        ],
    )
    .unwrap()
}

fn classes() -> ClassMap {
    ClassMap::from_pairs([("As", 0), ("2s", 1), ("3s", 2)])
}

fn small_config() -> SceneConfig {
    SceneConfig {
        output_size: 96,
        ..SceneConfig::default()
    }
}

#[test]
fn render_scene_produces_square_image_and_normalized_labels() {
    let cards = [card("As"), card("2s"), card("3s")];
    let bg = Background::solid(4, 4, [30, 30, 30, 255]).unwrap();
    let mut rng = StdRng::seed_from_u64(17);
    let out = render_scene(&cards, &bg, &classes(), &small_config(), &mut rng).unwrap();

    assert_eq!(out.image.dimensions(), (96, 96));
    assert_eq!(out.stats.cards_requested, 3);
    assert!(!out.labels.is_empty());
    // The topmost placed card always keeps both of its symbols.
    assert!(out.labels.len() >= 2);
    for l in &out.labels {
        assert!(l.class_id <= 2);
        for v in [l.center_x, l.center_y, l.width, l.height] {
            assert!((0.0..=1.0).contains(&v), "{v}");
        }
    }
}

#[test]
fn render_scene_is_reproducible_for_a_seed() {
    let cards = [card("As"), card("2s")];
    let bg = Background::solid(4, 4, [30, 30, 30, 255]).unwrap();
    let a = render_scene(&cards, &bg, &classes(), &small_config(), &mut StdRng::seed_from_u64(5))
        .unwrap();
    let b = render_scene(&cards, &bg, &classes(), &small_config(), &mut StdRng::seed_from_u64(5))
        .unwrap();
    assert_eq!(a.image, b.image);
    assert_eq!(a.labels, b.labels);
}

#[test]
fn unknown_class_fails_the_scene() {
    let cards = [card("Qx")];
    let bg = Background::solid(4, 4, [30, 30, 30, 255]).unwrap();
    let err = render_scene(&cards, &bg, &classes(), &small_config(), &mut StdRng::seed_from_u64(1))
        .unwrap_err();
    assert!(matches!(err, CardsceneError::Label(_)));
}

#[test]
fn zero_threads_is_rejected() {
    assert!(build_thread_pool(Some(0)).is_err());
    assert!(build_thread_pool(Some(2)).is_ok());
}

#[test]
fn in_memory_dataset_run_writes_every_scene() {
    let out_dir = PathBuf::from("target").join("unit_pipeline_dataset");
    let _ = std::fs::remove_dir_all(&out_dir);
    let config = DatasetConfig::from_json_str(&format!(
        r#"{{
            "cards_dir": "unused",
            "class_mapping": "unused.json",
            "output_dir": {out:?},
            "scenes": 6,
            "cards_per_scene": 2,
            "seed": 99,
            "threads": 2,
            "scene": {{"output_size": 64}}
        }}"#,
        out = out_dir.to_string_lossy()
    ))
    .unwrap();
    let sources = DatasetSources {
        deck: CardDeck::new(vec![card("As"), card("2s"), card("3s")]),
        classes: classes(),
        backgrounds: Box::new(SolidBackground {
            rgba: [90, 90, 90, 255],
        }),
    };

    let stats = render_dataset_with(&config, &sources).unwrap();
    assert_eq!(stats.scenes, 6);
    assert_eq!(stats.train + stats.val + stats.test, 6);
    assert_eq!(stats.placement.cards_requested, 12);

    let layout = DatasetLayout::new(&out_dir);
    let mut labels = 0;
    for index in 0..6 {
        let (split, out) = sources.render_index(&config, index).unwrap();
        assert!(layout.image_path(split, index).is_file());
        let text = std::fs::read_to_string(layout.label_path(split, index)).unwrap();
        assert_eq!(text.lines().count(), out.labels.len());
        labels += out.labels.len();
    }
    assert_eq!(labels, stats.labels);
}
