use super::*;

#[test]
fn defaults_are_valid() {
    SceneConfig::default().validate().unwrap();
}

#[test]
fn empty_json_yields_defaults() {
    let cfg: SceneConfig = serde_json::from_str("{}").unwrap();
    assert_eq!(cfg, SceneConfig::default());
    assert_eq!(cfg.max_attempts, 3);
    assert_eq!(cfg.visibility_threshold, 0.5);
}

#[test]
fn partial_json_overrides_selected_fields() {
    let cfg: SceneConfig = serde_json::from_str(
        r#"{"placement": "pair", "full_occlusion": "accept", "global": {"scale": [1.0, 1.0]}}"#,
    )
    .unwrap();
    assert_eq!(cfg.placement, PlacementScheme::Pair);
    assert_eq!(cfg.full_occlusion, FullOcclusionPolicy::Accept);
    assert_eq!(cfg.global.scale, [1.0, 1.0]);
    assert_eq!(cfg.global.shear_deg, [-10.0, 10.0]);
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(serde_json::from_str::<SceneConfig>(r#"{"max_attempt": 2}"#).is_err());
}

#[test]
fn invalid_values_are_rejected() {
    let cases = [
        SceneConfig {
            max_attempts: 0,
            ..SceneConfig::default()
        },
        SceneConfig {
            visibility_threshold: 1.0,
            ..SceneConfig::default()
        },
        SceneConfig {
            rotation_deg: [10.0, -10.0],
            ..SceneConfig::default()
        },
        SceneConfig {
            output_size: 0,
            ..SceneConfig::default()
        },
        SceneConfig {
            background_scale: 0.5,
            ..SceneConfig::default()
        },
        SceneConfig {
            global: GlobalTransformConfig {
                scale: [0.0, 1.0],
                ..GlobalTransformConfig::default()
            },
            ..SceneConfig::default()
        },
        SceneConfig {
            global: GlobalTransformConfig {
                shear_deg: [-85.0, 0.0],
                ..GlobalTransformConfig::default()
            },
            ..SceneConfig::default()
        },
    ];
    for cfg in cases {
        assert!(cfg.validate().is_err(), "{cfg:?}");
    }
}

#[test]
fn retry_policy_mirrors_config() {
    let cfg = SceneConfig {
        max_attempts: 5,
        visibility_threshold: 0.9,
        ..SceneConfig::default()
    };
    let policy = cfg.retry_policy();
    assert_eq!(policy.max_attempts, 5);
    assert_eq!(policy.visibility_threshold, 0.9);
    assert_eq!(policy.full_occlusion, FullOcclusionPolicy::Retry);
}
