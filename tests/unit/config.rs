use super::*;

#[test]
fn defaults_are_valid() {
    let cfg = GardenConfig::default();
    cfg.validate().unwrap();
    assert_eq!(cfg.target_points, 500);
    assert_eq!(cfg.sampler, SamplerKind::Direct);
    assert_eq!(cfg.capture_opts().unwrap().frame_budget(), 150);
    assert_eq!(cfg.background_rgba().unwrap(), None);
}

#[test]
fn partial_json_keeps_defaults() {
    let cfg = GardenConfig::from_json_str(
        r##"{
            "target_points": 200,
            "sampler": "rejection",
            "edges": { "mode": "gradient" },
            "words": ["a", "  ", "b "],
            "background": "#101010",
            "color_mode": "rainbow"
        }"##,
    )
    .unwrap();
    cfg.validate().unwrap();
    assert_eq!(cfg.target_points, 200);
    assert_eq!(cfg.sampler, SamplerKind::Rejection);
    assert_eq!(cfg.edges, EdgeMode::gradient());
    assert_eq!(cfg.fps, 30);
    assert_eq!(cfg.word_list(), vec!["a".to_string(), "b".to_string()]);

    let opts = cfg.capture_opts().unwrap();
    assert!(!opts.compositor.preserve_transparency);
    assert_eq!(opts.compositor.background_rgba, [16, 16, 16, 255]);
}

#[test]
fn unknown_fields_are_rejected() {
    assert!(GardenConfig::from_json_str(r#"{ "target_pionts": 3 }"#).is_err());
}

#[test]
fn validation_catches_bad_values() {
    let bad = [
        GardenConfig {
            target_points: 0,
            ..GardenConfig::default()
        },
        GardenConfig {
            duration_secs: 0.0,
            ..GardenConfig::default()
        },
        GardenConfig {
            fps: 0,
            ..GardenConfig::default()
        },
        GardenConfig {
            width: 801,
            ..GardenConfig::default()
        },
        GardenConfig {
            words: vec![" ".into()],
            ..GardenConfig::default()
        },
        GardenConfig {
            background: "plaid".into(),
            ..GardenConfig::default()
        },
    ];
    for cfg in bad {
        assert!(
            matches!(cfg.validate(), Err(GardenError::Validation(_))),
            "{cfg:?}"
        );
    }
}

#[test]
fn missing_file_is_an_error() {
    let err = GardenConfig::load(Path::new("/definitely/not/here.json")).unwrap_err();
    assert!(matches!(err, GardenError::Other(_)));
}

#[test]
fn oversized_duration_is_an_error_not_a_panic() {
    let cfg = GardenConfig {
        duration_secs: 1e20,
        ..GardenConfig::default()
    };
    assert!(matches!(cfg.validate(), Err(GardenError::Validation(_))));
    assert!(matches!(cfg.capture_opts(), Err(GardenError::Validation(_))));

    let negative = GardenConfig {
        duration_secs: -1.0,
        ..GardenConfig::default()
    };
    assert!(matches!(negative.capture_opts(), Err(GardenError::Validation(_))));
}
