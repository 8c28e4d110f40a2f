use super::*;

#[test]
fn defaults_match_the_documented_constants() {
    let t = Timings::default();
    assert_eq!(t.draw_in_secs, 4.0);
    assert_eq!(t.gradient_period_secs, 6.0);
    assert_eq!(t.formation_secs, 2.0);
    assert_eq!(t.spawn_interval_secs, 0.15);
    assert_eq!(t.shower_cap, 50);
    assert_eq!(t.fall_secs, 1.5);
    assert_eq!(t.sample_count, 400);
    assert_eq!(t.attempt_multiplier, 10);
    assert!(t.formation_ease.is_ease_out());
    assert!(CelebrationConfig::default().validate().is_ok());
}

#[test]
fn partial_json_fills_defaults() {
    let cfg = CelebrationConfig::from_json_str(
        r#"{ "text": "2026", "seed": 7, "timings": { "shower_cap": 10 } }"#,
    )
    .unwrap();
    assert_eq!(cfg.text, "2026");
    assert_eq!(cfg.seed, 7);
    assert_eq!(cfg.timings.shower_cap, 10);
    assert_eq!(cfg.timings.fall_secs, 1.5);
    assert_eq!(cfg.placement_size, Size::new(350.0, 120.0));
}

#[test]
fn invalid_values_are_rejected() {
    let bad = [
        r#"{ "text": "  " }"#,
        r#"{ "timings": { "formation_secs": 0.0 } }"#,
        r#"{ "timings": { "rotation_tick_hz": 0 } }"#,
        r#"{ "timings": { "attempt_multiplier": 0 } }"#,
        r#"{ "timings": { "rotation_speed_range": [200.0, 30.0] } }"#,
        r#"{ "timings": { "confetti_size_range": [30.0, 10.0] } }"#,
        r#"{ "timings": { "spawn_interval_secs": -0.15 } }"#,
        r#"{ "palettes": { "confetti": [] } }"#,
        r##"{ "palettes": { "formation": ["#12"] } }"##,
        r#"{ "canvas": { "width": 0, "height": 10 } }"#,
        r#"{ "placement_size": { "width": -1.0, "height": 10.0 } }"#,
        r#"{ "font": { "size_px": 0.0 } }"#,
    ];
    for json in bad {
        let err = CelebrationConfig::from_json_str(json).unwrap_err();
        assert!(matches!(err, BurstError::Validation(_)), "{json}: {err}");
    }
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = CelebrationConfig::from_json_str("{ text: ").unwrap_err();
    assert!(matches!(err, BurstError::Serde(_)));
}

#[test]
fn reader_and_str_agree() {
    let json = r#"{ "text": "1999" }"#;
    let a = CelebrationConfig::from_json_str(json).unwrap();
    let b = CelebrationConfig::from_json_reader(json.as_bytes()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn placement_and_launch_derive_from_canvas() {
    let cfg = CelebrationConfig {
        canvas: Canvas {
            width: 400,
            height: 800,
        },
        ..CelebrationConfig::default()
    };
    assert_eq!(cfg.placement_rect(), Rect::new(25.0, 340.0, 375.0, 460.0));
    assert_eq!(cfg.launch_point(), Point::new(200.0, 800.0));

    let cfg = CelebrationConfig {
        launch: Some(Point::new(1.0, 2.0)),
        ..cfg
    };
    assert_eq!(cfg.launch_point(), Point::new(1.0, 2.0));
}

#[test]
fn shower_settings_mirror_timings() {
    let mut t = Timings::default();
    t.shower_cap = 3;
    t.fall_secs = 2.0;
    let s = t.shower_settings();
    assert_eq!(s.cap, 3);
    assert_eq!(s.fall_secs, 2.0);
    assert_eq!(s.rotation_ticks(), 120);
}

#[test]
fn palette_overrides_replace_the_builtin_lists() {
    let cfg = CelebrationConfig::from_json_str(
        r##"{ "palettes": { "confetti": ["#ff0000", "#0000ff80"] } }"##,
    )
    .unwrap();
    assert_eq!(cfg.palettes.formation().unwrap(), Palette::formation());
    let confetti = cfg.palettes.confetti().unwrap();
    assert_ne!(confetti, Palette::confetti());
    assert_eq!(confetti.len(), 2);
    assert!(!cfg.keep_formation);
}
