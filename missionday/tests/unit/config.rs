use super::*;

#[test]
fn empty_object_is_the_default_config() {
    let cfg = MissionConfig::from_reader("{}".as_bytes()).unwrap();
    assert_eq!(cfg, MissionConfig::default());
    assert_eq!(cfg.tick_interval(), Duration::from_secs(1));
    assert_eq!(cfg.chroma.min_green, 100);
    assert_eq!(cfg.phases.far_after_days, 100);
}

#[test]
fn partial_sections_keep_other_defaults() {
    let json = r#"{
        "chroma": { "min_green": 80 },
        "phases": { "approaching_after_days": 14, "dialog": { "arrived": "Boom!" } }
    }"#;
    let cfg = MissionConfig::from_reader(json.as_bytes()).unwrap();
    assert_eq!(cfg.chroma.min_green, 80);
    assert!((cfg.chroma.dominance - 1.4).abs() < f64::EPSILON);
    assert_eq!(cfg.phases.approaching_after_days, 14);
    assert_eq!(cfg.phases.far_after_days, 100);
    assert_eq!(cfg.phases.dialog.arrived, "Boom!");
    assert_eq!(
        cfg.phases.dialog.far,
        crate::countdown::phase::DialogTable::default().far
    );
}

#[test]
fn unknown_fields_and_bad_values_are_rejected() {
    let err = MissionConfig::from_reader(r#"{ "colour": 1 }"#.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("config error:"));
    assert!(MissionConfig::from_reader(r#"{ "refresh_hz": 0 }"#.as_bytes()).is_err());
    assert!(MissionConfig::from_reader(r#"{ "tick_interval_ms": 0 }"#.as_bytes()).is_err());
    assert!(
        MissionConfig::from_reader(r#"{ "phases": { "far_after_days": 10 } }"#.as_bytes())
            .is_err()
    );
}

#[test]
fn missing_file_is_a_config_error() {
    let err = MissionConfig::from_path("does/not/exist.json").unwrap_err();
    assert!(matches!(err, MissionError::Config(_)));
}
