use super::*;

#[test]
fn test_group_defaults_round_config() {
    let config = GroupDefaults::default().round_config();
    assert!((config.win_weight - 0.7).abs() < 1e-12);
    assert!((config.homework_weight - 0.3).abs() < 1e-12);
    assert_eq!(config.homework_total_questions, 10);
    assert_eq!(config.homework_missing_policy, MissingPolicy::Zero);
    assert_eq!(config.fair_recent_rematch_window, 2);
}

#[test]
fn test_toml_overrides_only_named_fields() {
    let text = r#"
        homework_weight = 0.5
        homework_missing_policy = "penalty"
        homework_missing_penalty_wrong_pct = 40
        fair_rotate_byes = false
    "#;
    let config = RoundConfig::from_toml_str(text, &GroupDefaults::default()).unwrap();
    assert!((config.win_weight - 0.7).abs() < 1e-12);
    assert!((config.homework_weight - 0.5).abs() < 1e-12);
    assert_eq!(config.homework_missing_policy, MissingPolicy::Penalty);
    assert_eq!(config.homework_missing_penalty_wrong_pct, 40);
    assert!(!config.fair_rotate_byes);
    assert!(config.fair_no_recent_rematch);
}

#[test]
fn test_toml_unknown_field_rejected() {
    let err = RoundConfig::from_toml_str("rounds = 3", &GroupDefaults::default()).unwrap_err();
    assert!(matches!(err, PairingError::InvalidConfiguration(_)));
}

#[test]
fn test_validate_normalizes_weights() {
    let config = RoundConfig {
        win_weight: 3.0,
        homework_weight: 1.0,
        ..Default::default()
    };
    let validated = config.validate().unwrap();
    assert!((validated.weights.win - 0.75).abs() < 1e-12);
    assert!((validated.weights.homework - 0.25).abs() < 1e-12);
}

#[test]
fn test_validate_rejects_zero_weights() {
    let config = RoundConfig {
        win_weight: 0.0,
        homework_weight: 0.0,
        ..Default::default()
    };
    assert!(matches!(
        config.validate(),
        Err(PairingError::InvalidConfiguration(_))
    ));
}

#[test]
fn test_validate_rejects_zero_questions() {
    let config = RoundConfig {
        homework_total_questions: 0,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_penalty_above_hundred() {
    let config = RoundConfig {
        homework_missing_penalty_wrong_pct: 101,
        ..Default::default()
    };
    assert!(config.validate().is_err());
}
