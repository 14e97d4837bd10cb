//! Integration tests for configuration management

use virtual_counselor::config::{Config, ConfigOverrides};
use virtual_counselor::engine::grading::{GradeScale, ThresholdPreset};

#[test]
fn test_config_from_defaults() {
    let config = Config::from_defaults();

    assert!(!config.logging.level.is_empty());
    assert!(!config.paths.data_dir.is_empty());
    assert!(!config.paths.reports_dir.is_empty());
    assert!(
        !config.paths.data_dir.contains("$VIRTUAL_COUNSELOR"),
        "Directory variable should be expanded"
    );
    assert_eq!(config.grade_scale(), GradeScale::Standard);
    assert_eq!(config.threshold_preset(), ThresholdPreset::Standard);
}

#[test]
fn test_config_from_toml_basic() {
    let toml_str = r#"
[logging]
level = "info"
file = "/tmp/vc.log"
verbose = true

[grading]
scale = "no-d-minus"
thresholds = "inline"

[credits]
base = 128.0
additional_major = 45.0
minor = 18.0
certificate = 12.0

[paths]
data_dir = "./data"
reports_dir = "./reports"
"#;

    let config = Config::from_toml(toml_str).expect("Failed to parse TOML");

    assert_eq!(config.logging.level, "info");
    assert_eq!(config.logging.file, "/tmp/vc.log");
    assert!(config.logging.verbose);
    assert_eq!(config.grade_scale(), GradeScale::NoDMinus);
    assert_eq!(config.threshold_preset(), ThresholdPreset::Inline);

    let policy = config.credit_policy();
    assert!((policy.base - 128.0).abs() < f32::EPSILON);
    assert!((policy.additional_major - 45.0).abs() < f32::EPSILON);
    assert!((policy.minor - 18.0).abs() < f32::EPSILON);
    assert!((policy.certificate - 12.0).abs() < f32::EPSILON);
    assert_eq!(config.paths.data_dir, "./data");
}

#[test]
fn test_config_from_toml_partial_merges_defaults() {
    let mut config = Config::from_toml("[grading]\nscale = \"standard\"\n").unwrap();
    assert!(config.logging.level.is_empty());
    assert!(config.credits.base.abs() < f32::EPSILON);

    assert!(config.merge_defaults(&Config::from_defaults()));
    assert!(!config.logging.level.is_empty());
    assert!((config.credits.base - 120.0).abs() < f32::EPSILON);
    assert!(!config.merge_defaults(&Config::from_defaults()));
}

#[test]
fn test_unknown_scale_falls_back() {
    let config = Config::from_toml("[grading]\nscale = \"quarter\"\nthresholds = \"??\"\n").unwrap();
    assert_eq!(config.grade_scale(), GradeScale::Standard);
    assert_eq!(config.threshold_preset(), ThresholdPreset::Standard);
}

#[test]
fn test_zero_credits_use_policy_defaults() {
    let config = Config::from_toml("[credits]\nbase = 0.0\nminor = 24.0\n").unwrap();
    let policy = config.credit_policy();
    assert!((policy.base - 120.0).abs() < f32::EPSILON);
    assert!((policy.minor - 24.0).abs() < f32::EPSILON);
}

#[test]
fn test_config_get_set() {
    let mut config = Config::from_defaults();

    config.set("level", "debug").unwrap();
    assert_eq!(config.get("level"), Some("debug".to_string()));

    config.set("scale", "calculator").unwrap();
    assert_eq!(config.get("scale"), Some("no-d-minus".to_string()));

    config.set("base-credits", "124").unwrap();
    assert_eq!(config.get("base_credits"), Some("124".to_string()));

    config.set("verbose", "true").unwrap();
    assert_eq!(config.get("verbose"), Some("true".to_string()));

    assert!(config.set("level", "loud").is_err());
    assert!(config.set("verbose", "maybe").is_err());
    assert!(config.set("minor_credits", "-3").is_err());
    assert!(config.set("thresholds", "curve").is_err());
    assert!(config.set("no_such_key", "x").is_err());
    assert_eq!(config.get("no_such_key"), None);
}

#[test]
fn test_config_set_rejects_zero_credits() {
    let mut config = Config::from_defaults();
    let err = config.set("minor_credits", "0").unwrap_err();
    assert!(err.contains("minor_credits"));
    assert!(config.set("certificate_credits", "0.0").is_err());

    let policy = config.credit_policy();
    assert!((policy.minor - 20.0).abs() < f32::EPSILON);
    assert!((policy.certificate - 15.0).abs() < f32::EPSILON);

    config.set("minor_credits", "18").unwrap();
    assert!((config.credit_policy().minor - 18.0).abs() < f32::EPSILON);
}

#[test]
fn test_config_unset() {
    let defaults = Config::from_defaults();
    let mut config = defaults.clone();

    config.set("thresholds", "inline").unwrap();
    config.set("major_credits", "50").unwrap();
    config.unset("thresholds", &defaults).unwrap();
    config.unset("major-credits", &defaults).unwrap();

    assert_eq!(config.grading.thresholds, defaults.grading.thresholds);
    assert!((config.credits.additional_major - defaults.credits.additional_major).abs() < f32::EPSILON);
    assert!(config.unset("bogus", &defaults).is_err());
}

#[test]
fn test_config_toml_round_trip() {
    let mut config = Config::from_defaults();
    config.set("reports_dir", "/tmp/reports").unwrap();

    let text = toml::to_string_pretty(&config).unwrap();
    let back = Config::from_toml(&text).unwrap();
    assert_eq!(back.paths.reports_dir, "/tmp/reports");
    assert_eq!(back.grading.scale, config.grading.scale);
}

#[test]
fn test_config_overrides_apply() {
    let mut config = Config::from_defaults();
    config.apply_overrides(&ConfigOverrides {
        level: Some("error".to_string()),
        file: Some("/tmp/override.log".to_string()),
        verbose: Some(true),
        scale: Some("no-d-minus".to_string()),
        thresholds: Some("inline".to_string()),
        data_dir: Some("/tmp/data".to_string()),
        reports_dir: Some("/tmp/reports".to_string()),
    });

    assert_eq!(config.logging.level, "error");
    assert_eq!(config.logging.file, "/tmp/override.log");
    assert!(config.logging.verbose);
    assert_eq!(config.grade_scale(), GradeScale::NoDMinus);
    assert_eq!(config.threshold_preset(), ThresholdPreset::Inline);
    assert_eq!(config.paths.data_dir, "/tmp/data");
    assert_eq!(config.paths.reports_dir, "/tmp/reports");
}

#[test]
fn test_config_overrides_partial() {
    let defaults = Config::from_defaults();
    let mut config = defaults.clone();
    config.apply_overrides(&ConfigOverrides {
        scale: Some("no-d-minus".to_string()),
        ..ConfigOverrides::default()
    });

    assert_eq!(config.grading.scale, "no-d-minus");
    assert_eq!(config.logging.level, defaults.logging.level);
    assert_eq!(config.paths.data_dir, defaults.paths.data_dir);
}

#[test]
fn test_config_display_lists_sections() {
    let text = Config::from_defaults().to_string();
    for section in ["[logging]", "[grading]", "[credits]", "[paths]"] {
        assert!(text.contains(section), "missing {section}");
    }
}
