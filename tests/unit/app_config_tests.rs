/*!
 * Tests for engine configuration functionality
 */

use pepperscript::app_config::{Config, LogLevel, TimingConfig};

use crate::common::{create_temp_dir, create_test_file};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.default_language, "Spanish");
    assert_eq!(config.timing.speech_floor_ms, 2000);
    assert_eq!(config.timing.speech_per_char_ms, 100);
    assert_eq!(config.timing.animation_settle_ms, 3000);
    assert_eq!(config.timing.display_hold_ms, 2000);
    assert_eq!(config.timing.inter_action_pause_ms, 500);
    assert_eq!(config.ros.endpoint, "ws://localhost:9090");
    assert!(!config.validate_animations);
    assert_eq!(config.log_level, LogLevel::Info);
}

/// Test speech wait estimation: floor for short phrases, linear beyond it
#[test]
fn test_speechWaitMs_withShortAndLongText_shouldApplyFloorAndPerChar() {
    let timing = TimingConfig::default();

    // 15 characters at 100ms/char is below the 2000ms floor
    assert_eq!(timing.speech_wait_ms("Hola soy Pepper"), 2000);
    // 30 characters climbs past the floor
    assert_eq!(timing.speech_wait_ms(&"x".repeat(30)), 3000);
    assert_eq!(timing.speech_wait_ms(""), 2000);
}

/// Test speech wait counts characters, not bytes
#[test]
fn test_speechWaitMs_withMultibyteText_shouldCountCharacters() {
    let timing = TimingConfig {
        speech_floor_ms: 0,
        speech_per_char_ms: 100,
        ..TimingConfig::default()
    };

    // "ñañañá" is 6 characters even though it is more than 6 bytes
    assert_eq!(timing.speech_wait_ms("ñañañá"), 600);
}

/// Test configuration validation
#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = Config::default();
    assert!(config.validate().is_ok());

    // Non-websocket endpoint
    config.ros.endpoint = "http://localhost:9090".to_string();
    assert!(config.validate().is_err());

    // Unparsable endpoint
    config.ros.endpoint = "not a url".to_string();
    assert!(config.validate().is_err());
    config.ros.endpoint = "wss://robot.lab:9090".to_string();
    assert!(config.validate().is_ok());

    // Empty default language
    config.default_language = "  ".to_string();
    assert!(config.validate().is_err());
    config.default_language = "English".to_string();

    // Zero connect timeout
    config.ros.connect_timeout_secs = 0;
    assert!(config.validate().is_err());
}

/// Test configuration file round-trip
#[test]
fn test_config_saveAndLoad_shouldRoundTrip() {
    let temp_dir = create_temp_dir().unwrap();
    let path = temp_dir.path().join("conf.json");

    let mut config = Config::default();
    config.timing.speech_floor_ms = 1500;
    config.timing.speech_per_char_ms = 80;
    config.validate_animations = true;

    config.save_to_file(&path).unwrap();
    let loaded = Config::from_file(&path).unwrap();

    assert_eq!(loaded.timing, config.timing);
    assert_eq!(loaded.ros, config.ros);
    assert_eq!(loaded.default_language, config.default_language);
    assert!(loaded.validate_animations);
}

/// Test partial config files fall back to defaults for missing fields
#[test]
fn test_config_fromFile_withPartialJson_shouldFillDefaults() {
    let temp_dir = create_temp_dir().unwrap();
    let dir = temp_dir.path().to_path_buf();
    let path = create_test_file(
        &dir,
        "conf.json",
        r#"{"timing": {"speech_floor_ms": 1500}}"#,
    )
    .unwrap();

    let config = Config::from_file(&path).unwrap();

    assert_eq!(config.timing.speech_floor_ms, 1500);
    assert_eq!(config.timing.speech_per_char_ms, 100);
    assert_eq!(config.default_language, "Spanish");
}
