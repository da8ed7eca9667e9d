/*!
 * Common test utilities for the pepperscript test suite
 */

use anyhow::Result;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

use pepperscript::app_config::TimingConfig;

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &PathBuf, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Timing configuration with every wait set to zero, for fast tests
pub fn zero_timing() -> TimingConfig {
    TimingConfig {
        speech_floor_ms: 0,
        speech_per_char_ms: 0,
        animation_settle_ms: 0,
        display_hold_ms: 0,
        inter_action_pause_ms: 0,
    }
}

/// The animation listing from the robot toolkit docs
pub fn sample_catalog_listing() -> &'static str {
    "Gestures/Hey_1\nDances/Disco\nEmotions/Positive/Excited_1"
}

/// A well-formed DSL script with a config block and two actions
pub fn sample_dsl() -> &'static str {
    r#"<config>
language=Spanish
subtitulos=true
</config>
"1","","Hola soy Pepper"
"2","Gestures/Hey_1",""
"#
}

/// A well-formed structured script covering all three tracks
pub fn sample_structured_json() -> &'static str {
    r#"{
  "subtitulos": false,
  "img": true,
  "speech": [
    {"tipo": "text", "info": "Hola soy Pepper"},
    {"tipo": "delay", "info": "1000"}
  ],
  "animation": [
    {"tipo": "movimiento", "info": "Gestures/Hey_1"}
  ],
  "pantalla": [
    {"tipo": "imagen", "info": "https://example.com/logo.png"}
  ]
}"#
}
