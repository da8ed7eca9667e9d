use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::default::Default;
use std::path::Path;
use url::Url;

/// Application configuration module
/// This module handles the engine configuration including loading,
/// validating and saving configuration settings.
/// Represents the engine configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Language passed to the speech command when a script does not set one
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Timing policy applied by the sequencer
    #[serde(default)]
    pub timing: TimingConfig,

    /// Robot command channel settings
    #[serde(default)]
    pub ros: RosConfig,

    /// Reject a run when animation paths do not resolve in the catalog
    #[serde(default)]
    pub validate_animations: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Timing constants used by the sequencer.
///
/// The reference deployments disagreed on the exact values, so all of them
/// are configuration rather than literals in the run loop.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TimingConfig {
    /// Minimum wait after a speech command, in milliseconds
    #[serde(default = "default_speech_floor_ms")]
    pub speech_floor_ms: u64,

    /// Additional wait per spoken character, in milliseconds
    #[serde(default = "default_speech_per_char_ms")]
    pub speech_per_char_ms: u64,

    /// Fixed settle wait after an animation command, in milliseconds
    #[serde(default = "default_animation_settle_ms")]
    pub animation_settle_ms: u64,

    /// Fixed hold wait after a display command, in milliseconds
    #[serde(default = "default_display_hold_ms")]
    pub display_hold_ms: u64,

    /// Pause inserted after every timeline item, in milliseconds
    #[serde(default = "default_inter_action_pause_ms")]
    pub inter_action_pause_ms: u64,
}

impl TimingConfig {
    /// Wait applied after dispatching a speech command.
    ///
    /// Estimated from text length (characters, not bytes) with a floor so
    /// short phrases still get a usable window.
    pub fn speech_wait_ms(&self, text: &str) -> u64 {
        let chars = text.chars().count() as u64;
        std::cmp::max(self.speech_floor_ms, chars * self.speech_per_char_ms)
    }
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            speech_floor_ms: default_speech_floor_ms(),
            speech_per_char_ms: default_speech_per_char_ms(),
            animation_settle_ms: default_animation_settle_ms(),
            display_hold_ms: default_display_hold_ms(),
            inter_action_pause_ms: default_inter_action_pause_ms(),
        }
    }
}

/// Rosbridge connection configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RosConfig {
    /// WebSocket endpoint of the rosbridge server
    #[serde(default = "default_ros_endpoint")]
    pub endpoint: String,

    /// Connection timeout in seconds
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,
}

impl Default for RosConfig {
    fn default() -> Self {
        Self {
            endpoint: default_ros_endpoint(),
            connect_timeout_secs: default_connect_timeout_secs(),
        }
    }
}

/// Log level configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Error level
    Error,
    /// Warning level
    Warn,
    /// Info level (default)
    #[default]
    Info,
    /// Debug level
    Debug,
    /// Trace level
    Trace,
}

// Default value functions for serde
fn default_language() -> String {
    "Spanish".to_string()
}

fn default_speech_floor_ms() -> u64 {
    2000
}

fn default_speech_per_char_ms() -> u64 {
    100
}

fn default_animation_settle_ms() -> u64 {
    3000
}

fn default_display_hold_ms() -> u64 {
    2000
}

fn default_inter_action_pause_ms() -> u64 {
    500
}

fn default_ros_endpoint() -> String {
    "ws://localhost:9090".to_string()
}

fn default_connect_timeout_secs() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_language: default_language(),
            timing: TimingConfig::default(),
            ros: RosConfig::default(),
            validate_animations: false,
            log_level: LogLevel::default(),
        }
    }
}

impl Config {
    // @loads: Configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            anyhow!("Failed to read config file {}: {}", path.as_ref().display(), e)
        })?;
        let config: Config = serde_json::from_str(&content).map_err(|e| {
            anyhow!("Failed to parse config file {}: {}", path.as_ref().display(), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    // @saves: Configuration as pretty JSON
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json).map_err(|e| {
            anyhow!("Failed to write config file {}: {}", path.as_ref().display(), e)
        })?;
        Ok(())
    }

    /// Validate the configuration values
    pub fn validate(&self) -> Result<()> {
        if self.default_language.trim().is_empty() {
            return Err(anyhow!("default_language must not be empty"));
        }

        let url = Url::parse(&self.ros.endpoint)
            .map_err(|e| anyhow!("Invalid rosbridge endpoint '{}': {}", self.ros.endpoint, e))?;
        if url.scheme() != "ws" && url.scheme() != "wss" {
            return Err(anyhow!(
                "Rosbridge endpoint must use ws:// or wss://, got '{}'",
                self.ros.endpoint
            ));
        }

        if self.ros.connect_timeout_secs == 0 {
            return Err(anyhow!("connect_timeout_secs must be greater than zero"));
        }

        Ok(())
    }
}
