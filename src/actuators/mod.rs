/*!
 * Actuator implementations for reaching the robot.
 *
 * This module contains the boundary through which speech, animation and
 * display commands leave the engine:
 * - `rosbridge`: the real robot, over the rosbridge WebSocket protocol
 * - `mock`: a recording fake for tests and dry runs
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ActuatorError;

/// Common trait for all robot actuators
///
/// This trait defines the four logical commands the engine can issue.
/// Calls are fire-and-forget from the sequencer's perspective: an `Ok`
/// means the command left the process, not that the robot finished it.
#[async_trait]
pub trait Actuator: Send + Sync + Debug {
    /// Speak a phrase through the robot's TTS
    ///
    /// # Arguments
    /// * `language` - TTS language name, e.g. "Spanish"
    /// * `text` - the phrase to speak
    /// * `animated` - whether the robot gestures along while speaking
    async fn speak(&self, language: &str, text: &str, animated: bool) -> Result<(), ActuatorError>;

    /// Play a catalog animation
    ///
    /// # Arguments
    /// * `path` - slash-delimited animation path, e.g. `Gestures/Hey_1`
    async fn play_animation(&self, path: &str) -> Result<(), ActuatorError>;

    /// Put content (URL or literal text) on the robot's tablet
    async fn set_display_content(&self, content: &str) -> Result<(), ActuatorError>;

    /// Show subtitle text on the robot's tablet
    async fn set_subtitle_text(&self, text: &str) -> Result<(), ActuatorError>;

    /// Test the connection to the robot
    ///
    /// # Returns
    /// * `Result<(), ActuatorError>` - Ok if the channel is usable
    async fn test_connection(&self) -> Result<(), ActuatorError>;
}

pub mod mock;
pub mod rosbridge;
