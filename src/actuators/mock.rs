/*!
 * Mock actuator implementation for testing and dry runs.
 *
 * This module provides a mock actuator that simulates different behaviors:
 * - `MockActuator::working()` - always accepts commands
 * - `MockActuator::failing()` - always fails
 * - `MockActuator::fail_at(indices)` - fails specific dispatches by order
 *
 * Every accepted or rejected command is recorded in a journal so tests can
 * assert on exactly what the engine dispatched, and in what order.
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::actuators::Actuator;
use crate::errors::ActuatorError;

/// One recorded command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActuatorCall {
    /// A `speak` command
    Speak {
        /// TTS language
        language: String,
        /// Spoken text
        text: String,
        /// Gesture-while-speaking flag
        animated: bool,
    },
    /// A `play_animation` command
    PlayAnimation {
        /// Animation path
        path: String,
    },
    /// A `set_display_content` command
    SetDisplayContent {
        /// URL or literal text
        content: String,
    },
    /// A `set_subtitle_text` command
    SetSubtitleText {
        /// Subtitle text
        text: String,
    },
}

/// Behavior mode for the mock actuator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockBehavior {
    /// Every command succeeds
    Working,
    /// Every command fails
    Failing,
    /// Commands at these zero-based dispatch positions fail
    FailAt(Vec<usize>),
}

/// Mock actuator that records every command it receives
#[derive(Debug, Clone)]
pub struct MockActuator {
    behavior: MockBehavior,
    calls: Arc<Mutex<Vec<ActuatorCall>>>,
    dispatch_count: Arc<AtomicUsize>,
}

impl MockActuator {
    /// Create a mock with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            calls: Arc::new(Mutex::new(Vec::new())),
            dispatch_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Mock that always accepts commands
    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    /// Mock that always fails
    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    /// Mock that fails the commands at the given dispatch positions
    pub fn fail_at(indices: Vec<usize>) -> Self {
        Self::new(MockBehavior::FailAt(indices))
    }

    /// Snapshot of every command received so far, in order
    pub fn calls(&self) -> Vec<ActuatorCall> {
        self.calls.lock().clone()
    }

    /// Number of commands received so far
    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Record a call and decide its outcome per the configured behavior
    fn record(&self, call: ActuatorCall) -> Result<(), ActuatorError> {
        let position = self.dispatch_count.fetch_add(1, Ordering::SeqCst);
        self.calls.lock().push(call);

        let fail = match &self.behavior {
            MockBehavior::Working => false,
            MockBehavior::Failing => true,
            MockBehavior::FailAt(indices) => indices.contains(&position),
        };

        if fail {
            Err(ActuatorError::SendFailed(format!(
                "mock failure at dispatch {}",
                position
            )))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl Actuator for MockActuator {
    async fn speak(&self, language: &str, text: &str, animated: bool) -> Result<(), ActuatorError> {
        self.record(ActuatorCall::Speak {
            language: language.to_string(),
            text: text.to_string(),
            animated,
        })
    }

    async fn play_animation(&self, path: &str) -> Result<(), ActuatorError> {
        self.record(ActuatorCall::PlayAnimation {
            path: path.to_string(),
        })
    }

    async fn set_display_content(&self, content: &str) -> Result<(), ActuatorError> {
        self.record(ActuatorCall::SetDisplayContent {
            content: content.to_string(),
        })
    }

    async fn set_subtitle_text(&self, text: &str) -> Result<(), ActuatorError> {
        self.record(ActuatorCall::SetSubtitleText {
            text: text.to_string(),
        })
    }

    async fn test_connection(&self) -> Result<(), ActuatorError> {
        match self.behavior {
            MockBehavior::Failing => Err(ActuatorError::ConnectionError(
                "mock connection refused".to_string(),
            )),
            _ => Ok(()),
        }
    }
}
