/*!
 * Error types for the pepperscript engine.
 *
 * This module contains custom error types for different parts of the engine,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when talking to the robot actuator channel
#[derive(Error, Debug)]
pub enum ActuatorError {
    /// Error establishing the WebSocket connection to rosbridge
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The actuator was used before a connection was established
    #[error("Not connected to the robot command channel")]
    NotConnected,

    /// Error sending a command frame over an established connection
    #[error("Failed to send command: {0}")]
    SendFailed(String),

    /// Error building the wire payload for a command
    #[error("Failed to encode command payload: {0}")]
    EncodeError(String),
}

/// Errors that can occur while parsing a script representation
#[derive(Error, Debug)]
pub enum ParseError {
    /// The input was empty or contained no usable content
    #[error("Script input is empty")]
    EmptyInput,

    /// A structured document failed validation
    #[error("Malformed script document: {0}")]
    MalformedDocument(String),

    /// The serialized form could not be decoded at all
    #[error("Failed to decode script document: {0}")]
    DecodeError(String),
}

/// Errors raised by the execution engine itself
#[derive(Error, Debug)]
pub enum EngineError {
    /// A run was requested while another run is active
    #[error("A script run is already in progress")]
    GuardRejected,

    /// A cursor jump targeted an index outside the timeline
    #[error("Index {index} is out of bounds for a timeline of {len} items")]
    InvalidIndex {
        /// Requested index
        index: usize,
        /// Timeline length
        len: usize,
    },

    /// Animation paths did not resolve against the loaded catalog
    #[error("Unknown animation paths: {}", paths.join(", "))]
    UnknownAnimations {
        /// The paths that failed resolution
        paths: Vec<String>,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from script parsing
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// Error from the actuator channel
    #[error("Actuator error: {0}")]
    Actuator(#[from] ActuatorError),

    /// Error from the execution engine
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
