/*!
 * # pepperscript - Script Execution Engine for Pepper-class robots
 *
 * A Rust library for authoring and replaying timed sequences of robot
 * actions (spoken phrases, gestures, pauses, tablet content) against a
 * remote robot.
 *
 * ## Features
 *
 * - Two script formats sharing one in-memory model:
 *   - a line-oriented text DSL with an embedded config block
 *   - a structured JSON document with per-track action lists
 * - Animation catalog built from the robot toolkit's flat listing,
 *   with pre-dispatch path validation
 * - Sequential playback with per-action-kind timing heuristics,
 *   a single-flight run guard and per-step failure isolation
 * - Manual step-navigation mode for authoring and preview
 * - Rosbridge WebSocket actuator plus a recording mock for dry runs
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management (timing policy, rosbridge endpoint)
 * - `animation_catalog`: The two-level animation tree and path resolution
 * - `script`: Parsers, the common model, and timeline assembly:
 *   - `script::dsl`: Line-format parser
 *   - `script::structured`: JSON document parser and serializer
 *   - `script::timeline`: Track merging into one execution sequence
 *   - `script::quick`: Built-in demo scripts
 * - `actuators`: Command channels to the robot (rosbridge, mock)
 * - `sequencer`: Automatic playback state machine and session log
 * - `manual_cursor`: Operator-driven single-step execution
 * - `app_controller`: Main application controller
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the engine
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod actuators;
pub mod animation_catalog;
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod manual_cursor;
pub mod script;
pub mod sequencer;

// Re-export main types for easier usage
pub use animation_catalog::AnimationCatalog;
pub use app_config::{Config, TimingConfig};
pub use errors::{ActuatorError, AppError, EngineError, ParseError};
pub use manual_cursor::ManualCursor;
pub use script::{ActionItem, ActionKind, ScriptConfig, ScriptDocument, Timeline};
pub use sequencer::{RunOutcome, RunState, RunSummary, Sequencer};
