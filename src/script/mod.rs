/*!
 * Script representations and their processing pipeline.
 *
 * Two independent grammars produce the same in-memory model:
 * - `dsl`: the line-oriented text format with an embedded config block
 * - `structured`: the track-partitioned JSON document
 *
 * `timeline` flattens either document into the single ordered sequence the
 * sequencer executes, and `quick` holds the built-in demo scripts.
 */

pub mod dsl;
pub mod model;
pub mod quick;
pub mod structured;
pub mod timeline;

pub use model::{ActionItem, ActionKind, ScriptConfig, ScriptDocument, ScriptSource, TrackKind};
pub use timeline::{Timeline, TimelineEntry, TRACK_PRECEDENCE};
