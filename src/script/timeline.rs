/*!
 * Timeline assembly: flattening a script document into the single ordered
 * sequence the sequencer executes.
 */

use super::model::{ActionItem, ActionKind, ScriptDocument, ScriptSource, TrackKind};

/// Track order applied when merging a track-partitioned document.
///
/// The assembly policy is a named constant so tests can pin it: all speech
/// items run first, then animations, then display items, each track keeping
/// its own authoring order.
pub const TRACK_PRECEDENCE: [TrackKind; 3] =
    [TrackKind::Speech, TrackKind::Animation, TrackKind::Display];

/// One timeline slot: the action plus the track it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimelineEntry {
    /// The action to dispatch
    pub item: ActionItem,
    /// Source track (for track documents) or the kind's natural track
    pub track: TrackKind,
}

/// The ordered execution sequence produced from a script document.
///
/// The sequencer snapshots a timeline at run start; the authoring flow can
/// keep editing its document without affecting a run in progress.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timeline {
    entries: Vec<TimelineEntry>,
}

/// Natural track of an action kind, used to tag DSL sequence items
fn natural_track(kind: &ActionKind) -> TrackKind {
    match kind {
        ActionKind::Speech { .. } | ActionKind::Delay { .. } => TrackKind::Speech,
        ActionKind::Animation { .. } => TrackKind::Animation,
        ActionKind::Display { .. } => TrackKind::Display,
    }
}

impl Timeline {
    /// Assemble the execution timeline for a document.
    ///
    /// Track documents are concatenated in [`TRACK_PRECEDENCE`] order; DSL
    /// documents are already a single ordered sequence and pass through
    /// unchanged.
    pub fn assemble(document: &ScriptDocument) -> Self {
        let entries = match &document.source {
            ScriptSource::Sequence(actions) => actions
                .iter()
                .map(|item| TimelineEntry {
                    track: natural_track(&item.kind),
                    item: item.clone(),
                })
                .collect(),
            ScriptSource::Tracks {
                speech,
                animation,
                display,
            } => {
                let mut entries = Vec::with_capacity(speech.len() + animation.len() + display.len());
                for track in TRACK_PRECEDENCE {
                    let items = match track {
                        TrackKind::Speech => speech,
                        TrackKind::Animation => animation,
                        TrackKind::Display => display,
                    };
                    entries.extend(items.iter().map(|item| TimelineEntry {
                        item: item.clone(),
                        track,
                    }));
                }
                entries
            }
        };

        Self { entries }
    }

    /// Number of entries in the timeline
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when there is nothing to execute
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry at `index`, if in bounds
    pub fn get(&self, index: usize) -> Option<&TimelineEntry> {
        self.entries.get(index)
    }

    /// Iterate entries in execution order
    pub fn iter(&self) -> impl Iterator<Item = &TimelineEntry> {
        self.entries.iter()
    }

    /// Animation paths referenced by the timeline, in execution order
    pub fn animation_paths(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|entry| match &entry.item.kind {
            ActionKind::Animation { path } => Some(path.as_str()),
            _ => None,
        })
    }
}
