/*!
 * Manual step-navigation mode.
 *
 * The cursor selects one timeline entry at a time so an operator can fire
 * individual actions while authoring or previewing a script. Firing never
 * advances the cursor and never applies the timing waits; the operator
 * decides when to move on. The cursor outlives individual fires and is
 * independent of the sequencer's run state.
 */

use log::debug;

use crate::actuators::Actuator;
use crate::errors::{ActuatorError, EngineError};
use crate::script::model::ScriptConfig;
use crate::script::timeline::Timeline;
use crate::sequencer::dispatch_action;

/// Result of a manual single-shot fire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManualFire {
    /// The selected item was dispatched
    Fired,
    /// The timeline was empty; nothing to fire
    EmptyTimeline,
}

/// Bounded cursor over a timeline
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManualCursor {
    selected: usize,
    len: usize,
}

impl ManualCursor {
    /// Cursor over a timeline, starting at the first entry
    pub fn new(timeline: &Timeline) -> Self {
        Self {
            selected: 0,
            len: timeline.len(),
        }
    }

    /// Currently selected timeline index
    pub fn selected(&self) -> usize {
        self.selected
    }

    /// Length of the timeline this cursor navigates
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the timeline has no entries
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Move to the previous entry; no-op at the first entry
    pub fn select_previous(&mut self) -> usize {
        if self.selected > 0 {
            self.selected -= 1;
        }
        self.selected
    }

    /// Move to the next entry; no-op at the last entry
    pub fn select_next(&mut self) -> usize {
        if self.len > 0 && self.selected < self.len - 1 {
            self.selected += 1;
        }
        self.selected
    }

    /// Jump straight to `index`, rejecting out-of-bounds targets
    pub fn jump_to(&mut self, index: usize) -> Result<(), EngineError> {
        if index >= self.len {
            return Err(EngineError::InvalidIndex {
                index,
                len: self.len,
            });
        }
        self.selected = index;
        Ok(())
    }

    /// Fire exactly the selected entry through the shared dispatch path.
    ///
    /// Applies no timing wait and does not advance the cursor. An empty
    /// timeline is a no-op. Dispatch errors surface to the caller; they do
    /// not move or invalidate the cursor.
    pub async fn execute_selected(
        &self,
        timeline: &Timeline,
        actuator: &dyn Actuator,
        config: &ScriptConfig,
    ) -> Result<ManualFire, ActuatorError> {
        let Some(entry) = timeline.get(self.selected) else {
            return Ok(ManualFire::EmptyTimeline);
        };

        debug!(
            "Manual fire [{}]: {}",
            self.selected,
            entry.item.summary()
        );
        dispatch_action(actuator, config, &entry.item).await?;
        Ok(ManualFire::Fired)
    }
}
