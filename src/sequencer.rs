/*!
 * The sequencer: automatic playback of an assembled timeline.
 *
 * A run walks the timeline in order, dispatches each action through the
 * actuator, and waits according to the configured timing policy. One item
 * failing never aborts the run; the failure is recorded in the session log
 * and the next item executes. A single-flight guard rejects a second run
 * while one is active, and a cancellation handle lets a caller abort a run
 * at the next suspension point.
 */

use chrono::{DateTime, Local};
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use uuid::Uuid;

use crate::actuators::Actuator;
use crate::app_config::TimingConfig;
use crate::errors::{ActuatorError, EngineError};
use crate::script::model::{ActionItem, ActionKind, ScriptConfig};
use crate::script::timeline::{Timeline, TimelineEntry};

/// Run lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// No run active
    Idle,
    /// A run is walking the timeline
    Running,
}

/// How a finished run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The whole timeline was executed
    Completed,
    /// The run was cancelled before reaching the end
    Aborted,
}

/// One line of the session log: the outcome of one timeline item
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Timeline index of the item
    pub index: usize,
    /// Human-readable summary of the item
    pub summary: String,
    /// Dispatch error message, if the item failed
    pub error: Option<String>,
    /// When the item was dispatched
    pub at: DateTime<Local>,
}

impl LogEntry {
    fn new(index: usize, summary: String, error: Option<String>) -> Self {
        Self {
            index,
            summary,
            error,
            at: Local::now(),
        }
    }

    /// True when the item dispatched without error
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

/// Result of a finished run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Unique id of the execution session
    pub session_id: String,
    /// Whether the run completed or was aborted
    pub outcome: RunOutcome,
    /// One entry per dispatched item
    pub log: Vec<LogEntry>,
}

/// Observable progress of the sequencer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunProgress {
    /// Current lifecycle state
    pub state: RunState,
    /// Index of the item being executed
    pub current_index: usize,
    /// Length of the timeline being executed
    pub total: usize,
}

/// Handle for requesting early termination of the active run.
///
/// Checked at every wait and between items; the run ends `Aborted` at the
/// next suspension point after `cancel()` is called.
#[derive(Debug, Clone)]
pub struct CancelHandle {
    tx: watch::Sender<bool>,
}

impl CancelHandle {
    /// Request cancellation of the active run
    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }
}

struct Inner {
    state: RunState,
    current_index: usize,
    total: usize,
}

/// Dispatch one action through the actuator.
///
/// Shared by the automatic run loop and the manual cursor so both modes
/// issue identical commands. Applies no waits. A `Delay` dispatches
/// nothing and always succeeds.
pub async fn dispatch_action(
    actuator: &dyn Actuator,
    config: &ScriptConfig,
    item: &ActionItem,
) -> Result<(), ActuatorError> {
    match &item.kind {
        ActionKind::Speech { text } => {
            actuator.speak(&config.language, text, true).await?;
            if config.subtitles_enabled() {
                actuator.set_subtitle_text(text).await?;
            }
            Ok(())
        }
        ActionKind::Animation { path } => actuator.play_animation(path).await,
        ActionKind::Delay { .. } => Ok(()),
        ActionKind::Display { content } => actuator.set_display_content(content).await,
    }
}

/// Wait applied after dispatching an item, before the inter-action pause
fn action_wait_ms(kind: &ActionKind, timing: &TimingConfig) -> u64 {
    match kind {
        ActionKind::Speech { text } => timing.speech_wait_ms(text),
        ActionKind::Animation { .. } => timing.animation_settle_ms,
        ActionKind::Delay { duration_ms } => *duration_ms,
        ActionKind::Display { .. } => timing.display_hold_ms,
    }
}

/// Sleep for `ms`, returning `true` if cancellation arrived first
async fn wait_or_cancel(rx: &mut watch::Receiver<bool>, ms: u64) -> bool {
    if *rx.borrow() {
        return true;
    }
    if ms == 0 {
        return false;
    }
    tokio::select! {
        _ = tokio::time::sleep(Duration::from_millis(ms)) => false,
        changed = rx.wait_for(|cancelled| *cancelled) => changed.is_ok(),
    }
}

/// Automatic playback engine for assembled timelines
pub struct Sequencer {
    actuator: Arc<dyn Actuator>,
    timing: TimingConfig,
    inner: Arc<Mutex<Inner>>,
    cancel_tx: watch::Sender<bool>,
}

impl Sequencer {
    /// Create a sequencer dispatching through the given actuator
    pub fn new(actuator: Arc<dyn Actuator>, timing: TimingConfig) -> Self {
        let (cancel_tx, _rx) = watch::channel(false);
        Self {
            actuator,
            timing,
            inner: Arc::new(Mutex::new(Inner {
                state: RunState::Idle,
                current_index: 0,
                total: 0,
            })),
            cancel_tx,
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> RunState {
        self.inner.lock().state
    }

    /// Snapshot of the observable run progress
    pub fn progress(&self) -> RunProgress {
        let inner = self.inner.lock();
        RunProgress {
            state: inner.state,
            current_index: inner.current_index,
            total: inner.total,
        }
    }

    /// Handle that can abort the active (or next) run
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle {
            tx: self.cancel_tx.clone(),
        }
    }

    /// Shared actuator reference, for the manual execution path
    pub fn actuator(&self) -> Arc<dyn Actuator> {
        Arc::clone(&self.actuator)
    }

    /// Execute a timeline from the first item to the last.
    ///
    /// Returns `Err(EngineError::GuardRejected)` without side effects when
    /// a run is already in progress. The timeline is snapshotted up front,
    /// so concurrent edits to the source document cannot affect the run.
    /// Dispatch failures are logged and skipped over; the summary carries
    /// one log entry per executed item.
    pub async fn run(
        &self,
        timeline: &Timeline,
        config: &ScriptConfig,
    ) -> Result<RunSummary, EngineError> {
        {
            let mut inner = self.inner.lock();
            if inner.state == RunState::Running {
                return Err(EngineError::GuardRejected);
            }
            inner.state = RunState::Running;
            inner.current_index = 0;
            inner.total = timeline.len();
        }

        // Fresh cancellation epoch for this run; a stale cancel() from a
        // previous run must not abort this one.
        self.cancel_tx.send_replace(false);
        let mut cancel_rx = self.cancel_tx.subscribe();

        let session_id = Uuid::new_v4().to_string();
        let entries: Vec<TimelineEntry> = timeline.iter().cloned().collect();
        info!(
            "Session {}: starting run of {} item(s)",
            &session_id[..8],
            entries.len()
        );

        let mut log: Vec<LogEntry> = Vec::with_capacity(entries.len());
        let mut outcome = RunOutcome::Completed;

        for (index, entry) in entries.iter().enumerate() {
            if *cancel_rx.borrow() {
                outcome = RunOutcome::Aborted;
                break;
            }

            self.inner.lock().current_index = index;

            let result = dispatch_action(self.actuator.as_ref(), config, &entry.item).await;
            match &result {
                Ok(()) => debug!(
                    "Session {}: [{}/{}] {}",
                    &session_id[..8],
                    index + 1,
                    entries.len(),
                    entry.item.summary()
                ),
                Err(e) => warn!(
                    "Session {}: [{}/{}] {} failed ({}), continuing",
                    &session_id[..8],
                    index + 1,
                    entries.len(),
                    entry.item.summary(),
                    e
                ),
            }
            log.push(LogEntry::new(
                index,
                entry.item.summary(),
                result.err().map(|e| e.to_string()),
            ));

            let wait = action_wait_ms(&entry.item.kind, &self.timing);
            if wait_or_cancel(&mut cancel_rx, wait).await
                || wait_or_cancel(&mut cancel_rx, self.timing.inter_action_pause_ms).await
            {
                outcome = RunOutcome::Aborted;
                break;
            }
        }

        {
            let mut inner = self.inner.lock();
            inner.state = RunState::Idle;
        }

        match outcome {
            RunOutcome::Completed => {
                info!("Session {}: run completed", &session_id[..8]);
            }
            RunOutcome::Aborted => {
                info!(
                    "Session {}: run aborted after {} item(s)",
                    &session_id[..8],
                    log.len()
                );
            }
        }

        Ok(RunSummary {
            session_id,
            outcome,
            log,
        })
    }
}
