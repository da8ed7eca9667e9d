/*!
 * Tests for the sequencer state machine
 */

use std::sync::Arc;
use std::time::Duration;

use pepperscript::actuators::mock::{ActuatorCall, MockActuator};
use pepperscript::app_config::TimingConfig;
use pepperscript::errors::EngineError;
use pepperscript::script::model::{
    ActionItem, ActionKind, ScriptConfig, ScriptDocument, ScriptSource,
};
use pepperscript::script::timeline::Timeline;
use pepperscript::sequencer::{RunOutcome, RunState, Sequencer};

use crate::common::zero_timing;

fn sequence_document(actions: Vec<ActionItem>) -> ScriptDocument {
    ScriptDocument {
        config: ScriptConfig::default(),
        source: ScriptSource::Sequence(actions),
    }
}

fn speech(text: &str) -> ActionItem {
    ActionItem::new(ActionKind::Speech {
        text: text.to_string(),
    })
}

fn animation(path: &str) -> ActionItem {
    ActionItem::new(ActionKind::Animation {
        path: path.to_string(),
    })
}

fn three_item_document() -> ScriptDocument {
    sequence_document(vec![
        speech("Hola"),
        animation("Gestures/Hey_1"),
        ActionItem::new(ActionKind::Display {
            content: "https://example.com".to_string(),
        }),
    ])
}

/// Test a full run dispatches every item in order and completes
#[tokio::test]
async fn test_run_withWorkingActuator_shouldDispatchAllItemsInOrder() {
    let mock = MockActuator::working();
    let actuator = Arc::new(mock.clone());
    let sequencer = Sequencer::new(actuator, zero_timing());

    let document = three_item_document();
    let timeline = Timeline::assemble(&document);
    let summary = sequencer.run(&timeline, &document.config).await.unwrap();

    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(summary.log.len(), 3);
    assert!(summary.log.iter().all(|entry| entry.is_ok()));

    assert_eq!(
        mock.calls(),
        vec![
            ActuatorCall::Speak {
                language: "Spanish".to_string(),
                text: "Hola".to_string(),
                animated: true,
            },
            ActuatorCall::PlayAnimation {
                path: "Gestures/Hey_1".to_string(),
            },
            ActuatorCall::SetDisplayContent {
                content: "https://example.com".to_string(),
            },
        ]
    );
    assert_eq!(sequencer.state(), RunState::Idle);
}

/// Test speech mirrors to subtitles only when the script enables them
#[tokio::test]
async fn test_run_withSubtitlesEnabled_shouldAlsoDispatchSubtitleText() {
    let mock = MockActuator::working();
    let sequencer = Sequencer::new(Arc::new(mock.clone()), zero_timing());

    let mut document = sequence_document(vec![speech("Hola")]);
    document.config.set_subtitles_enabled(true);
    let timeline = Timeline::assemble(&document);
    sequencer.run(&timeline, &document.config).await.unwrap();

    assert_eq!(
        mock.calls(),
        vec![
            ActuatorCall::Speak {
                language: "Spanish".to_string(),
                text: "Hola".to_string(),
                animated: true,
            },
            ActuatorCall::SetSubtitleText {
                text: "Hola".to_string(),
            },
        ]
    );
}

/// Test a delay item dispatches nothing but still gets a log entry
#[tokio::test]
async fn test_run_withDelayItem_shouldLogWithoutDispatching() {
    let mock = MockActuator::working();
    let sequencer = Sequencer::new(Arc::new(mock.clone()), zero_timing());

    let document = sequence_document(vec![ActionItem::new(ActionKind::Delay {
        duration_ms: 0,
    })]);
    let timeline = Timeline::assemble(&document);
    let summary = sequencer.run(&timeline, &document.config).await.unwrap();

    assert_eq!(summary.log.len(), 1);
    assert!(summary.log[0].is_ok());
    assert_eq!(mock.call_count(), 0);
}

/// Test one failing dispatch never prevents the next item from running
#[tokio::test]
async fn test_run_withFailingDispatchAtK_shouldStillDispatchKPlusOne() {
    let mock = MockActuator::fail_at(vec![0]);
    let sequencer = Sequencer::new(Arc::new(mock.clone()), zero_timing());

    let document = three_item_document();
    let timeline = Timeline::assemble(&document);
    let summary = sequencer.run(&timeline, &document.config).await.unwrap();

    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(summary.log.len(), 3);
    assert!(!summary.log[0].is_ok());
    assert!(summary.log[1].is_ok());
    assert!(summary.log[2].is_ok());

    // The failed speak was still attempted, then the run moved on
    assert_eq!(mock.call_count(), 3);
}

/// Test an actuator that always fails still yields a completed run
#[tokio::test]
async fn test_run_withAllDispatchesFailing_shouldCompleteWithFullLog() {
    let mock = MockActuator::failing();
    let sequencer = Sequencer::new(Arc::new(mock.clone()), zero_timing());

    let document = three_item_document();
    let timeline = Timeline::assemble(&document);
    let summary = sequencer.run(&timeline, &document.config).await.unwrap();

    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(summary.log.len(), 3);
    assert!(summary.log.iter().all(|entry| !entry.is_ok()));
}

/// Test the single-flight guard rejects a second run without side effects
#[tokio::test]
async fn test_run_whileAlreadyRunning_shouldReturnGuardRejected() {
    let mock = MockActuator::working();
    let timing = TimingConfig {
        speech_floor_ms: 200,
        inter_action_pause_ms: 100,
        ..zero_timing()
    };
    let sequencer = Arc::new(Sequencer::new(Arc::new(mock.clone()), timing));

    let document = sequence_document(vec![speech("uno"), speech("dos")]);
    let timeline = Timeline::assemble(&document);

    let first = {
        let sequencer = Arc::clone(&sequencer);
        let timeline = timeline.clone();
        let config = document.config.clone();
        tokio::spawn(async move { sequencer.run(&timeline, &config).await })
    };

    // Give the first run time to take the guard
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(sequencer.state(), RunState::Running);

    let second = sequencer.run(&timeline, &document.config).await;
    assert!(matches!(second, Err(EngineError::GuardRejected)));

    // The original run is untouched by the rejection
    let summary = first.await.unwrap().unwrap();
    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(summary.log.len(), 2);
    assert_eq!(mock.call_count(), 2);
}

/// Test cancellation aborts the run at the next suspension point
#[tokio::test]
async fn test_run_withCancellation_shouldAbortWithPartialLog() {
    let mock = MockActuator::working();
    let timing = TimingConfig {
        speech_floor_ms: 5_000,
        ..zero_timing()
    };
    let sequencer = Arc::new(Sequencer::new(Arc::new(mock.clone()), timing));
    let cancel = sequencer.cancel_handle();

    let document = sequence_document(vec![speech("uno"), speech("dos"), speech("tres")]);
    let timeline = Timeline::assemble(&document);

    let run = {
        let sequencer = Arc::clone(&sequencer);
        let timeline = timeline.clone();
        let config = document.config.clone();
        tokio::spawn(async move { sequencer.run(&timeline, &config).await })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    cancel.cancel();

    let summary = run.await.unwrap().unwrap();
    assert_eq!(summary.outcome, RunOutcome::Aborted);
    assert!(summary.log.len() < timeline.len());
    assert_eq!(sequencer.state(), RunState::Idle);
}

/// Test a cancel from a previous run does not poison the next run
#[tokio::test]
async fn test_run_afterCancelledRun_shouldStartFresh() {
    let mock = MockActuator::working();
    let sequencer = Sequencer::new(Arc::new(mock.clone()), zero_timing());

    // Cancel with nothing running, then run normally
    sequencer.cancel_handle().cancel();

    let document = sequence_document(vec![speech("Hola")]);
    let timeline = Timeline::assemble(&document);
    let summary = sequencer.run(&timeline, &document.config).await.unwrap();

    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert_eq!(summary.log.len(), 1);
}

/// Test an empty timeline completes immediately with an empty log
#[tokio::test]
async fn test_run_withEmptyTimeline_shouldCompleteImmediately() {
    let mock = MockActuator::working();
    let sequencer = Sequencer::new(Arc::new(mock.clone()), zero_timing());

    let document = ScriptDocument::empty();
    let timeline = Timeline::assemble(&document);
    let summary = sequencer.run(&timeline, &document.config).await.unwrap();

    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert!(summary.log.is_empty());
    assert_eq!(mock.call_count(), 0);
}

/// Test the documented example scenario takes about 6000ms of virtual time
#[tokio::test(start_paused = true)]
async fn test_run_withReferenceScenario_shouldFollowTimingPolicy() {
    let mock = MockActuator::working();
    let sequencer = Sequencer::new(Arc::new(mock.clone()), TimingConfig::default());

    let mut document = sequence_document(vec![
        ActionItem::with_id(
            "1",
            ActionKind::Speech {
                text: "Hola soy Pepper".to_string(),
            },
        ),
        ActionItem::with_id(
            "2",
            ActionKind::Animation {
                path: "Gestures/Hey_1".to_string(),
            },
        ),
    ]);
    document.config.set_subtitles_enabled(true);
    let timeline = Timeline::assemble(&document);

    let started = tokio::time::Instant::now();
    let summary = sequencer.run(&timeline, &document.config).await.unwrap();
    let elapsed = started.elapsed();

    // speech max(2000, 15*100) + pause 500 + animation 3000 + pause 500
    assert_eq!(summary.outcome, RunOutcome::Completed);
    assert!(elapsed >= Duration::from_millis(6_000));
    assert!(elapsed < Duration::from_millis(6_100));

    // speak then subtitle for item 1, then the animation for item 2
    assert_eq!(
        mock.calls(),
        vec![
            ActuatorCall::Speak {
                language: "Spanish".to_string(),
                text: "Hola soy Pepper".to_string(),
                animated: true,
            },
            ActuatorCall::SetSubtitleText {
                text: "Hola soy Pepper".to_string(),
            },
            ActuatorCall::PlayAnimation {
                path: "Gestures/Hey_1".to_string(),
            },
        ]
    );
}
