/*!
 * Tests for the built-in quick scripts
 */

use pepperscript::script::model::{ActionKind, ScriptSource};
use pepperscript::script::quick::{QUICK_SCRIPT_NAMES, quick_script};
use pepperscript::script::timeline::Timeline;

/// Test every advertised name resolves to a non-empty runnable document
#[test]
fn test_quickScript_withKnownNames_shouldAllResolve() {
    for name in QUICK_SCRIPT_NAMES {
        let document = quick_script(name)
            .unwrap_or_else(|| panic!("quick script '{}' should exist", name));
        let timeline = Timeline::assemble(&document);
        assert!(!timeline.is_empty(), "quick script '{}' is empty", name);
    }
}

/// Test unknown names resolve to nothing
#[test]
fn test_quickScript_withUnknownName_shouldReturnNone() {
    assert!(quick_script("does-not-exist").is_none());
    assert!(quick_script("").is_none());
}

/// Test the greeting script has its documented shape
#[test]
fn test_quickScript_saludo_shouldSpeakThenWave() {
    let document = quick_script("saludo").unwrap();
    let ScriptSource::Sequence(actions) = &document.source else {
        panic!("quick scripts are sequences");
    };

    assert_eq!(actions.len(), 2);
    assert!(matches!(actions[0].kind, ActionKind::Speech { .. }));
    assert_eq!(
        actions[1].kind,
        ActionKind::Animation {
            path: "Gestures/Hey_1".to_string()
        }
    );
}

/// Test the celebration script carries its mid-sequence pause
#[test]
fn test_quickScript_celebracion_shouldContainDelay() {
    let document = quick_script("celebracion").unwrap();
    let ScriptSource::Sequence(actions) = &document.source else {
        panic!("quick scripts are sequences");
    };

    assert!(
        actions
            .iter()
            .any(|item| item.kind == ActionKind::Delay { duration_ms: 1000 })
    );
}
