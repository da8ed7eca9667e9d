/*!
 * Tests for the structured (JSON) document parser and serializer
 */

use pepperscript::errors::ParseError;
use pepperscript::script::model::{ActionKind, ScriptConfig, ScriptSource};
use pepperscript::script::structured;

use crate::common::sample_structured_json;

fn tracks(
    source: &ScriptSource,
) -> (
    &[pepperscript::ActionItem],
    &[pepperscript::ActionItem],
    &[pepperscript::ActionItem],
) {
    match source {
        ScriptSource::Tracks {
            speech,
            animation,
            display,
        } => (speech.as_slice(), animation.as_slice(), display.as_slice()),
        ScriptSource::Sequence(_) => panic!("structured parse should produce tracks"),
    }
}

/// Test a complete document parses with the expected per-track items
#[test]
fn test_parse_withFullDocument_shouldProduceAllTracks() {
    let parsed = structured::parse(sample_structured_json()).unwrap();
    let (speech, animation, display) = tracks(&parsed.document.source);

    assert_eq!(speech.len(), 2);
    assert_eq!(
        speech[0].kind,
        ActionKind::Speech {
            text: "Hola soy Pepper".to_string()
        }
    );
    assert_eq!(speech[1].kind, ActionKind::Delay { duration_ms: 1000 });

    assert_eq!(animation.len(), 1);
    assert_eq!(
        animation[0].kind,
        ActionKind::Animation {
            path: "Gestures/Hey_1".to_string()
        }
    );

    assert_eq!(display.len(), 1);
    assert_eq!(
        display[0].kind,
        ActionKind::Display {
            content: "https://example.com/logo.png".to_string()
        }
    );

    assert!(!parsed.document.config.subtitles_enabled());
    assert!(parsed.document.config.display_image_enabled());
    assert!(parsed.diagnostics.is_empty());
}

/// Test both `video` and `imagen` map to display items
#[test]
fn test_parse_withVideoAndImagenEntries_shouldMapBothToDisplay() {
    let input = r#"{
      "pantalla": [
        {"tipo": "video", "info": "https://example.com/clip.mp4"},
        {"tipo": "imagen", "info": "https://example.com/pic.png"}
      ]
    }"#;
    let parsed = structured::parse(input).unwrap();
    let (_, _, display) = tracks(&parsed.document.source);

    assert_eq!(display.len(), 2);
    assert!(matches!(display[0].kind, ActionKind::Display { .. }));
    assert!(matches!(display[1].kind, ActionKind::Display { .. }));
}

/// Test unknown `tipo` values and bad delays are skipped, not fatal
#[test]
fn test_parse_withBadEntries_shouldSkipThemWithDiagnostics() {
    let input = r#"{
      "speech": [
        {"tipo": "text", "info": "Hola"},
        {"tipo": "movimiento", "info": "WrongTrack/Path"},
        {"tipo": "delay", "info": "not-a-number"}
      ]
    }"#;
    let parsed = structured::parse(input).unwrap();
    let (speech, _, _) = tracks(&parsed.document.source);

    assert_eq!(speech.len(), 1);
    assert_eq!(parsed.diagnostics.len(), 2);
}

/// Test a document with none of the three tracks is rejected
#[test]
fn test_parse_withNoTracks_shouldRejectDocument() {
    let result = structured::parse(r#"{"subtitulos": true, "img": false}"#);

    assert!(matches!(result, Err(ParseError::MalformedDocument(_))));
}

/// Test invalid JSON is rejected as a decode error
#[test]
fn test_parse_withInvalidJson_shouldRejectDocument() {
    let result = structured::parse("{ this is not json");

    assert!(matches!(result, Err(ParseError::DecodeError(_))));
}

/// Test missing flags default to false and empty tracks are accepted
#[test]
fn test_parse_withMinimalDocument_shouldUseDefaults() {
    let parsed = structured::parse(r#"{"speech": []}"#).unwrap();
    let (speech, animation, display) = tracks(&parsed.document.source);

    assert!(speech.is_empty());
    assert!(animation.is_empty());
    assert!(display.is_empty());
    assert!(!parsed.document.config.subtitles_enabled());
    assert!(!parsed.document.config.display_image_enabled());
}

/// Test both flags set in the file resolve to the image flag winning
#[test]
fn test_parse_withBothFlagsSet_shouldKeepOnlyImage() {
    let parsed =
        structured::parse(r#"{"subtitulos": true, "img": true, "speech": []}"#).unwrap();

    assert!(!parsed.document.config.subtitles_enabled());
    assert!(parsed.document.config.display_image_enabled());
}

/// Test serde deserialization cannot smuggle both flags past the setters
#[test]
fn test_scriptConfigDeserialize_withBothFlagsSet_shouldKeepOnlyImage() {
    let config: ScriptConfig = serde_json::from_str(
        r#"{"language": "Spanish", "subtitles_enabled": true, "display_image_enabled": true}"#,
    )
    .unwrap();

    assert!(!config.subtitles_enabled());
    assert!(config.display_image_enabled());
}

/// Test serialize-then-parse round-trips the document
#[test]
fn test_roundTrip_withFullDocument_shouldYieldEqualDocument() {
    let parsed = structured::parse(sample_structured_json()).unwrap();

    let json = structured::to_json_pretty(&parsed.document).unwrap();
    let reparsed = structured::parse(&json).unwrap();

    assert_eq!(reparsed.document, parsed.document);
    assert!(reparsed.diagnostics.is_empty());
}
