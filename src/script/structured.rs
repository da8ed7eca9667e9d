/*!
 * Parser and serializer for the structured (JSON) script format.
 *
 * The on-disk shape mirrors what the authoring tool downloads:
 *
 * ```json
 * {
 *   "subtitulos": false, "img": false,
 *   "speech":    [{"tipo": "text",       "info": "Hola"}],
 *   "animation": [{"tipo": "movimiento", "info": "Gestures/Hey_1"}],
 *   "pantalla":  [{"tipo": "video",      "info": "https://…"}]
 * }
 * ```
 *
 * A document is accepted only if at least one of the three track arrays is
 * present; otherwise the load is rejected and the caller keeps whatever
 * document it already had. Individual entries with an unknown `tipo` or an
 * unparsable delay are skipped with a diagnostic, matching the DSL parser's
 * tolerance.
 */

use log::warn;
use serde::{Deserialize, Serialize};

use crate::errors::ParseError;

use super::model::{ActionItem, ActionKind, ScriptConfig, ScriptDocument, ScriptSource, TrackKind};

/// One `{tipo, info}` entry of a track array
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackEntry {
    /// Format-specific entry kind (`text`, `movimiento`, `video`, `imagen`, `delay`)
    pub tipo: String,
    /// Payload: text, animation path, URL, or delay milliseconds as a string
    pub info: String,
}

/// Serde mirror of the on-disk structured document
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StructuredScript {
    /// Mirror spoken text to the tablet
    #[serde(default)]
    pub subtitulos: bool,
    /// Interpret display content as images/URLs
    #[serde(default)]
    pub img: bool,
    /// Spoken-phrase track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speech: Option<Vec<TrackEntry>>,
    /// Animation track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub animation: Option<Vec<TrackEntry>>,
    /// Tablet screen track
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pantalla: Option<Vec<TrackEntry>>,
}

/// Result of a structured parse: the document plus per-entry diagnostics
#[derive(Debug)]
pub struct ParsedStructured {
    /// The parsed document
    pub document: ScriptDocument,
    /// One message per skipped entry
    pub diagnostics: Vec<String>,
}

/// Convert one track entry into an action item, or explain why it was skipped
fn entry_to_action(track: TrackKind, entry: &TrackEntry) -> Result<ActionKind, String> {
    if entry.tipo == "delay" {
        return entry
            .info
            .trim()
            .parse::<u64>()
            .map(|duration_ms| ActionKind::Delay { duration_ms })
            .map_err(|_| format!("{} track: delay '{}' is not a duration", track, entry.info));
    }

    match (track, entry.tipo.as_str()) {
        (TrackKind::Speech, "text") => Ok(ActionKind::Speech {
            text: entry.info.clone(),
        }),
        (TrackKind::Animation, "movimiento") => Ok(ActionKind::Animation {
            path: entry.info.clone(),
        }),
        (TrackKind::Display, "video" | "imagen") => Ok(ActionKind::Display {
            content: entry.info.clone(),
        }),
        (track, tipo) => Err(format!("{} track: unknown tipo '{}'", track, tipo)),
    }
}

/// Convert one whole track, collecting diagnostics for skipped entries
fn convert_track(
    track: TrackKind,
    entries: Option<&Vec<TrackEntry>>,
    diagnostics: &mut Vec<String>,
) -> Vec<ActionItem> {
    entries
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| match entry_to_action(track, entry) {
                    Ok(kind) => Some(ActionItem::new(kind)),
                    Err(diag) => {
                        diagnostics.push(diag);
                        None
                    }
                })
                .collect()
        })
        .unwrap_or_default()
}

/// Parse a structured JSON document into a [`ScriptDocument`].
///
/// Rejects input that does not decode as the structured shape or that has
/// none of the three track arrays; the caller is expected to keep its
/// previous document on rejection.
pub fn parse(input: &str) -> Result<ParsedStructured, ParseError> {
    let raw: StructuredScript =
        serde_json::from_str(input).map_err(|e| ParseError::DecodeError(e.to_string()))?;
    from_structured(&raw)
}

/// Convert an already-decoded [`StructuredScript`] into the common model
pub fn from_structured(raw: &StructuredScript) -> Result<ParsedStructured, ParseError> {
    if raw.speech.is_none() && raw.animation.is_none() && raw.pantalla.is_none() {
        return Err(ParseError::MalformedDocument(
            "document has none of the speech/animation/pantalla tracks".to_string(),
        ));
    }

    let mut config = ScriptConfig::default();
    // File order: subtitles first, then the image flag, so `img` wins when
    // a hand-edited file sets both.
    config.set_subtitles_enabled(raw.subtitulos);
    if raw.img {
        config.set_display_image_enabled(true);
    }

    let mut diagnostics = Vec::new();
    let speech = convert_track(TrackKind::Speech, raw.speech.as_ref(), &mut diagnostics);
    let animation = convert_track(TrackKind::Animation, raw.animation.as_ref(), &mut diagnostics);
    let display = convert_track(TrackKind::Display, raw.pantalla.as_ref(), &mut diagnostics);

    for diag in &diagnostics {
        warn!("Structured parse: {}", diag);
    }

    Ok(ParsedStructured {
        document: ScriptDocument {
            config,
            source: ScriptSource::Tracks {
                speech,
                animation,
                display,
            },
        },
        diagnostics,
    })
}

/// Serialize one action item back into a track entry
fn action_to_entry(item: &ActionItem, display_as_image: bool) -> TrackEntry {
    match &item.kind {
        ActionKind::Speech { text } => TrackEntry {
            tipo: "text".to_string(),
            info: text.clone(),
        },
        ActionKind::Animation { path } => TrackEntry {
            tipo: "movimiento".to_string(),
            info: path.clone(),
        },
        ActionKind::Delay { duration_ms } => TrackEntry {
            tipo: "delay".to_string(),
            info: duration_ms.to_string(),
        },
        ActionKind::Display { content } => TrackEntry {
            tipo: if display_as_image { "imagen" } else { "video" }.to_string(),
            info: content.clone(),
        },
    }
}

/// Serialize a [`ScriptDocument`] into the structured on-disk shape.
///
/// Track documents keep their per-track lists; DSL documents are
/// partitioned by action kind, with delays assigned to the speech track.
pub fn to_structured(document: &ScriptDocument) -> StructuredScript {
    let as_image = document.config.display_image_enabled();

    let (speech, animation, display) = match &document.source {
        ScriptSource::Tracks {
            speech,
            animation,
            display,
        } => (speech.clone(), animation.clone(), display.clone()),
        ScriptSource::Sequence(actions) => {
            let mut speech = Vec::new();
            let mut animation = Vec::new();
            let mut display = Vec::new();
            for item in actions {
                match &item.kind {
                    ActionKind::Speech { .. } | ActionKind::Delay { .. } => {
                        speech.push(item.clone())
                    }
                    ActionKind::Animation { .. } => animation.push(item.clone()),
                    ActionKind::Display { .. } => display.push(item.clone()),
                }
            }
            (speech, animation, display)
        }
    };

    StructuredScript {
        subtitulos: document.config.subtitles_enabled(),
        img: as_image,
        speech: Some(speech.iter().map(|i| action_to_entry(i, as_image)).collect()),
        animation: Some(
            animation
                .iter()
                .map(|i| action_to_entry(i, as_image))
                .collect(),
        ),
        pantalla: Some(
            display
                .iter()
                .map(|i| action_to_entry(i, as_image))
                .collect(),
        ),
    }
}

/// Serialize a document to pretty JSON in the structured format
pub fn to_json_pretty(document: &ScriptDocument) -> Result<String, ParseError> {
    serde_json::to_string_pretty(&to_structured(document))
        .map_err(|e| ParseError::DecodeError(e.to_string()))
}
