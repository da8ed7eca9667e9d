/*!
 * Parser for the line-oriented script DSL.
 *
 * The format is a plain text file with an optional `<config>…</config>`
 * block of `key=value` pairs followed by action lines of the shape
 * `"id","animationPathOrEmpty","textOrEmpty"` (quotes optional).
 *
 * The parser is deliberately forgiving: lines that do not match the
 * expected shape are skipped and reported as diagnostics, never as a
 * fatal error. Operators hand-edit these files on laptops next to the
 * robot; a typo must not take the whole script down.
 */

use log::warn;
use once_cell::sync::Lazy;
use regex::Regex;

use super::model::{ActionItem, ActionKind, ScriptConfig, ScriptDocument, ScriptSource};

/// Matches a value optionally wrapped in double quotes, capturing the inside
static QUOTED: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s*"?(.*?)"?\s*$"#).expect("quoted-value pattern is valid"));

/// Result of a DSL parse: the document plus per-line diagnostics.
///
/// Diagnostics describe skipped or degraded lines; an empty list means the
/// whole input was well-formed.
#[derive(Debug)]
pub struct ParsedDsl {
    /// The parsed document (possibly partial)
    pub document: ScriptDocument,
    /// One message per skipped or degraded line
    pub diagnostics: Vec<String>,
}

/// Strip optional surrounding quotes and whitespace from a field
fn unquote(field: &str) -> String {
    QUOTED
        .captures(field)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| field.trim().to_string())
}

/// Apply one `key=value` config line; keys are case-insensitive
fn apply_config_line(config: &mut ScriptConfig, key: &str, value: &str) {
    match key {
        "language" => config.language = value.to_string(),
        "subtitulos" => config.set_subtitles_enabled(value == "true"),
        "img" => config.set_display_image_enabled(value == "true"),
        other => warn!("Ignoring unknown config key '{}'", other),
    }
}

/// Parse DSL script text into a [`ScriptDocument`].
///
/// Never fails: malformed lines are skipped with a diagnostic and the
/// remainder of the input still parses. An all-garbage input yields an
/// empty document and one diagnostic per line.
pub fn parse(input: &str) -> ParsedDsl {
    let mut config = ScriptConfig::default();
    let mut actions: Vec<ActionItem> = Vec::new();
    let mut diagnostics: Vec<String> = Vec::new();
    let mut in_config = false;

    for (line_no, raw) in input.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with("<config>") {
            in_config = true;
            continue;
        }
        if line.starts_with("</config>") {
            in_config = false;
            continue;
        }

        if in_config {
            match line.split_once('=') {
                Some((key, value)) => {
                    apply_config_line(&mut config, &key.trim().to_lowercase(), value.trim());
                }
                None => {
                    diagnostics.push(format!(
                        "line {}: config entry without '=' skipped",
                        line_no + 1
                    ));
                }
            }
            continue;
        }

        let parts: Vec<&str> = line.split(',').collect();
        if parts.len() < 3 {
            diagnostics.push(format!(
                "line {}: expected at least 3 comma-separated fields, got {}",
                line_no + 1,
                parts.len()
            ));
            continue;
        }

        let id = unquote(parts[0]);
        let animation = unquote(parts[1]);
        let text = unquote(parts[2]);

        // An item is a single tagged variant; when a line carries both an
        // animation path and text, the path wins and the text is dropped.
        let kind = if !animation.is_empty() {
            if !text.is_empty() {
                diagnostics.push(format!(
                    "line {}: both animation and text present, text ignored",
                    line_no + 1
                ));
            }
            ActionKind::Animation { path: animation }
        } else if !text.is_empty() {
            ActionKind::Speech { text }
        } else {
            diagnostics.push(format!(
                "line {}: neither animation nor text present, skipped",
                line_no + 1
            ));
            continue;
        };

        actions.push(ActionItem::with_id(id, kind));
    }

    for diag in &diagnostics {
        warn!("DSL parse: {}", diag);
    }

    ParsedDsl {
        document: ScriptDocument {
            config,
            source: ScriptSource::Sequence(actions),
        },
        diagnostics,
    }
}
