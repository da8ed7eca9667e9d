/*!
 * Built-in quick scripts: short named sequences for one-click demos.
 */

use super::model::{ActionItem, ActionKind, ScriptConfig, ScriptDocument, ScriptSource};

/// Names of the built-in quick scripts, in menu order
pub const QUICK_SCRIPT_NAMES: [&str; 5] = [
    "saludo",
    "presentacion",
    "despedida",
    "celebracion",
    "baile",
];

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

fn delay(duration_ms: u64) -> ActionItem {
    ActionItem::new(ActionKind::Delay { duration_ms })
}

/// Look up a built-in quick script by name.
///
/// Returns a ready-to-run document with default configuration, or `None`
/// for an unknown name.
pub fn quick_script(name: &str) -> Option<ScriptDocument> {
    let actions = match name {
        "saludo" => vec![
            speech("¡Hola! Soy Pepper, es un placer conocerte"),
            animation("Gestures/Hey_1"),
        ],
        "presentacion" => vec![
            speech("Bienvenidos al laboratorio de robótica"),
            animation("Gestures/Explain_1"),
            speech("Estoy aquí para ayudarlos en sus investigaciones"),
        ],
        "despedida" => vec![
            speech("¡Ha sido un gusto interactuar con ustedes!"),
            animation("Gestures/Bye_1"),
            speech("¡Hasta la próxima!"),
        ],
        "celebracion" => vec![
            speech("¡Lo logramos! Excelente trabajo equipo"),
            animation("Gestures/Bravo_1"),
            delay(1000),
            animation("Gestures/Happy_1"),
        ],
        "baile" => vec![
            speech("¡Es hora de bailar! Pongan música"),
            animation("Dances/Disco"),
            delay(5000),
            speech("¡Qué divertido!"),
        ],
        _ => return None,
    };

    Some(ScriptDocument {
        config: ScriptConfig::default(),
        source: ScriptSource::Sequence(actions),
    })
}
