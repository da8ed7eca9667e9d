/*!
 * Common in-memory model shared by both script grammars.
 */

use serde::{Deserialize, Serialize};

/// Per-script configuration captured from either grammar.
///
/// The subtitle and display-image flags are mutually exclusive; the setters
/// enforce that turning one on clears the other, mirroring the authoring UI
/// where the two checkboxes disable each other. Deserialization routes
/// through a raw wire struct so a hand-edited document with both flags
/// set is normalized instead of violating the exclusion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "RawScriptConfig")]
pub struct ScriptConfig {
    /// Language handed to the speech command
    pub language: String,
    subtitles_enabled: bool,
    display_image_enabled: bool,
}

/// Unvalidated wire shape of [`ScriptConfig`]
#[derive(Deserialize)]
struct RawScriptConfig {
    #[serde(default = "default_script_language")]
    language: String,
    #[serde(default)]
    subtitles_enabled: bool,
    #[serde(default)]
    display_image_enabled: bool,
}

fn default_script_language() -> String {
    "Spanish".to_string()
}

impl From<RawScriptConfig> for ScriptConfig {
    fn from(raw: RawScriptConfig) -> Self {
        let mut config = Self {
            language: raw.language,
            subtitles_enabled: false,
            display_image_enabled: false,
        };
        // Same order as the structured parser: the image flag wins when a
        // hand-edited file sets both.
        config.set_subtitles_enabled(raw.subtitles_enabled);
        if raw.display_image_enabled {
            config.set_display_image_enabled(true);
        }
        config
    }
}

impl Default for ScriptConfig {
    fn default() -> Self {
        Self {
            language: default_script_language(),
            subtitles_enabled: false,
            display_image_enabled: false,
        }
    }
}

impl ScriptConfig {
    /// Whether spoken text is mirrored to the tablet as subtitles
    pub fn subtitles_enabled(&self) -> bool {
        self.subtitles_enabled
    }

    /// Whether display items are interpreted as images/URLs for the tablet
    pub fn display_image_enabled(&self) -> bool {
        self.display_image_enabled
    }

    /// Enable or disable subtitles; enabling clears the display-image flag
    pub fn set_subtitles_enabled(&mut self, enabled: bool) {
        self.subtitles_enabled = enabled;
        if enabled {
            self.display_image_enabled = false;
        }
    }

    /// Enable or disable the display image; enabling clears the subtitle flag
    pub fn set_display_image_enabled(&mut self, enabled: bool) {
        self.display_image_enabled = enabled;
        if enabled {
            self.subtitles_enabled = false;
        }
    }
}

/// The kind of robot behavior an action item triggers
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ActionKind {
    /// Speak a phrase through the robot's TTS
    Speech {
        /// The text to speak
        text: String,
    },
    /// Play a catalog animation
    Animation {
        /// Slash-delimited animation path, e.g. `Gestures/Hey_1`
        path: String,
    },
    /// Wait without dispatching anything
    Delay {
        /// Wait duration in milliseconds
        duration_ms: u64,
    },
    /// Put content on the robot's tablet screen
    Display {
        /// URL or literal text, interpreted per script config
        content: String,
    },
}

/// One unit of robot behavior in a timeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ActionItem {
    /// Stable label carried by the DSL format for navigation/display
    pub id: Option<String>,
    /// What this item does when dispatched
    pub kind: ActionKind,
}

impl ActionItem {
    /// Action item without an id label (structured format)
    pub fn new(kind: ActionKind) -> Self {
        Self { id: None, kind }
    }

    /// Action item carrying a DSL id label
    pub fn with_id(id: impl Into<String>, kind: ActionKind) -> Self {
        Self {
            id: Some(id.into()),
            kind,
        }
    }

    /// Short human-readable summary used by the run log and the CLI
    pub fn summary(&self) -> String {
        match &self.kind {
            ActionKind::Speech { text } => format!("speech \"{}\"", text),
            ActionKind::Animation { path } => format!("animation {}", path),
            ActionKind::Delay { duration_ms } => format!("delay {}ms", duration_ms),
            ActionKind::Display { content } => format!("display {}", content),
        }
    }
}

/// Source track of a timeline entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TrackKind {
    /// Spoken-phrase track
    Speech,
    /// Gesture/animation track
    Animation,
    /// Tablet screen track
    Display,
}

impl std::fmt::Display for TrackKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Speech => write!(f, "speech"),
            Self::Animation => write!(f, "animation"),
            Self::Display => write!(f, "display"),
        }
    }
}

/// Action lists as laid out by the source grammar
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum ScriptSource {
    /// The DSL format: a single pre-merged, already-ordered list
    Sequence(Vec<ActionItem>),
    /// The structured format: three independent per-track lists
    Tracks {
        /// Spoken-phrase items
        speech: Vec<ActionItem>,
        /// Gesture/animation items
        animation: Vec<ActionItem>,
        /// Tablet screen items
        display: Vec<ActionItem>,
    },
}

impl ScriptSource {
    /// Total number of action items across the source
    pub fn len(&self) -> usize {
        match self {
            Self::Sequence(actions) => actions.len(),
            Self::Tracks {
                speech,
                animation,
                display,
            } => speech.len() + animation.len() + display.len(),
        }
    }

    /// True when the source holds no action items
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A parsed script: its configuration plus its action lists
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScriptDocument {
    /// Script-level configuration
    pub config: ScriptConfig,
    /// Action lists in their source layout
    pub source: ScriptSource,
}

impl ScriptDocument {
    /// Empty document with default configuration (DSL layout)
    pub fn empty() -> Self {
        Self {
            config: ScriptConfig::default(),
            source: ScriptSource::Sequence(Vec::new()),
        }
    }
}
