//! Export settings.
//!
//! The defaults reproduce the fixed naming rules of the exporter. A session
//! document may carry an `export` section that overrides any of them.

use serde::{Deserialize, Serialize};

/// Name of the folder created next to the project file.
pub const DEFAULT_SUBFOLDER: &str = "AudioExports";

/// Label used when a name sanitizes to nothing.
pub const DEFAULT_FALLBACK_NAME: &str = "UnnamedTrack";

/// Prefix for tracks without a display name, followed by the track counter.
pub const DEFAULT_UNNAMED_PREFIX: &str = "Track_";

/// Replacement for characters that cannot appear in a file name.
pub const DEFAULT_PLACEHOLDER: char = '_';

/// Substrings that mark a render format as audio-capable.
pub const DEFAULT_AUDIO_KEYWORDS: [&str; 3] = ["wav", "wave", "audio"];

/// Naming and filtering rules for one export run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportSettings {
    /// Folder name placed beside the project file (or on the desktop).
    pub subfolder: String,

    /// Sanitizer output for empty input.
    pub fallback_name: String,

    /// Prefix for unnamed tracks.
    pub unnamed_prefix: String,

    /// Character substituted for invalid file name characters.
    pub placeholder: char,

    /// Case-insensitive keywords matched against format names.
    pub audio_keywords: Vec<String>,
}

impl Default for ExportSettings {
    fn default() -> Self {
        Self {
            subfolder: DEFAULT_SUBFOLDER.to_string(),
            fallback_name: DEFAULT_FALLBACK_NAME.to_string(),
            unnamed_prefix: DEFAULT_UNNAMED_PREFIX.to_string(),
            placeholder: DEFAULT_PLACEHOLDER,
            audio_keywords: DEFAULT_AUDIO_KEYWORDS
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

impl ExportSettings {
    /// Returns true if `format_name` contains one of the audio keywords.
    pub fn is_audio_format_name(&self, format_name: &str) -> bool {
        let lower = format_name.to_lowercase();
        self.audio_keywords
            .iter()
            .any(|k| lower.contains(&k.to_lowercase()))
    }
}
