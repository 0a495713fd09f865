//! Track name to file name conversion.

use crate::config::{ExportSettings, DEFAULT_PLACEHOLDER};

/// Device names Windows reserves regardless of extension.
const RESERVED_DEVICE_NAMES: [&str; 22] = [
    "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
    "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
];

/// Characters that cannot appear in a file name.
///
/// This is the Windows set (the strictest of the common file systems), used
/// on every platform so an export folder can be copied anywhere.
pub fn invalid_filename_characters() -> impl Iterator<Item = char> {
    ['"', '<', '>', '|', ':', '*', '?', '\\', '/']
        .into_iter()
        .chain((0u8..32).map(char::from))
}

fn is_invalid_filename_char(c: char) -> bool {
    c.is_ascii_control() || invalid_filename_characters().any(|invalid| invalid == c)
}

/// Returns true if Windows treats `name` as a device, e.g. `nul` or `COM1.take`.
fn is_reserved_device_name(name: &str) -> bool {
    let stem = name.split('.').next().unwrap_or(name).trim_end();
    RESERVED_DEVICE_NAMES
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(stem))
}

/// Converts a track label into a single, non-empty path segment.
///
/// Empty or missing input yields the fallback label. Otherwise every invalid
/// character is replaced with the placeholder and surrounding whitespace is
/// trimmed. Results that would still not name a file (blank, `.`, `..`, a
/// Windows device name) fall back to the label as well. A placeholder that is
/// itself invalid is replaced by the default one.
pub fn sanitize(name: Option<&str>, settings: &ExportSettings) -> String {
    let name = match name {
        Some(name) if !name.is_empty() => name,
        _ => return settings.fallback_name.clone(),
    };
    let placeholder = if is_invalid_filename_char(settings.placeholder) {
        tracing::warn!(
            "Placeholder {:?} is not allowed in file names, using {:?}",
            settings.placeholder,
            DEFAULT_PLACEHOLDER
        );
        DEFAULT_PLACEHOLDER
    } else {
        settings.placeholder
    };

    let replaced: String = name
        .chars()
        .map(|c| {
            if is_invalid_filename_char(c) {
                placeholder
            } else {
                c
            }
        })
        .collect();

    let trimmed = replaced.trim();
    if trimmed.is_empty() || trimmed.chars().all(|c| c == '.') || is_reserved_device_name(trimmed)
    {
        return settings.fallback_name.clone();
    }
    trimmed.to_string()
}
