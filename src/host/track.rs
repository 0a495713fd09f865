//! Track representation.
//!
//! A session track is either an audio track, which takes part in export, or
//! some other kind (video, MIDI, bus) that the exporter leaves alone. Each
//! track carries a mute flag and optionally references a source clip.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global counter for generating unique track IDs.
static TRACK_ID_COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique identifier for a track within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TrackId(u64);

impl TrackId {
    /// Generates a new unique track ID.
    pub fn new() -> Self {
        Self(TRACK_ID_COUNTER.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for TrackId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Kind of content a track holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    #[default]
    Audio,
    Other,
}

/// Snapshot of a track as seen through the host interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub id: TrackId,
    pub kind: TrackKind,
    /// Display name, possibly empty.
    pub name: String,
    pub muted: bool,
}

impl TrackInfo {
    /// Returns true if the track takes part in export.
    pub fn is_audio(&self) -> bool {
        self.kind == TrackKind::Audio
    }
}

/// A track stored in a session document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionTrack {
    /// Assigned on load; not part of the document.
    #[serde(skip)]
    pub id: TrackId,

    #[serde(default)]
    pub kind: TrackKind,

    /// Display name for the track. May be empty.
    #[serde(default)]
    pub name: String,

    /// Whether this track is muted (excluded from renders).
    #[serde(default)]
    pub muted: bool,

    /// Source WAV file, relative to the session file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip: Option<String>,
}

impl SessionTrack {
    /// Creates an unmuted audio track without a clip.
    pub fn audio(name: impl Into<String>) -> Self {
        Self {
            id: TrackId::new(),
            kind: TrackKind::Audio,
            name: name.into(),
            muted: false,
            clip: None,
        }
    }

    /// Creates a non-audio track.
    pub fn other(name: impl Into<String>) -> Self {
        Self {
            kind: TrackKind::Other,
            ..Self::audio(name)
        }
    }

    /// Sets the source clip path.
    pub fn with_clip(mut self, clip: impl Into<String>) -> Self {
        self.clip = Some(clip.into());
        self
    }

    /// Returns the host-interface view of this track.
    pub fn info(&self) -> TrackInfo {
        TrackInfo {
            id: self.id,
            kind: self.kind,
            name: self.name.clone(),
            muted: self.muted,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_track_ids_are_unique() {
        let a = SessionTrack::audio("A");
        let b = SessionTrack::audio("B");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_kind_defaults_to_audio() {
        let track: SessionTrack = serde_json::from_str(r#"{ "name": "Vox" }"#).unwrap();
        assert_eq!(track.kind, TrackKind::Audio);
        assert!(!track.muted);
        assert!(track.info().is_audio());
    }

    #[test]
    fn test_other_track() {
        let track = SessionTrack::other("Video 1");
        assert_eq!(track.kind, TrackKind::Other);
        assert!(!track.info().is_audio());
    }
}
