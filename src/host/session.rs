//! Session document: the bundled host binding.
//!
//! A session is an ordered list of tracks plus a catalog of render formats,
//! stored as JSON. It implements the host capability traits so the exporter
//! can drive it exactly as it would drive a full editing application.

use super::render::{render_mix, ClipSource};
use super::track::{SessionTrack, TrackId, TrackInfo, TrackKind};
use super::{FormatCatalog, RenderEngine, RenderFormat, RenderProfile, TrackHost};
use crate::config::ExportSettings;
use crate::error::HostError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Bit depths the renderer can write.
const SUPPORTED_BIT_DEPTHS: [u16; 4] = [8, 16, 24, 32];

/// Lowest sample rate a profile may request.
const MIN_SAMPLE_RATE: u32 = 8_000;

/// Highest sample rate a profile may request.
const MAX_SAMPLE_RATE: u32 = 192_000;

/// A PCM output configuration of a render format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileDef {
    pub name: String,
    pub sample_rate: u32,
    pub bits_per_sample: u16,
    pub channels: u16,
}

impl ProfileDef {
    pub fn new(
        name: impl Into<String>,
        sample_rate: u32,
        bits_per_sample: u16,
        channels: u16,
    ) -> Self {
        Self {
            name: name.into(),
            sample_rate,
            bits_per_sample,
            channels,
        }
    }

    /// Returns true if the renderer can produce this configuration.
    pub fn is_valid(&self) -> bool {
        (1..=2).contains(&self.channels)
            && SUPPORTED_BIT_DEPTHS.contains(&self.bits_per_sample)
            && (MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&self.sample_rate)
    }
}

/// A render format offered by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatDef {
    pub name: String,
    pub extension: String,
    #[serde(default)]
    pub profiles: Vec<ProfileDef>,
}

impl FormatDef {
    pub fn new(name: impl Into<String>, extension: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            extension: extension.into(),
            profiles: Vec::new(),
        }
    }

    pub fn with_profile(mut self, profile: ProfileDef) -> Self {
        self.profiles.push(profile);
        self
    }
}

/// Render catalog used when a session document does not define one.
pub fn default_formats() -> Vec<FormatDef> {
    vec![
        FormatDef::new("Wave (Microsoft)", "wav")
            .with_profile(ProfileDef::new("44,100 Hz, 16 Bit, Stereo, PCM", 44_100, 16, 2))
            .with_profile(ProfileDef::new("48,000 Hz, 24 Bit, Stereo, PCM", 48_000, 24, 2))
            .with_profile(ProfileDef::new("48,000 Hz, 16 Bit, Mono, PCM", 48_000, 16, 1)),
        FormatDef::new("MainConcept AVC/AAC", "mp4")
            .with_profile(ProfileDef::new("Internet HD 1080p", 48_000, 16, 2)),
    ]
}

/// A multi-track session loaded from disk or built in memory.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Session name.
    pub name: String,

    /// Tracks in session order.
    #[serde(default)]
    tracks: Vec<SessionTrack>,

    /// Render formats offered to the exporter.
    #[serde(default = "default_formats")]
    formats: Vec<FormatDef>,

    /// Overrides for the exporter's naming rules.
    #[serde(default)]
    pub export: ExportSettings,

    /// Where the session was loaded from. `None` for an unsaved session.
    #[serde(skip)]
    file_path: Option<PathBuf>,
}

impl Session {
    /// Creates an empty, unsaved session with the default render catalog.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            tracks: Vec::new(),
            formats: default_formats(),
            export: ExportSettings::default(),
            file_path: None,
        }
    }

    /// Adds a track at the end of the session.
    pub fn add_track(&mut self, track: SessionTrack) -> TrackId {
        let id = track.id;
        self.tracks.push(track);
        id
    }

    /// Returns all tracks in the session.
    pub fn tracks(&self) -> &[SessionTrack] {
        &self.tracks
    }

    /// Returns a mutable reference to a track by its ID.
    pub fn get_track_mut(&mut self, id: TrackId) -> Option<&mut SessionTrack> {
        self.tracks.iter_mut().find(|t| t.id == id)
    }

    /// Returns the render catalog.
    pub fn formats(&self) -> &[FormatDef] {
        &self.formats
    }

    /// Replaces the render catalog.
    pub fn set_formats(&mut self, formats: Vec<FormatDef>) {
        self.formats = formats;
    }

    /// Parses a session from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Serializes the session to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Loads a session from a JSON file and remembers its location.
    ///
    /// # Errors
    ///
    /// Returns error if file reading or parsing fails
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, std::io::Error> {
        let json = fs::read_to_string(path.as_ref())?;
        let mut session: Session = serde_json::from_str(&json)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        session.file_path = Some(path.as_ref().to_path_buf());
        Ok(session)
    }

    /// Saves the session to a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if serialization or file writing fails
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), std::io::Error> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
        fs::write(path, json)
    }

    /// Resolves a clip reference against the session file's directory.
    fn clip_path(&self, clip: &str) -> PathBuf {
        let clip = Path::new(clip);
        if clip.is_absolute() {
            return clip.to_path_buf();
        }
        match self.file_path.as_deref().and_then(Path::parent) {
            Some(dir) => dir.join(clip),
            None => clip.to_path_buf(),
        }
    }
}

impl TrackHost for Session {
    fn list_tracks(&self) -> Vec<TrackInfo> {
        self.tracks.iter().map(SessionTrack::info).collect()
    }

    fn project_file_path(&self) -> Option<PathBuf> {
        self.file_path.clone()
    }

    fn set_mute(&mut self, track: TrackId, muted: bool) -> Result<(), HostError> {
        let track = self
            .get_track_mut(track)
            .ok_or(HostError::UnknownTrack(track))?;
        track.muted = muted;
        Ok(())
    }
}

impl FormatCatalog for Session {
    fn list_render_formats(&self) -> Vec<RenderFormat> {
        self.formats
            .iter()
            .enumerate()
            .map(|(index, f)| RenderFormat {
                index,
                name: f.name.clone(),
                extension: f.extension.clone(),
            })
            .collect()
    }

    fn list_profiles(&self, format: &RenderFormat) -> Vec<RenderProfile> {
        let Some(def) = self.formats.get(format.index) else {
            return Vec::new();
        };
        def.profiles
            .iter()
            .enumerate()
            .map(|(index, p)| RenderProfile {
                index,
                format_index: format.index,
                name: p.name.clone(),
                valid: p.is_valid(),
            })
            .collect()
    }
}

impl RenderEngine for Session {
    fn render(&mut self, output_path: &Path, profile: &RenderProfile) -> Result<(), HostError> {
        let def = self
            .formats
            .get(profile.format_index)
            .and_then(|f| f.profiles.get(profile.index))
            .ok_or_else(|| HostError::UnknownProfile(profile.name.clone()))?;
        if !def.is_valid() {
            return Err(HostError::Render(format!(
                "profile '{}' cannot be rendered",
                def.name
            )));
        }

        // Only unmuted audio tracks with a clip contribute to the mix.
        let sources: Vec<ClipSource> = self
            .tracks
            .iter()
            .filter(|t| t.kind == TrackKind::Audio && !t.muted)
            .filter_map(|t| {
                t.clip.as_deref().map(|clip| ClipSource {
                    track: t.name.clone(),
                    path: self.clip_path(clip),
                })
            })
            .collect();

        render_mix(&sources, def, output_path)
    }
}
