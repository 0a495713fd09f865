//! Test doubles for the host and presentation interfaces.

use crate::error::HostError;
use crate::host::{
    FormatCatalog, Presenter, RenderEngine, RenderFormat, RenderProfile, TrackHost, TrackId,
    TrackInfo, TrackKind,
};
use std::collections::VecDeque;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Presenter that answers prompts from a script and records everything shown.
#[derive(Debug, Default)]
pub struct ScriptedPresenter {
    answers: VecDeque<Option<String>>,
    confirm_first: bool,
    /// `(title, items)` of every prompt, in order.
    pub prompts: Vec<(String, Vec<String>)>,
    /// `(title, message)` of every notice, in order.
    pub notices: Vec<(String, String)>,
}

impl ScriptedPresenter {
    /// Answers prompts in order; `None` dismisses. Runs out into dismissals.
    pub fn new(answers: Vec<Option<String>>) -> Self {
        Self {
            answers: answers.into(),
            ..Self::default()
        }
    }

    /// Confirms the pre-selected first entry of every prompt.
    pub fn confirming_first() -> Self {
        Self {
            confirm_first: true,
            ..Self::default()
        }
    }
}

impl Presenter for ScriptedPresenter {
    fn prompt_choice(&mut self, title: &str, items: &[String]) -> io::Result<Option<String>> {
        self.prompts.push((title.to_string(), items.to_vec()));
        if self.confirm_first {
            return Ok(items.first().cloned());
        }
        Ok(self.answers.pop_front().flatten())
    }

    fn notify(&mut self, title: &str, message: &str) -> io::Result<()> {
        self.notices.push((title.to_string(), message.to_string()));
        Ok(())
    }
}

/// One observed render call.
#[derive(Debug, Clone)]
pub struct RenderCall {
    pub path: PathBuf,
    pub profile: String,
    /// Audio tracks that were unmuted while the render ran.
    pub unmuted_audio: Vec<TrackId>,
}

/// In-memory host that records mute writes and render calls.
#[derive(Debug, Default)]
pub struct FakeHost {
    pub tracks: Vec<TrackInfo>,
    pub formats: Vec<(RenderFormat, Vec<RenderProfile>)>,
    pub project_path: Option<PathBuf>,
    pub renders: Vec<RenderCall>,
    pub mute_writes: Vec<(TrackId, bool)>,
    /// Unmuted audio tracks right after each mute write.
    pub mute_snapshots: Vec<Vec<TrackId>>,
    /// Zero-based render call that fails.
    pub fail_render_at: Option<usize>,
}

impl FakeHost {
    /// Builds a host from `(kind, name)` pairs, all tracks initially unmuted.
    pub fn with_tracks(tracks: &[(TrackKind, &str)]) -> Self {
        Self {
            tracks: tracks
                .iter()
                .map(|(kind, name)| TrackInfo {
                    id: TrackId::new(),
                    kind: *kind,
                    name: name.to_string(),
                    muted: false,
                })
                .collect(),
            ..Self::default()
        }
    }

    /// Adds a format with the given `(name, valid)` profiles.
    pub fn with_format(mut self, name: &str, extension: &str, profiles: &[(&str, bool)]) -> Self {
        let index = self.formats.len();
        let format = RenderFormat {
            index,
            name: name.to_string(),
            extension: extension.to_string(),
        };
        let profiles = profiles
            .iter()
            .enumerate()
            .map(|(i, (name, valid))| RenderProfile {
                index: i,
                format_index: index,
                name: name.to_string(),
                valid: *valid,
            })
            .collect();
        self.formats.push((format, profiles));
        self
    }

    pub fn with_project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.project_path = Some(path.into());
        self
    }

    pub fn id_of(&self, name: &str) -> TrackId {
        self.tracks
            .iter()
            .find(|t| t.name == name)
            .map(|t| t.id)
            .unwrap()
    }

    fn unmuted_audio(&self) -> Vec<TrackId> {
        self.tracks
            .iter()
            .filter(|t| t.is_audio() && !t.muted)
            .map(|t| t.id)
            .collect()
    }
}

impl TrackHost for FakeHost {
    fn list_tracks(&self) -> Vec<TrackInfo> {
        self.tracks.clone()
    }

    fn project_file_path(&self) -> Option<PathBuf> {
        self.project_path.clone()
    }

    fn set_mute(&mut self, track: TrackId, muted: bool) -> Result<(), HostError> {
        let info = self
            .tracks
            .iter_mut()
            .find(|t| t.id == track)
            .ok_or(HostError::UnknownTrack(track))?;
        info.muted = muted;
        self.mute_writes.push((track, muted));
        self.mute_snapshots.push(self.unmuted_audio());
        Ok(())
    }
}

impl FormatCatalog for FakeHost {
    fn list_render_formats(&self) -> Vec<RenderFormat> {
        self.formats.iter().map(|(f, _)| f.clone()).collect()
    }

    fn list_profiles(&self, format: &RenderFormat) -> Vec<RenderProfile> {
        self.formats
            .get(format.index)
            .map(|(_, profiles)| profiles.clone())
            .unwrap_or_default()
    }
}

impl RenderEngine for FakeHost {
    fn render(&mut self, output_path: &Path, profile: &RenderProfile) -> Result<(), HostError> {
        let call_index = self.renders.len();
        self.renders.push(RenderCall {
            path: output_path.to_path_buf(),
            profile: profile.name.clone(),
            unmuted_audio: self.unmuted_audio(),
        });
        if self.fail_render_at == Some(call_index) {
            return Err(HostError::Render("encoder crashed".to_string()));
        }
        fs::write(output_path, b"")?;
        Ok(())
    }
}
