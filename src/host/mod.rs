//! Capability interfaces onto the host editing environment.
//!
//! The exporter never sees the host's object graph. It talks to three narrow
//! traits (track listing and muting, the render catalog, and render
//! invocation) plus a presentation boundary for prompts and notices. The
//! bundled [`Session`] implements the host side over a JSON document.

mod render;
mod session;
mod track;

pub use session::{FormatDef, ProfileDef, Session};
pub use track::{SessionTrack, TrackId, TrackInfo, TrackKind};

use crate::error::HostError;
use std::io;
use std::path::{Path, PathBuf};

/// A render format exposed by the host, such as a codec/container family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderFormat {
    /// Position of the format in the host catalog.
    pub index: usize,
    /// Display name shown to the user.
    pub name: String,
    /// File extension without the leading dot.
    pub extension: String,
}

/// A configuration variant of a render format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderProfile {
    /// Position of the profile within its format.
    pub index: usize,
    /// Catalog position of the owning format.
    pub format_index: usize,
    /// Display name shown to the user.
    pub name: String,
    /// Whether the host considers the profile usable for the current project.
    pub valid: bool,
}

impl RenderProfile {
    /// Returns true if the host reports this profile as usable.
    pub fn is_valid(&self) -> bool {
        self.valid
    }
}

/// Track listing and mute control.
pub trait TrackHost {
    /// Returns all tracks in project order.
    fn list_tracks(&self) -> Vec<TrackInfo>;

    /// Returns the project file location, or `None` for an unsaved project.
    fn project_file_path(&self) -> Option<PathBuf>;

    /// Sets the mute flag of a single track.
    fn set_mute(&mut self, track: TrackId, muted: bool) -> Result<(), HostError>;
}

/// The host's catalog of render formats and their profiles.
pub trait FormatCatalog {
    /// Returns every render format in host order.
    fn list_render_formats(&self) -> Vec<RenderFormat>;

    /// Returns every profile of `format` in host order, valid or not.
    fn list_profiles(&self, format: &RenderFormat) -> Vec<RenderProfile>;
}

/// Render invocation.
pub trait RenderEngine {
    /// Renders the current project state to `output_path`.
    ///
    /// Blocks until the render has completed or failed.
    fn render(&mut self, output_path: &Path, profile: &RenderProfile) -> Result<(), HostError>;
}

/// Blocking prompts and notices shown to the user.
pub trait Presenter {
    /// Shows `items` with the first entry pre-selected and waits for the user.
    ///
    /// Returns the confirmed entry, or `None` if the prompt was dismissed.
    fn prompt_choice(&mut self, title: &str, items: &[String]) -> io::Result<Option<String>>;

    /// Shows a message and waits until the user acknowledges it.
    fn notify(&mut self, title: &str, message: &str) -> io::Result<()>;
}
