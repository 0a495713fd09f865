//! Error types for track export.
//!
//! `HostError` is what the host bindings report back through the capability
//! traits. `ExportError` is what the export flow surfaces to the user; every
//! variant ends up as a notice before it is returned.

use crate::host::TrackId;
use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors reported by a host binding.
#[derive(Debug, Error)]
pub enum HostError {
    /// The track id does not belong to the session.
    #[error("unknown track {0}")]
    UnknownTrack(TrackId),

    /// The profile does not resolve to an entry of the host catalog.
    #[error("unknown render profile '{0}'")]
    UnknownProfile(String),

    /// File I/O failed on the host side.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Reading or writing a WAV file failed.
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    /// The host refused or aborted the render.
    #[error("render error: {0}")]
    Render(String),
}

/// Which of the two selection steps an outcome refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStep {
    Format,
    Profile,
}

impl fmt::Display for SelectionStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionStep::Format => write!(f, "output format"),
            SelectionStep::Profile => write!(f, "output profile"),
        }
    }
}

/// Errors that end an export run.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The user dismissed one of the selection prompts.
    #[error("no {step} selected")]
    SelectionCancelled { step: SelectionStep },

    /// There was nothing to choose from.
    #[error("no {step} available")]
    NoCandidatesAvailable { step: SelectionStep },

    /// The host failed to render a track.
    #[error("failed to render track '{track}' to {}", .path.display())]
    RenderFailure {
        track: String,
        path: PathBuf,
        #[source]
        source: HostError,
    },

    /// The output folder could not be created.
    #[error("failed to create output folder {}", .path.display())]
    FileSystemFailure {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The host rejected a mute-state change while isolating a track.
    #[error("failed to change mute state of track '{track}'")]
    MuteFailure {
        track: String,
        #[source]
        source: HostError,
    },

    /// The presentation layer failed while prompting or notifying.
    #[error("presentation error: {0}")]
    Presentation(#[from] io::Error),
}

impl ExportError {
    /// Returns true for outcomes that are informational rather than failures.
    pub fn is_cancellation(&self) -> bool {
        matches!(
            self,
            ExportError::SelectionCancelled { .. } | ExportError::NoCandidatesAvailable { .. }
        )
    }
}

/// Result type for export operations.
pub type Result<T> = std::result::Result<T, ExportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancellation_kinds() {
        assert!(ExportError::SelectionCancelled {
            step: SelectionStep::Format
        }
        .is_cancellation());
        assert!(ExportError::NoCandidatesAvailable {
            step: SelectionStep::Profile
        }
        .is_cancellation());
        assert!(!ExportError::FileSystemFailure {
            path: PathBuf::from("out"),
            source: io::Error::other("denied"),
        }
        .is_cancellation());
    }

    #[test]
    fn test_render_failure_names_track_and_path() {
        let err = ExportError::RenderFailure {
            track: "Music".to_string(),
            path: PathBuf::from("AudioExports/Music.wav"),
            source: HostError::Render("disk full".to_string()),
        };
        let message = err.to_string();
        assert!(message.contains("Music"));
        assert!(message.contains("Music.wav"));
    }
}
