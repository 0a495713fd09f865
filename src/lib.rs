//! trackbounce - Per-track audio export for multi-track sessions.
//!
//! This library isolates each audio track of a session in turn and has the
//! host render it to its own file.

pub mod config;
pub mod error;
pub mod export;
pub mod host;
pub mod ui;

// Re-export commonly used types
pub use config::ExportSettings;
pub use error::{ExportError, HostError};
pub use export::{export_audio_tracks, ExportSummary};
pub use host::{Presenter, Session, TrackId};
