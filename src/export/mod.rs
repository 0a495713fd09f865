//! Per-track audio export.
//!
//! The flow is strictly sequential and blocking:
//! - choose an audio format, then a valid profile of that format
//! - resolve (and create) the output folder
//! - render every audio track in isolation, one at a time
//!
//! Nothing in the project is touched until both selections are made. Every
//! way the flow can end is reported to the user with a single notice.

mod location;
mod orchestrator;
mod sanitize;
mod select;
#[cfg(test)]
pub(crate) mod testing;

pub use location::{ensure_exists, resolve_output_folder};
pub use orchestrator::{isolate, run, ExportJob, ExportSummary};
pub use sanitize::{invalid_filename_characters, sanitize};
pub use select::{choose_format, choose_profile, CancelReason, Selection};

use crate::config::ExportSettings;
use crate::error::{ExportError, Result, SelectionStep};
use crate::host::{FormatCatalog, Presenter, RenderEngine, TrackHost};

/// Title of every notice shown by the exporter.
pub const NOTICE_TITLE: &str = "Export Audio Tracks";

/// Maps a cancelled selection step onto its error.
fn cancelled(step: SelectionStep, reason: CancelReason) -> ExportError {
    match reason {
        CancelReason::Dismissed => ExportError::SelectionCancelled { step },
        CancelReason::NoCandidates => ExportError::NoCandidatesAvailable { step },
    }
}

/// Text of the final notice for a failed or cancelled run.
fn failure_message(err: &ExportError) -> String {
    match err {
        ExportError::SelectionCancelled { step } | ExportError::NoCandidatesAvailable { step } => {
            format!("No {} selected. Export cancelled.", step)
        }
        ExportError::RenderFailure { track, path, source } => format!(
            "Export failed on track '{}'.\nOutput file:\n{}\n\n{}",
            track,
            path.display(),
            source
        ),
        ExportError::FileSystemFailure { path, source } => format!(
            "Could not create the output folder:\n{}\n\n{}",
            path.display(),
            source
        ),
        ExportError::MuteFailure { track, source } => {
            format!("Could not change the mute state of track '{}'.\n\n{}", track, source)
        }
        ExportError::Presentation(e) => format!("Export failed: {}", e),
    }
}

/// Runs the selection steps and then the export loop.
fn select_and_run<H, P>(
    host: &mut H,
    presenter: &mut P,
    settings: &ExportSettings,
) -> Result<ExportSummary>
where
    H: TrackHost + FormatCatalog + RenderEngine,
    P: Presenter,
{
    let formats = host.list_render_formats();
    let format = match choose_format(presenter, &formats, settings)? {
        Selection::Selected(format) => format,
        Selection::Cancelled(reason) => return Err(cancelled(SelectionStep::Format, reason)),
    };

    let profiles = host.list_profiles(&format);
    let profile = match choose_profile(presenter, &format, &profiles)? {
        Selection::Selected(profile) => profile,
        Selection::Cancelled(reason) => return Err(cancelled(SelectionStep::Profile, reason)),
    };

    tracing::info!("Exporting with '{}' / '{}'", format.name, profile.name);

    let project_path = host.project_file_path();
    let output_folder = resolve_output_folder(project_path.as_deref(), settings);
    let job = ExportJob::new(output_folder, format, profile);
    run(host, &job, settings)
}

/// Exports every audio track of the host project to its own file.
///
/// Shows a completion notice naming the output folder on success, and a
/// notice describing the outcome on cancellation or failure. Cancellations
/// are returned as errors for which [`ExportError::is_cancellation`] holds;
/// they never modify the project.
pub fn export_audio_tracks<H, P>(
    host: &mut H,
    presenter: &mut P,
    settings: &ExportSettings,
) -> Result<ExportSummary>
where
    H: TrackHost + FormatCatalog + RenderEngine,
    P: Presenter,
{
    match select_and_run(host, presenter, settings) {
        Ok(summary) => {
            tracing::info!(
                "Exported {} track(s) to {}",
                summary.file_count(),
                summary.output_folder.display()
            );
            presenter.notify(
                NOTICE_TITLE,
                &format!(
                    "Export completed!\nFiles saved in:\n{}",
                    summary.output_folder.display()
                ),
            )?;
            Ok(summary)
        }
        Err(ExportError::Presentation(e)) => Err(ExportError::Presentation(e)),
        Err(err) => {
            if err.is_cancellation() {
                tracing::info!("Export cancelled: {}", err);
            } else {
                tracing::error!("Export failed: {}", err);
            }
            presenter.notify(NOTICE_TITLE, &failure_message(&err))?;
            Err(err)
        }
    }
}
