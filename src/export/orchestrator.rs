//! Per-track export loop.
//!
//! Each audio track is rendered on its own: all audio tracks are muted except
//! the target, the host renders, and the target is muted again before the
//! next track. At the moment a render runs, exactly one audio track is
//! audible and it is the track being exported. Renders never overlap.

use super::location::ensure_exists;
use super::sanitize::sanitize;
use crate::config::ExportSettings;
use crate::error::{ExportError, Result};
use crate::host::{RenderEngine, RenderFormat, RenderProfile, TrackHost, TrackId, TrackInfo};
use std::path::PathBuf;

/// Parameters shared by every render of one export run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportJob {
    pub output_folder: PathBuf,
    pub format: RenderFormat,
    pub profile: RenderProfile,
}

impl ExportJob {
    pub fn new(
        output_folder: impl Into<PathBuf>,
        format: RenderFormat,
        profile: RenderProfile,
    ) -> Self {
        Self {
            output_folder: output_folder.into(),
            format,
            profile,
        }
    }

    /// Returns `<output_folder>/<file_stem>.<extension>`.
    pub fn output_path(&self, file_stem: &str) -> PathBuf {
        let extension = self.format.extension.trim_start_matches('.');
        let file_name = if extension.is_empty() {
            file_stem.to_string()
        } else {
            format!("{}.{}", file_stem, extension)
        };
        self.output_folder.join(file_name)
    }
}

/// What an export run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSummary {
    pub output_folder: PathBuf,
    /// Rendered files in track order.
    pub files: Vec<PathBuf>,
}

impl ExportSummary {
    pub fn file_count(&self) -> usize {
        self.files.len()
    }
}

/// Computes the mute state that isolates `target`.
///
/// Every audio track maps to muted except `target`. Non-audio tracks are not
/// part of the mapping and keep whatever state they have.
pub fn isolate(tracks: &[TrackInfo], target: TrackId) -> Vec<(TrackId, bool)> {
    tracks
        .iter()
        .filter(|t| t.is_audio())
        .map(|t| (t.id, t.id != target))
        .collect()
}

/// Mutes every audio track, ignoring failures.
fn mute_all_audio<H: TrackHost>(host: &mut H, tracks: &[TrackInfo]) {
    for track in tracks.iter().filter(|t| t.is_audio()) {
        if let Err(e) = host.set_mute(track.id, true) {
            tracing::warn!("Could not re-mute track {}: {}", track.id, e);
        }
    }
}

/// Applies an isolation mapping through the host.
fn apply_mutes<H: TrackHost>(
    host: &mut H,
    tracks: &[TrackInfo],
    assignment: &[(TrackId, bool)],
) -> Result<()> {
    for &(id, muted) in assignment {
        if let Err(source) = host.set_mute(id, muted) {
            let track = tracks
                .iter()
                .find(|t| t.id == id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| id.to_string());
            mute_all_audio(host, tracks);
            return Err(ExportError::MuteFailure { track, source });
        }
    }
    Ok(())
}

/// Renders every audio track of the project to its own file.
///
/// Creates the output folder first. Unnamed tracks are called
/// `<unnamed_prefix><n>`, where `n` counts every audio track processed so
/// far (starting at 1), named or not. Two tracks whose names sanitize to the
/// same string write to the same path; the later render replaces the earlier
/// file.
///
/// # Errors
///
/// Stops at the first failure. A failed render re-mutes its track before the
/// error is returned, so the audio tracks are left all muted.
pub fn run<H>(host: &mut H, job: &ExportJob, settings: &ExportSettings) -> Result<ExportSummary>
where
    H: TrackHost + RenderEngine,
{
    ensure_exists(&job.output_folder)?;

    let tracks = host.list_tracks();
    let mut counter = 1usize;
    let mut files = Vec::new();

    for track in tracks.iter().filter(|t| t.is_audio()) {
        let assignment = isolate(&tracks, track.id);
        tracing::debug!("Isolating track {} ({})", track.id, track.name);
        apply_mutes(host, &tracks, &assignment)?;

        let label = if track.name.is_empty() {
            format!("{}{}", settings.unnamed_prefix, counter)
        } else {
            track.name.clone()
        };
        let output_path = job.output_path(&sanitize(Some(&label), settings));

        tracing::info!("Rendering '{}' to {}", label, output_path.display());
        if let Err(source) = host.render(&output_path, &job.profile) {
            tracing::error!("Render of '{}' failed: {}", label, source);
            if let Err(e) = host.set_mute(track.id, true) {
                tracing::warn!("Could not re-mute track {}: {}", track.id, e);
            }
            return Err(ExportError::RenderFailure {
                track: label,
                path: output_path,
                source,
            });
        }

        apply_mutes(host, &tracks, &[(track.id, true)])?;
        files.push(output_path);
        counter += 1;
    }

    Ok(ExportSummary {
        output_folder: job.output_folder.clone(),
        files,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::export::testing::FakeHost;
    use crate::host::TrackKind::{Audio, Other};
    use std::path::Path;

    fn job_for(host: &FakeHost, folder: &Path) -> ExportJob {
        let (format, profiles) = host.formats[0].clone();
        ExportJob::new(folder, format, profiles[0].clone())
    }

    #[test]
    fn test_isolate_maps_only_audio_tracks() {
        let host = FakeHost::with_tracks(&[(Audio, "A"), (Other, "Video"), (Audio, "B")]);
        let a = host.id_of("A");
        let b = host.id_of("B");
        assert_eq!(isolate(&host.tracks, b), vec![(a, true), (b, false)]);
    }

    #[test]
    fn test_output_path() {
        let host = FakeHost::with_tracks(&[]).with_format("Wave", ".wav", &[("PCM", true)]);
        let job = job_for(&host, Path::new("/out"));
        assert_eq!(job.output_path("Vox"), PathBuf::from("/out/Vox.wav"));
    }

    #[test]
    fn test_one_render_per_audio_track_with_isolation() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = FakeHost::with_tracks(&[
            (Audio, "Drums"),
            (Other, "Video 1"),
            (Audio, "Bass"),
            (Audio, "Keys"),
        ])
        .with_format("Wave", "wav", &[("PCM", true)]);
        let job = job_for(&host, dir.path());

        let summary = run(&mut host, &job, &ExportSettings::default()).unwrap();

        assert_eq!(summary.file_count(), 3);
        assert_eq!(host.renders.len(), 3);
        for (call, name) in host.renders.iter().zip(["Drums", "Bass", "Keys"]) {
            assert_eq!(call.unmuted_audio, vec![host.id_of(name)]);
            assert_eq!(call.path.parent(), Some(dir.path()));
        }
        // Every audio track ends muted; the video track is untouched.
        assert!(host.tracks.iter().filter(|t| t.is_audio()).all(|t| t.muted));
        assert!(!host.tracks[1].muted);
        assert!(host.mute_writes.iter().all(|(id, _)| *id != host.id_of("Video 1")));
    }

    #[test]
    fn test_target_is_remuted_before_next_isolation() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = FakeHost::with_tracks(&[(Audio, "A"), (Audio, "B")])
            .with_format("Wave", "wav", &[("PCM", true)]);
        let a = host.id_of("A");
        let b = host.id_of("B");
        let job = job_for(&host, dir.path());

        run(&mut host, &job, &ExportSettings::default()).unwrap();

        assert_eq!(
            host.mute_snapshots,
            vec![vec![a, b], vec![a], vec![], vec![], vec![b], vec![]]
        );
    }

    #[test]
    fn test_counter_counts_every_audio_track() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = FakeHost::with_tracks(&[(Audio, "A"), (Other, ""), (Audio, ""), (Audio, "")])
            .with_format("Wave", "wav", &[("PCM", true)]);
        let job = job_for(&host, dir.path());

        let summary = run(&mut host, &job, &ExportSettings::default()).unwrap();
        let names: Vec<_> = summary
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["A.wav", "Track_2.wav", "Track_3.wav"]);
    }

    #[test]
    fn test_duplicate_names_share_a_path() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = FakeHost::with_tracks(&[(Audio, "Intro"), (Audio, "Intro")])
            .with_format("Wave", "wav", &[("PCM", true)]);
        let job = job_for(&host, dir.path());

        let summary = run(&mut host, &job, &ExportSettings::default()).unwrap();
        assert_eq!(summary.files[0], summary.files[1]);
        assert_eq!(host.renders.len(), 2);
    }

    #[test]
    fn test_render_failure_halts_and_remutes() {
        let dir = tempfile::tempdir().unwrap();
        let mut host = FakeHost::with_tracks(&[(Audio, "A"), (Audio, "B"), (Audio, "C")])
            .with_format("Wave", "wav", &[("PCM", true)]);
        host.fail_render_at = Some(1);
        let job = job_for(&host, dir.path());

        let err = run(&mut host, &job, &ExportSettings::default()).unwrap_err();
        match err {
            ExportError::RenderFailure { track, path, .. } => {
                assert_eq!(track, "B");
                assert_eq!(path, dir.path().join("B.wav"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(host.renders.len(), 2);
        assert!(host.tracks.iter().all(|t| t.muted));
    }

    #[test]
    fn test_folder_failure_before_any_render() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("file");
        std::fs::write(&blocker, b"x").unwrap();
        let mut host = FakeHost::with_tracks(&[(Audio, "A")])
            .with_format("Wave", "wav", &[("PCM", true)]);
        let job = job_for(&host, &blocker.join("AudioExports"));

        let err = run(&mut host, &job, &ExportSettings::default()).unwrap_err();
        assert!(matches!(err, ExportError::FileSystemFailure { .. }));
        assert!(host.renders.is_empty());
        assert!(host.mute_writes.is_empty());
    }
}
