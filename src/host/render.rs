//! Session rendering.
//!
//! Sums the clips of the currently audible tracks and writes the result as a
//! PCM WAV file in the requested profile's format.

use super::session::ProfileDef;
use crate::error::HostError;
use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use std::path::{Path, PathBuf};

/// Clip of one audible track.
#[derive(Debug, Clone)]
pub(super) struct ClipSource {
    pub track: String,
    pub path: PathBuf,
}

/// Decoded clip, one `Vec` of channel samples per frame.
struct DecodedClip {
    sample_rate: u32,
    frames: Vec<Vec<f32>>,
}

/// Reads a WAV file into normalized `f32` frames.
fn decode_clip(source: &ClipSource) -> Result<DecodedClip, HostError> {
    let mut reader = WavReader::open(&source.path).map_err(|e| {
        HostError::Render(format!(
            "cannot open clip {} of track '{}': {}",
            source.path.display(),
            source.track,
            e
        ))
    })?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let samples: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        SampleFormat::Int => {
            let scale = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };

    Ok(DecodedClip {
        sample_rate: spec.sample_rate,
        frames: samples.chunks(channels).map(<[f32]>::to_vec).collect(),
    })
}

/// Maps a source frame onto `out_channels` channels.
///
/// Mono is duplicated, and everything else is averaged down to mono or
/// truncated to the first two channels.
fn map_channels(frame: &[f32], out_channels: usize) -> Vec<f32> {
    match (frame.len(), out_channels) {
        (1, n) => vec![frame[0]; n],
        (len, 1) => vec![frame.iter().sum::<f32>() / len as f32],
        (_, n) => frame.iter().copied().chain(std::iter::repeat(0.0)).take(n).collect(),
    }
}

/// Mixes `sources` and writes the result to `output_path`.
///
/// An empty source list produces a valid, zero-length file.
pub(super) fn render_mix(
    sources: &[ClipSource],
    profile: &ProfileDef,
    output_path: &Path,
) -> Result<(), HostError> {
    let out_channels = profile.channels as usize;
    let out_rate = profile.sample_rate as u64;
    let mut mix: Vec<f32> = Vec::new();

    for source in sources {
        let clip = decode_clip(source)?;
        if clip.frames.is_empty() || clip.sample_rate == 0 {
            continue;
        }
        // Nearest-sample rate mapping.
        let src_rate = clip.sample_rate as u64;
        let out_frames = (clip.frames.len() as u64 * out_rate).div_ceil(src_rate) as usize;
        if mix.len() < out_frames * out_channels {
            mix.resize(out_frames * out_channels, 0.0);
        }
        for i in 0..out_frames {
            let src_index = ((i as u64 * src_rate) / out_rate) as usize;
            let src_index = src_index.min(clip.frames.len() - 1);
            let mapped = map_channels(&clip.frames[src_index], out_channels);
            for (ch, value) in mapped.into_iter().enumerate() {
                mix[i * out_channels + ch] += value;
            }
        }
    }

    let spec = WavSpec {
        channels: profile.channels,
        sample_rate: profile.sample_rate,
        bits_per_sample: profile.bits_per_sample,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(output_path, spec)?;
    let max = ((1i64 << (profile.bits_per_sample - 1)) - 1) as f32;
    for value in mix {
        let sample = (value.clamp(-1.0, 1.0) * max).round() as i32;
        writer.write_sample(sample)?;
    }
    writer.finalize()?;

    tracing::debug!(
        "Rendered {} clip(s) to {}",
        sources.len(),
        output_path.display()
    );
    Ok(())
}
