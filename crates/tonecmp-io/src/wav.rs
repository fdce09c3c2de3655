//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use std::path::Path;

/// Fraction of full scale the written peak is placed at.
const WRITE_HEADROOM: f32 = 0.8;

/// Read a WAV file into a mono f32 buffer normalized to [-1, 1].
///
/// Supports 16-bit and 32-bit signed integer PCM; float files and other
/// widths are rejected with [`Error::UnsupportedFormat`]. Multi-channel
/// files are mixed down to mono by averaging channels. The sample rate
/// comes from the container header.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f32>, u32)> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    if spec.sample_format != SampleFormat::Int || !matches!(spec.bits_per_sample, 16 | 32) {
        return Err(Error::UnsupportedFormat(format!(
            "{}-bit {:?} (supported: 16-bit and 32-bit signed PCM)",
            spec.bits_per_sample, spec.sample_format
        )));
    }

    let max_val = (1i64 << (spec.bits_per_sample - 1)) as f32;
    let samples: Vec<f32> = reader
        .into_samples::<i32>()
        .map(|s| s.map(|v| v as f32 / max_val))
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|chunk| chunk.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    tracing::debug!(
        samples = mono.len(),
        sample_rate_hz = spec.sample_rate,
        channels,
        "read wav"
    );
    Ok((mono, spec.sample_rate))
}

/// Write a mono buffer as 16-bit PCM.
///
/// The buffer is scaled so its peak lands at [`WRITE_HEADROOM`] of full
/// 16-bit range; the scale factor comes from the maximum absolute sample
/// value. A silent buffer writes as zeros.
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f32], sample_rate_hz: u32) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: sample_rate_hz,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let peak = samples.iter().fold(0.0f32, |acc, &s| acc.max(s.abs()));
    let scale = if peak > 0.0 {
        WRITE_HEADROOM * f32::from(i16::MAX) / peak
    } else {
        0.0
    };

    let mut writer = WavWriter::create(path, spec)?;
    for &sample in samples {
        writer.write_sample((sample * scale).round() as i16)?;
    }
    writer.finalize()?;

    tracing::debug!(
        samples = samples.len(),
        sample_rate_hz,
        "wrote wav"
    );
    Ok(())
}
