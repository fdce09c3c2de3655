//! Two-tone comparison ratios.
//!
//! The comparison loop judges how much of each of two target tones is
//! present in a capture, two independent ways: magnitude at the nearest
//! spectral bins, and RMS level after isolating each tone with a narrow
//! band-pass.

use crate::fft::magnitude_spectrum;
use tonecmp_core::{FilterSpec, Result, filtfilt};

/// Half-width of the isolation band around each target tone.
const HALF_BAND_HZ: f64 = 10.0;
/// Band-pass order used for tone isolation.
const BAND_ORDER: usize = 4;

/// Levels of two target tones and their first/second ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToneRatio {
    /// Level at the first target frequency.
    pub first: f64,
    /// Level at the second target frequency.
    pub second: f64,
    /// `first / second`; infinite when the second level is zero.
    pub ratio: f64,
}

impl ToneRatio {
    fn from_pair(first: f64, second: f64) -> Self {
        let ratio = if second != 0.0 {
            first / second
        } else {
            f64::INFINITY
        };
        Self {
            first,
            second,
            ratio,
        }
    }
}

/// Spectral magnitudes at the bins nearest the two target frequencies.
pub fn spectral_ratio(wfm: &[f32], sample_rate_hz: u32, freqs: [f64; 2]) -> ToneRatio {
    let magnitude = magnitude_spectrum(wfm);
    if magnitude.is_empty() {
        return ToneRatio::from_pair(0.0, 0.0);
    }

    let bin_width = f64::from(sample_rate_hz) / wfm.len() as f64;
    let level_at = |freq: f64| -> f64 {
        let bin = (freq / bin_width).round() as usize;
        f64::from(magnitude[bin.min(magnitude.len() - 1)])
    };

    ToneRatio::from_pair(level_at(freqs[0]), level_at(freqs[1]))
}

/// Band-limited RMS levels at the two target frequencies.
///
/// Each tone is isolated with a [`BAND_ORDER`]th-order Butterworth
/// band-pass ±[`HALF_BAND_HZ`] around the target before taking RMS.
pub fn band_rms_ratio(wfm: &[f32], sample_rate_hz: u32, freqs: [f64; 2]) -> Result<ToneRatio> {
    let mut levels = [0.0f64; 2];
    for (level, freq) in levels.iter_mut().zip(freqs) {
        let spec = FilterSpec::bandpass(
            sample_rate_hz,
            freq - HALF_BAND_HZ,
            freq + HALF_BAND_HZ,
            BAND_ORDER,
        );
        let filtered = filtfilt(&spec.design()?, wfm)?;
        *level = rms(&filtered);
    }
    Ok(ToneRatio::from_pair(levels[0], levels[1]))
}

/// RMS level of a buffer. Empty buffers report 0.
pub fn rms(wfm: &[f32]) -> f64 {
    if wfm.is_empty() {
        return 0.0;
    }
    let sum: f64 = wfm.iter().map(|&v| f64::from(v) * f64::from(v)).sum();
    (sum / wfm.len() as f64).sqrt()
}
