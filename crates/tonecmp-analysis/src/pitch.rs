//! Fundamental frequency estimation via spectral peak location.

use crate::fft::magnitude_spectrum;

/// Estimate the fundamental frequency of a buffer, in Hz.
///
/// Transforms the whole buffer at its natural length, zeroes the DC bin,
/// and returns the frequency of the strongest remaining bin. Resolution
/// is bounded below by `sample_rate / len` = 1/duration, so callers must
/// size buffers to the precision they need. Buffers shorter than two
/// samples report 0.0.
pub fn fundamental_frequency(wfm: &[f32], sample_rate_hz: u32) -> f64 {
    if wfm.len() < 2 {
        return 0.0;
    }

    let mut magnitude = magnitude_spectrum(wfm);
    magnitude[0] = 0.0;

    let peak = magnitude
        .iter()
        .enumerate()
        .max_by(|a, b| a.1.total_cmp(b.1))
        .map(|(i, _)| i)
        .unwrap_or(0);

    peak as f64 * f64::from(sample_rate_hz) / wfm.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn sine(freq_hz: f32, duration_s: f32, sample_rate_hz: u32) -> Vec<f32> {
        let n = (duration_s * sample_rate_hz as f32).ceil() as usize;
        (0..n)
            .map(|i| (2.0 * PI * freq_hz * i as f32 / sample_rate_hz as f32).sin())
            .collect()
    }

    #[test]
    fn recovers_pure_sine() {
        let wfm = sine(440.0, 1.0, 48000);
        let freq = fundamental_frequency(&wfm, 48000);
        assert!((freq - 440.0).abs() <= 1.0, "got {}", freq);
    }

    #[test]
    fn resolution_follows_duration() {
        // 2 s of signal gives 0.5 Hz bins; a 440.5 Hz tone must land on one.
        let wfm = sine(440.5, 2.0, 48000);
        let freq = fundamental_frequency(&wfm, 48000);
        assert!((freq - 440.5).abs() < 0.5, "got {}", freq);
    }

    #[test]
    fn ignores_dc_offset() {
        let wfm: Vec<f32> = sine(880.0, 1.0, 48000)
            .iter()
            .map(|v| v * 0.1 + 0.9)
            .collect();
        let freq = fundamental_frequency(&wfm, 48000);
        assert!((freq - 880.0).abs() <= 1.0, "got {}", freq);
    }

    #[test]
    fn short_buffers_report_zero() {
        assert_eq!(fundamental_frequency(&[], 48000), 0.0);
        assert_eq!(fundamental_frequency(&[0.5], 48000), 0.0);
    }
}
