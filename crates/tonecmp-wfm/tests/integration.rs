//! End-to-end generation → filtering → analysis properties.
//!
//! These tests drive the whole pipeline the way the comparison loop
//! does: synthesize a jittered square wave, low-pass it, then recover
//! period statistics and the fundamental frequency from the result.

use tempfile::NamedTempFile;
use tonecmp_analysis::{Edge, analyze_transitions, fundamental_frequency};
use tonecmp_core::FilterSpec;
use tonecmp_wfm::{Error, FileWave, SquareWave, Waveform, WaveformBuilder};

const SAMPLE_RATE_HZ: u32 = 192_000;
const LOWPASS_CUTOFF_HZ: f64 = 10_000.0;
const LOWPASS_ORDER: usize = 10;

/// Build the standard test subject: a jittered square wave band-limited
/// by a 10th-order low-pass at 10 kHz.
fn filtered_square(freq_hz: f64, duration_s: f64, period_std_samples: f64, seed: u64) -> SquareWave {
    let period_std_s = period_std_samples / f64::from(SAMPLE_RATE_HZ);
    let mut wave = SquareWave::new(freq_hz, duration_s, period_std_s)
        .expect("valid generation parameters")
        .with_seed(seed);
    wave.add_filter(FilterSpec::lowpass(
        SAMPLE_RATE_HZ,
        LOWPASS_CUTOFF_HZ,
        LOWPASS_ORDER,
    ))
    .expect("valid filter spec");
    wave
}

/// Time-domain and frequency-domain checks shared by the parametrized
/// cases below (tolerances match the measurement noise of each stat).
fn check_case(freq_hz: f64, duration_s: f64, period_std_samples: f64, seed: u64) {
    let mut wave = filtered_square(freq_hz, duration_s, period_std_samples, seed);
    wave.create().unwrap();
    let wfm = wave.samples();

    // Time domain: falling edges mark period boundaries.
    let stats = analyze_transitions(wfm, 0.5, Edge::Falling);

    let expected_mean = f64::from(SAMPLE_RATE_HZ) / freq_hz;
    assert!(
        (stats.mean - expected_mean).abs() <= 0.01 * expected_mean,
        "mean gap {} vs expected {}",
        stats.mean,
        expected_mean
    );

    if period_std_samples > 0.0 {
        assert!(
            (stats.std - period_std_samples).abs() <= 0.1 * period_std_samples,
            "gap std {} vs expected {}",
            stats.std,
            period_std_samples
        );
    }

    let expected_count = freq_hz * duration_s;
    assert!(
        (stats.count as f64 - expected_count).abs() <= 4.0 * duration_s,
        "transition count {} vs expected {}",
        stats.count,
        expected_count
    );

    let freq_td = f64::from(SAMPLE_RATE_HZ) / stats.mean;
    assert!(
        (freq_td - freq_hz).abs() <= 0.01 * freq_hz,
        "time-domain frequency {} vs {}",
        freq_td,
        freq_hz
    );

    // Frequency domain: spectral peak within 1%, resolution permitting.
    let freq_fft = fundamental_frequency(wfm, SAMPLE_RATE_HZ);
    assert!(
        (freq_fft - freq_hz).abs() <= 0.01 * freq_hz,
        "spectral frequency {} vs {} (resolution {} Hz)",
        freq_fft,
        freq_hz,
        1.0 / duration_s
    );
}

#[test]
fn reference_case_880hz_one_second() {
    check_case(880.0, 1.0, 5.0, 0x880);
}

#[test]
fn fractional_frequency_long_buffer() {
    check_case(880.5, 4.0, 5.0, 0x8805);
}

#[test]
fn half_second_buffer() {
    check_case(880.0, 0.5, 5.0, 0x1881);
}

#[test]
fn adjacent_frequency() {
    check_case(881.0, 1.0, 5.0, 0x881);
}

#[test]
fn zero_jitter_degenerates_cleanly() {
    let mut wave = filtered_square(880.0, 1.0, 0.0, 0);
    wave.create().unwrap();

    let stats = analyze_transitions(wave.samples(), 0.5, Edge::Falling);
    let expected_mean = f64::from(SAMPLE_RATE_HZ) / 880.0;
    assert!((stats.mean - expected_mean).abs() <= 0.01 * expected_mean);
    // All periods round to the same length; gap spread stays near zero.
    assert!(stats.std < 0.5, "std {} for zero jitter", stats.std);
}

#[test]
fn excessive_jitter_is_rejected_at_construction() {
    let result = SquareWave::new(880.0, 1.0, 0.26 / 880.0);
    assert!(matches!(result, Err(Error::Invalid(_))));
}

#[test]
fn wav_roundtrip_preserves_frequency_estimate() {
    let mut wave = filtered_square(880.0, 1.0, 5.0, 0xCAFE);
    wave.create().unwrap();
    let direct = fundamental_frequency(wave.samples(), wave.sample_rate_hz());

    let file = NamedTempFile::new().unwrap();
    tonecmp_io::write_wav(file.path(), wave.samples(), wave.sample_rate_hz()).unwrap();

    let loaded = FileWave::open(file.path()).unwrap();
    let roundtrip = fundamental_frequency(loaded.samples(), loaded.sample_rate_hz());

    // Quantization to 16 bits is lossy but must not move the peak.
    assert!(
        (roundtrip - direct).abs() <= 0.01 * direct,
        "estimate drifted across the file: {} vs {}",
        roundtrip,
        direct
    );
}

#[test]
fn file_waveform_takes_rate_from_container() {
    let samples: Vec<f32> = (0..2205)
        .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 22050.0).sin())
        .collect();

    let file = NamedTempFile::new().unwrap();
    tonecmp_io::write_wav(file.path(), &samples, 22050).unwrap();

    let wave = FileWave::open(file.path()).unwrap();
    assert_eq!(wave.sample_rate_hz(), 22050);
    assert_eq!(wave.samples().len(), 2205);
    assert!((wave.duration_s() - 0.1).abs() < 1e-9);
}

#[test]
fn builder_resolves_file_sources() {
    let samples: Vec<f32> = (0..4800)
        .map(|i| (2.0 * std::f32::consts::PI * 440.0 * i as f32 / 48000.0).sin())
        .collect();
    let file = NamedTempFile::new().unwrap();
    tonecmp_io::write_wav(file.path(), &samples, 48000).unwrap();

    let mut wave = WaveformBuilder::new().file(file.path()).build().unwrap();
    wave.create().unwrap();
    assert_eq!(wave.sample_rate_hz(), 48000);

    let freq = fundamental_frequency(wave.samples(), wave.sample_rate_hz());
    assert!((freq - 440.0).abs() <= 10.0, "got {}", freq);
}

#[test]
fn filtered_output_is_band_limited() {
    // Energy above the cutoff should be orders of magnitude below the
    // fundamental after the low-pass runs.
    let mut wave = filtered_square(880.0, 0.5, 5.0, 7);
    wave.create().unwrap();

    let magnitude = tonecmp_analysis::magnitude_spectrum(wave.samples());
    let bin_width = f64::from(SAMPLE_RATE_HZ) / wave.samples().len() as f64;
    let fundamental_bin = (880.0 / bin_width).round() as usize;
    let cutoff_bin = (20_000.0 / bin_width).round() as usize;

    let peak = f64::from(magnitude[fundamental_bin - 1..=fundamental_bin + 1]
        .iter()
        .fold(0.0f32, |acc, &m| acc.max(m)));
    let stop_band_peak = f64::from(
        magnitude[cutoff_bin..]
            .iter()
            .fold(0.0f32, |acc, &m| acc.max(m)),
    );

    assert!(
        stop_band_peak < peak * 1e-3,
        "stop band {} vs fundamental {}",
        stop_band_peak,
        peak
    );
}
