//! Interactive source comparison command.
//!
//! Steps through the configured sources one at a time. Each source is
//! acquired (synthesized, loaded, or recorded), measured, and printed;
//! the operator advances with Enter. An acquisition failure skips that
//! source instead of aborting the session.

use clap::Args;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tonecmp_analysis::{
    Edge, analyze_transitions, band_rms_ratio, fundamental_frequency, spectral_ratio,
};
use tonecmp_config::{Config, SourceConfig};
use tonecmp_wfm::{FileWave, Waveform, WaveformBuilder};

#[derive(Args)]
pub struct CompareArgs {
    /// Configuration file
    #[arg(long, default_value = "tonecmp.toml")]
    config: PathBuf,
}

pub fn run(args: CompareArgs) -> anyhow::Result<()> {
    let config = Config::load(&args.config)?;
    if config.sources.is_empty() {
        anyhow::bail!("no sources configured in {}", args.config.display());
    }

    println!(
        "Comparing {} source(s); targets {} Hz and {} Hz.",
        config.sources.len(),
        config.target_freqs[0],
        config.target_freqs[1]
    );

    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    for (i, source) in config.sources.iter().enumerate() {
        println!("\n--- [{}/{}] {} ---", i + 1, config.sources.len(), source.label());

        match acquire(source, &config) {
            Ok((samples, sample_rate)) => report(&samples, sample_rate, config.target_freqs),
            Err(err) => println!("  skipped: {err}"),
        }

        if i + 1 < config.sources.len() {
            print!("\n[Enter] next source, [q] quit: ");
            std::io::stdout().flush()?;
            match lines.next() {
                Some(Ok(line)) if line.trim().eq_ignore_ascii_case("q") => break,
                Some(Ok(_)) => {}
                _ => break,
            }
        }
    }
    Ok(())
}

/// Produce the (samples, sample rate) buffer for one source.
fn acquire(source: &SourceConfig, config: &Config) -> anyhow::Result<(Vec<f32>, u32)> {
    let duration_s = source.duration_s.unwrap_or(config.duration_s);

    // Live capture is not a waveform: grab the buffer, then run any
    // configured filters over it directly.
    if let Some(device) = &source.device {
        let (mut samples, sample_rate) =
            tonecmp_io::record(Some(device), duration_s, Some(config.sample_rate_hz))?;
        for filter in &source.filters {
            let coeffs = filter.to_spec(sample_rate).design()?;
            samples = tonecmp_core::filtfilt(&coeffs, &samples)?;
        }
        return Ok((samples, sample_rate));
    }

    // File-backed sources resolve filters against the container's rate.
    if let Some(file) = &source.file {
        let mut wave = FileWave::open(file)?;
        for filter in &source.filters {
            wave.add_filter(filter.to_spec(wave.sample_rate_hz()))?;
        }
        wave.create()?;
        return Ok((wave.samples().to_vec(), wave.sample_rate_hz()));
    }

    let mut builder = WaveformBuilder::new()
        .duration_s(duration_s)
        .sample_rate_hz(config.sample_rate_hz)
        .period_std_s(source.period_std_s.unwrap_or(0.0));
    if let Some(freq) = source.freq_hz {
        builder = builder.freq_hz(freq);
    }
    for filter in &source.filters {
        builder = builder.filter(filter.to_spec(config.sample_rate_hz));
    }

    let mut wave = builder.build()?;
    wave.create()?;
    Ok((wave.samples().to_vec(), wave.sample_rate_hz()))
}

/// Print the measurements for one acquired buffer.
fn report(samples: &[f32], sample_rate: u32, targets: [f64; 2]) {
    let freq = fundamental_frequency(samples, sample_rate);
    println!("  fundamental:  {:.2} Hz", freq);

    // Threshold at the buffer's mid level so synthesized 0..1 square
    // waves and centered captures both cross once per edge.
    let min = samples.iter().fold(f32::INFINITY, |acc, &v| acc.min(v));
    let max = samples.iter().fold(f32::NEG_INFINITY, |acc, &v| acc.max(v));
    let threshold = (min + max) / 2.0;

    let stats = analyze_transitions(samples, threshold, Edge::Falling);
    if stats.count >= 2 {
        println!(
            "  period:       {:.2} samples mean, {:.2} std ({} transitions, {:.2} Hz)",
            stats.mean,
            stats.std,
            stats.count,
            f64::from(sample_rate) / stats.mean
        );
    } else {
        println!(
            "  period:       fewer than two transitions at threshold {:.3}",
            threshold
        );
    }

    let fft = spectral_ratio(samples, sample_rate, targets);
    println!(
        "  FFT levels:   {:.2} / {:.2}, ratio {:.3}",
        fft.first, fft.second, fft.ratio
    );

    match band_rms_ratio(samples, sample_rate, targets) {
        Ok(band) => println!(
            "  band RMS:     {:.5} / {:.5}, ratio {:.3}",
            band.first, band.second, band.ratio
        ),
        Err(err) => println!("  band RMS:     unavailable ({err})"),
    }
}
