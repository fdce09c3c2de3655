//! Tone analysis command.

use clap::{Args, ValueEnum};
use std::path::PathBuf;
use tonecmp_analysis::{
    Edge, analyze_transitions, band_rms_ratio, fundamental_frequency, spectral_ratio,
};
use tonecmp_io::read_wav;

/// Edge directions for CLI
#[derive(Clone, Copy, Debug, Default, ValueEnum)]
pub enum CliEdge {
    Rising,
    #[default]
    Falling,
}

impl From<CliEdge> for Edge {
    fn from(edge: CliEdge) -> Self {
        match edge {
            CliEdge::Rising => Edge::Rising,
            CliEdge::Falling => Edge::Falling,
        }
    }
}

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input WAV file
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Transition threshold
    #[arg(long, default_value = "0.5")]
    threshold: f32,

    /// Edge direction for transition timing
    #[arg(long, value_enum, default_value = "falling")]
    edge: CliEdge,

    /// Report level ratios against two target frequencies, e.g. "440,880"
    #[arg(long)]
    targets: Option<String>,
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    println!("Analyzing {}...", args.input.display());

    let (samples, sample_rate) = read_wav(&args.input)?;
    let duration_s = samples.len() as f64 / f64::from(sample_rate);
    println!(
        "  {} samples, {} Hz, {:.2}s",
        samples.len(),
        sample_rate,
        duration_s
    );

    let freq = fundamental_frequency(&samples, sample_rate);
    println!(
        "\nFundamental frequency: {:.2} Hz (resolution {:.2} Hz)",
        freq,
        1.0 / duration_s
    );

    let stats = analyze_transitions(&samples, args.threshold, args.edge.into());
    println!(
        "Transitions ({:?} edges across {}):",
        args.edge, args.threshold
    );
    println!("  count:    {}", stats.count);
    if stats.count >= 2 {
        println!(
            "  mean gap: {:.2} samples ({:.2} Hz)",
            stats.mean,
            f64::from(sample_rate) / stats.mean
        );
        println!("  gap std:  {:.2} samples", stats.std);
    }

    if let Some(targets) = &args.targets {
        let freqs = parse_targets(targets)?;
        println!("\nTwo-tone comparison ({} Hz vs {} Hz):", freqs[0], freqs[1]);

        let fft = spectral_ratio(&samples, sample_rate, freqs);
        println!(
            "  spectral magnitude: {:.2} / {:.2}, ratio {:.3}",
            fft.first, fft.second, fft.ratio
        );

        let band = band_rms_ratio(&samples, sample_rate, freqs)?;
        println!(
            "  band RMS:           {:.5} / {:.5}, ratio {:.3}",
            band.first, band.second, band.ratio
        );
    }

    Ok(())
}

fn parse_targets(text: &str) -> anyhow::Result<[f64; 2]> {
    let parts: Vec<f64> = text
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()?;
    if parts.len() != 2 {
        anyhow::bail!("expected two comma-separated frequencies, e.g. \"440,880\"");
    }
    Ok([parts[0], parts[1]])
}
