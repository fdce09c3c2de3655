//! Test tone generation command.

use clap::Args;
use std::path::PathBuf;
use tonecmp_core::FilterSpec;
use tonecmp_wfm::{SquareWave, Waveform};

#[derive(Args)]
pub struct GenerateArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Nominal frequency in Hz
    #[arg(long, default_value = "880.0")]
    freq: f64,

    /// Duration in seconds
    #[arg(long, default_value = "1.0")]
    duration: f64,

    /// Sample rate in Hz
    #[arg(long, default_value = "192000")]
    sample_rate: u32,

    /// Period standard deviation in seconds (0 = no jitter)
    #[arg(long, default_value = "0.0")]
    period_std: f64,

    /// Low-pass cutoff in Hz; 0 disables the filter
    #[arg(long, default_value = "10000.0")]
    lowpass: f64,

    /// Low-pass filter order
    #[arg(long, default_value = "10")]
    order: usize,

    /// Seed for reproducible jitter
    #[arg(long)]
    seed: Option<u64>,
}

pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    println!("Generating square wave...");
    println!(
        "  {} Hz for {:.2}s at {} Hz, period std {} s",
        args.freq, args.duration, args.sample_rate, args.period_std
    );

    let mut wave =
        SquareWave::with_sample_rate(args.freq, args.duration, args.period_std, args.sample_rate)?;
    if let Some(seed) = args.seed {
        wave = wave.with_seed(seed);
    }
    if args.lowpass > 0.0 {
        wave.add_filter(FilterSpec::lowpass(args.sample_rate, args.lowpass, args.order))?;
        println!("  low-pass: {} Hz, order {}", args.lowpass, args.order);
    }

    wave.create()?;

    tonecmp_io::write_wav(&args.output, wave.samples(), wave.sample_rate_hz())?;
    println!(
        "Wrote {} samples to {}",
        wave.samples().len(),
        args.output.display()
    );
    Ok(())
}
