//! Device capture command.

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Args)]
pub struct RecordArgs {
    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Input device (list index or name substring; default device otherwise)
    #[arg(long)]
    device: Option<String>,

    /// Capture duration in seconds
    #[arg(long, default_value = "1.0")]
    duration: f64,

    /// Capture sample rate in Hz (device default otherwise)
    #[arg(long)]
    sample_rate: Option<u32>,
}

pub fn run(args: RecordArgs) -> anyhow::Result<()> {
    println!("Recording {:.2}s...", args.duration);

    let bar = ProgressBar::new_spinner();
    bar.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
    bar.set_message("capturing");
    bar.enable_steady_tick(Duration::from_millis(100));

    let (samples, sample_rate) =
        tonecmp_io::record(args.device.as_deref(), args.duration, args.sample_rate)?;

    bar.finish_and_clear();

    tonecmp_io::write_wav(&args.output, &samples, sample_rate)?;
    println!(
        "Wrote {} samples at {} Hz to {}",
        samples.len(),
        sample_rate,
        args.output.display()
    );
    Ok(())
}
