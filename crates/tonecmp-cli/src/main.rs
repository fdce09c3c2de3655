//! tonecmp CLI - tone comparison and waveform analysis.

mod commands;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tonecmp")]
#[command(author, version, about = "Tone comparison and waveform analysis", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a jittered square-wave test tone
    Generate(commands::generate::GenerateArgs),

    /// Analyze the tone in a WAV file
    Analyze(commands::analyze::AnalyzeArgs),

    /// Record a tone from an input device
    Record(commands::record::RecordArgs),

    /// Step through configured sources and compare their tones
    Compare(commands::compare::CompareArgs),

    /// List audio input devices
    Devices(commands::devices::DevicesArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Analyze(args) => commands::analyze::run(args),
        Commands::Record(args) => commands::record::run(args),
        Commands::Compare(args) => commands::compare::run(args),
        Commands::Devices(args) => commands::devices::run(args),
    }
}
