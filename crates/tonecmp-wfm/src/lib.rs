//! Waveform sources for tone comparison.
//!
//! A [`Waveform`] owns a mono sample buffer plus the parameters that
//! produced it, and carries an ordered [`FilterChain`] applied after
//! generation. Two sources ship:
//!
//! - [`SquareWave`] - synthesized square wave whose period length
//!   jitters per cycle following a normal distribution
//! - [`FileWave`] - a tone loaded from a WAV file, sample rate taken
//!   from the container header
//!
//! [`WaveformBuilder`] is the front door when the source kind is only
//! known at run time (configuration, CLI flags).
//!
//! ```rust
//! use tonecmp_wfm::{FilterSpec, SquareWave, Waveform};
//!
//! let mut wave = SquareWave::new(880.0, 0.25, 0.0)?.with_seed(7);
//! wave.add_filter(FilterSpec::lowpass(192_000, 10_000.0, 10))?;
//! wave.create()?;
//! assert_eq!(wave.samples().len(), 48_000);
//! # Ok::<(), tonecmp_wfm::Error>(())
//! ```
//!
//! Each instance owns its random source, so parallel generation needs no
//! synchronization and tests can pin seeds.

mod chain;
mod file;
mod source;
mod square;
mod waveform;

pub use chain::FilterChain;
pub use file::FileWave;
pub use source::WaveformBuilder;
pub use square::{DEFAULT_SAMPLE_RATE_HZ, SquareWave};
pub use waveform::Waveform;

// The filter vocabulary is part of this crate's API surface.
pub use tonecmp_core::{FilterKind, FilterSpec};

/// Error types for waveform construction and rendering.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid construction parameter, or filter design/application
    /// failure.
    #[error("{0}")]
    Invalid(#[from] tonecmp_core::Error),

    /// Reading or decoding a backing file failed.
    #[error("audio I/O error: {0}")]
    Io(#[from] tonecmp_io::Error),

    /// Neither a file path nor generation parameters were supplied.
    #[error("waveform needs a file path or generation parameters (frequency and duration)")]
    UnspecifiedSource,
}

/// Convenience result type for waveform operations.
pub type Result<T> = std::result::Result<T, Error>;
