//! Filtering primitives for the tonecmp waveform-analysis toolkit.
//!
//! This crate provides:
//!
//! - **Filter design**: [`FilterSpec`] and [`design`] for Butterworth IIR
//!   filters of arbitrary order (low-pass, high-pass, band-pass) in
//!   transfer-function `(b, a)` form
//! - **Zero-phase application**: [`filtfilt`] runs a designed filter
//!   forward and backward over a buffer so that group delay cancels and
//!   transition timing survives filtering
//!
//! ## Quick Start
//!
//! ```rust
//! use tonecmp_core::{FilterSpec, filtfilt};
//!
//! let coeffs = FilterSpec::lowpass(192_000, 10_000.0, 10).design()?;
//! let noisy: Vec<f32> = (0..4096).map(|i| (i % 200) as f32 / 200.0).collect();
//! let smooth = filtfilt(&coeffs, &noisy)?;
//! assert_eq!(smooth.len(), noisy.len());
//! # Ok::<(), tonecmp_core::Error>(())
//! ```
//!
//! Design runs in `f64`: high-order transfer-function polynomials lose
//! their roots entirely in `f32`. Sample buffers stay `f32` at the API.

mod butterworth;
mod filtfilt;

pub use butterworth::{FilterCoefficients, FilterKind, FilterSpec, design};
pub use filtfilt::filtfilt;

/// Error types for filter design and application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Malformed construction argument (cutoff outside (0, Nyquist),
    /// zero order, excessive period deviation, ...).
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// A buffer that cannot be processed as requested.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Convenience result type for filtering operations.
pub type Result<T> = std::result::Result<T, Error>;
