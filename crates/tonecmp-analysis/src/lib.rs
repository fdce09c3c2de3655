//! Waveform analysis for tone comparison.
//!
//! This crate measures tones that have already been captured, loaded, or
//! synthesized into a mono `f32` sample buffer:
//!
//! - [`fft`] - FFT wrapper sized to the natural buffer length
//! - [`transitions`] - threshold-crossing detection and timing statistics
//! - [`pitch`] - fundamental frequency via spectral peak location
//! - [`ratio`] - two-tone comparison ratios (spectral bins and band RMS)
//!
//! ## Example Workflow
//!
//! ```rust
//! use tonecmp_analysis::{Edge, analyze_transitions, fundamental_frequency};
//!
//! // 1 kHz square wave at 48 kHz
//! let wfm: Vec<f32> = (0..48000)
//!     .map(|i| if (i / 24) % 2 == 0 { 0.0 } else { 1.0 })
//!     .collect();
//!
//! let stats = analyze_transitions(&wfm, 0.5, Edge::Falling);
//! assert!((stats.mean - 48.0).abs() < 0.5);
//!
//! let freq = fundamental_frequency(&wfm, 48000);
//! assert!((freq - 1000.0).abs() < 2.0);
//! ```

pub mod fft;
pub mod pitch;
pub mod ratio;
pub mod transitions;

pub use fft::{Fft, magnitude_spectrum};
pub use pitch::fundamental_frequency;
pub use ratio::{ToneRatio, band_rms_ratio, rms, spectral_ratio};
pub use transitions::{Edge, TransitionStats, analyze_transitions};
