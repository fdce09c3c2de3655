//! The waveform lifecycle.

use crate::Result;

/// A tone source that renders into a mono sample buffer.
///
/// Lifecycle: construct with parameters, attach filters, then [`create`]
/// to render the final buffer. [`generate`] is the single extension
/// point a new source kind has to provide — everything else is buffer
/// plumbing.
///
/// [`create`]: Waveform::create
/// [`generate`]: Waveform::generate
pub trait Waveform {
    /// Render the raw (unfiltered) sample buffer.
    fn generate(&mut self) -> Result<()>;

    /// Full lifecycle: generate, then run the attached filter chain in
    /// attachment order, replacing the buffer stage by stage.
    fn create(&mut self) -> Result<()>;

    /// The rendered samples. Empty before the first render.
    fn samples(&self) -> &[f32];

    /// Sample rate of the buffer in Hz.
    fn sample_rate_hz(&self) -> u32;
}
