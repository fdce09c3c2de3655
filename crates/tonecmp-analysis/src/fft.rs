//! FFT wrapper for real-valued spectra.

use rustfft::{FftPlanner, num_complex::Complex};
use std::sync::Arc;

/// FFT processor planned for a fixed size.
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f32>>,
    size: usize,
}

impl Fft {
    /// Plan a forward FFT of the given size.
    ///
    /// Arbitrary sizes are supported; frequency analysis transforms the
    /// buffer at its natural length so that bin spacing is exactly
    /// `sample_rate / len` (1/duration).
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        Self { fft, size }
    }

    /// Get FFT size.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Perform forward FFT on real input.
    ///
    /// Returns the positive-frequency half of the spectrum
    /// (DC through Nyquist, size/2 + 1 bins). Input shorter than the
    /// planned size is zero-padded.
    pub fn forward(&self, input: &[f32]) -> Vec<Complex<f32>> {
        let mut buffer: Vec<Complex<f32>> =
            input.iter().map(|&x| Complex::new(x, 0.0)).collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);

        buffer.truncate(self.size / 2 + 1);
        buffer
    }
}

/// Magnitude spectrum of a signal at its natural length. Empty input
/// yields an empty spectrum.
pub fn magnitude_spectrum(signal: &[f32]) -> Vec<f32> {
    if signal.is_empty() {
        return Vec::new();
    }
    let fft = Fft::new(signal.len());
    fft.forward(signal).iter().map(|c| c.norm()).collect()
}
