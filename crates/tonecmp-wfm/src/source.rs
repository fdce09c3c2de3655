//! Run-time waveform assembly.

use crate::file::FileWave;
use crate::square::{DEFAULT_SAMPLE_RATE_HZ, SquareWave};
use crate::waveform::Waveform;
use crate::{Error, Result};
use std::path::PathBuf;
use tonecmp_core::FilterSpec;

/// Assembles a waveform from whichever source description is available.
///
/// Configuration and CLI layers only know at run time whether a source
/// is a file or a set of generation parameters; this builder resolves
/// that. A file path wins when both are present (the file holds the real
/// signal). With neither a path nor both generation parameters, building
/// fails with [`Error::UnspecifiedSource`].
#[derive(Debug, Default)]
pub struct WaveformBuilder {
    path: Option<PathBuf>,
    freq_hz: Option<f64>,
    duration_s: Option<f64>,
    sample_rate_hz: Option<u32>,
    period_std_s: f64,
    filters: Vec<FilterSpec>,
    seed: Option<u64>,
}

impl WaveformBuilder {
    /// Empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Back the waveform with a WAV file.
    pub fn file(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Nominal synthesis frequency in Hz.
    pub fn freq_hz(mut self, freq_hz: f64) -> Self {
        self.freq_hz = Some(freq_hz);
        self
    }

    /// Synthesis duration in seconds.
    pub fn duration_s(mut self, duration_s: f64) -> Self {
        self.duration_s = Some(duration_s);
        self
    }

    /// Synthesis sample rate (defaults to [`DEFAULT_SAMPLE_RATE_HZ`]).
    pub fn sample_rate_hz(mut self, sample_rate_hz: u32) -> Self {
        self.sample_rate_hz = Some(sample_rate_hz);
        self
    }

    /// Period standard deviation in seconds (defaults to 0).
    pub fn period_std_s(mut self, period_std_s: f64) -> Self {
        self.period_std_s = period_std_s;
        self
    }

    /// Append a post-generation filter.
    pub fn filter(mut self, spec: FilterSpec) -> Self {
        self.filters.push(spec);
        self
    }

    /// Pin the jitter seed (synthesized sources only).
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Resolve the source and construct the waveform with its filters
    /// attached. The caller drives [`Waveform::create`].
    pub fn build(self) -> Result<Box<dyn Waveform>> {
        if let Some(path) = self.path {
            let mut wave = FileWave::open(path)?;
            for spec in self.filters {
                wave.add_filter(spec)?;
            }
            return Ok(Box::new(wave));
        }

        match (self.freq_hz, self.duration_s) {
            (Some(freq_hz), Some(duration_s)) => {
                let sample_rate_hz = self.sample_rate_hz.unwrap_or(DEFAULT_SAMPLE_RATE_HZ);
                let mut wave =
                    SquareWave::with_sample_rate(freq_hz, duration_s, self.period_std_s, sample_rate_hz)?;
                if let Some(seed) = self.seed {
                    wave = wave.with_seed(seed);
                }
                for spec in self.filters {
                    wave.add_filter(spec)?;
                }
                Ok(Box::new(wave))
            }
            _ => Err(Error::UnspecifiedSource),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_builder_is_unspecified() {
        assert!(matches!(
            WaveformBuilder::new().build(),
            Err(Error::UnspecifiedSource)
        ));
    }

    #[test]
    fn frequency_alone_is_unspecified() {
        assert!(matches!(
            WaveformBuilder::new().freq_hz(440.0).build(),
            Err(Error::UnspecifiedSource)
        ));
    }

    #[test]
    fn duration_alone_is_unspecified() {
        assert!(matches!(
            WaveformBuilder::new().duration_s(1.0).build(),
            Err(Error::UnspecifiedSource)
        ));
    }

    #[test]
    fn generation_parameters_build_a_square_wave() {
        let mut wave = WaveformBuilder::new()
            .freq_hz(880.0)
            .duration_s(0.05)
            .sample_rate_hz(48000)
            .seed(1)
            .build()
            .unwrap();
        wave.create().unwrap();
        assert_eq!(wave.sample_rate_hz(), 48000);
        assert_eq!(wave.samples().len(), 2400);
    }

    #[test]
    fn invalid_generation_parameters_surface_as_errors() {
        let result = WaveformBuilder::new()
            .freq_hz(880.0)
            .duration_s(1.0)
            .period_std_s(1.0) // far beyond 25% of the period
            .build();
        assert!(matches!(result, Err(Error::Invalid(_))));
    }

    #[test]
    fn missing_file_surfaces_as_io_error() {
        let result = WaveformBuilder::new().file("/no/such/file.wav").build();
        assert!(matches!(result, Err(Error::Io(_))));
    }
}
