//! File-backed waveforms.

use crate::chain::FilterChain;
use crate::waveform::Waveform;
use crate::Result;
use std::path::{Path, PathBuf};
use tonecmp_core::FilterSpec;

/// A waveform loaded from a WAV file instead of a generator.
///
/// The sample rate always comes from the container header — never a
/// synthesis default — and the duration is whatever the file holds.
/// Generation parameters do not apply; `generate` (re)loads the file.
#[derive(Debug)]
pub struct FileWave {
    path: PathBuf,
    samples: Vec<f32>,
    sample_rate_hz: u32,
    filters: FilterChain,
}

impl FileWave {
    /// Open a file-backed waveform, reading the buffer eagerly so the
    /// sample rate is known up front.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let (samples, sample_rate_hz) = tonecmp_io::read_wav(&path)?;
        tracing::debug!(
            path = %path.display(),
            samples = samples.len(),
            sample_rate_hz,
            "opened file waveform"
        );
        Ok(Self {
            path,
            samples,
            sample_rate_hz,
            filters: FilterChain::new(),
        })
    }

    /// The backing file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Duration derived from the loaded content, in seconds.
    pub fn duration_s(&self) -> f64 {
        self.samples.len() as f64 / f64::from(self.sample_rate_hz)
    }

    /// Design and attach a post-load filter.
    pub fn add_filter(&mut self, spec: FilterSpec) -> Result<()> {
        self.filters.push(spec)
    }
}

impl Waveform for FileWave {
    fn generate(&mut self) -> Result<()> {
        let (samples, sample_rate_hz) = tonecmp_io::read_wav(&self.path)?;
        self.samples = samples;
        self.sample_rate_hz = sample_rate_hz;
        Ok(())
    }

    fn create(&mut self) -> Result<()> {
        self.generate()?;
        self.filters.apply(&mut self.samples)
    }

    fn samples(&self) -> &[f32] {
        &self.samples
    }

    fn sample_rate_hz(&self) -> u32 {
        self.sample_rate_hz
    }
}
