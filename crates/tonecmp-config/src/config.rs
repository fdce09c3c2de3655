//! Run configuration schema and validation.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tonecmp_core::FilterSpec;

fn default_duration_s() -> f64 {
    1.0
}

fn default_sample_rate_hz() -> u32 {
    44100
}

fn default_target_freqs() -> [f64; 2] {
    [440.0, 880.0]
}

/// Run configuration for the comparison loop.
///
/// ```toml
/// duration_s = 1.0
/// sample_rate_hz = 44100
/// target_freqs = [440.0, 880.0]
///
/// [[source]]
/// name = "reference A5"
/// freq_hz = 880.0
/// period_std_s = 2.6e-5
///
/// [[source.filter]]
/// kind = "lowpass"
/// cutoff_hz = 10000.0
/// order = 10
///
/// [[source]]
/// file = "captures/tape.wav"
///
/// [[source]]
/// device = "USB"
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Capture/synthesis length per source, in seconds.
    #[serde(default = "default_duration_s")]
    pub duration_s: f64,

    /// Capture/synthesis sample rate in Hz.
    #[serde(default = "default_sample_rate_hz")]
    pub sample_rate_hz: u32,

    /// The two target frequencies the loop compares against, in Hz.
    #[serde(default = "default_target_freqs")]
    pub target_freqs: [f64; 2],

    /// Tone sources stepped through by the compare loop.
    #[serde(default, rename = "source")]
    pub sources: Vec<SourceConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            duration_s: default_duration_s(),
            sample_rate_hz: default_sample_rate_hz(),
            target_freqs: default_target_freqs(),
            sources: Vec::new(),
        }
    }
}

impl Config {
    /// Load and validate a configuration file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::read_file(path, source))?;
        Self::from_toml_str(&text)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !(self.duration_s > 0.0 && self.duration_s.is_finite()) {
            return Err(ConfigError::invalid("duration_s", "must be positive"));
        }
        if self.sample_rate_hz == 0 {
            return Err(ConfigError::invalid("sample_rate_hz", "must be positive"));
        }
        let nyquist = f64::from(self.sample_rate_hz) / 2.0;
        for &freq in &self.target_freqs {
            if !(freq > 0.0 && freq < nyquist) {
                return Err(ConfigError::invalid(
                    "target_freqs",
                    format!("{freq} Hz outside (0, {nyquist}) Hz"),
                ));
            }
        }

        for (i, source) in self.sources.iter().enumerate() {
            source
                .validate()
                .map_err(|reason| ConfigError::invalid(format!("source[{i}]"), reason))?;
        }
        Ok(())
    }
}

/// One comparison source: a file, an input device, or a synthesized
/// square wave.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceConfig {
    /// Display name; defaults to a description of the source.
    pub name: Option<String>,

    /// WAV file to load.
    pub file: Option<PathBuf>,

    /// Input device to record from (list index or name substring).
    pub device: Option<String>,

    /// Frequency of a synthesized square wave, in Hz.
    pub freq_hz: Option<f64>,

    /// Period standard deviation for synthesis, in seconds.
    pub period_std_s: Option<f64>,

    /// Per-source duration override, in seconds.
    pub duration_s: Option<f64>,

    /// Filters applied after generation or loading, in order.
    #[serde(default, rename = "filter")]
    pub filters: Vec<FilterConfig>,
}

impl SourceConfig {
    /// Human-readable label for the compare loop.
    pub fn label(&self) -> String {
        if let Some(name) = &self.name {
            return name.clone();
        }
        if let Some(file) = &self.file {
            return file.display().to_string();
        }
        if let Some(device) = &self.device {
            return format!("device '{device}'");
        }
        if let Some(freq) = self.freq_hz {
            return format!("synth {freq} Hz");
        }
        "unspecified source".into()
    }

    fn validate(&self) -> Result<(), String> {
        if self.file.is_none() && self.device.is_none() && self.freq_hz.is_none() {
            return Err("needs one of 'file', 'device', or 'freq_hz'".into());
        }
        if let Some(freq) = self.freq_hz
            && !(freq > 0.0 && freq.is_finite())
        {
            return Err(format!("freq_hz must be positive, got {freq}"));
        }
        if let Some(std) = self.period_std_s
            && !(std >= 0.0 && std.is_finite())
        {
            return Err(format!("period_std_s must be non-negative, got {std}"));
        }
        if let Some(duration) = self.duration_s
            && !(duration > 0.0 && duration.is_finite())
        {
            return Err(format!("duration_s must be positive, got {duration}"));
        }
        for filter in &self.filters {
            filter.validate()?;
        }
        Ok(())
    }
}

/// One filter attached to a source, resolved against the run's sample
/// rate with [`FilterConfig::to_spec`].
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum FilterConfig {
    /// Butterworth low-pass.
    Lowpass {
        /// Cutoff frequency in Hz.
        cutoff_hz: f64,
        /// Filter order.
        order: usize,
    },
    /// Butterworth high-pass.
    Highpass {
        /// Cutoff frequency in Hz.
        cutoff_hz: f64,
        /// Filter order.
        order: usize,
    },
    /// Butterworth band-pass.
    Bandpass {
        /// Lower band edge in Hz.
        low_hz: f64,
        /// Upper band edge in Hz.
        high_hz: f64,
        /// Filter order.
        order: usize,
    },
}

impl FilterConfig {
    /// Resolve into a designable spec at the given sample rate.
    pub fn to_spec(self, sample_rate_hz: u32) -> FilterSpec {
        match self {
            FilterConfig::Lowpass { cutoff_hz, order } => {
                FilterSpec::lowpass(sample_rate_hz, cutoff_hz, order)
            }
            FilterConfig::Highpass { cutoff_hz, order } => {
                FilterSpec::highpass(sample_rate_hz, cutoff_hz, order)
            }
            FilterConfig::Bandpass {
                low_hz,
                high_hz,
                order,
            } => FilterSpec::bandpass(sample_rate_hz, low_hz, high_hz, order),
        }
    }

    fn validate(&self) -> Result<(), String> {
        let order = match self {
            FilterConfig::Lowpass { order, .. }
            | FilterConfig::Highpass { order, .. }
            | FilterConfig::Bandpass { order, .. } => *order,
        };
        if order == 0 {
            return Err("filter order must be at least 1".into());
        }
        // Cutoff/Nyquist consistency is checked at design time, where
        // the effective sample rate is known.
        Ok(())
    }
}
