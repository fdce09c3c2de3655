//! Jittered square-wave synthesis.

use crate::chain::FilterChain;
use crate::waveform::Waveform;
use crate::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use tonecmp_core::FilterSpec;

/// Default synthesis sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE_HZ: u32 = 192_000;

/// Square wave whose period length jitters from cycle to cycle.
///
/// Period lengths are drawn from `Normal(nominal, σ)` in samples and
/// rounded. Every period starts off (0) for half the *nominal* period,
/// then spends the remainder of its own drawn length on (1). The
/// off-portion stays fixed while total length varies, so individual duty
/// cycles wobble around the 50% target — that asymmetry models a
/// transducer with timing variation rather than exact synthesis, and the
/// transition statistics downstream are calibrated against it.
#[derive(Debug)]
pub struct SquareWave {
    freq_hz: f64,
    duration_s: f64,
    sample_rate_hz: u32,
    period_std_s: f64,
    filters: FilterChain,
    samples: Vec<f32>,
    rng: StdRng,
}

impl SquareWave {
    /// New square wave at the default 192 kHz sample rate.
    ///
    /// `period_std_s` is the standard deviation of the period length in
    /// seconds; 0 disables jitter.
    pub fn new(freq_hz: f64, duration_s: f64, period_std_s: f64) -> Result<Self> {
        Self::with_sample_rate(freq_hz, duration_s, period_std_s, DEFAULT_SAMPLE_RATE_HZ)
    }

    /// New square wave at an explicit sample rate.
    ///
    /// Fails with an invalid-parameter error when frequency, duration,
    /// or sample rate are not positive, when the deviation is negative,
    /// or when it exceeds 25% of the nominal period.
    pub fn with_sample_rate(
        freq_hz: f64,
        duration_s: f64,
        period_std_s: f64,
        sample_rate_hz: u32,
    ) -> Result<Self> {
        if !(freq_hz > 0.0 && freq_hz.is_finite()) {
            return Err(invalid(format!("frequency must be positive, got {freq_hz} Hz")));
        }
        if !(duration_s > 0.0 && duration_s.is_finite()) {
            return Err(invalid(format!("duration must be positive, got {duration_s} s")));
        }
        if sample_rate_hz == 0 {
            return Err(invalid("sample rate must be positive".into()));
        }
        if !(period_std_s >= 0.0 && period_std_s.is_finite()) {
            return Err(invalid(format!(
                "period standard deviation must be non-negative, got {period_std_s} s"
            )));
        }
        if period_std_s > 0.25 / freq_hz {
            return Err(invalid(format!(
                "period standard deviation {period_std_s} s exceeds 25% of the {freq_hz} Hz period"
            )));
        }

        Ok(Self {
            freq_hz,
            duration_s,
            sample_rate_hz,
            period_std_s,
            filters: FilterChain::new(),
            samples: Vec::new(),
            rng: StdRng::from_entropy(),
        })
    }

    /// Pin the jitter source to a seed; generation becomes reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    /// Design and attach a post-generation filter. Order matters: the
    /// chain runs in attachment order.
    pub fn add_filter(&mut self, spec: FilterSpec) -> Result<()> {
        self.filters.push(spec)
    }

    /// Nominal frequency in Hz.
    pub fn freq_hz(&self) -> f64 {
        self.freq_hz
    }

    /// Requested duration in seconds.
    pub fn duration_s(&self) -> f64 {
        self.duration_s
    }

    /// Period standard deviation in seconds.
    pub fn period_std_s(&self) -> f64 {
        self.period_std_s
    }
}

fn invalid(msg: String) -> crate::Error {
    tonecmp_core::Error::InvalidParameter(msg).into()
}

impl Waveform for SquareWave {
    fn generate(&mut self) -> Result<()> {
        let rate = f64::from(self.sample_rate_hz);
        let duration_n = (self.duration_s * rate).ceil() as usize;

        // The nominal period stays fractional: it seeds the jitter
        // distribution, and rounding here would bias every draw.
        let period_n = rate / self.freq_hz;
        let period_std_n = self.period_std_s * rate;
        let n_periods = (duration_n as f64 / period_n).ceil() as usize;

        let normal = Normal::new(period_n, period_std_n)
            .map_err(|e| tonecmp_core::Error::InvalidParameter(e.to_string()))?;

        let half_period_n = (period_n / 2.0).floor() as i64;
        let mut wfm = vec![0.0f32; duration_n];

        // Concatenate periods: off for the fixed nominal half-period,
        // on for the remainder of this period's drawn length, clamped to
        // the end of the buffer.
        let mut idx: i64 = 0;
        for _ in 0..n_periods {
            let this_period_n = normal.sample(&mut self.rng).round() as i64;
            let start = (idx + half_period_n).max(0);
            let end = (idx + this_period_n).min(duration_n as i64);
            for slot in start..end {
                wfm[slot as usize] = 1.0;
            }
            idx += this_period_n;
            if idx >= duration_n as i64 {
                break;
            }
        }

        tracing::debug!(
            samples = wfm.len(),
            periods = n_periods,
            freq_hz = self.freq_hz,
            "generated square wave"
        );
        self.samples = wfm;
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
