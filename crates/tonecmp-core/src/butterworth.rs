//! Butterworth IIR filter design in transfer-function form.
//!
//! Design path: analog prototype poles on the unit circle, frequency
//! pre-warp, lp2lp/lp2hp/lp2bp transform, bilinear transform, then
//! polynomial expansion of the digital zeros/poles into `(b, a)`.
//! Cutoffs are normalized against the Nyquist frequency (sample_rate/2).

use crate::{Error, Result};
use num_complex::Complex64;
use std::f64::consts::PI;

/// Filter response shape with its corner frequency(ies) in Hz.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterKind {
    /// Pass frequencies below the cutoff.
    LowPass {
        /// Cutoff frequency in Hz.
        cutoff_hz: f64,
    },
    /// Pass frequencies above the cutoff.
    HighPass {
        /// Cutoff frequency in Hz.
        cutoff_hz: f64,
    },
    /// Pass frequencies between the band edges.
    BandPass {
        /// Lower band edge in Hz.
        low_hz: f64,
        /// Upper band edge in Hz.
        high_hz: f64,
    },
}

/// Description of one digital Butterworth filter.
///
/// A spec is pure data; [`FilterSpec::design`] derives the coefficient
/// sequences. Design is deterministic, so a spec can be designed any
/// number of times with identical results.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSpec {
    /// Sample rate the filter is designed against, in Hz.
    pub sample_rate_hz: u32,
    /// Filter order. Band-pass filters produce 2×order coefficients.
    pub order: usize,
    /// Response shape and corner frequency(ies).
    pub kind: FilterKind,
}

impl FilterSpec {
    /// Low-pass spec.
    pub fn lowpass(sample_rate_hz: u32, cutoff_hz: f64, order: usize) -> Self {
        Self {
            sample_rate_hz,
            order,
            kind: FilterKind::LowPass { cutoff_hz },
        }
    }

    /// High-pass spec.
    pub fn highpass(sample_rate_hz: u32, cutoff_hz: f64, order: usize) -> Self {
        Self {
            sample_rate_hz,
            order,
            kind: FilterKind::HighPass { cutoff_hz },
        }
    }

    /// Band-pass spec with edges `low_hz..high_hz`.
    pub fn bandpass(sample_rate_hz: u32, low_hz: f64, high_hz: f64, order: usize) -> Self {
        Self {
            sample_rate_hz,
            order,
            kind: FilterKind::BandPass { low_hz, high_hz },
        }
    }

    /// Derive transfer-function coefficients for this spec.
    pub fn design(&self) -> Result<FilterCoefficients> {
        design(self)
    }
}

/// Transfer-function coefficients `(b, a)`, normalized so `a[0] == 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCoefficients {
    /// Numerator (feedforward) coefficients.
    pub b: Vec<f64>,
    /// Denominator (feedback) coefficients.
    pub a: Vec<f64>,
}

impl FilterCoefficients {
    /// Magnitude response `|H(e^{jω})|` at the given frequency.
    pub fn magnitude_at(&self, freq_hz: f64, sample_rate_hz: u32) -> f64 {
        let omega = 2.0 * PI * freq_hz / f64::from(sample_rate_hz);
        let z = Complex64::new(0.0, -omega).exp();
        let eval = |coeffs: &[f64]| {
            coeffs
                .iter()
                .rev()
                .fold(Complex64::new(0.0, 0.0), |acc, &c| acc * z + c)
        };
        let den = eval(&self.a);
        if den.norm() > 0.0 {
            eval(&self.b).norm() / den.norm()
        } else {
            f64::INFINITY
        }
    }
}

/// Design a Butterworth filter for the given spec.
///
/// Fails with [`Error::InvalidParameter`] if the order is zero, the
/// sample rate is zero, or any corner frequency lies outside the open
/// interval (0, Nyquist).
pub fn design(spec: &FilterSpec) -> Result<FilterCoefficients> {
    if spec.order == 0 {
        return Err(Error::InvalidParameter(
            "filter order must be at least 1".into(),
        ));
    }
    if spec.sample_rate_hz == 0 {
        return Err(Error::InvalidParameter(
            "sample rate must be positive".into(),
        ));
    }
    let nyquist = f64::from(spec.sample_rate_hz) / 2.0;

    let poles = prototype_poles(spec.order);

    // Analog zeros/poles/gain after the frequency transform. The design
    // uses the scipy convention of a fs=2 normalized digital grid, so a
    // normalized cutoff wn in (0, 1) pre-warps to 4·tan(π·wn/2).
    let (zeros, poles, gain) = match spec.kind {
        FilterKind::LowPass { cutoff_hz } => {
            let w = warp(normalized(cutoff_hz, nyquist)?);
            let poles: Vec<Complex64> = poles.iter().map(|&p| p * w).collect();
            (Vec::new(), poles, w.powi(spec.order as i32))
        }
        FilterKind::HighPass { cutoff_hz } => {
            let w = warp(normalized(cutoff_hz, nyquist)?);
            let hp_poles: Vec<Complex64> = poles.iter().map(|&p| w / p).collect();
            let zeros = vec![Complex64::new(0.0, 0.0); spec.order];
            // Prototype gain referred through the inversion: k / Π(-p).
            let denom: Complex64 = poles.iter().map(|&p| -p).product();
            (zeros, hp_poles, (Complex64::new(1.0, 0.0) / denom).re)
        }
        FilterKind::BandPass { low_hz, high_hz } => {
            if low_hz >= high_hz {
                return Err(Error::InvalidParameter(format!(
                    "band edges out of order: {low_hz} Hz >= {high_hz} Hz"
                )));
            }
            let w1 = warp(normalized(low_hz, nyquist)?);
            let w2 = warp(normalized(high_hz, nyquist)?);
            let bw = w2 - w1;
            let wo_sq = Complex64::new(w1 * w2, 0.0);

            let mut bp_poles = Vec::with_capacity(2 * spec.order);
            for &p in &poles {
                let scaled = p * (bw / 2.0);
                let d = (scaled * scaled - wo_sq).sqrt();
                bp_poles.push(scaled + d);
                bp_poles.push(scaled - d);
            }
            let zeros = vec![Complex64::new(0.0, 0.0); spec.order];
            (zeros, bp_poles, bw.powi(spec.order as i32))
        }
    };

    let (zeros, poles, gain) = bilinear(&zeros, &poles, gain);

    let b: Vec<f64> = poly(&zeros).iter().map(|c| c * gain).collect();
    let a = poly(&poles);
    Ok(FilterCoefficients { b, a })
}

/// Normalize a corner frequency against Nyquist, rejecting values
/// outside (0, Nyquist).
fn normalized(freq_hz: f64, nyquist_hz: f64) -> Result<f64> {
    if !freq_hz.is_finite() || freq_hz <= 0.0 || freq_hz >= nyquist_hz {
        return Err(Error::InvalidParameter(format!(
            "cutoff {freq_hz} Hz outside (0, {nyquist_hz}) Hz"
        )));
    }
    Ok(freq_hz / nyquist_hz)
}

/// Pre-warp a normalized cutoff onto the analog frequency axis.
fn warp(wn: f64) -> f64 {
    4.0 * (PI * wn / 2.0).tan()
}

/// Analog Butterworth prototype: `order` poles evenly spaced on the left
/// half of the unit circle.
fn prototype_poles(order: usize) -> Vec<Complex64> {
    (0..order)
        .map(|i| {
            let m = (2 * i as i64 + 1 - order as i64) as f64;
            -(Complex64::new(0.0, PI * m / (2.0 * order as f64))).exp()
        })
        .collect()
}

/// Bilinear transform from the analog plane to the digital plane, on the
/// fs=2 grid used by [`warp`]. Missing zeros land at z = -1.
fn bilinear(
    zeros: &[Complex64],
    poles: &[Complex64],
    gain: f64,
) -> (Vec<Complex64>, Vec<Complex64>, f64) {
    let fs2 = Complex64::new(4.0, 0.0);

    let mut z_digital: Vec<Complex64> = zeros.iter().map(|&z| (fs2 + z) / (fs2 - z)).collect();
    let p_digital: Vec<Complex64> = poles.iter().map(|&p| (fs2 + p) / (fs2 - p)).collect();
    z_digital.resize(poles.len(), Complex64::new(-1.0, 0.0));

    let num: Complex64 = zeros.iter().map(|&z| fs2 - z).product();
    let den: Complex64 = poles.iter().map(|&p| fs2 - p).product();
    (z_digital, p_digital, gain * (num / den).re)
}

/// Expand a monic polynomial from its roots; imaginary parts cancel for
/// conjugate-paired root sets.
fn poly(roots: &[Complex64]) -> Vec<f64> {
    let mut coeffs = vec![Complex64::new(1.0, 0.0)];
    for &root in roots {
        coeffs.push(Complex64::new(0.0, 0.0));
        for i in (1..coeffs.len()).rev() {
            let carry = coeffs[i - 1] * root;
            coeffs[i] -= carry;
        }
    }
    coeffs.iter().map(|c| c.re).collect()
}
