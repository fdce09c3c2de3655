//! Zero-phase (forward-backward) IIR filtering.
//!
//! The filter runs once forward and once backward over the buffer, so the
//! phase response of the two passes cancels and the output stays
//! time-aligned with the input. Edge transients are suppressed by
//! odd-reflection padding and steady-state initial conditions, matching
//! the behavior downstream transition-timing analysis was tuned against.

use crate::butterworth::FilterCoefficients;
use crate::{Error, Result};

/// Apply a filter forward and backward over `input`.
///
/// Returns a new buffer of identical length. Fails with
/// [`Error::InvalidInput`] when the buffer is not strictly longer than
/// the edge padding, `3 * max(len(b), len(a))` samples.
pub fn filtfilt(coeffs: &FilterCoefficients, input: &[f32]) -> Result<Vec<f32>> {
    let ntaps = coeffs.b.len().max(coeffs.a.len());
    let pad_len = 3 * ntaps;
    if input.len() <= pad_len {
        return Err(Error::InvalidInput(format!(
            "buffer of {} samples too short for zero-phase filtering (needs more than {})",
            input.len(),
            pad_len
        )));
    }

    let (b, a) = normalized_taps(coeffs, ntaps);
    let x: Vec<f64> = input.iter().map(|&v| f64::from(v)).collect();

    // Odd reflection about the first and last samples.
    let first = x[0];
    let last = x[x.len() - 1];
    let mut ext = Vec::with_capacity(x.len() + 2 * pad_len);
    for j in (1..=pad_len).rev() {
        ext.push(2.0 * first - x[j]);
    }
    ext.extend_from_slice(&x);
    for j in 1..=pad_len {
        ext.push(2.0 * last - x[x.len() - 1 - j]);
    }

    let zi = steady_state(&b, &a);

    // Forward pass, state primed to the first extended sample.
    let scaled: Vec<f64> = zi.iter().map(|z| z * ext[0]).collect();
    let mut y = lfilter(&b, &a, &ext, scaled);

    // Backward pass over the reversed forward output.
    y.reverse();
    let scaled: Vec<f64> = zi.iter().map(|z| z * y[0]).collect();
    let mut y = lfilter(&b, &a, &y, scaled);
    y.reverse();

    Ok(y[pad_len..pad_len + x.len()]
        .iter()
        .map(|&v| v as f32)
        .collect())
}

/// Pad both coefficient sequences to the same length and normalize by
/// `a[0]`.
fn normalized_taps(coeffs: &FilterCoefficients, ntaps: usize) -> (Vec<f64>, Vec<f64>) {
    let a0 = coeffs.a[0];
    let mut b: Vec<f64> = coeffs.b.iter().map(|&c| c / a0).collect();
    let mut a: Vec<f64> = coeffs.a.iter().map(|&c| c / a0).collect();
    b.resize(ntaps, 0.0);
    a.resize(ntaps, 0.0);
    (b, a)
}

/// Single-pass IIR filter, direct form II transposed, with explicit
/// initial state `z` (length `len(b) - 1`).
fn lfilter(b: &[f64], a: &[f64], x: &[f64], mut z: Vec<f64>) -> Vec<f64> {
    let n = b.len() - 1;
    let mut y = Vec::with_capacity(x.len());
    for &xi in x {
        let yi = b[0] * xi + z[0];
        for j in 0..n - 1 {
            z[j] = b[j + 1] * xi + z[j + 1] - a[j + 1] * yi;
        }
        z[n - 1] = b[n] * xi - a[n] * yi;
        y.push(yi);
    }
    y
}

/// Initial filter state that makes the step response start at its
/// steady-state value: solve `(I - companion(a)ᵀ) zi = b[1:] - a[1:]·b[0]`.
fn steady_state(b: &[f64], a: &[f64]) -> Vec<f64> {
    let n = b.len() - 1;

    let mut m = vec![vec![0.0f64; n]; n];
    for i in 0..n {
        m[i][0] = a[i + 1];
        m[i][i] += 1.0;
        if i + 1 < n {
            m[i][i + 1] -= 1.0;
        }
    }
    let rhs: Vec<f64> = (0..n).map(|i| b[i + 1] - a[i + 1] * b[0]).collect();

    solve(m, rhs)
}

/// Gaussian elimination with partial pivoting. The systems here are tiny
/// (filter order + 1 at most), so no factorization machinery is needed.
fn solve(mut m: Vec<Vec<f64>>, mut rhs: Vec<f64>) -> Vec<f64> {
    let n = rhs.len();
    for col in 0..n {
        let pivot = (col..n)
            .max_by(|&i, &j| m[i][col].abs().total_cmp(&m[j][col].abs()))
            .unwrap_or(col);
        m.swap(col, pivot);
        rhs.swap(col, pivot);

        let diag = m[col][col];
        for row in col + 1..n {
            let factor = m[row][col] / diag;
            if factor == 0.0 {
                continue;
            }
            for k in col..n {
                let delta = factor * m[col][k];
                m[row][k] -= delta;
            }
            rhs[row] -= factor * rhs[col];
        }
    }

    let mut x = vec![0.0f64; n];
    for row in (0..n).rev() {
        let mut acc = rhs[row];
        for col in row + 1..n {
            acc -= m[row][col] * x[col];
        }
        x[row] = acc / m[row][row];
    }
    x
}
