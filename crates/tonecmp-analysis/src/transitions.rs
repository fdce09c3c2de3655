//! Threshold-crossing detection and timing statistics.
//!
//! Edges in a sampled waveform stand in for period boundaries, so the
//! gaps between consecutive crossings recover the period length and its
//! spread without any spectral machinery.

/// Crossing direction to detect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Edge {
    /// Previous sample below the threshold, current at or above it.
    Rising,
    /// Previous sample above the threshold, current at or below it.
    Falling,
}

/// Timing statistics over detected transitions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionStats {
    /// Mean gap between consecutive transitions, in samples.
    pub mean: f64,
    /// Population standard deviation of the gaps, in samples.
    pub std: f64,
    /// Number of transitions found.
    pub count: usize,
}

/// Scan a buffer for threshold crossings in the given direction.
///
/// A transition is recorded at the index of the *second* sample of each
/// crossing pair. Gap statistics are only meaningful once two
/// transitions exist; below that, `mean` and `std` are reported as 0 and
/// `count` carries the raw number of crossings found (0 or 1).
pub fn analyze_transitions(wfm: &[f32], threshold: f32, edge: Edge) -> TransitionStats {
    let mut indices: Vec<usize> = Vec::new();
    for i in 1..wfm.len() {
        let prev = wfm[i - 1];
        let cur = wfm[i];
        let crossed = match edge {
            Edge::Rising => prev < threshold && cur >= threshold,
            Edge::Falling => prev > threshold && cur <= threshold,
        };
        if crossed {
            indices.push(i);
        }
    }

    if indices.len() < 2 {
        return TransitionStats {
            mean: 0.0,
            std: 0.0,
            count: indices.len(),
        };
    }

    let gaps: Vec<f64> = indices.windows(2).map(|w| (w[1] - w[0]) as f64).collect();
    let mean = gaps.iter().sum::<f64>() / gaps.len() as f64;
    let variance = gaps.iter().map(|g| (g - mean).powi(2)).sum::<f64>() / gaps.len() as f64;

    TransitionStats {
        mean,
        std: variance.sqrt(),
        count: indices.len(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Ideal square wave: `period` samples per cycle, half low, half high.
    fn square(period: usize, cycles: usize) -> Vec<f32> {
        (0..period * cycles)
            .map(|i| if (i % period) < period / 2 { 0.0 } else { 1.0 })
            .collect()
    }

    #[test]
    fn regular_square_wave_has_exact_period() {
        let wfm = square(100, 20);

        let rising = analyze_transitions(&wfm, 0.5, Edge::Rising);
        assert_eq!(rising.count, 20);
        assert_eq!(rising.mean, 100.0);
        assert_eq!(rising.std, 0.0);

        let falling = analyze_transitions(&wfm, 0.5, Edge::Falling);
        // The last cycle never falls back inside the buffer start offset,
        // so falling edges number one less than rising ones here.
        assert_eq!(falling.count, 19);
        assert_eq!(falling.mean, 100.0);
    }

    #[test]
    fn single_crossings_in_each_direction_are_detected() {
        let wfm = [0.0, 0.0, 1.0, 1.0, 0.0];
        let rising = analyze_transitions(&wfm, 0.5, Edge::Rising);
        assert_eq!(rising.count, 1);

        let falling = analyze_transitions(&wfm, 0.5, Edge::Falling);
        assert_eq!(falling.count, 1);
    }

    #[test]
    fn fewer_than_two_crossings_reports_raw_count() {
        let none = analyze_transitions(&[0.0, 0.1, 0.2], 0.5, Edge::Rising);
        assert_eq!(none.count, 0);
        assert_eq!(none.mean, 0.0);
        assert_eq!(none.std, 0.0);

        let one = analyze_transitions(&[0.0, 1.0, 1.0], 0.5, Edge::Rising);
        assert_eq!(one.count, 1);
        assert_eq!(one.mean, 0.0);
        assert_eq!(one.std, 0.0);
    }

    #[test]
    fn equal_sample_counts_toward_crossing() {
        // Rising uses >= on the current sample, falling uses <=.
        let exact = [0.0f32, 0.5, 0.0];
        assert_eq!(analyze_transitions(&exact, 0.5, Edge::Rising).count, 1);
        assert_eq!(analyze_transitions(&exact, 0.5, Edge::Falling).count, 1);
    }

    #[test]
    fn jittered_gaps_have_nonzero_std() {
        // Cycles of alternating 90/110 sample periods.
        let mut wfm = Vec::new();
        for &period in [90usize, 110].iter().cycle().take(40) {
            wfm.extend(std::iter::repeat(0.0f32).take(period / 2));
            wfm.extend(std::iter::repeat(1.0f32).take(period - period / 2));
        }

        let stats = analyze_transitions(&wfm, 0.5, Edge::Rising);
        assert!((stats.mean - 100.0).abs() < 1.0, "mean {}", stats.mean);
        assert!(stats.std > 5.0, "std {}", stats.std);
    }

    #[test]
    fn empty_buffer_yields_zero_stats() {
        let stats = analyze_transitions(&[], 0.5, Edge::Rising);
        assert_eq!(stats.count, 0);
        assert_eq!(stats.mean, 0.0);
    }
}
