//! Ordered filter chains attached to a waveform.

use crate::Result;
use tonecmp_core::{FilterCoefficients, FilterSpec, filtfilt};

/// An ordered list of designed filters.
///
/// Coefficients are derived once when a spec is attached (failing fast
/// on a bad spec) and cached next to it for repeated application. Each
/// waveform instance owns its chain exclusively; there is no shared
/// filter cache.
#[derive(Debug, Default)]
pub struct FilterChain {
    stages: Vec<(FilterSpec, FilterCoefficients)>,
}

impl FilterChain {
    /// Empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Design a spec and append it to the chain.
    pub fn push(&mut self, spec: FilterSpec) -> Result<()> {
        let coeffs = spec.design()?;
        self.stages.push((spec, coeffs));
        Ok(())
    }

    /// Number of attached filters.
    pub fn len(&self) -> usize {
        self.stages.len()
    }

    /// Whether the chain has no stages.
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// The attached specs, in application order.
    pub fn specs(&self) -> impl Iterator<Item = &FilterSpec> {
        self.stages.iter().map(|(spec, _)| spec)
    }

    /// Run every stage over the buffer in attachment order, replacing
    /// its contents with each stage's zero-phase output.
    pub fn apply(&self, samples: &mut Vec<f32>) -> Result<()> {
        for (_, coeffs) in &self.stages {
            *samples = filtfilt(coeffs, samples)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_rejects_bad_spec_immediately() {
        let mut chain = FilterChain::new();
        let err = chain.push(FilterSpec::lowpass(48000, 40000.0, 4));
        assert!(err.is_err());
        assert!(chain.is_empty());
    }

    #[test]
    fn stages_apply_in_attachment_order() {
        // A low-pass then high-pass at the same corner wipes out nearly
        // everything; the order is observable through the specs iterator.
        let mut chain = FilterChain::new();
        chain.push(FilterSpec::lowpass(48000, 2000.0, 2)).unwrap();
        chain.push(FilterSpec::highpass(48000, 100.0, 2)).unwrap();
        assert_eq!(chain.len(), 2);

        let kinds: Vec<_> = chain.specs().map(|s| s.kind).collect();
        assert!(matches!(kinds[0], tonecmp_core::FilterKind::LowPass { .. }));
        assert!(matches!(kinds[1], tonecmp_core::FilterKind::HighPass { .. }));
    }

    #[test]
    fn apply_preserves_length() {
        let mut chain = FilterChain::new();
        chain.push(FilterSpec::lowpass(48000, 5000.0, 4)).unwrap();

        let mut samples = vec![0.5f32; 1000];
        chain.apply(&mut samples).unwrap();
        assert_eq!(samples.len(), 1000);
    }

    #[test]
    fn empty_chain_is_a_no_op() {
        let chain = FilterChain::new();
        let mut samples = vec![0.25f32; 64];
        chain.apply(&mut samples).unwrap();
        assert_eq!(samples, vec![0.25f32; 64]);
    }
}
