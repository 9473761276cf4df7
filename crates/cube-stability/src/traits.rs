//! Core traits for orientation detection

use crate::types::{DetectionStatus, DetectorParameters, TickMetrics};
use cube_core::Sample;

/// Trait for online (per-tick) orientation detection
///
/// Online analyzers own their history. The run loop feeds them one sample per
/// tick and stops at the first `Decided` status.
pub trait OnlineOrientationAnalyzer {
    /// Add a new sample and re-evaluate the decision
    fn add_observation(&mut self, sample: Sample) -> DetectionStatus;

    /// Status after the latest accepted sample
    fn current_status(&self) -> DetectionStatus;

    /// Metrics for the latest accepted sample, if any
    fn current_metrics(&self) -> Option<TickMetrics>;

    /// Discard all history
    fn reset(&mut self);

    /// Samples needed before a decision is possible
    fn minimum_samples(&self) -> usize;

    /// Parameters the analyzer was built with; the run loop paces by them
    fn params(&self) -> &DetectorParameters;
}

impl<A: OnlineOrientationAnalyzer + ?Sized> OnlineOrientationAnalyzer for Box<A> {
    fn add_observation(&mut self, sample: Sample) -> DetectionStatus {
        (**self).add_observation(sample)
    }

    fn current_status(&self) -> DetectionStatus {
        (**self).current_status()
    }

    fn current_metrics(&self) -> Option<TickMetrics> {
        (**self).current_metrics()
    }

    fn reset(&mut self) {
        (**self).reset()
    }

    fn minimum_samples(&self) -> usize {
        (**self).minimum_samples()
    }

    fn params(&self) -> &DetectorParameters {
        (**self).params()
    }
}
