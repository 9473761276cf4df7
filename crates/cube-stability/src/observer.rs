//! Per-tick observation hook
//!
//! Detectors call an observer after evaluating every tick so callers can
//! record or display what the classifier saw. Observers never influence the
//! decision.

use crate::types::{DetectionStatus, TickMetrics};
use cube_core::Sample;

/// Receives every evaluated tick
pub trait TickObserver {
    /// Called once per accepted sample, after the status is computed
    fn record_tick(&mut self, metrics: &TickMetrics, status: &DetectionStatus);

    /// Called for a sample discarded as "not ready"
    fn record_skip(&mut self, _sample: &Sample) {}

    fn reset(&mut self) {}
}

/// Observer that does nothing (zero overhead)
#[derive(Copy, Clone, Debug, Default)]
pub struct NullObserver;

impl TickObserver for NullObserver {
    #[inline]
    fn record_tick(&mut self, _metrics: &TickMetrics, _status: &DetectionStatus) {}
}

/// Keeps every tick in memory
#[derive(Clone, Debug, Default)]
pub struct TickRecorder {
    ticks: Vec<(TickMetrics, DetectionStatus)>,
    skipped: u64,
}

impl TickRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ticks(&self) -> &[(TickMetrics, DetectionStatus)] {
        &self.ticks
    }

    pub fn motion_scores(&self) -> Vec<f64> {
        self.ticks.iter().map(|(m, _)| m.motion_score).collect()
    }

    /// Samples discarded as "not ready"
    pub fn skipped(&self) -> u64 {
        self.skipped
    }
}

impl TickObserver for TickRecorder {
    fn record_tick(&mut self, metrics: &TickMetrics, status: &DetectionStatus) {
        self.ticks.push((*metrics, status.clone()));
    }

    fn record_skip(&mut self, _sample: &Sample) {
        self.skipped += 1;
    }

    fn reset(&mut self) {
        self.ticks.clear();
        self.skipped = 0;
    }
}

impl<O: TickObserver + ?Sized> TickObserver for &mut O {
    fn record_tick(&mut self, metrics: &TickMetrics, status: &DetectionStatus) {
        (**self).record_tick(metrics, status)
    }

    fn record_skip(&mut self, sample: &Sample) {
        (**self).record_skip(sample)
    }

    fn reset(&mut self) {
        (**self).reset()
    }
}
