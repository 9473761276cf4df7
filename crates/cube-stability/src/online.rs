//! Online (per-tick) orientation detection

use crate::discretize::discretize;
use crate::motion::{MotionMetric, VarianceSum};
use crate::observer::{NullObserver, TickObserver};
use crate::traits::OnlineOrientationAnalyzer;
use crate::types::{DetectionStatus, DetectorParameters, TickMetrics, UnsettledReason};
use crate::window::SampleWindow;
use cube_core::{AllFaces, OrientationSymbol, RecognizedOrientations, Result, Sample};
use tracing::{debug, trace};

/// Online orientation detector over a sliding window of samples
///
/// Each accepted sample is appended to the window, the motion score is
/// recomputed over the whole window and the latest sample alone is
/// discretized. A decision requires all of:
///
/// - a full window
/// - a motion score strictly below the threshold
/// - no axis in a dead zone
/// - a canonical face that `R` recognizes
///
/// # Type Parameters
///
/// - `R`: the orientations the caller will act on
/// - `M`: the motion metric
/// - `O`: the tick observer
pub struct OnlineOrientationDetector<
    R: RecognizedOrientations = AllFaces,
    M: MotionMetric = VarianceSum,
    O: TickObserver = NullObserver,
> {
    params: DetectorParameters,
    window: SampleWindow,
    recognized: R,
    metric: M,
    observer: O,
    accepted: u64,
    current_status: DetectionStatus,
    current_metrics: Option<TickMetrics>,
}

impl OnlineOrientationDetector {
    /// Detector acting on every canonical face
    pub fn new(params: DetectorParameters) -> Result<Self> {
        Self::with_recognized(params, AllFaces)
    }
}

impl<R: RecognizedOrientations> OnlineOrientationDetector<R> {
    /// Detector acting only on the orientations `recognized` accepts
    pub fn with_recognized(params: DetectorParameters, recognized: R) -> Result<Self> {
        Self::with_parts(params, recognized, VarianceSum, NullObserver)
    }
}

impl<R, M, O> OnlineOrientationDetector<R, M, O>
where
    R: RecognizedOrientations,
    M: MotionMetric,
    O: TickObserver,
{
    /// Fails with [`cube_core::Error::InvalidParameter`] unless `params` validate
    pub fn with_parts(
        params: DetectorParameters,
        recognized: R,
        metric: M,
        observer: O,
    ) -> Result<Self> {
        params.validate()?;
        Ok(Self {
            window: SampleWindow::new(params.window_size),
            params,
            recognized,
            metric,
            observer,
            accepted: 0,
            current_status: DetectionStatus::Unknown,
            current_metrics: None,
        })
    }

    /// Swap the observer, keeping history
    pub fn with_observer<O2: TickObserver>(self, observer: O2) -> OnlineOrientationDetector<R, M, O2> {
        OnlineOrientationDetector {
            params: self.params,
            window: self.window,
            recognized: self.recognized,
            metric: self.metric,
            observer,
            accepted: self.accepted,
            current_status: self.current_status,
            current_metrics: self.current_metrics,
        }
    }

    pub fn window(&self) -> &SampleWindow {
        &self.window
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn into_observer(self) -> O {
        self.observer
    }

    fn evaluate(&self, motion_score: f64, symbol: &OrientationSymbol) -> DetectionStatus {
        let capacity = self.window.capacity();
        let len = self.window.len();
        if len < capacity {
            return DetectionStatus::Filling {
                progress: len as f64 / capacity as f64,
                samples_remaining: capacity - len,
            };
        }

        // Written as a negation so a NaN score never passes
        if !(motion_score < self.params.motion_threshold) {
            return DetectionStatus::Unsettled {
                reason: UnsettledReason::HighMotion {
                    score: motion_score,
                    threshold: self.params.motion_threshold,
                },
            };
        }

        if !symbol.is_defined() {
            return DetectionStatus::Unsettled {
                reason: UnsettledReason::AmbiguousAxes {
                    axes: symbol.undefined_axes(),
                },
            };
        }

        match symbol.orientation() {
            Some(orientation) if self.recognized.recognizes(orientation) => {
                DetectionStatus::Decided(orientation)
            }
            _ => DetectionStatus::Unsettled {
                reason: UnsettledReason::UnrecognizedOrientation { symbol: *symbol },
            },
        }
    }
}

impl<R, M, O> OnlineOrientationAnalyzer for OnlineOrientationDetector<R, M, O>
where
    R: RecognizedOrientations,
    M: MotionMetric,
    O: TickObserver,
{
    fn add_observation(&mut self, sample: Sample) -> DetectionStatus {
        if self.params.skip_zero_samples && sample.is_zero() {
            trace!("skipping all-zero sample");
            self.observer.record_skip(&sample);
            return self.current_status.clone();
        }

        self.window.push(sample);
        self.accepted += 1;

        let motion_score = self.metric.score(&self.window);
        let symbol = discretize(&sample, &self.params);
        let status = self.evaluate(motion_score, &symbol);

        let metrics = TickMetrics {
            sequence: self.accepted,
            latest: sample,
            window_len: self.window.len(),
            motion_score,
            symbol,
        };
        debug!(
            sequence = metrics.sequence,
            motion = motion_score,
            %symbol,
            window = metrics.window_len,
            %status,
            "tick"
        );
        self.observer.record_tick(&metrics, &status);

        self.current_metrics = Some(metrics);
        self.current_status = status.clone();
        status
    }

    fn current_status(&self) -> DetectionStatus {
        self.current_status.clone()
    }

    fn current_metrics(&self) -> Option<TickMetrics> {
        self.current_metrics
    }

    fn reset(&mut self) {
        self.window.clear();
        self.accepted = 0;
        self.current_status = DetectionStatus::Unknown;
        self.current_metrics = None;
        self.observer.reset();
    }

    fn minimum_samples(&self) -> usize {
        self.window.capacity()
    }

    fn params(&self) -> &DetectorParameters {
        &self.params
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::TickRecorder;
    use cube_core::{Axis, Orientation};

    fn feed<A: OnlineOrientationAnalyzer>(detector: &mut A, sample: Sample, n: usize) -> DetectionStatus {
        let mut status = detector.current_status();
        for _ in 0..n {
            status = detector.add_observation(sample);
        }
        status
    }

    #[test]
    fn test_decides_on_tenth_still_sample() {
        let mut detector = OnlineOrientationDetector::new(DetectorParameters::default()).unwrap();
        let status = feed(&mut detector, Sample::new(15000, 500, 300), 9);
        assert_eq!(
            status,
            DetectionStatus::Filling {
                progress: 0.9,
                samples_remaining: 1
            }
        );
        let status = detector.add_observation(Sample::new(15000, 500, 300));
        assert_eq!(status, DetectionStatus::Decided(Orientation::PositiveX));
        let metrics = detector.current_metrics().unwrap();
        assert_eq!(metrics.motion_score, 0.0);
        assert_eq!(metrics.window_len, 10);
        assert_eq!(metrics.sequence, 10);
    }

    #[test]
    fn test_oscillation_is_high_motion() {
        let mut detector = OnlineOrientationDetector::new(DetectorParameters::default()).unwrap();
        for i in 0..20 {
            let x = if i % 2 == 0 { 15000 } else { -15000 };
            let status = detector.add_observation(Sample::new(x, 0, 0));
            assert!(!status.is_decided());
        }
        assert!(matches!(
            detector.current_status(),
            DetectionStatus::Unsettled {
                reason: UnsettledReason::HighMotion { .. }
            }
        ));
    }

    #[test]
    fn test_dead_zone_blocks_decision() {
        let mut detector = OnlineOrientationDetector::new(DetectorParameters::default()).unwrap();
        let status = feed(&mut detector, Sample::new(5000, 0, 14000), 12);
        assert_eq!(
            status,
            DetectionStatus::Unsettled {
                reason: UnsettledReason::AmbiguousAxes { axes: vec![Axis::X] }
            }
        );
        assert_eq!(detector.current_metrics().unwrap().motion_score, 0.0);
    }

    #[test]
    fn test_unrecognized_face_keeps_waiting() {
        let only_up = [Orientation::PositiveZ];
        let mut detector =
            OnlineOrientationDetector::with_recognized(DetectorParameters::default(), only_up)
                .unwrap();
        let status = feed(&mut detector, Sample::new(0, 0, -16000), 10);
        assert!(matches!(
            status,
            DetectionStatus::Unsettled {
                reason: UnsettledReason::UnrecognizedOrientation { .. }
            }
        ));
        let status = feed(&mut detector, Sample::new(0, 0, 16000), 10);
        assert_eq!(status, DetectionStatus::Decided(Orientation::PositiveZ));
    }

    #[test]
    fn test_tilted_symbol_is_unrecognized() {
        let mut detector = OnlineOrientationDetector::new(DetectorParameters::default()).unwrap();
        let status = feed(&mut detector, Sample::new(13000, 13000, 0), 10);
        assert!(matches!(
            status,
            DetectionStatus::Unsettled {
                reason: UnsettledReason::UnrecognizedOrientation { .. }
            }
        ));
    }

    #[test]
    fn test_zero_samples_do_not_touch_history() {
        let recorder = TickRecorder::new();
        let mut detector = OnlineOrientationDetector::new(DetectorParameters::default())
            .unwrap()
            .with_observer(recorder);
        feed(&mut detector, Sample::new(0, 0, 16000), 5);
        let before = detector.window().to_vec();
        let status = detector.add_observation(Sample::ZERO);
        assert_eq!(detector.window().to_vec(), before);
        assert!(matches!(status, DetectionStatus::Filling { samples_remaining: 5, .. }));
        assert_eq!(detector.observer().skipped(), 1);
        assert_eq!(detector.observer().ticks().len(), 5);
    }

    #[test]
    fn test_zero_samples_accepted_when_not_skipping() {
        let params = DetectorParameters {
            skip_zero_samples: false,
            ..Default::default()
        };
        let mut detector = OnlineOrientationDetector::new(params).unwrap();
        detector.add_observation(Sample::ZERO);
        assert_eq!(detector.window().len(), 1);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut detector = OnlineOrientationDetector::new(DetectorParameters::default()).unwrap();
        feed(&mut detector, Sample::new(0, 16000, 0), 10);
        detector.reset();
        assert!(detector.window().is_empty());
        assert_eq!(detector.current_status(), DetectionStatus::Unknown);
        assert!(detector.current_metrics().is_none());
        assert_eq!(detector.minimum_samples(), 10);
    }

    #[test]
    fn test_constructors_validate_parameters() {
        let empty = DetectorParameters::default().with_window_size(0);
        assert!(matches!(
            OnlineOrientationDetector::new(empty),
            Err(cube_core::Error::InvalidParameter(_))
        ));
        let inverted = DetectorParameters {
            dead_zone: 12_000,
            ..Default::default()
        };
        assert!(OnlineOrientationDetector::with_parts(inverted, AllFaces, VarianceSum, NullObserver)
            .is_err());
    }
}
