//! Blocking wait-until-stable loop
//!
//! [`StabilityClassifier::run`] pulls one reading per tick from a
//! [`Sampler`], feeds it to an [`OnlineOrientationAnalyzer`] and pauses for
//! the tick interval until the analyzer decides. Tick N is fully classified,
//! history included, before tick N+1's reading is requested.
//!
//! The loop has no timeout of its own. A device that never settles keeps it
//! running until the sampler fails, the optional cancellation token fires,
//! or the optional tick budget runs out.

use crate::online::OnlineOrientationDetector;
use crate::traits::OnlineOrientationAnalyzer;
use crate::types::{DetectionStatus, DetectorParameters};
use cube_core::{
    AllFaces, CancellationToken, Error, Orientation, OrientationSymbol, Pacer,
    RecognizedOrientations, Result, ThreadPacer,
};
use cube_sensor::{Reading, Sampler};
use serde::Serialize;
use tracing::{info, instrument, trace, warn};

/// Terminal output of a detection run
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Decision {
    pub orientation: Orientation,
    pub symbol: OrientationSymbol,
    /// Motion score of the deciding window
    pub motion_score: f64,
    /// Ticks consumed, not-ready ticks included
    pub ticks: u64,
}

/// Runs an analyzer against a sampler until it decides
///
/// Window size and tick interval come from the analyzer's own parameters.
pub struct StabilityClassifier<A = OnlineOrientationDetector, P = ThreadPacer> {
    analyzer: A,
    pacer: P,
    cancel: Option<CancellationToken>,
    max_ticks: Option<u64>,
}

impl StabilityClassifier {
    /// Classifier over every canonical face, sleeping between ticks
    pub fn new(params: DetectorParameters) -> Result<Self> {
        Self::with_recognized(params, AllFaces)
    }
}

impl<R: RecognizedOrientations> StabilityClassifier<OnlineOrientationDetector<R>, ThreadPacer> {
    /// Classifier that only decides on orientations `recognized` accepts
    pub fn with_recognized(params: DetectorParameters, recognized: R) -> Result<Self> {
        Ok(Self {
            analyzer: OnlineOrientationDetector::with_recognized(params, recognized)?,
            pacer: ThreadPacer,
            cancel: None,
            max_ticks: None,
        })
    }
}

impl<A: OnlineOrientationAnalyzer, P: Pacer> StabilityClassifier<A, P> {
    /// Classifier around a custom analyzer and pacer
    pub fn with_analyzer(analyzer: A, pacer: P) -> Result<Self> {
        analyzer.params().validate()?;
        Ok(Self {
            analyzer,
            pacer,
            cancel: None,
            max_ticks: None,
        })
    }

    pub fn with_pacer<P2: Pacer>(self, pacer: P2) -> StabilityClassifier<A, P2> {
        StabilityClassifier {
            analyzer: self.analyzer,
            pacer,
            cancel: self.cancel,
            max_ticks: self.max_ticks,
        }
    }

    /// Stop at the next tick boundary once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Replace the cancellation token on an existing classifier
    pub fn set_cancellation(&mut self, token: CancellationToken) {
        self.cancel = Some(token);
    }

    /// Give up with [`Error::Cancelled`] after `max_ticks` ticks
    pub fn with_max_ticks(mut self, max_ticks: u64) -> Self {
        self.max_ticks = Some(max_ticks);
        self
    }

    pub fn params(&self) -> &DetectorParameters {
        self.analyzer.params()
    }

    pub fn analyzer(&self) -> &A {
        &self.analyzer
    }

    pub fn pacer(&self) -> &P {
        &self.pacer
    }

    fn interrupted(&self, ticks: u64) -> bool {
        if self.cancel.as_ref().is_some_and(|t| t.is_cancelled()) {
            info!(ticks, "detection cancelled");
            return true;
        }
        if self.max_ticks.is_some_and(|max| ticks >= max) {
            warn!(ticks, "tick budget exhausted without a decision");
            return true;
        }
        false
    }

    /// Run one detection to completion.
    ///
    /// History starts empty. A sampler error aborts immediately, before the
    /// analyzer sees anything from that tick.
    #[instrument(skip_all, fields(window = self.analyzer.params().window_size))]
    pub fn run<S: Sampler + ?Sized>(&mut self, sampler: &mut S) -> Result<Decision> {
        self.analyzer.reset();
        let mut ticks: u64 = 0;

        loop {
            if self.interrupted(ticks) {
                return Err(Error::Cancelled { ticks });
            }

            let reading = sampler
                .next_sample()
                .inspect_err(|e| warn!(tick = ticks + 1, error = %e, "sensor read failed"))?;
            ticks += 1;

            match reading {
                Reading::NotReady => trace!(tick = ticks, "sample not ready"),
                Reading::Ready(sample) => {
                    let status = self.analyzer.add_observation(sample);
                    if let (DetectionStatus::Decided(orientation), Some(metrics)) =
                        (status, self.analyzer.current_metrics())
                    {
                        let decision = Decision {
                            orientation,
                            symbol: metrics.symbol,
                            motion_score: metrics.motion_score,
                            ticks,
                        };
                        info!(
                            %orientation,
                            motion = decision.motion_score,
                            ticks,
                            "stable orientation detected"
                        );
                        return Ok(decision);
                    }
                }
            }

            let interval = self.analyzer.params().tick_interval();
            self.pacer.pause(interval);
        }
    }
}
