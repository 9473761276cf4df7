//! # Stability-gated orientation classification
//!
//! This crate decides which face of a cube is pointing up, and only once the
//! cube has stopped moving long enough for the reading to be trusted.
//!
//! ## How a decision is made
//!
//! Every tick one raw sample is read. Accepted samples go into a bounded
//! FIFO [`SampleWindow`]. The [`VarianceSum`] motion score (unnormalized,
//! summed over the three axes) is computed over the whole window, and the
//! latest sample alone is discretized per axis into an
//! [`OrientationSymbol`](cube_core::OrientationSymbol). The run ends when:
//!
//! - the window is full,
//! - the motion score is below the threshold,
//! - no axis falls in a dead zone, and
//! - the symbol is a canonical face the caller recognizes.
//!
//! ## Example
//!
//! ```rust
//! use cube_core::{NoPause, Orientation, Sample};
//! use cube_sensor::ScriptedSampler;
//! use cube_stability::{DetectorParameters, StabilityClassifier};
//!
//! let mut sampler = ScriptedSampler::new();
//! sampler.push_repeated(Sample::new(15000, 500, 300), 15);
//!
//! let mut classifier = StabilityClassifier::new(DetectorParameters::default())?
//!     .with_pacer(NoPause::new());
//! let decision = classifier.run(&mut sampler)?;
//! assert_eq!(decision.orientation, Orientation::PositiveX);
//! # Ok::<(), cube_core::Error>(())
//! ```

pub mod classifier;
pub mod discretize;
pub mod motion;
pub mod observer;
pub mod online;
pub mod traits;
pub mod types;
pub mod window;

// Re-exports
pub use classifier::{Decision, StabilityClassifier};
pub use discretize::{discretize, threshold, threshold_with};
pub use motion::{sum_of_squared_deviations, MotionMetric, VarianceSum};
pub use observer::{NullObserver, TickObserver, TickRecorder};
pub use online::OnlineOrientationDetector;
pub use traits::OnlineOrientationAnalyzer;
pub use types::{
    DetectionStatus, DetectorParameters, TickMetrics, UnsettledReason, DEFAULT_DEAD_ZONE,
    DEFAULT_HIGH_THRESHOLD, DEFAULT_MOTION_THRESHOLD, DEFAULT_TICK_INTERVAL_MS,
    DEFAULT_WINDOW_SIZE,
};
pub use window::SampleWindow;
