//! Common types used in orientation detection

use cube_core::{Axis, Error, Orientation, OrientationSymbol, Result, Sample};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Number of samples the history holds
pub const DEFAULT_WINDOW_SIZE: usize = 10;

/// Motion score below which a full window counts as still.
/// Calibrated for the unnormalized score over a full window of 10.
pub const DEFAULT_MOTION_THRESHOLD: f64 = 500_000.0;

/// Axis readings strictly beyond this magnitude saturate to +1 or -1
pub const DEFAULT_HIGH_THRESHOLD: i32 = 12_000;

/// Axis readings strictly inside this half-width are neutral
pub const DEFAULT_DEAD_ZONE: i32 = 2_000;

/// Pause between ticks
pub const DEFAULT_TICK_INTERVAL_MS: u64 = 100;

/// Parameters for orientation detection
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorParameters {
    /// History capacity; a decision needs a full window
    pub window_size: usize,

    /// Maximum motion score (exclusive) for a still device
    pub motion_threshold: f64,

    /// Saturation threshold per axis
    pub high_threshold: i32,

    /// Neutral half-width per axis
    pub dead_zone: i32,

    /// Delay between ticks in milliseconds
    pub tick_interval_ms: u64,

    /// Skip all-zero samples without touching history. Samplers hand
    /// zeros over as read, so this flag alone decides whether they count.
    pub skip_zero_samples: bool,
}

impl Default for DetectorParameters {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            motion_threshold: DEFAULT_MOTION_THRESHOLD,
            high_threshold: DEFAULT_HIGH_THRESHOLD,
            dead_zone: DEFAULT_DEAD_ZONE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
            skip_zero_samples: true,
        }
    }
}

impl DetectorParameters {
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn with_tick_interval(mut self, interval: Duration) -> Self {
        self.tick_interval_ms = interval.as_millis().try_into().unwrap_or(u64::MAX);
        self
    }

    pub fn with_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }

    pub fn with_motion_threshold(mut self, threshold: f64) -> Self {
        self.motion_threshold = threshold;
        self
    }

    /// Check ranges and the relation between the two axis thresholds
    pub fn validate(&self) -> Result<()> {
        if self.window_size == 0 {
            return Err(Error::invalid_parameter("window_size", "must be at least 1"));
        }
        if !self.motion_threshold.is_finite() || self.motion_threshold <= 0.0 {
            return Err(Error::invalid_parameter(
                "motion_threshold",
                "must be finite and positive",
            ));
        }
        if self.dead_zone <= 0 {
            return Err(Error::invalid_parameter("dead_zone", "must be positive"));
        }
        if self.dead_zone >= self.high_threshold {
            return Err(Error::InvalidParameter(format!(
                "dead_zone {} must be below high_threshold {}",
                self.dead_zone, self.high_threshold
            )));
        }
        Ok(())
    }
}

/// Why a full or filling window has not produced a decision
#[derive(Clone, Debug, PartialEq)]
pub enum UnsettledReason {
    /// The device is still moving
    HighMotion { score: f64, threshold: f64 },

    /// One or more axes sit between the neutral and saturated bands
    AmbiguousAxes { axes: Vec<Axis> },

    /// Fully defined, but not an orientation the caller acts on
    UnrecognizedOrientation { symbol: OrientationSymbol },
}

impl fmt::Display for UnsettledReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsettledReason::HighMotion { score, threshold } => {
                write!(f, "motion {score:.0} >= {threshold:.0}")
            }
            UnsettledReason::AmbiguousAxes { axes } => {
                let names: Vec<String> = axes.iter().map(|a| a.to_string()).collect();
                write!(f, "ambiguous axes [{}]", names.join(", "))
            }
            UnsettledReason::UnrecognizedOrientation { symbol } => {
                write!(f, "unrecognized orientation {symbol}")
            }
        }
    }
}

/// Outcome of evaluating one tick
#[derive(Clone, Debug, PartialEq)]
pub enum DetectionStatus {
    /// Nothing observed yet
    Unknown,

    /// History not yet full
    Filling {
        progress: f64, // 0.0 to 1.0
        samples_remaining: usize,
    },

    /// Full window, but no decision this tick
    Unsettled { reason: UnsettledReason },

    /// Still, unambiguous and recognized
    Decided(Orientation),
}

impl DetectionStatus {
    pub fn is_decided(&self) -> bool {
        matches!(self, DetectionStatus::Decided(_))
    }

    pub fn decision(&self) -> Option<Orientation> {
        match self {
            DetectionStatus::Decided(orientation) => Some(*orientation),
            _ => None,
        }
    }
}

impl fmt::Display for DetectionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DetectionStatus::Unknown => write!(f, "Unknown"),
            DetectionStatus::Filling { progress, .. } => {
                write!(f, "Filling ({:.0}% complete)", progress * 100.0)
            }
            DetectionStatus::Unsettled { reason } => write!(f, "Unsettled: {reason}"),
            DetectionStatus::Decided(orientation) => write!(f, "Decided {orientation}"),
        }
    }
}

/// Everything computed for the latest accepted sample
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct TickMetrics {
    /// Accepted samples so far, this one included
    pub sequence: u64,
    pub latest: Sample,
    pub window_len: usize,
    pub motion_score: f64,
    pub symbol: OrientationSymbol,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_reference_constants() {
        let p = DetectorParameters::default();
        assert_eq!(p.window_size, 10);
        assert_eq!(p.motion_threshold, 500_000.0);
        assert_eq!(p.high_threshold, 12_000);
        assert_eq!(p.dead_zone, 2_000);
        assert_eq!(p.tick_interval(), Duration::from_millis(100));
        assert!(p.skip_zero_samples);
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_validation_rejects_bad_ranges() {
        let base = DetectorParameters::default();
        assert!(base.with_window_size(0).validate().is_err());
        assert!(base.with_motion_threshold(f64::NAN).validate().is_err());
        assert!(base.with_motion_threshold(0.0).validate().is_err());
        let overlapping = DetectorParameters {
            dead_zone: 12_000,
            ..base
        };
        assert!(matches!(
            overlapping.validate(),
            Err(Error::InvalidParameter(msg)) if msg.contains("high_threshold")
        ));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let p: DetectorParameters =
            serde_json::from_str(r#"{"window_size": 20, "tick_interval_ms": 5}"#).unwrap();
        assert_eq!(p.window_size, 20);
        assert_eq!(p.tick_interval(), Duration::from_millis(5));
        assert_eq!(p.motion_threshold, DEFAULT_MOTION_THRESHOLD);
    }

    #[test]
    fn test_status_display() {
        let filling = DetectionStatus::Filling {
            progress: 0.3,
            samples_remaining: 7,
        };
        assert_eq!(filling.to_string(), "Filling (30% complete)");
        let moving = DetectionStatus::Unsettled {
            reason: UnsettledReason::HighMotion {
                score: 2.25e9,
                threshold: 5e5,
            },
        };
        assert_eq!(moving.to_string(), "Unsettled: motion 2250000000 >= 500000");
        let ambiguous = UnsettledReason::AmbiguousAxes {
            axes: vec![Axis::X, Axis::Z],
        };
        assert_eq!(ambiguous.to_string(), "ambiguous axes [x, z]");
        assert_eq!(
            DetectionStatus::Decided(Orientation::PositiveX).to_string(),
            "Decided +x"
        );
    }
}
