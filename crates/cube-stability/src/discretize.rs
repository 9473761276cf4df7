//! Per-axis discretization of a single sample
//!
//! All comparisons are strict: a reading exactly on a band edge lands in a
//! dead zone and leaves the axis undefined.

use crate::types::{DetectorParameters, DEFAULT_DEAD_ZONE, DEFAULT_HIGH_THRESHOLD};
use cube_core::{AxisLevel, OrientationSymbol, Sample};

/// Discretize one axis with the default thresholds
pub fn threshold(value: i32) -> Option<AxisLevel> {
    threshold_with(value, DEFAULT_HIGH_THRESHOLD, DEFAULT_DEAD_ZONE)
}

/// `value > high` is +1, `value < -high` is -1, `|value| < dead_zone` is 0,
/// anything else is undefined
pub fn threshold_with(value: i32, high: i32, dead_zone: i32) -> Option<AxisLevel> {
    if value > high {
        Some(AxisLevel::Positive)
    } else if value < -high {
        Some(AxisLevel::Negative)
    } else if value > -dead_zone && value < dead_zone {
        Some(AxisLevel::Neutral)
    } else {
        None
    }
}

/// Discretize every axis of a sample independently
pub fn discretize(sample: &Sample, params: &DetectorParameters) -> OrientationSymbol {
    let level = |v| threshold_with(v, params.high_threshold, params.dead_zone);
    OrientationSymbol::new(level(sample.x), level(sample.y), level(sample.z))
}
