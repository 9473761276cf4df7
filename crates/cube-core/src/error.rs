//! Error types for orientation detection
//!
//! Provides a unified error type for all cube crates.

use thiserror::Error;

/// Core error type for sampling, classification and dispatch
#[derive(Error, Debug)]
pub enum Error {
    /// The sampler could not produce a reading. Fatal for the run.
    #[error("Sensor read failed: {0}")]
    SensorRead(String),

    /// Invalid parameter provided to a constructor or configuration
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Orientation table does not cover the six canonical faces exactly once
    #[error("Invalid orientation table: {0}")]
    InvalidTable(String),

    /// A finite sample source ran out before a decision was reached
    #[error("Sample stream exhausted after {ticks} ticks")]
    StreamExhausted { ticks: u64 },

    /// The run was stopped from outside before a decision was reached
    #[error("Detection cancelled after {ticks} ticks")]
    Cancelled { ticks: u64 },

    /// The action handler failed while performing the decided action
    #[error("Dispatch error: {0}")]
    Dispatch(String),

    /// Network connectivity could not be established or queried
    #[error("Connectivity error: {0}")]
    Connectivity(String),

    /// IO error (for trace files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Other errors
    #[error("Other error: {0}")]
    Other(#[from] anyhow::Error),
}

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

// Helper functions for common error patterns

impl Error {
    /// Wrap any displayable bus or device error as a sensor failure
    pub fn sensor(cause: impl std::fmt::Display) -> Self {
        Self::SensorRead(cause.to_string())
    }

    /// Create an error for a parameter outside its valid range
    pub fn invalid_parameter(name: &str, reason: &str) -> Self {
        Self::InvalidParameter(format!("{name} {reason}"))
    }

    /// Whether the run stopped without a sensor or dispatch fault
    pub fn is_interruption(&self) -> bool {
        matches!(self, Self::Cancelled { .. } | Self::StreamExhausted { .. })
    }
}
