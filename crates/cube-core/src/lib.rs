//! Core traits and types for accelerometer orientation detection
//!
//! This crate provides the vocabulary shared by the sampler, the stability
//! classifier and the dispatcher:
//!
//! - [`Sample`]: one raw 3-axis reading
//! - [`OrientationSymbol`] and [`Orientation`]: discretized readings and the
//!   six canonical resting faces
//! - [`RecognizedOrientations`]: the set of faces a caller will act on
//! - [`Pacer`] and [`CancellationToken`]: the loop's only suspension and
//!   stop points
//! - [`Error`] and [`Result`]: one error type for every cube crate
//!
//! # Example
//!
//! ```rust
//! use cube_core::{AxisLevel, Orientation, OrientationSymbol};
//!
//! let symbol = OrientationSymbol::defined(
//!     AxisLevel::Positive,
//!     AxisLevel::Neutral,
//!     AxisLevel::Neutral,
//! );
//! assert_eq!(symbol.orientation(), Some(Orientation::PositiveX));
//! ```

pub mod error;
pub mod orientation;
pub mod pacing;
pub mod sample;

// Re-export core types
pub use error::{Error, Result};
pub use orientation::{AllFaces, AxisLevel, Orientation, OrientationSymbol, RecognizedOrientations};
pub use pacing::{CancellationToken, NoPause, Pacer, ThreadPacer};
pub use sample::{Axis, Sample};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        Axis, AxisLevel, CancellationToken, Error, Orientation, OrientationSymbol, Pacer,
        RecognizedOrientations, Result, Sample,
    };
}
