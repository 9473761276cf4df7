//! # Timecube
//!
//! A cube with an accelerometer inside. Put it down on a face and, once it
//! has been still for a second, the face picks what happens next: the top
//! face stops the running time entry, the other five start a project each.
//!
//! This crate re-exports the workspace crates and adds configuration and
//! trace replay for the `timecube` binary.
//!
//! ## Crates
//!
//! - [`cube_core`]: samples, orientation symbols, errors, pacing
//! - [`cube_sensor`]: MPU-6050 driver, CSV traces, scripted streams
//! - [`cube_stability`]: the stability-gated classifier
//! - [`cube_dispatch`]: action table, dispatcher and device session
//!
//! ## Example
//!
//! ```rust
//! use timecube::prelude::*;
//! use timecube::{replay, AppConfig, ReplayOptions};
//!
//! let mut sampler = ScriptedSampler::new();
//! sampler.push_repeated(Sample::new(200, 15800, -300), 10);
//!
//! let mut config = AppConfig::default();
//! config.project_ids = [11, 22, 33, 44, 55];
//! let report = replay(&mut sampler, &config, ReplayOptions::default())?;
//! assert_eq!(report.action, TimeTrackingAction::Start { project_id: 22 });
//! # Ok::<(), timecube::Error>(())
//! ```

pub mod config;
pub mod replay;

pub use cube_core;
pub use cube_dispatch;
pub use cube_sensor;
pub use cube_stability;

pub use config::AppConfig;
pub use cube_core::{Error, Result};
pub use replay::{replay, ReplayOptions, ReplayReport};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude module for convenient imports
pub mod prelude {
    pub use cube_core::prelude::*;
    pub use cube_dispatch::{
        ActionHandler, Dispatcher, OrientationTable, Session, TimeTrackingAction,
        TimeTrackingHandler,
    };
    pub use cube_sensor::{Reading, Sampler, ScriptedSampler, TraceSampler};
    pub use cube_stability::{Decision, DetectorParameters, StabilityClassifier};
}
