//! Accelerometer sample sources
//!
//! The stability classifier needs exactly one thing from hardware: "give me
//! the next raw 3-axis reading". This crate defines that contract as
//! [`Sampler`] and provides three sources:
//!
//! - [`Mpu6050`]: the InvenSense part, over any [`RegisterBus`]
//! - [`TraceSampler`]: replays a recorded CSV trace
//! - [`ScriptedSampler`]: an in-memory script, failures included
//!
//! A sampler reports [`Reading::NotReady`] when the device has nothing to
//! offer this tick and `Err` when it cannot be read at all. Retrying is
//! left to whoever owns the device. An all-zero reading is passed through
//! as `Ready`; the detector decides whether to skip it.

pub mod mpu6050;
pub mod sampler;
pub mod scripted;
pub mod trace;

pub use mpu6050::{Address, Mpu6050, RegisterBus, SensorFrame};
pub use sampler::{FnSampler, Reading, Sampler};
pub use scripted::ScriptedSampler;
pub use trace::{read_trace, write_trace, TraceSampler};
