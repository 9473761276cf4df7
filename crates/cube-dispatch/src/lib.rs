//! # Orientation dispatch
//!
//! Maps a decided cube face to exactly one action and runs the device
//! session around it.
//!
//! - [`OrientationTable`]: one action per canonical face, validated at build
//! - [`Dispatcher`]: resolves a face and performs its action once
//! - [`TimeTrackingHandler`]: stops or starts entries on a [`TimeTrackingApi`]
//! - [`Session`]: signal line low, detect, wait for the network, dispatch,
//!   signal line high

pub mod action;
pub mod dispatcher;
pub mod session;
pub mod table;

pub use action::{
    CurrentEntryResponse, NewTimeEntry, StartTimeEntryRequest, TimeEntry, TimeTrackingAction,
    TimeTrackingApi, TimeTrackingHandler, DEFAULT_CREATED_WITH,
};
pub use dispatcher::{ActionHandler, Dispatched, Dispatcher, FnHandler};
pub use session::{
    wait_for_connectivity, AlwaysConnected, Connectivity, RecordingLine, Session, SessionOptions,
    SessionReport, SignalLine, DEFAULT_CONNECTIVITY_POLL_MS,
};
pub use table::OrientationTable;
