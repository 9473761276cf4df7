//! Time-tracking actions and the remote API boundary

use std::fmt;

use cube_core::{Error, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::dispatcher::ActionHandler;

/// Tool name reported when starting an entry
pub const DEFAULT_CREATED_WITH: &str = "TimeCube";

/// What to do once a face has been decided
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum TimeTrackingAction {
    /// Stop the running entry, if there is one
    StopCurrent,
    /// Start a new entry on a project
    Start { project_id: u64 },
}

impl fmt::Display for TimeTrackingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeTrackingAction::StopCurrent => write!(f, "stop current entry"),
            TimeTrackingAction::Start { project_id } => write!(f, "start project {project_id}"),
        }
    }
}

/// A time entry as reported by the service
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeEntry {
    pub id: u64,
    #[serde(default)]
    pub pid: Option<u64>,
}

/// Body of the "current entry" response; `data` is null when nothing runs
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentEntryResponse {
    pub data: Option<TimeEntry>,
}

impl CurrentEntryResponse {
    /// Running entry carried by a raw response body
    ///
    /// A body that does not parse is a [`Error::Dispatch`] failure.
    pub fn parse(body: &str) -> Result<Option<TimeEntry>> {
        let response: Self = serde_json::from_str(body)
            .map_err(|e| Error::Dispatch(format!("malformed current entry response: {e}")))?;
        Ok(response.data)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTimeEntry {
    pub pid: u64,
    pub created_with: String,
}

/// Body of the "start entry" request
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartTimeEntryRequest {
    pub time_entry: NewTimeEntry,
}

impl StartTimeEntryRequest {
    pub fn new(project_id: u64, created_with: impl Into<String>) -> Self {
        Self {
            time_entry: NewTimeEntry {
                pid: project_id,
                created_with: created_with.into(),
            },
        }
    }
}

/// Remote time-tracking service
///
/// Transport and credentials belong to the implementor.
pub trait TimeTrackingApi {
    fn current_entry(&mut self) -> Result<Option<TimeEntry>>;

    fn stop_entry(&mut self, entry_id: u64) -> Result<()>;

    fn start_entry(&mut self, request: &StartTimeEntryRequest) -> Result<()>;
}

impl<T: TimeTrackingApi + ?Sized> TimeTrackingApi for &mut T {
    fn current_entry(&mut self) -> Result<Option<TimeEntry>> {
        (**self).current_entry()
    }

    fn stop_entry(&mut self, entry_id: u64) -> Result<()> {
        (**self).stop_entry(entry_id)
    }

    fn start_entry(&mut self, request: &StartTimeEntryRequest) -> Result<()> {
        (**self).start_entry(request)
    }
}

/// Performs [`TimeTrackingAction`]s against a [`TimeTrackingApi`]
#[derive(Debug)]
pub struct TimeTrackingHandler<T> {
    api: T,
    created_with: String,
}

impl<T: TimeTrackingApi> TimeTrackingHandler<T> {
    pub fn new(api: T) -> Self {
        Self {
            api,
            created_with: DEFAULT_CREATED_WITH.to_string(),
        }
    }

    pub fn with_created_with(mut self, created_with: impl Into<String>) -> Self {
        self.created_with = created_with.into();
        self
    }

    pub fn api(&self) -> &T {
        &self.api
    }

    pub fn into_api(self) -> T {
        self.api
    }
}

impl<T: TimeTrackingApi> ActionHandler<TimeTrackingAction> for TimeTrackingHandler<T> {
    fn perform(&mut self, action: &TimeTrackingAction) -> Result<()> {
        match *action {
            TimeTrackingAction::StopCurrent => match self.api.current_entry()? {
                Some(entry) => {
                    info!(entry = entry.id, "stopping running entry");
                    self.api.stop_entry(entry.id)
                }
                None => {
                    debug!("no running entry");
                    Ok(())
                }
            },
            TimeTrackingAction::Start { project_id } => {
                info!(project = project_id, "starting entry");
                let request = StartTimeEntryRequest::new(project_id, self.created_with.clone());
                self.api.start_entry(&request)
            }
        }
    }
}
