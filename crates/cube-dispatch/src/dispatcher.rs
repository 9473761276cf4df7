//! Exactly-once dispatch of a decided face

use cube_core::{Orientation, Result};
use tracing::{info, warn};

use crate::table::OrientationTable;

/// Carries out one action
pub trait ActionHandler<A> {
    fn perform(&mut self, action: &A) -> Result<()>;
}

impl<A, H: ActionHandler<A> + ?Sized> ActionHandler<A> for &mut H {
    fn perform(&mut self, action: &A) -> Result<()> {
        (**self).perform(action)
    }
}

/// Adapter turning a closure into an [`ActionHandler`]
pub struct FnHandler<F>(pub F);

impl<A, F> ActionHandler<A> for FnHandler<F>
where
    F: FnMut(&A) -> Result<()>,
{
    fn perform(&mut self, action: &A) -> Result<()> {
        (self.0)(action)
    }
}

/// Outcome of a dispatch
#[derive(Debug, PartialEq)]
pub struct Dispatched<'t, A> {
    pub orientation: Orientation,
    pub action: &'t A,
}

/// Resolves a decided face through the table and hands the action over
///
/// `dispatch` consumes the dispatcher, so one decision triggers at most one
/// action.
pub struct Dispatcher<'t, A, H> {
    table: &'t OrientationTable<A>,
    handler: H,
}

impl<'t, A, H> Dispatcher<'t, A, H>
where
    A: std::fmt::Debug,
    H: ActionHandler<A>,
{
    pub fn new(table: &'t OrientationTable<A>, handler: H) -> Self {
        Self { table, handler }
    }

    pub fn dispatch(mut self, orientation: Orientation) -> Result<Dispatched<'t, A>> {
        let action = self.table.resolve(orientation);
        info!(%orientation, ?action, "dispatching");
        self.handler
            .perform(action)
            .inspect_err(|e| warn!(%orientation, error = %e, "action failed"))?;
        Ok(Dispatched {
            orientation,
            action,
        })
    }
}
