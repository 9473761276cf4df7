//! One device session: detect, wait for the network, dispatch, signal

use std::time::Duration;

use cube_core::{CancellationToken, Error, Pacer, Result};
use cube_sensor::Sampler;
use cube_stability::{Decision, OnlineOrientationAnalyzer, StabilityClassifier};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use crate::dispatcher::{ActionHandler, Dispatcher};
use crate::table::OrientationTable;

pub const DEFAULT_CONNECTIVITY_POLL_MS: u64 = 1000;

/// Network reachability check
pub trait Connectivity {
    fn is_connected(&mut self) -> Result<bool>;
}

impl<C: Connectivity + ?Sized> Connectivity for &mut C {
    fn is_connected(&mut self) -> Result<bool> {
        (**self).is_connected()
    }
}

/// A network that is always up
#[derive(Copy, Clone, Debug, Default)]
pub struct AlwaysConnected;

impl Connectivity for AlwaysConnected {
    fn is_connected(&mut self) -> Result<bool> {
        Ok(true)
    }
}

/// Output line held low while a session is in progress
pub trait SignalLine {
    fn set_low(&mut self) -> Result<()>;
    fn set_high(&mut self) -> Result<()>;
}

impl<L: SignalLine + ?Sized> SignalLine for &mut L {
    fn set_low(&mut self) -> Result<()> {
        (**self).set_low()
    }

    fn set_high(&mut self) -> Result<()> {
        (**self).set_high()
    }
}

/// Line that only remembers its level
#[derive(Clone, Debug, Default)]
pub struct RecordingLine {
    levels: Vec<bool>,
}

impl RecordingLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every level written so far, `true` for high
    pub fn levels(&self) -> &[bool] {
        &self.levels
    }

    pub fn is_high(&self) -> Option<bool> {
        self.levels.last().copied()
    }
}

impl SignalLine for RecordingLine {
    fn set_low(&mut self) -> Result<()> {
        self.levels.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<()> {
        self.levels.push(true);
        Ok(())
    }
}

/// Block until `network` reports connected, polling every `poll`
///
/// Returns the number of failed polls.
pub fn wait_for_connectivity<C, P>(
    network: &mut C,
    pacer: &mut P,
    poll: Duration,
    cancel: Option<&CancellationToken>,
) -> Result<u64>
where
    C: Connectivity + ?Sized,
    P: Pacer + ?Sized,
{
    let mut polls = 0u64;
    loop {
        if cancel.is_some_and(CancellationToken::is_cancelled) {
            return Err(Error::Cancelled { ticks: polls });
        }
        if network.is_connected()? {
            debug!(polls, "network connected");
            return Ok(polls);
        }
        info!("waiting for network to connect...");
        polls += 1;
        pacer.pause(poll);
    }
}

/// Timing for the session outside the detection loop
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionOptions {
    pub connectivity_poll_ms: u64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            connectivity_poll_ms: DEFAULT_CONNECTIVITY_POLL_MS,
        }
    }
}

impl SessionOptions {
    pub fn connectivity_poll(&self) -> Duration {
        Duration::from_millis(self.connectivity_poll_ms)
    }
}

/// Result of a completed session
#[derive(Debug, Serialize)]
pub struct SessionReport<A> {
    pub decision: Decision,
    pub action: A,
    pub connectivity_polls: u64,
}

/// Ties the signal line, the network and the action table together
///
/// The line is driven low on entry and high only after the action succeeded;
/// any failure leaves it low.
pub struct Session<'t, A, L, C, P> {
    table: &'t OrientationTable<A>,
    line: L,
    network: C,
    pacer: P,
    options: SessionOptions,
    cancel: Option<CancellationToken>,
}

impl<'t, A, L, C, P> Session<'t, A, L, C, P>
where
    A: Clone + std::fmt::Debug,
    L: SignalLine,
    C: Connectivity,
    P: Pacer,
{
    pub fn new(table: &'t OrientationTable<A>, line: L, network: C, pacer: P) -> Self {
        Self {
            table,
            line,
            network,
            pacer,
            options: SessionOptions::default(),
            cancel: None,
        }
    }

    pub fn with_options(mut self, options: SessionOptions) -> Self {
        self.options = options;
        self
    }

    /// Cancel detection and the connectivity wait through `token`; the
    /// token replaces any the classifier already carries
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    pub fn line(&self) -> &L {
        &self.line
    }

    pub fn network(&self) -> &C {
        &self.network
    }

    #[instrument(skip_all)]
    pub fn run<S, An, Pa, H>(
        &mut self,
        classifier: &mut StabilityClassifier<An, Pa>,
        sampler: &mut S,
        handler: H,
    ) -> Result<SessionReport<A>>
    where
        S: Sampler + ?Sized,
        An: OnlineOrientationAnalyzer,
        Pa: Pacer,
        H: ActionHandler<A>,
    {
        self.line.set_low()?;
        if let Some(token) = &self.cancel {
            if token.is_cancelled() {
                info!("session cancelled before detection");
                return Err(Error::Cancelled { ticks: 0 });
            }
            classifier.set_cancellation(token.clone());
        }
        let decision = classifier.run(sampler)?;
        info!(orientation = %decision.orientation, "orientation decided");

        let connectivity_polls = wait_for_connectivity(
            &mut self.network,
            &mut self.pacer,
            self.options.connectivity_poll(),
            self.cancel.as_ref(),
        )?;

        let dispatched = Dispatcher::new(self.table, handler).dispatch(decision.orientation)?;
        let action = dispatched.action.clone();
        self.line.set_high()?;
        Ok(SessionReport {
            decision,
            action,
            connectivity_polls,
        })
    }
}
