//! Dry-run sessions over recorded traces

use cube_core::{NoPause, Pacer, Result, ThreadPacer};
use cube_dispatch::{AlwaysConnected, FnHandler, RecordingLine, Session, TimeTrackingAction};
use cube_sensor::Sampler;
use cube_stability::{Decision, StabilityClassifier};
use serde::Serialize;
use tracing::info;

use crate::config::AppConfig;

#[derive(Copy, Clone, Debug, Default)]
pub struct ReplayOptions {
    /// Sleep between ticks as the device would
    pub realtime: bool,
    /// Give up after this many ticks
    pub max_ticks: Option<u64>,
}

/// What a replayed session decided and would have done
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ReplayReport {
    pub decision: Decision,
    pub action: TimeTrackingAction,
}

/// Run a full session against `sampler` without touching any service
pub fn replay<S: Sampler + ?Sized>(
    sampler: &mut S,
    config: &AppConfig,
    options: ReplayOptions,
) -> Result<ReplayReport> {
    if options.realtime {
        replay_with(sampler, config, options, ThreadPacer)
    } else {
        replay_with(sampler, config, options, NoPause::new())
    }
}

fn replay_with<S, P>(
    sampler: &mut S,
    config: &AppConfig,
    options: ReplayOptions,
    pacer: P,
) -> Result<ReplayReport>
where
    S: Sampler + ?Sized,
    P: Pacer,
{
    let table = config.table();
    let mut classifier =
        StabilityClassifier::with_recognized(config.detector, &table)?.with_pacer(pacer);
    if let Some(max_ticks) = options.max_ticks {
        classifier = classifier.with_max_ticks(max_ticks);
    }

    let mut session = Session::new(&table, RecordingLine::new(), AlwaysConnected, NoPause::new())
        .with_options(config.session_options());
    let report = session.run(
        &mut classifier,
        sampler,
        FnHandler(|action: &TimeTrackingAction| -> Result<()> {
            info!(%action, "dry run, not contacting the service");
            Ok(())
        }),
    )?;

    Ok(ReplayReport {
        decision: report.decision,
        action: report.action,
    })
}
