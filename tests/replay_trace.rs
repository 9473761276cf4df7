//! Replays the bundled demo trace through the whole pipeline

use std::path::PathBuf;

use timecube::cube_core::{Error, Orientation, Sample};
use timecube::cube_dispatch::TimeTrackingAction;
use timecube::cube_sensor::{write_trace, ScriptedSampler, TraceSampler};
use timecube::{replay, AppConfig, ReplayOptions};

fn demo(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos").join(name)
}

#[test]
fn test_demo_trace_decides_negative_x() {
    let config = AppConfig::load(Some(demo("timecube.json").as_path())).unwrap();
    let mut sampler = TraceSampler::open(demo("flip_to_negative_x.csv")).unwrap();

    let report = replay(&mut sampler, &config, ReplayOptions::default()).unwrap();
    assert_eq!(report.decision.orientation, Orientation::NegativeX);
    assert_eq!(report.decision.ticks, 21);
    assert!(report.decision.motion_score < 500_000.0);
    assert_eq!(
        report.action,
        TimeTrackingAction::Start {
            project_id: 151554248
        }
    );
    // Rows after the decision are never read
    assert_eq!(sampler.ticks(), 21);
}

#[test]
fn test_max_ticks_stops_before_decision() {
    let mut sampler = TraceSampler::open(demo("flip_to_negative_x.csv")).unwrap();
    let err = replay(
        &mut sampler,
        &AppConfig::default(),
        ReplayOptions {
            max_ticks: Some(12),
            ..ReplayOptions::default()
        },
    )
    .unwrap_err();
    assert!(matches!(err, Error::Cancelled { ticks: 12 }));
}

#[test]
fn test_trace_without_rest_runs_dry() {
    let mut buffer = Vec::new();
    let tilted: Vec<Sample> = (0..30).map(|i| Sample::new(9000, 9000, 3000 + i)).collect();
    write_trace(&mut buffer, &tilted).unwrap();

    let mut sampler = TraceSampler::from_reader(buffer.as_slice());
    let err = replay(&mut sampler, &AppConfig::default(), ReplayOptions::default()).unwrap_err();
    assert!(matches!(err, Error::StreamExhausted { ticks: 30 }));
}

#[test]
fn test_top_face_stops_tracking() {
    let mut sampler = ScriptedSampler::new();
    sampler
        .push_repeated(Sample::new(7000, 7000, 7000), 2)
        .push_repeated(Sample::new(-300, 250, 16600), 10);
    let report = replay(&mut sampler, &AppConfig::default(), ReplayOptions::default()).unwrap();
    assert_eq!(report.decision.orientation, Orientation::PositiveZ);
    assert_eq!(report.action, TimeTrackingAction::StopCurrent);
    assert_eq!(report.decision.ticks, 12);
}

#[test]
fn test_report_json() {
    let mut sampler = ScriptedSampler::new();
    sampler.push_repeated(Sample::new(0, -16000, 0), 10);
    let report = replay(&mut sampler, &AppConfig::default(), ReplayOptions::default()).unwrap();
    let json: serde_json::Value = serde_json::to_value(&report).unwrap();
    assert_eq!(json["decision"]["orientation"], "-y");
    assert_eq!(json["decision"]["ticks"], 10);
    assert_eq!(json["action"]["action"], "start");
    assert_eq!(json["action"]["project_id"], 0);
}
