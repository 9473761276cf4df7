//! Benchmarks for the per-tick detector cost and whole replays

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use timecube::cube_core::{NoPause, Sample};
use timecube::cube_sensor::ScriptedSampler;
use timecube::cube_stability::{
    DetectorParameters, OnlineOrientationAnalyzer, OnlineOrientationDetector, StabilityClassifier,
};

/// Tumbling readings followed by a noisy rest on +z
fn generate_trace(tumble: usize, rest: usize, seed: u64) -> Vec<Sample> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let noise = Normal::<f64>::new(0.0, 50.0).unwrap();
    let mut trace: Vec<Sample> = (0..tumble)
        .map(|_| {
            Sample::new(
                rng.gen_range(-16000..16000),
                rng.gen_range(-16000..16000),
                rng.gen_range(-16000..16000),
            )
        })
        .collect();
    for _ in 0..rest {
        let mut jitter = || noise.sample(&mut rng).round() as i32;
        trace.push(Sample::new(jitter(), jitter(), 16384 + jitter()));
    }
    trace
}

/// Benchmark a single add_observation on a full window
fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("detector_tick");

    for &window_size in &[10usize, 50, 200] {
        let params = DetectorParameters::default().with_window_size(window_size);
        let trace = generate_trace(window_size * 2, 0, 7);
        let mut detector = OnlineOrientationDetector::new(params).unwrap();
        for &s in &trace[..window_size] {
            detector.add_observation(s);
        }

        group.bench_with_input(
            BenchmarkId::new("add_observation", window_size),
            &trace,
            |b, trace| {
                let mut i = 0;
                b.iter(|| {
                    i = (i + 1) % trace.len();
                    black_box(detector.add_observation(black_box(trace[i])))
                });
            },
        );
    }

    group.finish();
}

/// Benchmark a whole run from tumbling to decision
fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("classifier_run");

    for &tumble in &[0usize, 50, 500] {
        let trace = generate_trace(tumble, 10, 42);
        group.bench_with_input(BenchmarkId::new("run", tumble), &trace, |b, trace| {
            b.iter(|| {
                let mut sampler = ScriptedSampler::from_samples(trace.iter().copied());
                let mut classifier = StabilityClassifier::new(DetectorParameters::default())
                    .unwrap()
                    .with_pacer(NoPause::new());
                black_box(classifier.run(&mut sampler).unwrap())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick, bench_run);
criterion_main!(benches);
