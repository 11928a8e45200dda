//! Benchmarks for the per-frame simulation tick.
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use plume::config::PlumeConfig;
use plume::emitter::EmitterPose;
use plume::params::ThrustParams;
use plume::plume::PlumeSimulator;

const DT: f32 = 1.0 / 60.0;

fn bench_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("plume_update");

    for count in [1000usize, 10_000] {
        group.bench_with_input(
            BenchmarkId::new("full_thrust", count),
            &count,
            |b, &count| {
                let config = PlumeConfig::default().with_particle_count(count);
                let mut sim = PlumeSimulator::with_seed(config, 1);
                let params = ThrustParams::default();
                b.iter(|| black_box(sim.update(DT, params, EmitterPose::identity())))
            },
        );
    }

    // Thrust off with everything expired: the short-circuit path.
    group.bench_function("idle", |b| {
        let mut sim = PlumeSimulator::with_seed(PlumeConfig::default(), 2);
        let params = ThrustParams {
            magnitude: 0.0,
            ..Default::default()
        };
        b.iter(|| black_box(sim.update(DT, params, EmitterPose::identity())))
    });

    // Thrust off while the plume dies down: per-particle work, no respawns.
    group.bench_function("dying_down", |b| {
        let mut sim = PlumeSimulator::with_seed(PlumeConfig::default(), 3);
        let on = ThrustParams::default();
        sim.update(DT, on, EmitterPose::identity());

        let off = ThrustParams {
            magnitude: 0.0,
            ..Default::default()
        };
        // Zero dt: particles never actually expire, so every iteration
        // exercises the full decay loop.
        b.iter(|| black_box(sim.update(0.0, off, EmitterPose::identity())))
    });

    group.finish();
}

criterion_group!(benches, bench_update);
criterion_main!(benches);
