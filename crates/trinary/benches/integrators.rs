//! Integrator benchmarks
//!
//! Measures the cost of a single step of each registered integrator on the
//! four-body star system, and of a full frame at increasing speeds.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::hint::black_box;

use trinary::prelude::*;

fn star_system() -> BodySystem {
    create_stable_star_system(
        &StarSystemConfig::default(),
        Gravity::new(1.0, 1.0).expect("unit gravity is valid"),
        &mut SharedRng::from_seed(42),
    )
    .expect("default configuration builds a star system")
}

fn benchmark_single_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_step");
    let registry = IntegratorRegistry::default();

    for name in registry.list_available() {
        let integrator = registry.create(&name).expect("listed integrator exists");
        let mut system = star_system().with_integrator(integrator);

        group.bench_function(BenchmarkId::from_parameter(&name), |b| {
            b.iter(|| {
                system.step(black_box(1.0 / 60.0));
            });
        });
    }

    group.finish();
}

fn benchmark_frame_speeds(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_speed");

    for speed in [1_u32, 10, 100] {
        let mut system = star_system();

        group.bench_with_input(BenchmarkId::from_parameter(speed), &speed, |b, &speed| {
            b.iter(|| {
                for _ in 0..speed {
                    system.step(black_box(1.0 / 60.0));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_single_step, benchmark_frame_speeds);
criterion_main!(benches);
