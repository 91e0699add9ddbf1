// Copyright 2025 John Brosnihan
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.
//! Benchmarks for a full engine pass
//!
//! These benchmarks measure:
//! - Throughput of forces plus integration for growing particle counts
//! - Cost of pairwise collision constraints
//! - Constraint iteration overhead

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use animation_physics::bodies::{Body, Particle};
use animation_physics::constraints::{Collision, Walls};
use animation_physics::engine::{EngineConfig, PhysicsEngine};
use animation_physics::forces::{Drag, Field, VectorField};
use animation_physics::math::Vector;

const DT: f64 = 16.0;

/// Engine with `count` particles under gravity and drag inside a box
fn particle_scene(count: usize, config: EngineConfig) -> PhysicsEngine {
    let mut engine = PhysicsEngine::with_config(config).unwrap();
    let ids: Vec<_> = (0..count)
        .map(|i| {
            let t = i as f64;
            engine.add_particle(
                Particle::new(1.0)
                    .unwrap()
                    .with_position(Vector::new((t * 7.0) % 400.0 - 200.0, (t * 13.0) % 400.0 - 200.0, 0.0))
                    .with_velocity(Vector::new((t * 0.37).sin(), (t * 0.73).cos(), 0.0)),
            )
        })
        .collect();

    let gravity = VectorField::new(Field::Constant(Vector::Y), 0.002);
    engine.attach(gravity, &ids, None).unwrap();
    engine.attach(Drag::new(0.001), &ids, None).unwrap();
    engine
        .attach(Walls::two_dimensional(Vector::new(500.0, 500.0, 0.0)), &ids, None)
        .unwrap();
    engine
}

fn bench_step_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("step_throughput");

    for count in [10usize, 100, 1000].iter() {
        group.throughput(Throughput::Elements(*count as u64));
        group.bench_with_input(BenchmarkId::new("particles", count), count, |b, &count| {
            // Tiny tolerance so the scene never falls asleep mid-benchmark
            let config = EngineConfig::default().with_sleep_tolerance(f64::MIN_POSITIVE);
            let mut engine = particle_scene(count, config);
            b.iter(|| {
                engine.advance(black_box(DT)).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_collisions(c: &mut Criterion) {
    let mut group = c.benchmark_group("collisions");

    for count in [10usize, 50].iter() {
        group.bench_with_input(BenchmarkId::new("discs", count), count, |b, &count| {
            let config = EngineConfig::default().with_sleep_tolerance(f64::MIN_POSITIVE);
            let mut engine = PhysicsEngine::with_config(config).unwrap();
            let discs: Vec<_> = (0..count)
                .map(|i| {
                    let x = i as f64 * 25.0;
                    engine.add_body(
                        Body::circle(1.0, 10.0)
                            .unwrap()
                            .with_position(Vector::new(x, 0.0, 0.0))
                            .with_velocity(Vector::new(if i % 2 == 0 { 0.5 } else { -0.5 }, 0.0, 0.0)),
                    )
                })
                .collect();
            for (i, &source) in discs.iter().enumerate() {
                engine.attach(Collision::new(), &discs[i + 1..], Some(source)).unwrap();
            }

            b.iter(|| {
                engine.advance(black_box(DT)).unwrap();
            });
        });
    }

    group.finish();
}

fn bench_constraint_steps(c: &mut Criterion) {
    let mut group = c.benchmark_group("constraint_steps");
    group.sample_size(20);

    for steps in [1usize, 4, 8].iter() {
        group.bench_with_input(BenchmarkId::new("walls", steps), steps, |b, &steps| {
            let config = EngineConfig::default()
                .with_constraint_steps(steps)
                .with_sleep_tolerance(f64::MIN_POSITIVE);
            let mut engine = particle_scene(200, config);
            b.iter(|| {
                engine.advance(black_box(DT)).unwrap();
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_step_throughput, bench_collisions, bench_constraint_steps);
criterion_main!(benches);
