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
//! Energy and momentum behavior of a running engine

use std::cell::Cell;
use std::rc::Rc;

use animation_physics::bodies::{Body, Particle};
use animation_physics::constraints::Collision;
use animation_physics::engine::{EngineEvent, PhysicsEngine};
use animation_physics::forces::{Drag, Spring};
use animation_physics::math::Vector;

const DT: f64 = 16.0;

fn total_momentum(engine: &PhysicsEngine) -> Vector {
    engine
        .iter()
        .fold(Vector::zero(), |sum, (_, object)| sum.add(&object.velocity().mult(object.mass())))
}

#[test]
fn test_drag_drains_energy_until_sleep() {
    let mut engine = PhysicsEngine::new();
    let ends = Rc::new(Cell::new(0));
    let counter = Rc::clone(&ends);
    engine.on(EngineEvent::End, move |_| counter.set(counter.get() + 1));

    let ball = engine.add_particle(Particle::new(1.0).unwrap().with_velocity(Vector::new(1.0, 0.0, 0.0)));
    engine.attach(Drag::default(), &[ball], None).unwrap();

    let mut previous = engine.energy();
    let mut frames = 0;
    while !engine.is_sleeping() {
        engine.advance(DT).unwrap();
        let energy = engine.energy();
        assert!(energy < previous, "energy rose from {} to {}", previous, energy);
        previous = energy;
        frames += 1;
        assert!(frames < 100, "engine never fell asleep");
    }

    assert!(previous < engine.config().sleep_tolerance);
    assert_eq!(ends.get(), 1);
    assert!(engine.body(ball).unwrap().is_sleeping());

    // Further frames are no-ops
    let resting = engine.body(ball).unwrap().position();
    engine.advance(DT).unwrap();
    assert_eq!(engine.body(ball).unwrap().position(), resting);
}

#[test]
fn test_collision_conserves_momentum() {
    let mut engine = PhysicsEngine::new();
    let a = engine.add_body(
        Body::circle(1.0, 10.0)
            .unwrap()
            .with_velocity(Vector::new(0.5, 0.0, 0.0)),
    );
    let b = engine.add_body(
        Body::circle(3.0, 10.0)
            .unwrap()
            .with_position(Vector::new(40.0, 0.0, 0.0))
            .with_velocity(Vector::new(-0.2, 0.0, 0.0)),
    );
    engine.attach(Collision::new(), &[b], Some(a)).unwrap();

    let initial = total_momentum(&engine);
    for _ in 0..100 {
        engine.advance(DT).unwrap();
        let momentum = total_momentum(&engine);
        assert!(momentum.sub(&initial).norm() < 1e-9);
    }

    let va = engine.body(a).unwrap().velocity();
    let vb = engine.body(b).unwrap().velocity();
    assert!(va.x < vb.x, "discs should be separating after impact");
}

#[test]
fn test_spring_between_bodies_conserves_momentum() {
    let mut engine = PhysicsEngine::new();
    let a = engine.add_particle(Particle::new(1.0).unwrap());
    let b = engine.add_particle(
        Particle::new(2.0)
            .unwrap()
            .with_position(Vector::new(50.0, 0.0, 0.0))
            .with_velocity(Vector::new(0.0, 0.1, 0.0)),
    );
    let spring = Spring::new().with_damping_ratio(0.3).unwrap();
    engine.attach(spring, &[b], Some(a)).unwrap();

    let initial_momentum = total_momentum(&engine);
    let initial_energy = engine.energy();
    for _ in 0..200 {
        engine.advance(DT).unwrap();
        assert!(total_momentum(&engine).sub(&initial_momentum).norm() < 1e-9);
    }
    assert!(engine.energy() < initial_energy);
}
