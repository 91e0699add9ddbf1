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
//! A ball dropped into a box
//!
//! Gravity pulls the ball down, the floor bounces it back with some energy
//! lost on every hit, and drag bleeds off the rest until the engine falls
//! asleep.

use std::cell::Cell;
use std::rc::Rc;

use animation_physics::bodies::Body;
use animation_physics::constraints::{ContactOptions, ContactPhase, Side, Walls};
use animation_physics::engine::{EngineEvent, PhysicsEngine};
use animation_physics::forces::{Drag, Field, VectorField};
use animation_physics::math::Vector;
use animation_physics::Result;

fn main() -> Result<()> {
    println!("=== Bouncing Ball ===\n");

    let mut engine = PhysicsEngine::new();
    engine.on(EngineEvent::End, |_| println!("Engine asleep"));

    let ball = engine.add_body(
        Body::circle(1.0, 20.0)?
            .with_position(Vector::new(0.0, -200.0, 0.0))
            .with_velocity(Vector::new(0.15, 0.0, 0.0)),
    );

    let bounces = Rc::new(Cell::new(0));
    let counter = Rc::clone(&bounces);
    let mut walls = Walls::two_dimensional(Vector::new(600.0, 600.0, 0.0)).with_contact(ContactOptions {
        restitution: 0.7,
        ..ContactOptions::default()
    });
    walls.on(ContactPhase::Collision, move |event| {
        if event.side == Some(Side::Bottom) {
            counter.set(counter.get() + 1);
        }
    });

    engine.attach(VectorField::new(Field::Constant(Vector::Y), 0.0015), &[ball], None)?;
    engine.attach(Drag::new(0.0005), &[ball], None)?;
    engine.attach(walls, &[ball], None)?;

    let mut frame = 0;
    while !engine.is_sleeping() && frame < 2000 {
        engine.advance(16.0)?;
        if let Some(state) = engine.body(ball).filter(|_| frame % 60 == 0) {
            println!(
                "t = {:5.0} ms  position = ({:7.2}, {:7.2})  energy = {:.4}",
                frame as f64 * 16.0,
                state.position().x,
                state.position().y,
                engine.energy()
            );
        }
        frame += 1;
    }

    println!("\nFloor bounces: {}", bounces.get());
    println!("Frames simulated: {}", frame);
    Ok(())
}
