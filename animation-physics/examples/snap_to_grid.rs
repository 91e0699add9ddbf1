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
//! Tiles released off-grid snap to their nearest grid cell
//!
//! Each tile gets its own snap constraint anchored at the cell center. The
//! render loop reads transforms through `modify`, which steps the engine
//! as a side effect.

use animation_physics::bodies::Body;
use animation_physics::constraints::Snap;
use animation_physics::engine::{ManualClock, PhysicsEngine};
use animation_physics::math::Vector;
use animation_physics::Result;

const CELL: f64 = 100.0;

fn nearest_cell(p: &Vector) -> Vector {
    Vector::new((p.x / CELL).round() * CELL, (p.y / CELL).round() * CELL, 0.0)
}

fn main() -> Result<()> {
    println!("=== Snap to Grid ===\n");

    let clock = ManualClock::new();
    let mut engine = PhysicsEngine::new().with_clock(clock.clone());

    let drops = [
        Vector::new(37.0, 142.0, 0.0),
        Vector::new(260.0, 18.0, 0.0),
        Vector::new(-130.0, 95.0, 0.0),
    ];

    let mut tiles = Vec::new();
    for (i, drop) in drops.iter().enumerate() {
        let fling = Vector::new(0.3 * i as f64, -0.2, 0.0);
        let tile = engine.add_body(Body::rectangle(1.0, [80.0, 80.0])?.with_position(*drop).with_velocity(fling));
        let snap = Snap::new()
            .with_anchor(nearest_cell(drop))
            .with_period(250.0)?
            .with_damping_ratio(0.6)?;
        engine.attach(snap, &[tile], None)?;
        tiles.push((format!("tile-{}", i), tile, nearest_cell(drop)));
    }

    for frame in 0..90 {
        clock.advance(1000.0 / 60.0);
        for (name, tile, _) in &tiles {
            let Some(modifier) = engine.modify(*tile, name.as_str()) else {
                continue;
            };
            if frame % 30 == 0 {
                println!(
                    "frame {:3}  {}  translate = ({:7.2}, {:7.2})",
                    frame, modifier.target, modifier.transform[12], modifier.transform[13]
                );
            }
        }
    }

    println!();
    for (name, tile, cell) in &tiles {
        if let Some(position) = engine.position(*tile) {
            println!("{} settled {:.3} px from ({}, {})", name, position.distance(cell), cell.x, cell.y);
        }
    }
    println!("Engine asleep: {}", engine.is_sleeping());
    Ok(())
}
