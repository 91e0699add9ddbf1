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
//! Half-space walls
//!
//! A wall is the plane `p·n + d = 0`; the normal points into the allowed
//! side. A target's radius is taken off along the normal, so a disc stops
//! with its edge on the plane.

use super::walls::Side;
use super::{Constraint, ContactEvent, ContactOptions, ContactPhase, OnContact};
use crate::bodies::{BodyId, BodySet};
use crate::events::EventEmitter;
use crate::math::Vector;

/// A single wall
///
/// # Examples
///
/// ```
/// use animation_physics::constraints::{ContactPhase, Wall};
/// use animation_physics::math::Vector;
///
/// let mut floor = Wall::new(Vector::new(0.0, -1.0, 0.0), 500.0);
/// floor.contact.restitution = 0.8;
/// floor.on(ContactPhase::Collision, |event| println!("hit {}", event.target));
/// ```
#[derive(Debug)]
pub struct Wall {
    /// Unit normal pointing into the allowed side
    pub normal: Vector,
    /// Signed distance term `d` of the plane
    pub distance: f64,
    /// Bounce tuning
    pub contact: ContactOptions,
    events: EventEmitter<ContactPhase, ContactEvent>,
}

impl Wall {
    /// Wall with the given normal and distance
    pub fn new(normal: Vector, distance: f64) -> Self {
        Wall {
            normal: normal.unit(),
            distance,
            contact: ContactOptions::default(),
            events: EventEmitter::new(),
        }
    }

    /// Replace the contact tuning
    pub fn with_contact(mut self, contact: ContactOptions) -> Self {
        self.contact = contact;
        self
    }

    /// Register a contact handler
    pub fn on(&mut self, phase: ContactPhase, handler: impl FnMut(&ContactEvent) + 'static) {
        self.events.on(phase, handler);
    }
}

impl Default for Wall {
    fn default() -> Self {
        Wall::new(Vector::X, 0.0)
    }
}

impl Constraint for Wall {
    fn name(&self) -> &str {
        "Wall"
    }

    fn apply_constraint(
        &mut self,
        targets: &[BodyId],
        _source: Option<BodyId>,
        dt: f64,
        bodies: &mut BodySet,
    ) {
        resolve_wall(
            &self.normal,
            self.distance,
            &self.contact,
            None,
            targets,
            dt,
            bodies,
            &mut self.events,
        );
    }
}

/// Resolve contacts of `targets` against one plane
#[allow(clippy::too_many_arguments)]
pub(crate) fn resolve_wall(
    normal: &Vector,
    distance: f64,
    contact: &ContactOptions,
    side: Option<Side>,
    targets: &[BodyId],
    dt: f64,
    bodies: &mut BodySet,
    events: &mut EventEmitter<ContactPhase, ContactEvent>,
) {
    for &id in targets {
        let Some(target) = bodies.get_mut(id) else {
            continue;
        };

        let edge = target.position().sub(&normal.mult(target.radius()));
        let overlap = edge.dot(normal) + distance;
        if overlap > 0.0 {
            continue;
        }

        let nv = normal.dot(&target.velocity());
        let reflect = contact.on_contact == OnContact::Reflect;
        if nv >= 0.0 {
            // Already leaving: only undo the penetration
            if reflect {
                target.set_position(target.position().sub(&normal.mult(overlap)));
            }
            continue;
        }

        let event = ContactEvent {
            target: id,
            source: None,
            overlap,
            normal: *normal,
            side,
        };
        events.emit(ContactPhase::PreCollision, &event);
        events.emit(ContactPhase::Collision, &event);

        if reflect {
            let bounce = (1.0 + contact.restitution) * nv + contact.drift_correction(overlap, dt);
            let lambda = -bounce / (dt * target.inverse_mass());
            target.apply_impulse(normal.mult(dt * lambda));
            target.set_position(target.position().sub(&normal.mult(overlap)));
        }

        events.emit(ContactPhase::PostCollision, &event);
    }
}
