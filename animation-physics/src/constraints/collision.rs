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
//! Pairwise collisions between discs
//!
//! The source collides with each target. Both receive equal and opposite
//! impulses along the line between their centers, so momentum is
//! conserved. Penetration is removed only through the drift term; there is
//! no direct position correction.

use super::{Constraint, ContactEvent, ContactOptions, ContactPhase};
use crate::bodies::{BodyId, BodySet};
use crate::error::{PhysicsError, Result};
use crate::events::EventEmitter;

/// Collision response between the source and every target
#[derive(Debug, Default)]
pub struct Collision {
    /// Bounce tuning
    pub contact: ContactOptions,
    events: EventEmitter<ContactPhase, ContactEvent>,
}

impl Collision {
    /// Collision with default tuning
    pub fn new() -> Self {
        Collision::default()
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

impl Constraint for Collision {
    fn name(&self) -> &str {
        "Collision"
    }

    fn apply_constraint(
        &mut self,
        targets: &[BodyId],
        source: Option<BodyId>,
        dt: f64,
        bodies: &mut BodySet,
    ) {
        let Some(source_id) = source else {
            return;
        };

        for &id in targets {
            let Some((src, target)) = bodies.pair_mut(source_id, id) else {
                continue;
            };

            let diff_p = target.position().sub(&src.position());
            let diff_v = target.velocity().sub(&src.velocity());
            let overlap = diff_p.norm() - (src.radius() + target.radius());
            if overlap >= 0.0 {
                continue;
            }

            let n = diff_p.unit();
            let event = ContactEvent {
                target: id,
                source: Some(source_id),
                overlap,
                normal: n,
                side: None,
            };
            self.events.emit(ContactPhase::PreCollision, &event);
            self.events.emit(ContactPhase::Collision, &event);

            let eff_mass = 1.0 / (src.inverse_mass() + target.inverse_mass());
            let closing = n.dot(&diff_v).min(0.0);
            let bounce = (1.0 + self.contact.restitution) * closing
                + self.contact.drift_correction(overlap, dt);
            let lambda = bounce / (dt / eff_mass);
            let impulse = n.mult(dt * lambda);

            src.apply_impulse(impulse);
            target.apply_impulse(-impulse);

            self.events.emit(ContactPhase::PostCollision, &event);
        }
    }

    fn validate(&self, source: Option<BodyId>) -> Result<()> {
        if source.is_none() {
            return Err(PhysicsError::invalid("Collision needs a source body"));
        }
        Ok(())
    }
}
