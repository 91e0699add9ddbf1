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
//! Spring-like snapping to an anchor
//!
//! Unlike [`Spring`](crate::forces::Spring), a snap works on velocity: it
//! cancels the whole relative velocity each step and adds a Baumgarte term
//! along the separation. That keeps it stable at any period, so there is
//! no minimum.

use std::f64::consts::PI;

use super::{effective_mass, softness, Constraint};
use crate::bodies::{require_anchor, resolve_anchor, AnchorRef, BodyId, BodySet};
use crate::error::{validate_damping_ratio, validate_period, PhysicsError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Snap each target to the anchor (or source body) at `length`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Snap {
    anchor: Option<AnchorRef>,
    /// Rest separation
    pub length: f64,
    period: f64,
    damping_ratio: f64,
}

impl Snap {
    /// Snap with the default tuning
    pub fn new() -> Self {
        Snap::default()
    }

    /// Anchor to a point or body
    pub fn with_anchor(mut self, anchor: impl Into<AnchorRef>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    /// Rest separation
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Settling period in milliseconds; must be positive
    pub fn with_period(mut self, period: f64) -> Result<Self> {
        let period = validate_period("snap", period)?;
        if period == 0.0 {
            return Err(PhysicsError::invalid("snap period must be positive"));
        }
        self.period = period;
        Ok(self)
    }

    /// Damping ratio
    pub fn with_damping_ratio(mut self, damping_ratio: f64) -> Result<Self> {
        self.damping_ratio = validate_damping_ratio("snap", damping_ratio)?;
        Ok(self)
    }

    /// Move the anchor
    pub fn set_anchor(&mut self, anchor: Option<AnchorRef>) {
        self.anchor = anchor;
    }

    /// Anchor, if any
    pub fn anchor(&self) -> Option<AnchorRef> {
        self.anchor
    }

    /// Period in milliseconds
    pub fn period(&self) -> f64 {
        self.period
    }
}

impl Default for Snap {
    fn default() -> Self {
        Snap {
            anchor: None,
            length: 0.0,
            period: 300.0,
            damping_ratio: 0.1,
        }
    }
}

impl Constraint for Snap {
    fn name(&self) -> &str {
        "Snap"
    }

    fn apply_constraint(
        &mut self,
        targets: &[BodyId],
        source: Option<BodyId>,
        dt: f64,
        bodies: &mut BodySet,
    ) {
        let Some(anchor) = resolve_anchor(self.anchor.as_ref(), source, bodies) else {
            return;
        };
        let anchor_id = anchor.body.map(|(id, _)| id);

        for &id in targets {
            if Some(id) == anchor_id {
                continue;
            }
            let Some(target) = bodies.get_mut(id) else {
                continue;
            };

            let eff_mass = effective_mass(target.mass(), anchor.body.map(|(_, m)| m));
            let (gamma, beta) = softness(self.period, self.damping_ratio, eff_mass, dt);

            let diff_p = target.position().sub(&anchor.position);
            let diff_v = target.velocity().sub(&anchor.velocity);
            let dist = diff_p.norm() - self.length;

            let anti_drift = diff_p.normalize(beta / dt * dist);
            let impulse = anti_drift
                .add(&diff_v)
                .mult(-dt / (gamma + dt / eff_mass));

            target.apply_impulse(impulse);
            if let Some(other) = anchor_id.and_then(|a| bodies.get_mut(a)) {
                other.apply_impulse(-impulse);
            }
        }
    }

    fn energy(&self, targets: &[BodyId], source: Option<BodyId>, bodies: &BodySet) -> f64 {
        let Some(anchor) = resolve_anchor(self.anchor.as_ref(), source, bodies) else {
            return 0.0;
        };
        let anchor_id = anchor.body.map(|(id, _)| id);
        targets
            .iter()
            .filter(|&&id| Some(id) != anchor_id)
            .filter_map(|&id| bodies.get(id))
            .map(|target| {
                let eff_mass = effective_mass(target.mass(), anchor.body.map(|(_, m)| m));
                let k = 4.0 * PI * PI * eff_mass / (self.period * self.period);
                let dist = target.position().distance(&anchor.position) - self.length;
                0.5 * k * dist * dist
            })
            .sum()
    }

    fn validate(&self, source: Option<BodyId>) -> Result<()> {
        require_anchor("Snap", self.anchor.as_ref(), source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::Particle;
    use crate::math::Vector;

    #[test]
    fn test_snap_moves_toward_anchor_and_stops_drift() {
        let mut bodies = BodySet::new();
        let id = bodies.insert(
            Particle::new(1.0)
                .unwrap()
                .with_position(Vector::new(10.0, 0.0, 0.0))
                .with_velocity(Vector::new(0.0, 1.0, 0.0)),
        );
        let mut snap = Snap::new().with_anchor(Vector::ZERO);

        snap.apply_constraint(&[id], None, 16.0, &mut bodies);
        let v = bodies.get(id).unwrap().velocity();
        assert!(v.x < 0.0);
        // Sideways velocity is mostly cancelled
        assert!(v.y.abs() < 1.0);
    }

    #[test]
    fn test_energy_vanishes_at_rest_length() {
        let mut bodies = BodySet::new();
        let id = bodies.insert(Particle::new(1.0).unwrap().with_position(Vector::new(5.0, 0.0, 0.0)));
        let snap = Snap::new().with_anchor(Vector::ZERO).with_length(5.0);
        assert!(snap.energy(&[id], None, &bodies).abs() < 1e-20);

        let stretched = Snap::new().with_anchor(Vector::ZERO);
        assert!(stretched.energy(&[id], None, &bodies) > 0.0);
    }

    #[test]
    fn test_source_listed_as_target_adds_no_energy() {
        let mut bodies = BodySet::new();
        let a = bodies.insert(Particle::new(1.0).unwrap());
        let b = bodies.insert(Particle::new(1.0).unwrap().with_position(Vector::new(5.0, 0.0, 0.0)));
        let snap = Snap::new().with_length(5.0);

        assert!(snap.energy(&[a, b], Some(a), &bodies).abs() < 1e-20);
        assert_eq!(snap.energy(&[a], Some(a), &bodies), 0.0);
    }

    #[test]
    fn test_zero_period_rejected() {
        assert!(Snap::new().with_period(0.0).is_err());
        assert!(Snap::new().with_period(50.0).is_ok());
    }
}
