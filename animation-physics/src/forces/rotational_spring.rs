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
//! Springs on orientation
//!
//! The orientation error is the small-angle rotation vector from the
//! target's orientation to the anchor. Torque is scaled by the inertia
//! tensor so period and damping ratio mean the same thing as for
//! [`Spring`](super::Spring).

use std::f64::consts::PI;

use super::{Force, MIN_PERIOD};
use crate::bodies::{BodyId, BodySet};
use crate::error::{validate_damping_ratio, validate_period, PhysicsError, Result};
use crate::math::{Quaternion, Vector};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Torque spring toward an orientation
///
/// Without an anchor the source body's orientation is the target, and the
/// source receives the opposite torque.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RotationalSpring {
    anchor: Option<Quaternion>,
    period: f64,
    damping_ratio: f64,
}

impl RotationalSpring {
    /// Spring with the default tuning and no anchor
    pub fn new() -> Self {
        RotationalSpring::default()
    }

    /// Spring toward a fixed orientation
    pub fn with_anchor(mut self, anchor: Quaternion) -> Self {
        self.anchor = Some(anchor.normalize());
        self
    }

    /// Oscillation period in milliseconds, clamped to [`MIN_PERIOD`]
    pub fn with_period(mut self, period: f64) -> Result<Self> {
        self.period = validate_period("rotational spring", period)?.max(MIN_PERIOD);
        Ok(self)
    }

    /// Damping ratio
    pub fn with_damping_ratio(mut self, damping_ratio: f64) -> Result<Self> {
        self.damping_ratio = validate_damping_ratio("rotational spring", damping_ratio)?;
        Ok(self)
    }

    /// Anchor orientation
    pub fn anchor(&self) -> Option<Quaternion> {
        self.anchor
    }

    /// Period in milliseconds
    pub fn period(&self) -> f64 {
        self.period
    }

    fn stiffness(&self) -> f64 {
        let omega = 2.0 * PI / self.period;
        omega * omega
    }

    fn damping(&self) -> f64 {
        4.0 * PI * self.damping_ratio / self.period
    }

    /// Anchor orientation and angular velocity for this step
    fn resolve(&self, source: Option<BodyId>, bodies: &BodySet) -> Option<(Quaternion, Vector)> {
        match (self.anchor, source) {
            (Some(q), _) => Some((q, Vector::ZERO)),
            (None, Some(id)) => bodies
                .get(id)
                .map(|s| (s.orientation(), s.angular_velocity())),
            (None, None) => None,
        }
    }
}

impl Default for RotationalSpring {
    fn default() -> Self {
        RotationalSpring {
            anchor: None,
            period: 300.0,
            damping_ratio: 0.1,
        }
    }
}

impl Force for RotationalSpring {
    fn name(&self) -> &str {
        "RotationalSpring"
    }

    fn apply_force(&self, targets: &[BodyId], source: Option<BodyId>, bodies: &mut BodySet) {
        let Some((anchor, anchor_spin)) = self.resolve(source, bodies) else {
            return;
        };
        let reaction_body = if self.anchor.is_none() { source } else { None };
        let (stiffness, damping) = (self.stiffness(), self.damping());

        for &id in targets {
            if Some(id) == reaction_body {
                continue;
            }
            let Some(body) = bodies.get_mut(id).and_then(|t| t.as_body_mut()) else {
                continue;
            };

            let error = body.orientation().rotation_to(&anchor);
            let spin = body.angular_velocity().sub(&anchor_spin);
            let drive = error.mult(stiffness).sub(&spin.mult(damping));
            let torque = body.inertia().vector_multiply(&drive);
            body.apply_torque(torque);

            if let Some(other) = reaction_body.and_then(|r| bodies.get_mut(r)) {
                other.apply_torque(-torque);
            }
        }
    }

    fn energy(&self, targets: &[BodyId], source: Option<BodyId>, bodies: &BodySet) -> f64 {
        let Some((anchor, _)) = self.resolve(source, bodies) else {
            return 0.0;
        };
        let stiffness = self.stiffness();
        targets
            .iter()
            .filter_map(|&id| bodies.get(id).and_then(|t| t.as_body()))
            .map(|body| {
                let error = body.orientation().rotation_to(&anchor);
                0.5 * stiffness * body.inertia().vector_multiply(&error).dot(&error)
            })
            .sum()
    }

    fn validate(&self, source: Option<BodyId>) -> Result<()> {
        if self.anchor.is_none() && source.is_none() {
            return Err(PhysicsError::invalid(
                "RotationalSpring needs an anchor orientation or a source body",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::Body;

    #[test]
    fn test_torque_turns_toward_anchor() {
        let mut bodies = BodySet::new();
        let id = bodies.insert(Body::circle(1.0, 1.0).unwrap());
        let anchor = Quaternion::from_axis_angle(&Vector::Z, 0.1);

        RotationalSpring::new()
            .with_anchor(anchor)
            .apply_force(&[id], None, &mut bodies);

        let torque = bodies.get(id).unwrap().as_body().unwrap().torque();
        assert!(torque.z > 0.0);
        assert!(torque.x.abs() < 1e-15 && torque.y.abs() < 1e-15);
    }

    #[test]
    fn test_aligned_body_has_no_energy() {
        let mut bodies = BodySet::new();
        let id = bodies.insert(Body::circle(1.0, 1.0).unwrap());
        let spring = RotationalSpring::new().with_anchor(Quaternion::IDENTITY);

        assert_eq!(spring.energy(&[id], None, &bodies), 0.0);
        spring.apply_force(&[id], None, &mut bodies);
        assert!(bodies.get(id).unwrap().is_sleeping());
    }

    #[test]
    fn test_needs_anchor_or_source() {
        assert!(RotationalSpring::new().validate(None).is_err());
        assert!(RotationalSpring::new().validate(Some(BodyId::new(0, 0))).is_ok());
        assert_eq!(RotationalSpring::new().with_period(10.0).unwrap().period(), MIN_PERIOD);
    }
}
