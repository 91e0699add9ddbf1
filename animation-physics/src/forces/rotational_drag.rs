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
//! Drag on spin

use super::{DragLaw, Force};
use crate::bodies::{BodyId, BodySet};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Torque `τ = -strength·law(ω)`; particles are unaffected
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RotationalDrag {
    /// Drag coefficient
    pub strength: f64,
    /// Angular speed dependence
    pub law: DragLaw,
}

impl RotationalDrag {
    /// Linear rotational drag of the given strength
    pub fn new(strength: f64) -> Self {
        RotationalDrag {
            strength,
            law: DragLaw::Linear,
        }
    }
}

impl Default for RotationalDrag {
    fn default() -> Self {
        RotationalDrag::new(0.1)
    }
}

impl Force for RotationalDrag {
    fn name(&self) -> &str {
        "RotationalDrag"
    }

    fn apply_force(&self, targets: &[BodyId], _source: Option<BodyId>, bodies: &mut BodySet) {
        for &id in targets {
            if let Some(body) = bodies.get_mut(id).and_then(|t| t.as_body_mut()) {
                let torque = self.law.apply(&body.angular_velocity()).mult(-self.strength);
                body.apply_torque(torque);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::{Body, Particle};
    use crate::math::Vector;

    #[test]
    fn test_torque_opposes_spin() {
        let mut bodies = BodySet::new();
        let spinning = bodies.insert(
            Body::circle(1.0, 1.0)
                .unwrap()
                .with_angular_velocity(Vector::new(0.0, 0.0, 2.0)),
        );
        let particle = bodies.insert(Particle::new(1.0).unwrap());

        RotationalDrag::new(0.25).apply_force(&[spinning, particle], None, &mut bodies);

        let body = bodies.get(spinning).unwrap().as_body().unwrap();
        assert_eq!(body.torque(), Vector::new(0.0, 0.0, -0.5));
        assert!(bodies.get(particle).unwrap().is_sleeping());
    }
}
