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
//! Fixed separation from an anchor

use super::{effective_mass, softness, Constraint};
use crate::bodies::{require_anchor, resolve_anchor, AnchorRef, BodyId, BodySet};
use crate::error::{validate_damping_ratio, validate_period, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Keeps each target at `length` from the anchor (or source body)
///
/// Errors smaller than `min_length` are left alone, which gives a rope
/// some slack.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Distance {
    anchor: Option<AnchorRef>,
    /// Target separation
    pub length: f64,
    /// Dead zone around `length`
    pub min_length: f64,
    period: f64,
    damping_ratio: f64,
}

impl Distance {
    /// Hard constraint at `length`
    pub fn new(length: f64) -> Self {
        Distance {
            length,
            ..Distance::default()
        }
    }

    /// Anchor to a point or body
    pub fn with_anchor(mut self, anchor: impl Into<AnchorRef>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    /// Dead zone around the target length
    pub fn with_min_length(mut self, min_length: f64) -> Self {
        self.min_length = min_length;
        self
    }

    /// Soften with a spring-damper; zero period is hard
    pub fn with_spring(mut self, period: f64, damping_ratio: f64) -> Result<Self> {
        self.period = validate_period("distance", period)?;
        self.damping_ratio = validate_damping_ratio("distance", damping_ratio)?;
        Ok(self)
    }

    /// Anchor, if any
    pub fn anchor(&self) -> Option<AnchorRef> {
        self.anchor
    }
}

impl Default for Distance {
    fn default() -> Self {
        Distance {
            anchor: None,
            length: 0.0,
            min_length: 0.0,
            period: 0.0,
            damping_ratio: 0.0,
        }
    }
}

impl Constraint for Distance {
    fn name(&self) -> &str {
        "Distance"
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

            let diff_p = target.position().sub(&anchor.position);
            let diff_v = target.velocity().sub(&anchor.velocity);
            let dist = diff_p.norm() - self.length;
            if dist.abs() < self.min_length {
                continue;
            }

            let n = diff_p.unit();
            let eff_mass = effective_mass(target.mass(), anchor.body.map(|(_, m)| m));
            let (gamma, beta) = softness(self.period, self.damping_ratio, eff_mass, dt);

            let anti_drift = beta * dist / dt;
            let lambda = -(n.dot(&diff_v) + anti_drift) / (gamma + dt / eff_mass);
            let impulse = n.mult(dt * lambda);

            target.apply_impulse(impulse);
            if let Some(other) = anchor_id.and_then(|a| bodies.get_mut(a)) {
                other.apply_impulse(-impulse);
            }
        }
    }

    fn validate(&self, source: Option<BodyId>) -> Result<()> {
        require_anchor("Distance", self.anchor.as_ref(), source)
    }
}
