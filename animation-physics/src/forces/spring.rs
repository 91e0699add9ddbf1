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
//! Damped springs
//!
//! A spring is tuned by its oscillation period and damping ratio instead of
//! raw stiffness, so the same settings feel the same regardless of mass:
//!
//! ```text
//! k = (2π / period)²·m
//! c = 4π·ζ / period·m
//! ```
//!
//! where `m` is the target's mass, or the reduced mass `m₁m₂/(m₁+m₂)` when
//! the spring connects two bodies.

use std::f64::consts::PI;

use log::warn;

use super::Force;
use crate::bodies::{require_anchor, resolve_anchor, AnchorRef, BodyId, BodySet};
use crate::error::{validate_damping_ratio, validate_period, validate_positive, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shortest period (ms) the integrator stays stable for at the frame rate
pub const MIN_PERIOD: f64 = 150.0;

/// Force law as a function of extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpringLaw {
    /// Linear in the extension
    #[default]
    Hooke,
    /// Finitely extensible: stiffens without bound as the extension
    /// approaches `max_length`
    Fene,
}

impl SpringLaw {
    /// Scalar force per unit stiffness for an extension `dist`
    pub fn apply(&self, dist: f64, max_length: f64) -> f64 {
        match self {
            SpringLaw::Hooke => dist,
            SpringLaw::Fene => {
                if !max_length.is_finite() {
                    return dist;
                }
                let limit = 0.99 * max_length;
                let r = dist.clamp(-limit, limit);
                r / (1.0 - r * r / (max_length * max_length))
            }
        }
    }
}

/// A spring from each target to an anchor point or the source body
///
/// # Examples
///
/// ```
/// use animation_physics::forces::Spring;
/// use animation_physics::math::Vector;
///
/// let spring = Spring::new()
///     .with_anchor(Vector::new(100.0, 0.0, 0.0))
///     .with_period(400.0)
///     .unwrap()
///     .with_damping_ratio(0.5)
///     .unwrap();
/// assert_eq!(spring.period(), 400.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spring {
    anchor: Option<AnchorRef>,
    period: f64,
    damping_ratio: f64,
    length: f64,
    max_length: f64,
    law: SpringLaw,
}

impl Spring {
    /// Spring with the default tuning and no anchor
    pub fn new() -> Self {
        Spring::default()
    }

    /// Anchor to a point or body
    pub fn with_anchor(mut self, anchor: impl Into<AnchorRef>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    /// Oscillation period in milliseconds
    ///
    /// Periods below [`MIN_PERIOD`] are raised to it.
    pub fn with_period(mut self, period: f64) -> Result<Self> {
        self.set_period(period)?;
        Ok(self)
    }

    /// Damping ratio; 1 is critically damped
    pub fn with_damping_ratio(mut self, damping_ratio: f64) -> Result<Self> {
        self.damping_ratio = validate_damping_ratio("spring", damping_ratio)?;
        Ok(self)
    }

    /// Rest length
    pub fn with_length(mut self, length: f64) -> Self {
        self.length = length;
        self
    }

    /// Extension limit used by [`SpringLaw::Fene`]
    ///
    /// # Errors
    ///
    /// `InvalidPhysicsConfiguration` unless `max_length` is positive.
    pub fn with_max_length(mut self, max_length: f64) -> Result<Self> {
        self.max_length = validate_positive("spring max_length", max_length)?;
        Ok(self)
    }

    /// Force law
    pub fn with_law(mut self, law: SpringLaw) -> Self {
        self.law = law;
        self
    }

    /// Change the period, clamping to [`MIN_PERIOD`]
    pub fn set_period(&mut self, period: f64) -> Result<()> {
        let period = validate_period("spring", period)?;
        if period < MIN_PERIOD {
            warn!(
                "Spring period {} ms is below the stable minimum, using {} ms",
                period, MIN_PERIOD
            );
        }
        self.period = period.max(MIN_PERIOD);
        Ok(())
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

    /// Damping ratio
    pub fn damping_ratio(&self) -> f64 {
        self.damping_ratio
    }

    /// Rest length
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Stiffness per unit mass, `(2π/period)²`
    pub fn stiffness(&self) -> f64 {
        let omega = 2.0 * PI / self.period;
        omega * omega
    }

    /// Damping per unit mass, `4π·ζ/period`
    pub fn damping(&self) -> f64 {
        4.0 * PI * self.damping_ratio / self.period
    }
}

impl Default for Spring {
    fn default() -> Self {
        Spring {
            anchor: None,
            period: 300.0,
            damping_ratio: 0.1,
            length: 0.0,
            max_length: f64::INFINITY,
            law: SpringLaw::Hooke,
        }
    }
}

/// Mass the spring acts on: reduced mass for two bodies, else the target's
fn effective_mass(target_mass: f64, anchor_mass: Option<f64>) -> f64 {
    match anchor_mass {
        Some(m1) => m1 * target_mass / (m1 + target_mass),
        None => target_mass,
    }
}

impl Force for Spring {
    fn name(&self) -> &str {
        "Spring"
    }

    fn apply_force(&self, targets: &[BodyId], source: Option<BodyId>, bodies: &mut BodySet) {
        let Some(anchor) = resolve_anchor(self.anchor.as_ref(), source, bodies) else {
            return;
        };
        let anchor_body = anchor.body.map(|(id, _)| id);
        let stiffness = self.stiffness();
        let damping = self.damping();

        for &id in targets {
            if Some(id) == anchor_body {
                continue;
            }
            let Some(target) = bodies.get_mut(id) else {
                continue;
            };

            let disp = anchor.position.sub(&target.position());
            let dist = disp.norm() - self.length;
            if dist == 0.0 {
                continue;
            }

            let m = effective_mass(target.mass(), anchor.body.map(|(_, m)| m));
            let mut force = disp.normalize(stiffness * m * self.law.apply(dist, self.max_length));
            if damping != 0.0 {
                let relative = target.velocity().sub(&anchor.velocity);
                force -= relative.mult(damping * m);
            }

            target.apply_force(force);
            if let Some(anchor_id) = anchor_body {
                if let Some(other) = bodies.get_mut(anchor_id) {
                    other.apply_force(-force);
                }
            }
        }
    }

    fn energy(&self, targets: &[BodyId], source: Option<BodyId>, bodies: &BodySet) -> f64 {
        let Some(anchor) = resolve_anchor(self.anchor.as_ref(), source, bodies) else {
            return 0.0;
        };
        let stiffness = self.stiffness();
        targets
            .iter()
            .filter(|&&id| Some(id) != anchor.body.map(|(b, _)| b))
            .filter_map(|&id| bodies.get(id))
            .map(|target| {
                let dist = anchor.position.distance(&target.position()) - self.length;
                let m = effective_mass(target.mass(), anchor.body.map(|(_, m)| m));
                0.5 * stiffness * m * dist * dist
            })
            .sum()
    }

    fn validate(&self, source: Option<BodyId>) -> Result<()> {
        require_anchor("Spring", self.anchor.as_ref(), source)
    }
}
