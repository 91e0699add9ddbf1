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
//! Distance-decaying push away from an anchor
//!
//! Magnitude is `strength·m_target·m_source·decay(r, cutoff)`, directed from
//! the anchor to the target. A fixed anchor counts as unit mass. Negative
//! strength attracts.

use std::f64::consts::LN_2;

use super::Force;
use crate::bodies::{require_anchor, resolve_anchor, AnchorRef, BodyId, BodySet};
use crate::error::{PhysicsError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Equilibrium distance used by [`Decay::Morse`] when no cutoff is set
const MORSE_DEFAULT_RADIUS: f64 = 100.0;

/// Fall-off with distance `r`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Decay {
    /// `max(1 - r/cutoff, 0)`
    Linear,
    /// Morse potential shape with equilibrium at `cutoff`
    Morse,
    /// `1/(1 - cutoff + r)`
    Inverse,
    /// `1/(1 - cutoff + r²)`
    #[default]
    Gravity,
}

impl Decay {
    /// Decay factor at distance `r`
    pub fn apply(&self, r: f64, cutoff: f64) -> f64 {
        match self {
            Decay::Linear => (1.0 - r / cutoff).max(0.0),
            Decay::Morse => {
                let r0 = if cutoff == 0.0 { MORSE_DEFAULT_RADIUS } else { cutoff };
                let shifted = r + r0 * (1.0 - LN_2);
                let well = 1.0 - (shifted / r0 - 1.0).exp();
                (1.0 - well * well).max(0.0)
            }
            Decay::Inverse => 1.0 / (1.0 - cutoff + r),
            Decay::Gravity => 1.0 / (1.0 - cutoff + r * r),
        }
    }
}

/// Repulsive (or, with negative strength, attractive) force
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Repulsion {
    /// Anchor; the source body is used when absent
    pub anchor: Option<AnchorRef>,
    /// Overall scale; negative values attract
    pub strength: f64,
    /// Distance parameter of the decay
    pub cutoff: f64,
    /// Exclusive `(min, max)` range of distances the force acts over
    pub range: (f64, f64),
    /// Largest force magnitude applied
    pub cap: f64,
    /// Fall-off law
    pub decay: Decay,
}

impl Repulsion {
    /// Repulsion with the given strength around an anchor
    pub fn new(strength: f64) -> Self {
        Repulsion {
            strength,
            ..Repulsion::default()
        }
    }

    /// Anchor to a point or body
    pub fn with_anchor(mut self, anchor: impl Into<AnchorRef>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    /// Fall-off law and its cutoff
    pub fn with_decay(mut self, decay: Decay, cutoff: f64) -> Self {
        self.decay = decay;
        self.cutoff = cutoff;
        self
    }

    /// Active distance range `(min, max)`, checked on attach
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.range = (min, max);
        self
    }

    /// Force magnitude cap; must be non-negative, checked on attach
    pub fn with_cap(mut self, cap: f64) -> Self {
        self.cap = cap;
        self
    }
}

impl Default for Repulsion {
    fn default() -> Self {
        Repulsion {
            anchor: None,
            strength: 1.0,
            cutoff: 0.0,
            range: (0.0, f64::INFINITY),
            cap: f64::INFINITY,
            decay: Decay::Gravity,
        }
    }
}

impl Force for Repulsion {
    fn name(&self) -> &str {
        "Repulsion"
    }

    fn apply_force(&self, targets: &[BodyId], source: Option<BodyId>, bodies: &mut BodySet) {
        let Some(anchor) = resolve_anchor(self.anchor.as_ref(), source, bodies) else {
            return;
        };
        let anchor_id = anchor.body.map(|(id, _)| id);
        let source_mass = anchor.body.map_or(1.0, |(_, m)| m);
        let (r_min, r_max) = self.range;

        for &id in targets {
            if Some(id) == anchor_id {
                continue;
            }
            let Some(target) = bodies.get_mut(id) else {
                continue;
            };
            let disp = target.position().sub(&anchor.position);
            let r = disp.norm();
            if r <= r_min || r >= r_max {
                continue;
            }
            let magnitude = self.strength * target.mass() * source_mass * self.decay.apply(r, self.cutoff);
            target.apply_force(disp.normalize(magnitude).cap(self.cap));
        }
    }

    fn validate(&self, source: Option<BodyId>) -> Result<()> {
        if !(self.cap >= 0.0) {
            return Err(PhysicsError::invalid(format!(
                "Repulsion cap must be non-negative, got {}",
                self.cap
            )));
        }
        let (r_min, r_max) = self.range;
        if !(r_min >= 0.0 && r_min <= r_max) {
            return Err(PhysicsError::invalid(format!(
                "Repulsion range ({}, {}) is not a valid interval",
                r_min, r_max
            )));
        }
        require_anchor("Repulsion", self.anchor.as_ref(), source)
    }
}
