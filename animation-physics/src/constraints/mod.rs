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
//! Impulse-based constraints
//!
//! Constraints run after velocities are integrated and before positions
//! are, possibly several times per frame. Each one measures a positional
//! error `C` along a direction `J` and cancels it with an impulse:
//!
//! ```text
//! λ       = -(J·v + (β/dt)·C) / (γ + dt·|J|²/m)
//! impulse = J·dt·λ
//! ```
//!
//! `β` and `γ` come from a virtual spring-damper with the constraint's
//! period and damping ratio (Baumgarte stabilization). A zero period gives
//! a hard constraint, `γ = 0` and `β = 1`, which removes the whole error in
//! one step.

use std::f64::consts::PI;

use crate::bodies::{BodyId, BodySet};
use crate::error::Result;
use crate::forces::AsAny;

mod collision;
mod contact;
mod curve;
mod distance;
mod snap;
mod surface;
mod wall;
mod walls;

pub use collision::Collision;
pub use contact::{ContactEvent, ContactOptions, ContactPhase, OnContact};
pub use curve::Curve;
pub use distance::Distance;
pub use snap::Snap;
pub use surface::{Surface, SurfaceFn};
pub use wall::Wall;
pub use walls::{Side, Walls};

/// Enforces a rule on its targets by applying impulses
pub trait Constraint: AsAny {
    /// Name used in log output
    fn name(&self) -> &str;

    /// Apply this iteration's impulses
    fn apply_constraint(
        &mut self,
        targets: &[BodyId],
        source: Option<BodyId>,
        dt: f64,
        bodies: &mut BodySet,
    );

    /// Potential energy stored in the constraint
    fn energy(&self, _targets: &[BodyId], _source: Option<BodyId>, _bodies: &BodySet) -> f64 {
        0.0
    }

    /// Check that the constraint can be attached with this source
    fn validate(&self, _source: Option<BodyId>) -> Result<()> {
        Ok(())
    }
}

/// `(γ, β)` for a spring-damper of `period` and `damping_ratio` acting on
/// `effective_mass`
pub(crate) fn softness(period: f64, damping_ratio: f64, effective_mass: f64, dt: f64) -> (f64, f64) {
    if period == 0.0 {
        return (0.0, 1.0);
    }
    let k = 4.0 * PI * PI * effective_mass / (period * period);
    let c = 4.0 * PI * damping_ratio * effective_mass / period;
    let denominator = c + dt * k;
    (1.0 / denominator, dt * k / denominator)
}

/// `1/(1/m₁ + 1/m₂)`, or `m₁` alone when the other side is immovable
pub(crate) fn effective_mass(m1: f64, m2: Option<f64>) -> f64 {
    match m2 {
        Some(m2) => 1.0 / (1.0 / m1 + 1.0 / m2),
        None => m1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hard_softness() {
        assert_eq!(softness(0.0, 0.5, 3.0, 16.0), (0.0, 1.0));
    }

    #[test]
    fn test_soft_softness() {
        let (gamma, beta) = softness(300.0, 0.5, 1.0, 16.0);
        assert!(gamma > 0.0);
        assert!(beta > 0.0 && beta < 1.0);

        // Stiffer springs correct more per step
        let (_, stiff_beta) = softness(100.0, 0.5, 1.0, 16.0);
        assert!(stiff_beta > beta);
    }

    #[test]
    fn test_effective_mass() {
        assert_eq!(effective_mass(2.0, Some(2.0)), 1.0);
        assert_eq!(effective_mass(2.0, None), 2.0);
    }
}
