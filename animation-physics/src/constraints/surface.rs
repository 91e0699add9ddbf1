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
//! Constraint to an implicit surface `f(p) = 0`
//!
//! The gradient of `f` is estimated by forward differences, so any
//! continuous function works at the cost of four evaluations per target.

use std::fmt;
use std::rc::Rc;

use super::{softness, Constraint};
use crate::bodies::{BodyId, BodySet, Simulated};
use crate::error::{validate_damping_ratio, validate_period, Result};
use crate::math::Vector;

/// Step used for the finite-difference gradient
pub(crate) const GRADIENT_EPSILON: f64 = 1e-7;

/// Implicit surface function
pub type SurfaceFn = Rc<dyn Fn(&Vector) -> f64>;

/// Value and forward-difference gradient of `f` at `p`
pub(crate) fn value_and_gradient(f: &SurfaceFn, p: &Vector) -> (f64, Vector) {
    let f0 = f(p);
    let e = GRADIENT_EPSILON;
    let gradient = Vector::new(
        (f(&Vector::new(p.x + e, p.y, p.z)) - f0) / e,
        (f(&Vector::new(p.x, p.y + e, p.z)) - f0) / e,
        (f(&Vector::new(p.x, p.y, p.z + e)) - f0) / e,
    );
    (f0, gradient)
}

/// One Baumgarte solve pulling `target` onto the zero set of `f`
pub(crate) fn project_onto(
    f: &SurfaceFn,
    target: &mut Simulated,
    period: f64,
    damping_ratio: f64,
    dt: f64,
) {
    let (f0, jacobian) = value_and_gradient(f, &target.position());
    let j2 = jacobian.norm_squared();
    if j2 == 0.0 || !j2.is_finite() {
        return;
    }
    let mass = target.mass();
    let (gamma, beta) = softness(period, damping_ratio, mass, dt);

    let anti_drift = beta / dt * f0;
    let lambda = -(jacobian.dot(&target.velocity()) + anti_drift) / (gamma + dt * j2 / mass);
    target.apply_impulse(jacobian.mult(dt * lambda));
}

/// Keeps targets on `f(p) = 0`
///
/// # Examples
///
/// ```
/// use animation_physics::constraints::Surface;
///
/// // Unit-radius sphere scaled to 100
/// let sphere = Surface::new(|p| p.norm() - 100.0);
/// ```
#[derive(Clone)]
pub struct Surface {
    equation: SurfaceFn,
    period: f64,
    damping_ratio: f64,
}

impl Surface {
    /// Hard constraint to the zero set of `equation`
    pub fn new(equation: impl Fn(&Vector) -> f64 + 'static) -> Self {
        Surface {
            equation: Rc::new(equation),
            period: 0.0,
            damping_ratio: 0.0,
        }
    }

    /// Soften with a spring-damper; zero period is hard
    pub fn with_spring(mut self, period: f64, damping_ratio: f64) -> Result<Self> {
        self.period = validate_period("surface", period)?;
        self.damping_ratio = validate_damping_ratio("surface", damping_ratio)?;
        Ok(self)
    }

    /// Evaluate the surface function
    pub fn evaluate(&self, p: &Vector) -> f64 {
        (self.equation)(p)
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("period", &self.period)
            .field("damping_ratio", &self.damping_ratio)
            .finish_non_exhaustive()
    }
}

impl Constraint for Surface {
    fn name(&self) -> &str {
        "Surface"
    }

    fn apply_constraint(
        &mut self,
        targets: &[BodyId],
        _source: Option<BodyId>,
        dt: f64,
        bodies: &mut BodySet,
    ) {
        for &id in targets {
            if let Some(target) = bodies.get_mut(id) {
                project_onto(&self.equation, target, self.period, self.damping_ratio, dt);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::Particle;

    #[test]
    fn test_gradient_of_plane() {
        let f: SurfaceFn = Rc::new(|p: &Vector| 2.0 * p.x - p.y);
        let (f0, gradient) = value_and_gradient(&f, &Vector::new(1.0, 1.0, 0.0));
        assert_eq!(f0, 1.0);
        assert!((gradient.x - 2.0).abs() < 1e-6);
        assert!((gradient.y + 1.0).abs() < 1e-6);
        assert!(gradient.z.abs() < 1e-6);
    }

    #[test]
    fn test_pulls_onto_sphere() {
        let mut bodies = BodySet::new();
        let id = bodies.insert(Particle::new(1.0).unwrap().with_position(Vector::new(0.0, 120.0, 0.0)));
        let mut sphere = Surface::new(|p| p.norm() - 100.0);

        let dt = 16.0;
        sphere.apply_constraint(&[id], None, dt, &mut bodies);
        let target = bodies.get(id).unwrap();
        let next = target.position().add(&target.velocity().mult(dt));
        assert!((next.norm() - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_flat_function_is_ignored() {
        let mut bodies = BodySet::new();
        let id = bodies.insert(Particle::new(1.0).unwrap());
        Surface::new(|_| 1.0).apply_constraint(&[id], None, 16.0, &mut bodies);
        assert!(bodies.get(id).unwrap().is_sleeping());
    }
}
