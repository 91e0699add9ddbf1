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
//! Constraint to a curve, the intersection of two implicit surfaces

use std::fmt;
use std::rc::Rc;

use super::surface::{project_onto, SurfaceFn};
use super::Constraint;
use crate::bodies::{BodyId, BodySet};
use crate::error::{validate_damping_ratio, validate_period, Result};
use crate::math::Vector;

/// Keeps targets on `f(p) = 0` and `g(p) = 0`
///
/// `g` defaults to the plane `z = 0`, so a single equation describes a
/// curve in the screen plane.
///
/// # Examples
///
/// ```
/// use animation_physics::constraints::Curve;
///
/// // Circle of radius 50 in the z = 0 plane
/// let ring = Curve::new(|p| p.x * p.x + p.y * p.y - 2500.0);
/// ```
#[derive(Clone)]
pub struct Curve {
    equation: SurfaceFn,
    plane: SurfaceFn,
    period: f64,
    damping_ratio: f64,
}

impl Curve {
    /// Curve where `equation` meets the plane `z = 0`
    pub fn new(equation: impl Fn(&Vector) -> f64 + 'static) -> Self {
        Curve {
            equation: Rc::new(equation),
            plane: Rc::new(|p: &Vector| p.z),
            period: 0.0,
            damping_ratio: 0.0,
        }
    }

    /// Replace the second surface
    pub fn with_plane(mut self, plane: impl Fn(&Vector) -> f64 + 'static) -> Self {
        self.plane = Rc::new(plane);
        self
    }

    /// Soften with a spring-damper; zero period is hard
    pub fn with_spring(mut self, period: f64, damping_ratio: f64) -> Result<Self> {
        self.period = validate_period("curve", period)?;
        self.damping_ratio = validate_damping_ratio("curve", damping_ratio)?;
        Ok(self)
    }
}

impl fmt::Debug for Curve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Curve")
            .field("period", &self.period)
            .field("damping_ratio", &self.damping_ratio)
            .finish_non_exhaustive()
    }
}

impl Constraint for Curve {
    fn name(&self) -> &str {
        "Curve"
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
                project_onto(&self.plane, target, self.period, self.damping_ratio, dt);
            }
        }
    }
}
