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
//! Position-dependent fields such as gravity

use std::fmt;
use std::rc::Rc;

use super::Force;
use crate::bodies::{BodyId, BodySet};
use crate::math::Vector;

/// A field sampled at each target's position
#[derive(Clone)]
pub enum Field {
    /// The same direction everywhere
    Constant(Vector),
    /// `direction·(p·direction)`
    Linear(Vector),
    /// `-p`, toward the origin
    Radial,
    /// `position - p`
    PointAttractor(Vector),
    /// Toward the sphere of the given radius about the origin
    SphereAttractor(f64),
    /// Any function of position
    Custom(Rc<dyn Fn(&Vector) -> Vector>),
}

impl Field {
    /// Field value at `p`
    pub fn evaluate(&self, p: &Vector) -> Vector {
        match self {
            Field::Constant(direction) => *direction,
            Field::Linear(direction) => direction.mult(p.dot(direction)),
            Field::Radial => -*p,
            Field::PointAttractor(position) => position.sub(p),
            Field::SphereAttractor(radius) => {
                let r = p.norm();
                if r == 0.0 {
                    Vector::ZERO
                } else {
                    p.mult((radius - r) / r)
                }
            }
            Field::Custom(f) => f(p),
        }
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Field::Constant(d) => f.debug_tuple("Constant").field(d).finish(),
            Field::Linear(d) => f.debug_tuple("Linear").field(d).finish(),
            Field::Radial => f.write_str("Radial"),
            Field::PointAttractor(p) => f.debug_tuple("PointAttractor").field(p).finish(),
            Field::SphereAttractor(r) => f.debug_tuple("SphereAttractor").field(r).finish(),
            Field::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// Force `strength·m·field(p)` on every target
///
/// # Examples
///
/// ```
/// use animation_physics::forces::{Field, VectorField};
/// use animation_physics::math::Vector;
///
/// let gravity = VectorField::new(Field::Constant(Vector::new(0.0, 1.0, 0.0)), 0.002);
/// assert_eq!(gravity.strength, 0.002);
/// ```
#[derive(Debug, Clone)]
pub struct VectorField {
    /// Field shape
    pub field: Field,
    /// Scale applied to the field
    pub strength: f64,
}

impl VectorField {
    /// Field with a strength
    pub fn new(field: Field, strength: f64) -> Self {
        VectorField { field, strength }
    }

    /// Field from a closure
    pub fn custom(strength: f64, f: impl Fn(&Vector) -> Vector + 'static) -> Self {
        VectorField::new(Field::Custom(Rc::new(f)), strength)
    }
}

impl Default for VectorField {
    fn default() -> Self {
        VectorField::new(Field::Constant(Vector::Y), 1.0)
    }
}

impl Force for VectorField {
    fn name(&self) -> &str {
        "VectorField"
    }

    fn apply_force(&self, targets: &[BodyId], _source: Option<BodyId>, bodies: &mut BodySet) {
        for &id in targets {
            if let Some(target) = bodies.get_mut(id) {
                let force = self
                    .field
                    .evaluate(&target.position())
                    .mult(self.strength * target.mass());
                target.apply_force(force);
            }
        }
    }
}
