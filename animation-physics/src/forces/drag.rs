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
//! Velocity-opposing drag

use super::Force;
use crate::bodies::{BodyId, BodySet};
use crate::math::Vector;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How drag scales with speed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DragLaw {
    /// Proportional to `v`
    #[default]
    Linear,
    /// Proportional to `v·|v|`
    Quadratic,
}

impl DragLaw {
    /// Apply the law to a velocity-like vector
    pub fn apply(&self, v: &Vector) -> Vector {
        match self {
            DragLaw::Linear => *v,
            DragLaw::Quadratic => v.mult(v.norm()),
        }
    }
}

/// Drag force `f = -strength·law(v)`
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Drag {
    /// Drag coefficient
    pub strength: f64,
    /// Speed dependence
    pub law: DragLaw,
}

impl Drag {
    /// Linear drag of the given strength
    pub fn new(strength: f64) -> Self {
        Drag {
            strength,
            law: DragLaw::Linear,
        }
    }

    /// Quadratic drag of the given strength
    pub fn quadratic(strength: f64) -> Self {
        Drag {
            strength,
            law: DragLaw::Quadratic,
        }
    }
}

impl Default for Drag {
    fn default() -> Self {
        Drag::new(0.01)
    }
}

impl Force for Drag {
    fn name(&self) -> &str {
        "Drag"
    }

    fn apply_force(&self, targets: &[BodyId], _source: Option<BodyId>, bodies: &mut BodySet) {
        for &id in targets {
            if let Some(target) = bodies.get_mut(id) {
                let force = self.law.apply(&target.velocity()).mult(-self.strength);
                target.apply_force(force);
            }
        }
    }
}
