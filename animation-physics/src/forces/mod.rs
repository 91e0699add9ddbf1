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
//! Force generators
//!
//! A force writes into the force (and torque) accumulators of its targets
//! once per step. Forces never touch velocity or position directly; the
//! integrator turns the accumulated force into motion.
//!
//! Each generator is a plain struct with public option fields, a `Default`
//! matching the usual animation tuning, and a `Force` impl.

use std::any::Any;

use crate::bodies::{BodyId, BodySet};
use crate::error::Result;

mod drag;
mod repulsion;
mod rotational_drag;
mod rotational_spring;
mod spring;
mod vector_field;

pub use drag::{Drag, DragLaw};
pub use repulsion::{Decay, Repulsion};
pub use rotational_drag::RotationalDrag;
pub use rotational_spring::RotationalSpring;
pub use spring::{Spring, SpringLaw, MIN_PERIOD};
pub use vector_field::{Field, VectorField};

/// Downcasting support for agents stored behind trait objects
pub trait AsAny: Any {
    /// `self` as `&dyn Any`
    fn as_any(&self) -> &dyn Any;

    /// `self` as `&mut dyn Any`
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Generates forces on a set of targets
///
/// `source`, when present, is a body the force is anchored to. Symmetric
/// forces apply the reaction to it.
pub trait Force: AsAny {
    /// Name used in log output
    fn name(&self) -> &str;

    /// Add this step's forces to the targets' accumulators
    fn apply_force(&self, targets: &[BodyId], source: Option<BodyId>, bodies: &mut BodySet);

    /// Potential energy stored in the force
    fn energy(&self, _targets: &[BodyId], _source: Option<BodyId>, _bodies: &BodySet) -> f64 {
        0.0
    }

    /// Check that the force can be attached with this source
    fn validate(&self, _source: Option<BodyId>) -> Result<()> {
        Ok(())
    }
}
