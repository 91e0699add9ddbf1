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
//! Agents: forces and constraints attached to bodies

use std::fmt;

use crate::bodies::BodyId;
use crate::constraints::{Collision, Constraint, Curve, Distance, Snap, Surface, Wall, Walls};
use crate::forces::{Drag, Force, Repulsion, RotationalDrag, RotationalSpring, Spring, VectorField};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Handle to an attached agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AgentId(u64);

impl AgentId {
    pub(crate) fn new(raw: u64) -> Self {
        AgentId(raw)
    }

    /// Raw id value
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Agent({})", self.0)
    }
}

/// A force or a constraint
pub enum Agent {
    /// Applied before velocity integration
    Force(Box<dyn Force>),
    /// Applied after velocity integration, `constraint_steps` times
    Constraint(Box<dyn Constraint>),
}

impl Agent {
    /// Wrap any force
    pub fn force(force: impl Force) -> Self {
        Agent::Force(Box::new(force))
    }

    /// Wrap any constraint
    pub fn constraint(constraint: impl Constraint) -> Self {
        Agent::Constraint(Box::new(constraint))
    }

    /// Name of the wrapped agent
    pub fn name(&self) -> &str {
        match self {
            Agent::Force(f) => f.name(),
            Agent::Constraint(c) => c.name(),
        }
    }

    /// Whether this is a force
    pub fn is_force(&self) -> bool {
        matches!(self, Agent::Force(_))
    }

    /// The concrete agent, if it is a `T`
    pub fn downcast_ref<T: 'static>(&self) -> Option<&T> {
        match self {
            Agent::Force(f) => (**f).as_any().downcast_ref(),
            Agent::Constraint(c) => (**c).as_any().downcast_ref(),
        }
    }

    /// The concrete agent, mutably, if it is a `T`
    pub fn downcast_mut<T: 'static>(&mut self) -> Option<&mut T> {
        match self {
            Agent::Force(f) => (**f).as_any_mut().downcast_mut(),
            Agent::Constraint(c) => (**c).as_any_mut().downcast_mut(),
        }
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Agent::Force(force) => f.debug_tuple("Force").field(&force.name()).finish(),
            Agent::Constraint(c) => f.debug_tuple("Constraint").field(&c.name()).finish(),
        }
    }
}

macro_rules! impl_agent_from {
    ($variant:ident => $($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Agent {
                fn from(agent: $ty) -> Self {
                    Agent::$variant(Box::new(agent))
                }
            }
        )*
    };
}

impl_agent_from!(Force => Drag, RotationalDrag, Spring, RotationalSpring, Repulsion, VectorField);
impl_agent_from!(Constraint => Distance, Snap, Wall, Walls, Collision, Surface, Curve);

/// An agent with the bodies it acts on
#[derive(Debug)]
pub(crate) struct Binding {
    pub agent: Agent,
    pub targets: Vec<BodyId>,
    pub source: Option<BodyId>,
}

impl Binding {
    /// Whether the binding mentions `body` as a target or source
    pub fn references(&self, body: BodyId) -> bool {
        self.source == Some(body) || self.targets.contains(&body)
    }
}
