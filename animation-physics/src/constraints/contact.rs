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
//! Contact settings and notifications shared by walls and collisions

use super::walls::Side;
use crate::bodies::BodyId;
use crate::math::Vector;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// What a wall does when something hits it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OnContact {
    /// Bounce the body back and push it out of the wall
    #[default]
    Reflect,
    /// Only emit events
    Silent,
}

/// Stage of a contact, in emission order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactPhase {
    /// Contact detected, nothing resolved yet
    PreCollision,
    /// Emitted right after `PreCollision`
    Collision,
    /// The response has been applied
    PostCollision,
}

/// Details handed to contact handlers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    /// The body that made contact
    pub target: BodyId,
    /// The other body, for collisions
    pub source: Option<BodyId>,
    /// Signed penetration; negative while overlapping
    pub overlap: f64,
    /// Contact normal
    pub normal: Vector,
    /// Which side of a `Walls` box was hit
    pub side: Option<Side>,
}

/// Response tuning for a contact
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ContactOptions {
    /// Fraction of the normal velocity kept after a bounce
    pub restitution: f64,
    /// Fraction of penetration removed per step through velocity
    pub drift: f64,
    /// Penetration tolerated before drift correction starts
    pub slop: f64,
    /// Response kind, used by walls
    pub on_contact: OnContact,
}

impl ContactOptions {
    /// Extra separating speed needed to remove penetration beyond the slop
    pub(crate) fn drift_correction(&self, overlap: f64, dt: f64) -> f64 {
        if overlap < -self.slop {
            self.drift / dt * (overlap + self.slop)
        } else {
            0.0
        }
    }
}

impl Default for ContactOptions {
    fn default() -> Self {
        ContactOptions {
            restitution: 0.5,
            drift: 0.5,
            slop: 0.0,
            on_contact: OnContact::Reflect,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drift_only_past_slop() {
        let options = ContactOptions {
            slop: 1.0,
            ..ContactOptions::default()
        };
        assert_eq!(options.drift_correction(-0.5, 10.0), 0.0);
        assert_eq!(options.drift_correction(-3.0, 10.0), 0.5 / 10.0 * -2.0);
    }
}
