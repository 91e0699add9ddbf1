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
//! Anchor points for springs, repulsion and distance constraints

use super::{BodyId, BodySet};
use crate::error::{PhysicsError, Result};
use crate::math::Vector;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Where an agent pulls toward: a fixed point or a body that moves
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnchorRef {
    /// A point in world space
    Fixed(Vector),
    /// The current position of a body
    Body(BodyId),
}

impl AnchorRef {
    /// Current anchor position, or `None` if the body is gone
    pub fn resolve(&self, bodies: &BodySet) -> Option<Vector> {
        match *self {
            AnchorRef::Fixed(point) => Some(point),
            AnchorRef::Body(id) => bodies.get(id).map(|body| body.position()),
        }
    }

    /// Velocity of the anchor; zero for a fixed point
    pub fn velocity(&self, bodies: &BodySet) -> Vector {
        match *self {
            AnchorRef::Fixed(_) => Vector::ZERO,
            AnchorRef::Body(id) => bodies.get(id).map_or(Vector::ZERO, |body| body.velocity()),
        }
    }
}

impl From<Vector> for AnchorRef {
    fn from(point: Vector) -> Self {
        AnchorRef::Fixed(point)
    }
}

impl From<[f64; 3]> for AnchorRef {
    fn from(point: [f64; 3]) -> Self {
        AnchorRef::Fixed(point.into())
    }
}

impl From<BodyId> for AnchorRef {
    fn from(id: BodyId) -> Self {
        AnchorRef::Body(id)
    }
}

/// An anchor after looking up any body behind it
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct ResolvedAnchor {
    pub position: Vector,
    pub velocity: Vector,
    /// The body behind the anchor and its mass; `None` for a fixed point
    pub body: Option<(BodyId, f64)>,
}

/// Resolve an optional anchor, falling back to the source body
pub(crate) fn resolve_anchor(
    anchor: Option<&AnchorRef>,
    source: Option<BodyId>,
    bodies: &BodySet,
) -> Option<ResolvedAnchor> {
    let id = match (anchor.copied(), source) {
        (Some(AnchorRef::Fixed(point)), _) => {
            return Some(ResolvedAnchor {
                position: point,
                velocity: Vector::ZERO,
                body: None,
            })
        }
        (Some(AnchorRef::Body(id)), _) | (None, Some(id)) => id,
        (None, None) => return None,
    };
    bodies.get(id).map(|body| ResolvedAnchor {
        position: body.position(),
        velocity: body.velocity(),
        body: Some((id, body.mass())),
    })
}

/// Fail unless an agent named `name` has something to anchor to
pub(crate) fn require_anchor(
    name: &str,
    anchor: Option<&AnchorRef>,
    source: Option<BodyId>,
) -> Result<()> {
    if anchor.is_none() && source.is_none() {
        return Err(PhysicsError::invalid(format!(
            "{} needs an anchor or a source body",
            name
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::Particle;

    #[test]
    fn test_resolve() {
        let mut bodies = BodySet::new();
        let id = bodies.insert(Particle::new(2.0).unwrap().with_position(Vector::new(1.0, 2.0, 3.0)));

        assert_eq!(
            AnchorRef::from([4.0, 5.0, 6.0]).resolve(&bodies),
            Some(Vector::new(4.0, 5.0, 6.0))
        );
        assert_eq!(AnchorRef::from(id).resolve(&bodies), Some(Vector::new(1.0, 2.0, 3.0)));

        bodies.remove(id);
        assert_eq!(AnchorRef::from(id).resolve(&bodies), None);
    }

    #[test]
    fn test_source_fallback() {
        let mut bodies = BodySet::new();
        let id = bodies.insert(Particle::new(2.0).unwrap().with_position(Vector::X));

        let resolved = resolve_anchor(None, Some(id), &bodies).unwrap();
        assert_eq!(resolved.position, Vector::X);
        assert_eq!(resolved.body, Some((id, 2.0)));
        assert_eq!(resolve_anchor(None, None, &bodies), None);

        let fixed = AnchorRef::Fixed(Vector::Y);
        let resolved = resolve_anchor(Some(&fixed), Some(id), &bodies).unwrap();
        assert_eq!(resolved.position, Vector::Y);
        assert_eq!(resolved.body, None);
    }

    #[test]
    fn test_require_anchor() {
        assert!(require_anchor("Spring", None, None).is_err());
        assert!(require_anchor("Spring", Some(&AnchorRef::Fixed(Vector::ZERO)), None).is_ok());
        assert!(require_anchor("Spring", None, Some(BodyId::new(0, 0))).is_ok());
    }
}
