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
//! Bounding boxes made of walls
//!
//! The box has a `size` and is placed by `origin`, the fraction of the box
//! that lies on the negative side of each axis. An origin of `[0.5, 0.5,
//! 0.5]` centers the box on the world origin; `[0, 0, 0]` puts its corner
//! there.

use super::wall::resolve_wall;
use super::{Constraint, ContactEvent, ContactOptions, ContactPhase};
use crate::bodies::{BodyId, BodySet};
use crate::events::EventEmitter;
use crate::math::Vector;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// One face of the box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Side {
    /// `-x` face
    Left,
    /// `+x` face
    Right,
    /// `-y` face
    Top,
    /// `+y` face
    Bottom,
    /// `-z` face
    Front,
    /// `+z` face
    Back,
}

impl Side {
    /// The four faces of a flat box
    pub const TWO_DIMENSIONAL: [Side; 4] = [Side::Left, Side::Right, Side::Top, Side::Bottom];

    /// All six faces
    pub const THREE_DIMENSIONAL: [Side; 6] = [
        Side::Left,
        Side::Right,
        Side::Top,
        Side::Bottom,
        Side::Front,
        Side::Back,
    ];

    /// Inward normal of the face
    pub fn normal(&self) -> Vector {
        match self {
            Side::Left => Vector::new(1.0, 0.0, 0.0),
            Side::Right => Vector::new(-1.0, 0.0, 0.0),
            Side::Top => Vector::new(0.0, 1.0, 0.0),
            Side::Bottom => Vector::new(0.0, -1.0, 0.0),
            Side::Front => Vector::new(0.0, 0.0, 1.0),
            Side::Back => Vector::new(0.0, 0.0, -1.0),
        }
    }

    /// Plane distance for a box of `size` placed by `origin`
    pub fn distance(&self, size: &Vector, origin: &Vector) -> f64 {
        match self {
            Side::Left => size.x * origin.x,
            Side::Right => size.x * (1.0 - origin.x),
            Side::Top => size.y * origin.y,
            Side::Bottom => size.y * (1.0 - origin.y),
            Side::Front => size.z * origin.z,
            Side::Back => size.z * (1.0 - origin.z),
        }
    }
}

/// Walls on some or all faces of a box
///
/// # Examples
///
/// ```
/// use animation_physics::constraints::{Side, Walls};
/// use animation_physics::math::Vector;
///
/// let mut walls = Walls::two_dimensional(Vector::new(800.0, 600.0, 0.0));
/// assert_eq!(walls.distance(Side::Right), Some(400.0));
///
/// walls.set_origin(Vector::new(0.0, 0.0, 0.0));
/// assert_eq!(walls.distance(Side::Right), Some(800.0));
/// ```
#[derive(Debug)]
pub struct Walls {
    sides: Vec<(Side, f64)>,
    size: Vector,
    origin: Vector,
    /// Bounce tuning shared by every face
    pub contact: ContactOptions,
    events: EventEmitter<ContactPhase, ContactEvent>,
}

impl Walls {
    /// Walls on the chosen faces of a centered box
    pub fn new(sides: &[Side], size: Vector) -> Self {
        let mut walls = Walls {
            sides: sides.iter().map(|&side| (side, 0.0)).collect(),
            size,
            origin: Vector::new(0.5, 0.5, 0.5),
            contact: ContactOptions::default(),
            events: EventEmitter::new(),
        };
        walls.recompute();
        walls
    }

    /// Left, right, top and bottom
    pub fn two_dimensional(size: Vector) -> Self {
        Walls::new(&Side::TWO_DIMENSIONAL, size)
    }

    /// All six faces
    pub fn three_dimensional(size: Vector) -> Self {
        Walls::new(&Side::THREE_DIMENSIONAL, size)
    }

    /// Replace the contact tuning
    pub fn with_contact(mut self, contact: ContactOptions) -> Self {
        self.contact = contact;
        self
    }

    /// Register a contact handler; events carry the face that was hit
    pub fn on(&mut self, phase: ContactPhase, handler: impl FnMut(&ContactEvent) + 'static) {
        self.events.on(phase, handler);
    }

    /// Resize the box, moving every wall
    pub fn set_size(&mut self, size: Vector) {
        self.size = size;
        self.recompute();
    }

    /// Re-place the box, moving every wall
    pub fn set_origin(&mut self, origin: Vector) {
        self.origin = origin;
        self.recompute();
    }

    /// Box size
    pub fn size(&self) -> Vector {
        self.size
    }

    /// Box origin
    pub fn origin(&self) -> Vector {
        self.origin
    }

    /// Current plane distance of a face, if it has a wall
    pub fn distance(&self, side: Side) -> Option<f64> {
        self.sides.iter().find(|(s, _)| *s == side).map(|&(_, d)| d)
    }

    /// Faces that have walls
    pub fn sides(&self) -> impl Iterator<Item = Side> + '_ {
        self.sides.iter().map(|&(side, _)| side)
    }

    fn recompute(&mut self) {
        for (side, distance) in self.sides.iter_mut() {
            *distance = side.distance(&self.size, &self.origin);
        }
    }
}

impl Constraint for Walls {
    fn name(&self) -> &str {
        "Walls"
    }

    fn apply_constraint(
        &mut self,
        targets: &[BodyId],
        _source: Option<BodyId>,
        dt: f64,
        bodies: &mut BodySet,
    ) {
        for &(side, distance) in &self.sides {
            resolve_wall(
                &side.normal(),
                distance,
                &self.contact,
                Some(side),
                targets,
                dt,
                bodies,
                &mut self.events,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bodies::Particle;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_distances_follow_origin() {
        let size = Vector::new(100.0, 50.0, 20.0);
        let origin = Vector::new(0.25, 0.0, 0.5);
        assert_eq!(Side::Left.distance(&size, &origin), 25.0);
        assert_eq!(Side::Right.distance(&size, &origin), 75.0);
        assert_eq!(Side::Top.distance(&size, &origin), 0.0);
        assert_eq!(Side::Bottom.distance(&size, &origin), 50.0);
        assert_eq!(Side::Front.distance(&size, &origin), 10.0);
        assert_eq!(Side::Back.distance(&size, &origin), 10.0);
    }

    #[test]
    fn test_presets() {
        let flat = Walls::two_dimensional(Vector::new(10.0, 10.0, 0.0));
        assert_eq!(flat.sides().count(), 4);
        assert_eq!(flat.distance(Side::Front), None);
        assert_eq!(Walls::three_dimensional(Vector::ZERO).sides().count(), 6);
    }

    #[test]
    fn test_set_size_moves_walls() {
        let mut walls = Walls::two_dimensional(Vector::new(100.0, 100.0, 0.0));
        walls.set_size(Vector::new(200.0, 100.0, 0.0));
        assert_eq!(walls.distance(Side::Left), Some(100.0));
        assert_eq!(walls.distance(Side::Top), Some(50.0));
    }

    #[test]
    fn test_contact_reports_side() {
        let hits = Rc::new(RefCell::new(Vec::new()));
        let mut walls = Walls::two_dimensional(Vector::new(100.0, 100.0, 0.0));
        let log = Rc::clone(&hits);
        walls.on(ContactPhase::Collision, move |event| log.borrow_mut().push(event.side));

        let mut bodies = BodySet::new();
        let id = bodies.insert(
            Particle::new(1.0)
                .unwrap()
                .with_position(Vector::new(0.0, 51.0, 0.0))
                .with_velocity(Vector::new(0.0, 2.0, 0.0)),
        );
        walls.apply_constraint(&[id], None, 16.0, &mut bodies);

        assert_eq!(*hits.borrow(), vec![Some(Side::Bottom)]);
        let target = bodies.get(id).unwrap();
        assert_eq!(target.position().y, 50.0);
        assert!(target.velocity().y < 0.0);
    }
}
