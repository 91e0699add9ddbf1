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
//! Simulated objects: particles, rigid bodies and their storage
//!
//! The engine stores everything as a [`Simulated`], a closed set of two
//! variants. Code that only needs the shared translational view goes
//! through the [`Integrable`] trait; code that needs rotation matches on
//! the variant.

mod anchor;
mod body;
mod id;
mod particle;
mod set;
mod shape;

pub use anchor::AnchorRef;
pub(crate) use anchor::{require_anchor, resolve_anchor, ResolvedAnchor};
pub use body::Body;
pub use id::BodyId;
pub use particle::Particle;
pub use set::BodySet;
pub use shape::Shape;

use crate::error::Result;
use crate::math::{Quaternion, Transform, Vector};

/// Read access shared by particles and bodies
pub trait Integrable {
    /// Translational state
    fn particle(&self) -> &Particle;

    /// Total kinetic energy
    fn energy(&self) -> f64;

    /// Affine transform handed to the rendering layer
    fn transform(&self) -> Transform;
}

impl Integrable for Particle {
    fn particle(&self) -> &Particle {
        self
    }

    fn energy(&self) -> f64 {
        Particle::energy(self)
    }

    fn transform(&self) -> Transform {
        Particle::transform(self)
    }
}

impl Integrable for Body {
    fn particle(&self) -> &Particle {
        Body::particle(self)
    }

    fn energy(&self) -> f64 {
        Body::energy(self)
    }

    fn transform(&self) -> Transform {
        Body::transform(self)
    }
}

/// Anything the engine can own and integrate
#[derive(Debug, Clone, PartialEq)]
pub enum Simulated {
    /// A point mass
    Particle(Particle),
    /// A rigid body
    Body(Body),
}

impl Simulated {
    /// Dynamic view through the shared trait
    pub fn as_integrable(&self) -> &dyn Integrable {
        match self {
            Simulated::Particle(p) => p,
            Simulated::Body(b) => b,
        }
    }

    /// Translational state
    pub fn particle(&self) -> &Particle {
        self.as_integrable().particle()
    }

    pub(crate) fn particle_mut(&mut self) -> &mut Particle {
        match self {
            Simulated::Particle(p) => p,
            Simulated::Body(b) => b.particle_mut(),
        }
    }

    /// The body, if this is one
    pub fn as_body(&self) -> Option<&Body> {
        match self {
            Simulated::Body(b) => Some(b),
            Simulated::Particle(_) => None,
        }
    }

    /// The body, mutably, if this is one
    pub fn as_body_mut(&mut self) -> Option<&mut Body> {
        match self {
            Simulated::Body(b) => Some(b),
            Simulated::Particle(_) => None,
        }
    }

    /// Whether this is a rigid body
    pub fn is_body(&self) -> bool {
        matches!(self, Simulated::Body(_))
    }

    /// Position
    pub fn position(&self) -> Vector {
        self.particle().position()
    }

    /// Velocity
    pub fn velocity(&self) -> Vector {
        self.particle().velocity()
    }

    /// Mass
    pub fn mass(&self) -> f64 {
        self.particle().mass()
    }

    /// `1 / mass`
    pub fn inverse_mass(&self) -> f64 {
        self.particle().inverse_mass()
    }

    /// Contact radius; zero for particles
    pub fn radius(&self) -> f64 {
        self.as_body().map_or(0.0, Body::radius)
    }

    /// Orientation; identity for particles
    pub fn orientation(&self) -> Quaternion {
        self.as_body().map_or(Quaternion::IDENTITY, Body::orientation)
    }

    /// Angular velocity; zero for particles
    pub fn angular_velocity(&self) -> Vector {
        self.as_body().map_or(Vector::ZERO, Body::angular_velocity)
    }

    /// Whether asleep
    pub fn is_sleeping(&self) -> bool {
        self.particle().is_sleeping()
    }

    /// Total kinetic energy
    pub fn energy(&self) -> f64 {
        self.as_integrable().energy()
    }

    /// Transform handed to the rendering layer
    pub fn transform(&self) -> Transform {
        self.as_integrable().transform()
    }

    /// Move the object
    pub fn set_position(&mut self, position: Vector) {
        self.particle_mut().set_position(position);
    }

    /// Replace the velocity
    pub fn set_velocity(&mut self, velocity: Vector) {
        self.particle_mut().set_velocity(velocity);
    }

    /// Change the mass; bodies also recompute inertia
    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        match self {
            Simulated::Particle(p) => p.set_mass(mass),
            Simulated::Body(b) => b.set_mass(mass),
        }
    }

    /// Add a force through the center of mass
    pub fn apply_force(&mut self, force: Vector) {
        self.particle_mut().apply_force(force);
    }

    /// Add a torque; particles ignore it
    pub fn apply_torque(&mut self, torque: Vector) {
        if let Simulated::Body(b) = self {
            b.apply_torque(torque);
        }
    }

    /// Change velocity by `impulse / mass`
    pub fn apply_impulse(&mut self, impulse: Vector) {
        self.particle_mut().apply_impulse(impulse);
    }

    /// Clear the sleep flag
    pub fn wake(&mut self) {
        self.particle_mut().wake();
    }

    /// Set the sleep flag
    pub fn sleep(&mut self) {
        self.particle_mut().sleep();
    }
}

impl From<Particle> for Simulated {
    fn from(particle: Particle) -> Self {
        Simulated::Particle(particle)
    }
}

impl From<Body> for Simulated {
    fn from(body: Body) -> Self {
        Simulated::Body(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_through_integrable() {
        let particle: Simulated = Particle::new(2.0)
            .unwrap()
            .with_velocity(Vector::new(1.0, 0.0, 0.0))
            .into();
        let body: Simulated = Body::circle(2.0, 1.0)
            .unwrap()
            .with_velocity(Vector::new(1.0, 0.0, 0.0))
            .with_angular_velocity(Vector::new(0.0, 0.0, 1.0))
            .into();

        assert_eq!(particle.energy(), 1.0);
        assert_eq!(body.energy(), 1.5);
        assert_eq!(particle.radius(), 0.0);
        assert_eq!(body.radius(), 1.0);
    }

    #[test]
    fn test_particle_ignores_torque() {
        let mut particle: Simulated = Particle::new(1.0).unwrap().into();
        particle.apply_torque(Vector::new(0.0, 0.0, 5.0));
        assert!(particle.is_sleeping());
        assert_eq!(particle.angular_velocity(), Vector::ZERO);
    }
}
