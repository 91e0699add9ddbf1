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
//! Point masses
//!
//! A particle carries position, velocity and a force accumulator. Forces
//! add into the accumulator during a step and the integrator consumes and
//! clears it. Mass is always positive and finite; there is no
//! infinite-mass particle.

use crate::error::{validate_mass, Result};
use crate::math::{transform, Transform, Vector};

/// A point mass
///
/// # Examples
///
/// ```
/// use animation_physics::bodies::Particle;
/// use animation_physics::math::Vector;
///
/// let mut particle = Particle::new(2.0).unwrap().with_velocity(Vector::new(3.0, 0.0, 0.0));
/// assert_eq!(particle.energy(), 9.0);
///
/// particle.apply_impulse(Vector::new(-2.0, 0.0, 0.0));
/// assert_eq!(particle.velocity(), Vector::new(2.0, 0.0, 0.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub(crate) position: Vector,
    pub(crate) velocity: Vector,
    pub(crate) force: Vector,
    mass: f64,
    inverse_mass: f64,
    sleeping: bool,
}

impl Particle {
    /// Create a resting particle at the origin
    ///
    /// # Errors
    ///
    /// `InvalidPhysicsConfiguration` if `mass` is not positive and finite.
    pub fn new(mass: f64) -> Result<Self> {
        let mass = validate_mass(mass)?;
        Ok(Particle {
            position: Vector::ZERO,
            velocity: Vector::ZERO,
            force: Vector::ZERO,
            mass,
            inverse_mass: 1.0 / mass,
            sleeping: true,
        })
    }

    /// Builder-style initial position
    pub fn with_position(mut self, position: Vector) -> Self {
        self.position = position;
        self
    }

    /// Builder-style initial velocity
    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.velocity = velocity;
        self
    }

    /// Current position
    pub fn position(&self) -> Vector {
        self.position
    }

    /// Current velocity
    pub fn velocity(&self) -> Vector {
        self.velocity
    }

    /// Force accumulated so far this step
    pub fn force(&self) -> Vector {
        self.force
    }

    /// Mass
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// `1 / mass`
    pub fn inverse_mass(&self) -> f64 {
        self.inverse_mass
    }

    /// Linear momentum `m·v`
    pub fn momentum(&self) -> Vector {
        self.velocity.mult(self.mass)
    }

    /// Whether the particle is asleep
    pub fn is_sleeping(&self) -> bool {
        self.sleeping
    }

    /// Clear the sleep flag
    pub fn wake(&mut self) {
        self.sleeping = false;
    }

    /// Set the sleep flag
    pub fn sleep(&mut self) {
        self.sleeping = true;
    }

    /// Move the particle
    pub fn set_position(&mut self, position: Vector) {
        self.position = position;
        self.wake();
    }

    /// Replace the velocity
    pub fn set_velocity(&mut self, velocity: Vector) {
        self.velocity = velocity;
        self.wake();
    }

    /// Change the mass
    ///
    /// # Errors
    ///
    /// `InvalidPhysicsConfiguration` if `mass` is not positive and finite;
    /// the particle is left unchanged.
    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        self.mass = validate_mass(mass)?;
        self.inverse_mass = 1.0 / mass;
        Ok(())
    }

    /// Add a force to the accumulator
    ///
    /// The zero vector is ignored and does not wake the particle.
    pub fn apply_force(&mut self, force: Vector) {
        if force.is_zero() {
            return;
        }
        self.force += force;
        self.wake();
    }

    /// Change velocity by `impulse / mass`
    pub fn apply_impulse(&mut self, impulse: Vector) {
        if impulse.is_zero() {
            return;
        }
        self.velocity += impulse.mult(self.inverse_mass);
        self.wake();
    }

    /// Kinetic energy `0.5·m·|v|²`
    pub fn energy(&self) -> f64 {
        0.5 * self.mass * self.velocity.norm_squared()
    }

    /// Put the particle back at `position` with `velocity` and no pending force
    pub fn reset(&mut self, position: Vector, velocity: Vector) {
        self.position = position;
        self.velocity = velocity;
        self.force = Vector::ZERO;
        self.wake();
    }

    /// Translation transform at the current position
    pub fn transform(&self) -> Transform {
        transform::translate(&self.position)
    }

    /// Whether position and velocity are finite
    pub fn is_valid(&self) -> bool {
        self.position.is_valid() && self.velocity.is_valid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PhysicsError;

    #[test]
    fn test_new_particle_sleeps_at_origin() {
        let particle = Particle::new(1.0).unwrap();
        assert!(particle.is_sleeping());
        assert_eq!(particle.position(), Vector::ZERO);
        assert_eq!(particle.inverse_mass(), 1.0);
    }

    #[test]
    fn test_invalid_mass_rejected() {
        assert!(matches!(
            Particle::new(0.0),
            Err(PhysicsError::InvalidPhysicsConfiguration(_))
        ));
        assert!(Particle::new(-2.0).is_err());
        assert!(Particle::new(f64::NAN).is_err());

        let mut particle = Particle::new(2.0).unwrap();
        assert!(particle.set_mass(0.0).is_err());
        assert_eq!(particle.mass(), 2.0);
        assert_eq!(particle.inverse_mass(), 0.5);
    }

    #[test]
    fn test_zero_force_does_not_wake() {
        let mut particle = Particle::new(1.0).unwrap();
        particle.apply_force(Vector::ZERO);
        assert!(particle.is_sleeping());

        particle.apply_force(Vector::new(1.0, 0.0, 0.0));
        assert!(!particle.is_sleeping());
        assert_eq!(particle.force(), Vector::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn test_forces_accumulate() {
        let mut particle = Particle::new(1.0).unwrap();
        particle.apply_force(Vector::new(1.0, 2.0, 0.0));
        particle.apply_force(Vector::new(0.5, -2.0, 3.0));
        assert_eq!(particle.force(), Vector::new(1.5, 0.0, 3.0));
    }

    #[test]
    fn test_impulse_scales_by_inverse_mass() {
        let mut particle = Particle::new(4.0).unwrap();
        particle.apply_impulse(Vector::ZERO);
        assert!(particle.is_sleeping());

        particle.apply_impulse(Vector::new(8.0, 0.0, 0.0));
        assert_eq!(particle.velocity(), Vector::new(2.0, 0.0, 0.0));
        assert!(!particle.is_sleeping());
    }

    #[test]
    fn test_energy_and_momentum() {
        let particle = Particle::new(2.0)
            .unwrap()
            .with_velocity(Vector::new(0.0, 3.0, 4.0));
        assert_eq!(particle.energy(), 25.0);
        assert_eq!(particle.momentum(), Vector::new(0.0, 6.0, 8.0));
    }

    #[test]
    fn test_transform_is_translation() {
        let particle = Particle::new(1.0)
            .unwrap()
            .with_position(Vector::new(5.0, 6.0, 7.0));
        let t = particle.transform();
        assert_eq!(&t[12..15], &[5.0, 6.0, 7.0]);
        assert_eq!(t[0], 1.0);
    }
}
