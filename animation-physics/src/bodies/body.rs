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
//! Rigid bodies
//!
//! A `Body` is a [`Particle`] plus rotational state. Angular momentum is
//! the integrated quantity; angular velocity is always derived from it as
//! `ω = I⁻¹·L`. The inertia tensor is recomputed inside every setter that
//! touches mass or shape, so it can never go stale.

use super::{Particle, Shape};
use crate::error::{validate_mass, PhysicsError, Result};
use crate::math::{transform, Matrix3, Quaternion, Transform, Vector};

/// A rigid body with a shape and an orientation
///
/// # Examples
///
/// ```
/// use animation_physics::bodies::Body;
///
/// let mut disc = Body::circle(2.0, 10.0).unwrap();
/// assert_eq!(disc.inertia().get(2, 2), 100.0);
///
/// disc.set_radius(20.0).unwrap();
/// assert_eq!(disc.inertia().get(2, 2), 400.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    particle: Particle,
    shape: Shape,
    pub(crate) orientation: Quaternion,
    angular_velocity: Vector,
    pub(crate) angular_momentum: Vector,
    pub(crate) torque: Vector,
    inertia: Matrix3,
    inverse_inertia: Matrix3,
}

/// Inertia tensor and its inverse for a mass and shape
fn inertia_pair(mass: f64, shape: &Shape) -> Result<(Matrix3, Matrix3)> {
    shape.validate()?;
    let inertia = shape.inertia(mass);
    let inverse = inertia.inverse().ok_or_else(|| {
        PhysicsError::invalid(format!("inertia tensor of {:?} is not invertible", shape))
    })?;
    Ok((inertia, inverse))
}

impl Body {
    /// Create a resting body at the origin
    ///
    /// # Errors
    ///
    /// `InvalidPhysicsConfiguration` for a non-positive mass or a
    /// zero-size shape.
    pub fn new(mass: f64, shape: Shape) -> Result<Self> {
        let particle = Particle::new(mass)?;
        let (inertia, inverse_inertia) = inertia_pair(mass, &shape)?;
        Ok(Body {
            particle,
            shape,
            orientation: Quaternion::IDENTITY,
            angular_velocity: Vector::ZERO,
            angular_momentum: Vector::ZERO,
            torque: Vector::ZERO,
            inertia,
            inverse_inertia,
        })
    }

    /// A disc of `radius`
    pub fn circle(mass: f64, radius: f64) -> Result<Self> {
        Body::new(mass, Shape::Circle { radius })
    }

    /// A `[width, height]` rectangle
    pub fn rectangle(mass: f64, size: [f64; 2]) -> Result<Self> {
        Body::new(mass, Shape::Rectangle { size })
    }

    /// Builder-style initial position
    pub fn with_position(mut self, position: Vector) -> Self {
        self.particle = self.particle.with_position(position);
        self
    }

    /// Builder-style initial velocity
    pub fn with_velocity(mut self, velocity: Vector) -> Self {
        self.particle = self.particle.with_velocity(velocity);
        self
    }

    /// Builder-style initial orientation
    pub fn with_orientation(mut self, orientation: Quaternion) -> Self {
        self.orientation = orientation.normalize();
        self
    }

    /// Builder-style initial angular velocity
    pub fn with_angular_velocity(mut self, angular_velocity: Vector) -> Self {
        self.angular_momentum = self.inertia.vector_multiply(&angular_velocity);
        self.angular_velocity = angular_velocity;
        self
    }

    /// The translational part of the body
    pub fn particle(&self) -> &Particle {
        &self.particle
    }

    pub(crate) fn particle_mut(&mut self) -> &mut Particle {
        &mut self.particle
    }

    /// Shape
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Position of the center of mass
    pub fn position(&self) -> Vector {
        self.particle.position()
    }

    /// Velocity of the center of mass
    pub fn velocity(&self) -> Vector {
        self.particle.velocity()
    }

    /// Mass
    pub fn mass(&self) -> f64 {
        self.particle.mass()
    }

    /// Orientation
    pub fn orientation(&self) -> Quaternion {
        self.orientation
    }

    /// Angular velocity
    pub fn angular_velocity(&self) -> Vector {
        self.angular_velocity
    }

    /// Angular momentum
    pub fn angular_momentum(&self) -> Vector {
        self.angular_momentum
    }

    /// Torque accumulated so far this step
    pub fn torque(&self) -> Vector {
        self.torque
    }

    /// Inertia tensor
    pub fn inertia(&self) -> Matrix3 {
        self.inertia
    }

    /// Inverse inertia tensor
    pub fn inverse_inertia(&self) -> Matrix3 {
        self.inverse_inertia
    }

    /// Radius used by contact constraints
    pub fn radius(&self) -> f64 {
        self.shape.radius()
    }

    /// Move the body
    pub fn set_position(&mut self, position: Vector) {
        self.particle.set_position(position);
    }

    /// Replace the linear velocity
    pub fn set_velocity(&mut self, velocity: Vector) {
        self.particle.set_velocity(velocity);
    }

    /// Replace the orientation (normalized on the way in)
    pub fn set_orientation(&mut self, orientation: Quaternion) {
        self.orientation = orientation.normalize();
        self.particle.wake();
    }

    /// Replace the angular velocity, storing the matching momentum `I·ω`
    pub fn set_angular_velocity(&mut self, angular_velocity: Vector) {
        self.angular_momentum = self.inertia.vector_multiply(&angular_velocity);
        self.angular_velocity = angular_velocity;
        self.particle.wake();
    }

    /// Replace the angular momentum
    pub fn set_angular_momentum(&mut self, angular_momentum: Vector) {
        self.angular_momentum = angular_momentum;
        self.update_angular_velocity();
        self.particle.wake();
    }

    /// Change the mass and recompute the inertia tensor
    ///
    /// # Errors
    ///
    /// `InvalidPhysicsConfiguration` if `mass` is not positive and finite.
    pub fn set_mass(&mut self, mass: f64) -> Result<()> {
        let (inertia, inverse_inertia) = inertia_pair(validate_mass(mass)?, &self.shape)?;
        self.particle.set_mass(mass)?;
        self.inertia = inertia;
        self.inverse_inertia = inverse_inertia;
        self.update_angular_velocity();
        Ok(())
    }

    /// Replace the shape and recompute the inertia tensor
    pub fn set_shape(&mut self, shape: Shape) -> Result<()> {
        let (inertia, inverse_inertia) = inertia_pair(self.mass(), &shape)?;
        self.shape = shape;
        self.inertia = inertia;
        self.inverse_inertia = inverse_inertia;
        self.update_angular_velocity();
        Ok(())
    }

    /// Resize a circle
    ///
    /// # Errors
    ///
    /// `InvalidPhysicsConfiguration` if the body isn't a circle or the
    /// radius is not positive.
    pub fn set_radius(&mut self, radius: f64) -> Result<()> {
        match self.shape {
            Shape::Circle { .. } => self.set_shape(Shape::Circle { radius }),
            other => Err(PhysicsError::invalid(format!(
                "set_radius needs a circle, body is {:?}",
                other
            ))),
        }
    }

    /// Resize a rectangle
    ///
    /// # Errors
    ///
    /// `InvalidPhysicsConfiguration` if the body isn't a rectangle or the
    /// size is degenerate.
    pub fn set_size(&mut self, size: [f64; 2]) -> Result<()> {
        match self.shape {
            Shape::Rectangle { .. } => self.set_shape(Shape::Rectangle { size }),
            other => Err(PhysicsError::invalid(format!(
                "set_size needs a rectangle, body is {:?}",
                other
            ))),
        }
    }

    /// Add a force through the center of mass
    pub fn apply_force(&mut self, force: Vector) {
        self.particle.apply_force(force);
    }

    /// Add a force acting at `location`, an offset from the center of mass
    ///
    /// Contributes the torque `location × force` as well.
    pub fn apply_force_at(&mut self, force: Vector, location: Vector) {
        self.particle.apply_force(force);
        self.apply_torque(location.cross(&force));
    }

    /// Add a torque to the accumulator
    pub fn apply_torque(&mut self, torque: Vector) {
        if torque.is_zero() {
            return;
        }
        self.torque += torque;
        self.particle.wake();
    }

    /// Change linear velocity by `impulse / mass`
    pub fn apply_impulse(&mut self, impulse: Vector) {
        self.particle.apply_impulse(impulse);
    }

    /// Re-derive `ω = I⁻¹·L`
    pub fn update_angular_velocity(&mut self) {
        self.angular_velocity = self.inverse_inertia.vector_multiply(&self.angular_momentum);
    }

    /// Kinetic energy, translational plus `0.5·(I·ω)·ω`
    pub fn energy(&self) -> f64 {
        let rotational = 0.5 * self.inertia.vector_multiply(&self.angular_velocity).dot(&self.angular_velocity);
        self.particle.energy() + rotational
    }

    /// Put the body back at rest with identity orientation
    pub fn reset(&mut self, position: Vector, velocity: Vector) {
        self.particle.reset(position, velocity);
        self.reset_orientation(Quaternion::IDENTITY, Vector::ZERO);
    }

    /// Replace orientation and angular velocity, dropping pending torque
    pub fn reset_orientation(&mut self, orientation: Quaternion, angular_velocity: Vector) {
        self.torque = Vector::ZERO;
        self.set_orientation(orientation);
        self.set_angular_velocity(angular_velocity);
    }

    /// Rotation by the orientation, then translation to the position
    pub fn transform(&self) -> Transform {
        transform::from_rotation_translation(&self.orientation.to_matrix3(), &self.position())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_inertia_matches_formula() {
        let body = Body::circle(4.0, 3.0).unwrap();
        let expected = 0.5 * 4.0 * 9.0;
        assert_eq!(body.inertia().get(2, 2), expected);
        assert!((body.inverse_inertia().get(2, 2) - 1.0 / expected).abs() < 1e-15);
    }

    #[test]
    fn test_set_radius_recomputes_inertia() {
        let mut body = Body::circle(2.0, 1.0).unwrap();
        body.set_radius(3.0).unwrap();
        assert_eq!(body.inertia().get(2, 2), 0.5 * 2.0 * 9.0);
        assert!((body.inverse_inertia().get(2, 2) - 1.0 / 9.0).abs() < 1e-15);
    }

    #[test]
    fn test_set_mass_recomputes_inertia() {
        let mut body = Body::rectangle(1.0, [6.0, 6.0]).unwrap();
        body.set_mass(2.0).unwrap();
        assert_eq!(body.inertia().get(0, 0), 6.0);
        assert_eq!(body.particle().inverse_mass(), 0.5);
    }

    #[test]
    fn test_degenerate_construction_fails() {
        assert!(Body::circle(1.0, 0.0).is_err());
        assert!(Body::rectangle(1.0, [0.0, 2.0]).is_err());
        assert!(Body::circle(0.0, 1.0).is_err());

        let mut body = Body::circle(1.0, 1.0).unwrap();
        assert!(body.set_radius(0.0).is_err());
        assert_eq!(body.shape(), Shape::Circle { radius: 1.0 });
        assert!(body.set_size([1.0, 1.0]).is_err());
    }

    #[test]
    fn test_angular_velocity_derived_from_momentum() {
        let mut body = Body::circle(2.0, 1.0).unwrap();
        body.set_angular_momentum(Vector::new(0.0, 0.0, 3.0));
        // I_zz = 0.5 * 2 * 1 = 1
        assert_eq!(body.angular_velocity(), Vector::new(0.0, 0.0, 3.0));

        body.set_radius(2.0).unwrap();
        // I_zz = 4, same momentum spins slower
        assert_eq!(body.angular_velocity(), Vector::new(0.0, 0.0, 0.75));
    }

    #[test]
    fn test_force_at_offset_produces_torque() {
        let mut body = Body::circle(1.0, 1.0).unwrap();
        body.apply_force_at(Vector::new(0.0, 2.0, 0.0), Vector::new(1.0, 0.0, 0.0));
        assert_eq!(body.particle().force(), Vector::new(0.0, 2.0, 0.0));
        assert_eq!(body.torque(), Vector::new(0.0, 0.0, 2.0));
        assert!(!body.particle().is_sleeping());
    }

    #[test]
    fn test_energy_includes_rotation() {
        let body = Body::circle(2.0, 1.0)
            .unwrap()
            .with_velocity(Vector::new(1.0, 0.0, 0.0))
            .with_angular_velocity(Vector::new(0.0, 0.0, 2.0));
        // 0.5*2*1 + 0.5*(1*2)*2
        assert!((body.energy() - 3.0).abs() < 1e-12);
    }
}
