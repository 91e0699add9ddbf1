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
//! Numerical integration
//!
//! An integrator advances particles and bodies by one timestep. The engine
//! calls the four phases separately because constraints run between the
//! velocity and position updates:
//!
//! ```text
//! integrate_velocity          v ← v + dt·f/m
//! integrate_angular_momentum  L ← L + dt·τ
//!   (constraints)
//! integrate_orientation       q ← q + dt/2·q·ω
//! integrate_position          p ← p + dt·v
//! ```
//!
//! # Timestep Guidelines
//!
//! Times are in milliseconds, matching the frame clock that drives the
//! engine. A frame at 60 FPS is about 16.7 ms; the engine never integrates
//! more than `MAX_TIME_STEP` at once.

use crate::bodies::{Body, Particle};
use crate::error::{PhysicsError, Result};

mod symplectic_euler;

pub use symplectic_euler::SymplecticEuler;

/// A scheme for advancing particle and body state by `dt`
pub trait Integrator {
    /// Get the name of this integrator
    fn name(&self) -> &str;

    /// Update velocity from the accumulated force and clear the force
    fn integrate_velocity(&self, particle: &mut Particle, dt: f64);

    /// Update position from velocity
    fn integrate_position(&self, particle: &mut Particle, dt: f64);

    /// Update angular momentum from the accumulated torque and clear the torque
    fn integrate_angular_momentum(&self, body: &mut Body, dt: f64);

    /// Update orientation from angular velocity
    fn integrate_orientation(&self, body: &mut Body, dt: f64);

    /// Validate a timestep before using it
    ///
    /// Extremely small timesteps lose precision; non-finite or negative ones
    /// are never usable.
    fn validate_timestep(&self, dt: f64) -> Result<()> {
        if dt < 0.0 || !dt.is_finite() {
            return Err(PhysicsError::invalid(format!(
                "invalid timestep: {}, must be non-negative and finite",
                dt
            )));
        }
        if dt > 0.0 && dt < 1e-9 {
            return Err(PhysicsError::invalid(format!(
                "timestep {} is too small to integrate with f64 precision",
                dt
            )));
        }
        Ok(())
    }
}
