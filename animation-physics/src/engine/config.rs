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
//! Engine tuning

use crate::error::{PhysicsError, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Smallest frame time (ms) worth integrating; shorter frames are skipped
pub const MIN_TIME_STEP: f64 = 1000.0 / 120.0;

/// Largest frame time (ms) integrated at once; longer frames are clamped
pub const MAX_TIME_STEP: f64 = 17.0;

/// Configuration for a [`PhysicsEngine`](super::PhysicsEngine)
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Constraint iterations per frame
    pub constraint_steps: usize,
    /// Total energy below which the engine falls asleep
    pub sleep_tolerance: f64,
    /// Cap on linear speed after each velocity update
    pub velocity_cap: Option<f64>,
    /// Cap on angular speed after each momentum update
    pub angular_velocity_cap: Option<f64>,
    /// Frames shorter than this (ms) are skipped
    pub min_time_step: f64,
    /// Frames longer than this (ms) are clamped
    pub max_time_step: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            constraint_steps: 1,
            sleep_tolerance: 1e-7,
            velocity_cap: None,
            angular_velocity_cap: None,
            min_time_step: MIN_TIME_STEP,
            max_time_step: MAX_TIME_STEP,
        }
    }
}

impl EngineConfig {
    /// Set the number of constraint iterations per frame
    pub fn with_constraint_steps(mut self, steps: usize) -> Self {
        self.constraint_steps = steps;
        self
    }

    /// Set the sleep tolerance
    pub fn with_sleep_tolerance(mut self, tolerance: f64) -> Self {
        self.sleep_tolerance = tolerance;
        self
    }

    /// Cap linear speed
    pub fn with_velocity_cap(mut self, cap: f64) -> Self {
        self.velocity_cap = Some(cap);
        self
    }

    /// Cap angular speed
    pub fn with_angular_velocity_cap(mut self, cap: f64) -> Self {
        self.angular_velocity_cap = Some(cap);
        self
    }

    /// Set the frame time window in milliseconds
    pub fn with_time_steps(mut self, min: f64, max: f64) -> Self {
        self.min_time_step = min;
        self.max_time_step = max;
        self
    }

    /// Check that every setting is usable
    ///
    /// # Errors
    ///
    /// `InvalidPhysicsConfiguration` naming the first bad setting.
    pub fn validate(&self) -> Result<()> {
        if self.constraint_steps == 0 {
            return Err(PhysicsError::invalid("constraint_steps must be at least 1"));
        }
        if !(self.sleep_tolerance > 0.0 && self.sleep_tolerance.is_finite()) {
            return Err(PhysicsError::invalid(format!(
                "sleep_tolerance must be positive and finite, got {}",
                self.sleep_tolerance
            )));
        }
        for (name, cap) in [
            ("velocity_cap", self.velocity_cap),
            ("angular_velocity_cap", self.angular_velocity_cap),
        ] {
            if let Some(cap) = cap {
                if cap.is_nan() || cap < 0.0 {
                    return Err(PhysicsError::invalid(format!(
                        "{} must be non-negative, got {}",
                        name, cap
                    )));
                }
            }
        }
        if !(self.min_time_step > 0.0) {
            return Err(PhysicsError::invalid(format!(
                "min_time_step must be positive, got {}",
                self.min_time_step
            )));
        }
        if !(self.min_time_step <= self.max_time_step) {
            return Err(PhysicsError::invalid(format!(
                "time step window [{}, {}] is empty",
                self.min_time_step, self.max_time_step
            )));
        }
        if !(self.max_time_step > 0.0 && self.max_time_step.is_finite()) {
            return Err(PhysicsError::invalid(format!(
                "max_time_step must be positive and finite, got {}",
                self.max_time_step
            )));
        }
        Ok(())
    }
}
