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
//! Error types
//!
//! Only construction and attachment can fail. Degenerate values met while
//! stepping (zero-length vectors, zero effective mass) are guarded in place
//! and never surface as errors.

use thiserror::Error;

use crate::bodies::BodyId;
use crate::engine::AgentId;

/// Errors raised when building or wiring up a simulation
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PhysicsError {
    /// A mass, shape, agent or engine parameter is unusable
    #[error("invalid physics configuration: {0}")]
    InvalidPhysicsConfiguration(String),

    /// The body is not (or no longer) owned by the engine
    #[error("unknown body: {0}")]
    UnknownBody(BodyId),

    /// No agent is attached under this id
    #[error("unknown agent: {0}")]
    UnknownAgent(AgentId),
}

impl PhysicsError {
    /// Shorthand for an `InvalidPhysicsConfiguration` error
    pub fn invalid(message: impl Into<String>) -> Self {
        PhysicsError::InvalidPhysicsConfiguration(message.into())
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, PhysicsError>;

/// Check that a mass is usable: positive and finite
pub(crate) fn validate_mass(mass: f64) -> Result<f64> {
    if mass > 0.0 && mass.is_finite() {
        Ok(mass)
    } else {
        Err(PhysicsError::invalid(format!(
            "mass must be positive and finite, got {}",
            mass
        )))
    }
}

/// Check that a period parameter is non-negative and finite
pub(crate) fn validate_period(name: &str, period: f64) -> Result<f64> {
    if period >= 0.0 && period.is_finite() {
        Ok(period)
    } else {
        Err(PhysicsError::invalid(format!(
            "{} period must be non-negative and finite, got {}",
            name, period
        )))
    }
}

/// Check that a damping ratio is non-negative and finite
pub(crate) fn validate_damping_ratio(name: &str, ratio: f64) -> Result<f64> {
    if ratio >= 0.0 && ratio.is_finite() {
        Ok(ratio)
    } else {
        Err(PhysicsError::invalid(format!(
            "{} damping ratio must be non-negative and finite, got {}",
            name, ratio
        )))
    }
}

/// Check that a length or limit is strictly positive; infinity is allowed
pub(crate) fn validate_positive(name: &str, value: f64) -> Result<f64> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(PhysicsError::invalid(format!(
            "{} must be positive, got {}",
            name, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_mass() {
        assert_eq!(validate_mass(2.0), Ok(2.0));
        assert!(validate_mass(0.0).is_err());
        assert!(validate_mass(-1.0).is_err());
        assert!(validate_mass(f64::NAN).is_err());
        assert!(validate_mass(f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = validate_mass(-3.0).unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid physics configuration: mass must be positive and finite, got -3"
        );
    }

    #[test]
    fn test_validate_period_and_ratio() {
        assert!(validate_period("spring", 0.0).is_ok());
        assert!(validate_period("spring", -1.0).is_err());
        assert!(validate_damping_ratio("spring", 0.5).is_ok());
        assert!(validate_damping_ratio("spring", f64::NAN).is_err());
    }

    #[test]
    fn test_validate_positive() {
        assert_eq!(validate_positive("max_length", 5.0), Ok(5.0));
        assert!(validate_positive("max_length", f64::INFINITY).is_ok());
        assert!(validate_positive("max_length", 0.0).is_err());
        assert!(validate_positive("max_length", -5.0).is_err());
        assert!(validate_positive("max_length", f64::NAN).is_err());
    }
}
