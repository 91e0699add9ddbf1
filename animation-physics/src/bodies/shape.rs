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
//! Rigid body shapes and their inertia tensors
//!
//! Both shapes are flat (they live in the xy plane), which is what a UI
//! layer animates. Their tensors are diagonal in the body frame:
//!
//! ```text
//! Circle    I = diag(m r²/4, m r²/4, m r²/2)
//! Rectangle I = diag(m h²/12, m w²/12, m (w² + h²)/12)
//! ```

use crate::error::{PhysicsError, Result};
use crate::math::Matrix3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shape of a rigid body
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Shape {
    /// A disc of the given radius
    Circle {
        /// Radius
        radius: f64,
    },
    /// A rectangle of the given `[width, height]`
    Rectangle {
        /// `[width, height]`
        size: [f64; 2],
    },
}

impl Shape {
    /// Check that the shape has positive, finite extent
    ///
    /// A zero-size shape has a singular inertia tensor.
    pub fn validate(&self) -> Result<()> {
        let ok = match *self {
            Shape::Circle { radius } => radius > 0.0 && radius.is_finite(),
            Shape::Rectangle { size: [w, h] } => {
                w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()
            }
        };
        if ok {
            Ok(())
        } else {
            Err(PhysicsError::invalid(format!(
                "shape must have positive finite size, got {:?}",
                self
            )))
        }
    }

    /// Inertia tensor for a body of mass `mass`
    pub fn inertia(&self, mass: f64) -> Matrix3 {
        match *self {
            Shape::Circle { radius } => {
                let mr2 = mass * radius * radius;
                Matrix3::diagonal(0.25 * mr2, 0.25 * mr2, 0.5 * mr2)
            }
            Shape::Rectangle { size: [w, h] } => Matrix3::diagonal(
                mass * h * h / 12.0,
                mass * w * w / 12.0,
                mass * (w * w + h * h) / 12.0,
            ),
        }
    }

    /// Radius used for contact tests
    ///
    /// The circle's own radius, or the half-diagonal of a rectangle.
    pub fn radius(&self) -> f64 {
        match *self {
            Shape::Circle { radius } => radius,
            Shape::Rectangle { size: [w, h] } => 0.5 * (w * w + h * h).sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_inertia() {
        let inertia = Shape::Circle { radius: 2.0 }.inertia(3.0);
        assert_eq!(inertia.get(0, 0), 3.0);
        assert_eq!(inertia.get(1, 1), 3.0);
        assert_eq!(inertia.get(2, 2), 6.0);
    }

    #[test]
    fn test_rectangle_inertia() {
        let inertia = Shape::Rectangle { size: [6.0, 12.0] }.inertia(1.0);
        assert_eq!(inertia.get(0, 0), 12.0);
        assert_eq!(inertia.get(1, 1), 3.0);
        assert_eq!(inertia.get(2, 2), 15.0);
    }

    #[test]
    fn test_degenerate_shapes_rejected() {
        assert!(Shape::Circle { radius: 0.0 }.validate().is_err());
        assert!(Shape::Circle { radius: -1.0 }.validate().is_err());
        assert!(Shape::Rectangle { size: [1.0, 0.0] }.validate().is_err());
        assert!(Shape::Rectangle { size: [f64::NAN, 1.0] }.validate().is_err());
        assert!(Shape::Rectangle { size: [1.0, 2.0] }.validate().is_ok());
    }

    #[test]
    fn test_contact_radius() {
        assert_eq!(Shape::Circle { radius: 4.0 }.radius(), 4.0);
        assert_eq!(Shape::Rectangle { size: [6.0, 8.0] }.radius(), 5.0);
    }
}
