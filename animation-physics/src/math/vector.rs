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
//! Three-component vector with value semantics
//!
//! Every operation returns a fresh `Vector`; nothing is written back into
//! the receiver. Positions, velocities, forces, torques and angular
//! momenta all share this one type.

use std::fmt;
use std::ops::{AddAssign, Index, Mul, MulAssign, Neg, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Squared length below which a vector is treated as zero by `normalize`
const NORMALIZE_EPSILON: f64 = 1e-14;

/// A 3D vector of double-precision components
///
/// # Examples
///
/// ```
/// use animation_physics::math::Vector;
///
/// let v = Vector::new(3.0, 4.0, 0.0);
/// assert_eq!(v.norm(), 5.0);
/// assert_eq!(v.normalize(10.0), Vector::new(6.0, 8.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Vector {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

impl Vector {
    /// The zero vector
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0, z: 0.0 };
    /// Unit vector along x
    pub const X: Vector = Vector { x: 1.0, y: 0.0, z: 0.0 };
    /// Unit vector along y
    pub const Y: Vector = Vector { x: 0.0, y: 1.0, z: 0.0 };
    /// Unit vector along z
    pub const Z: Vector = Vector { x: 0.0, y: 0.0, z: 1.0 };

    /// Create a vector from its components
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Vector { x, y, z }
    }

    /// Create the zero vector
    pub const fn zero() -> Self {
        Vector::ZERO
    }

    /// Create a vector from an array
    pub const fn from_array(arr: [f64; 3]) -> Self {
        Vector::new(arr[0], arr[1], arr[2])
    }

    /// Get the vector as an array
    pub fn as_array(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }

    /// Component-wise sum
    pub fn add(&self, other: &Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }

    /// Component-wise difference
    pub fn sub(&self, other: &Vector) -> Vector {
        Vector::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }

    /// Scale by a scalar
    pub fn mult(&self, r: f64) -> Vector {
        Vector::new(self.x * r, self.y * r, self.z * r)
    }

    /// Divide by a scalar
    pub fn div(&self, r: f64) -> Vector {
        self.mult(1.0 / r)
    }

    /// Flip every component
    pub fn negate(&self) -> Vector {
        self.mult(-1.0)
    }

    /// Dot product
    pub fn dot(&self, other: &Vector) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Cross product `self × other`
    pub fn cross(&self, other: &Vector) -> Vector {
        Vector::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Euclidean length
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Squared Euclidean length
    pub fn norm_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Rescale to the given length
    ///
    /// A (near) zero vector has no direction; it maps to `[length, 0, 0]`
    /// instead of dividing by zero.
    pub fn normalize(&self, length: f64) -> Vector {
        let n2 = self.norm_squared();
        if n2 < NORMALIZE_EPSILON {
            return Vector::new(length, 0.0, 0.0);
        }
        self.mult(length / n2.sqrt())
    }

    /// Unit vector in the same direction
    pub fn unit(&self) -> Vector {
        self.normalize(1.0)
    }

    /// Clamp the length to at most `max`
    pub fn cap(&self, max: f64) -> Vector {
        if max == f64::INFINITY {
            return *self;
        }
        let norm = self.norm();
        if norm > max {
            self.mult(max / norm)
        } else {
            *self
        }
    }

    /// Projection onto `n`
    pub fn project(&self, n: &Vector) -> Vector {
        let n2 = n.norm_squared();
        if n2 == 0.0 {
            return Vector::ZERO;
        }
        n.mult(self.dot(n) / n2)
    }

    /// Mirror image across the plane with unit normal `n`
    pub fn reflect_across(&self, n: &Vector) -> Vector {
        let n = n.unit();
        self.sub(&n.mult(2.0 * self.dot(&n)))
    }

    /// Whether every component is exactly zero
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.z == 0.0
    }

    /// Whether every component is finite
    pub fn is_valid(&self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Distance between two points
    pub fn distance(&self, other: &Vector) -> f64 {
        self.sub(other).norm()
    }
}

impl fmt::Display for Vector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}

impl From<[f64; 3]> for Vector {
    fn from(arr: [f64; 3]) -> Self {
        Vector::from_array(arr)
    }
}

impl From<Vector> for [f64; 3] {
    fn from(v: Vector) -> Self {
        v.as_array()
    }
}

impl Index<usize> for Vector {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Vector index {} out of range", index),
        }
    }
}

impl AddAssign for Vector {
    fn add_assign(&mut self, rhs: Vector) {
        *self = Vector::add(self, &rhs);
    }
}

impl SubAssign for Vector {
    fn sub_assign(&mut self, rhs: Vector) {
        *self = Vector::sub(self, &rhs);
    }
}

impl Mul<f64> for Vector {
    type Output = Vector;

    fn mul(self, rhs: f64) -> Vector {
        self.mult(rhs)
    }
}

impl Mul<Vector> for f64 {
    type Output = Vector;

    fn mul(self, rhs: Vector) -> Vector {
        rhs.mult(self)
    }
}

impl MulAssign<f64> for Vector {
    fn mul_assign(&mut self, rhs: f64) {
        *self = self.mult(rhs);
    }
}

impl Neg for Vector {
    type Output = Vector;

    fn neg(self) -> Vector {
        self.negate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_arithmetic() {
        let a = Vector::new(1.0, 2.0, 3.0);
        let b = Vector::new(4.0, 5.0, 6.0);
        assert_eq!(a.add(&b), Vector::new(5.0, 7.0, 9.0));
        assert_eq!(b.sub(&a), Vector::new(3.0, 3.0, 3.0));
        assert_eq!(-a, Vector::new(-1.0, -2.0, -3.0));
        assert_eq!(a * 2.0, Vector::new(2.0, 4.0, 6.0));
        assert_eq!(a.dot(&b), 32.0);
    }

    #[test]
    fn test_cross_product_right_handed() {
        assert_eq!(Vector::X.cross(&Vector::Y), Vector::Z);
        assert_eq!(Vector::Y.cross(&Vector::Z), Vector::X);
        assert_eq!(Vector::Z.cross(&Vector::X), Vector::Y);
    }

    #[test]
    fn test_normalize_zero_vector_falls_back() {
        let v = Vector::zero().normalize(3.0);
        assert_eq!(v, Vector::new(3.0, 0.0, 0.0));

        let tiny = Vector::new(1e-9, 0.0, 0.0).normalize(2.0);
        assert_eq!(tiny, Vector::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn test_cap() {
        let v = Vector::new(3.0, 4.0, 0.0);
        assert_eq!(v.cap(10.0), v);
        let capped = v.cap(1.0);
        assert!((capped.norm() - 1.0).abs() < 1e-12);
        assert_eq!(v.cap(f64::INFINITY), v);
    }

    #[test]
    fn test_operations_do_not_alias() {
        let a = Vector::new(1.0, 1.0, 1.0);
        let b = a.mult(5.0);
        let c = a.add(&b);
        assert_eq!(a, Vector::new(1.0, 1.0, 1.0));
        assert_eq!(b, Vector::new(5.0, 5.0, 5.0));
        assert_eq!(c, Vector::new(6.0, 6.0, 6.0));
    }

    #[test]
    fn test_reflect_across() {
        let v = Vector::new(-5.0, 2.0, 0.0);
        let r = v.reflect_across(&Vector::X);
        assert_eq!(r, Vector::new(5.0, 2.0, 0.0));
    }

    #[test]
    fn test_projection() {
        let v = Vector::new(2.0, 3.0, 0.0);
        assert_eq!(v.project(&Vector::new(0.0, 10.0, 0.0)), Vector::new(0.0, 3.0, 0.0));
        assert_eq!(v.project(&Vector::ZERO), Vector::ZERO);
    }
}
