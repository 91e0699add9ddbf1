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
//! Quaternions for body orientation
//!
//! Stored as `w + xi + yj + zk`. Orientations are unit quaternions, but the
//! integrator lets the norm drift within a frame, so every conversion to a
//! rotation works on a normalized copy.

use std::fmt;

use super::{Matrix3, Vector};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Dot product above which `slerp` falls back to linear interpolation
const SLERP_LINEAR_THRESHOLD: f64 = 0.9995;

/// A quaternion `w + xi + yj + zk`
///
/// # Examples
///
/// ```
/// use animation_physics::math::{Quaternion, Vector};
/// use std::f64::consts::FRAC_PI_2;
///
/// let q = Quaternion::from_axis_angle(&Vector::Z, FRAC_PI_2);
/// let v = q.rotate_vector(&Vector::X);
/// assert!((v.y - 1.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Quaternion {
    /// Scalar part
    pub w: f64,
    /// i component
    pub x: f64,
    /// j component
    pub y: f64,
    /// k component
    pub z: f64,
}

impl Quaternion {
    /// The identity rotation
    pub const IDENTITY: Quaternion = Quaternion { w: 1.0, x: 0.0, y: 0.0, z: 0.0 };

    /// Create a quaternion from its components
    pub const fn new(w: f64, x: f64, y: f64, z: f64) -> Self {
        Quaternion { w, x, y, z }
    }

    /// The identity rotation
    pub const fn identity() -> Self {
        Quaternion::IDENTITY
    }

    /// Pure quaternion `(0, v)`
    pub fn from_vector(v: &Vector) -> Self {
        Quaternion::new(0.0, v.x, v.y, v.z)
    }

    /// Rotation of `angle` radians about `axis`
    ///
    /// A zero axis yields the identity.
    pub fn from_axis_angle(axis: &Vector, angle: f64) -> Self {
        if axis.is_zero() {
            return Quaternion::IDENTITY;
        }
        let n = axis.unit();
        let half = 0.5 * angle;
        let s = half.sin();
        Quaternion::new(half.cos(), n.x * s, n.y * s, n.z * s)
    }

    /// Rotation from Euler angles applied in x, y, z order
    pub fn from_euler(x: f64, y: f64, z: f64) -> Self {
        let (sx, cx) = (0.5 * x).sin_cos();
        let (sy, cy) = (0.5 * y).sin_cos();
        let (sz, cz) = (0.5 * z).sin_cos();
        Quaternion::new(
            cx * cy * cz - sx * sy * sz,
            sx * cy * cz + cx * sy * sz,
            cx * sy * cz - sx * cy * sz,
            cx * cy * sz + sx * sy * cz,
        )
    }

    /// Vector part `(x, y, z)`
    pub fn vector_part(&self) -> Vector {
        Vector::new(self.x, self.y, self.z)
    }

    /// Component-wise sum
    pub fn add(&self, q: &Quaternion) -> Quaternion {
        Quaternion::new(self.w + q.w, self.x + q.x, self.y + q.y, self.z + q.z)
    }

    /// Component-wise difference
    pub fn sub(&self, q: &Quaternion) -> Quaternion {
        Quaternion::new(self.w - q.w, self.x - q.x, self.y - q.y, self.z - q.z)
    }

    /// Scale every component
    pub fn scalar_multiply(&self, s: f64) -> Quaternion {
        Quaternion::new(self.w * s, self.x * s, self.y * s, self.z * s)
    }

    /// Hamilton product `self · q`
    pub fn multiply(&self, q: &Quaternion) -> Quaternion {
        let (w1, x1, y1, z1) = (self.w, self.x, self.y, self.z);
        let (w2, x2, y2, z2) = (q.w, q.x, q.y, q.z);
        Quaternion::new(
            w1 * w2 - x1 * x2 - y1 * y2 - z1 * z2,
            w1 * x2 + x1 * w2 + y1 * z2 - z1 * y2,
            w1 * y2 - x1 * z2 + y1 * w2 + z1 * x2,
            w1 * z2 + x1 * y2 - y1 * x2 + z1 * w2,
        )
    }

    /// Product with `v` treated as the pure quaternion `(0, v)`
    pub fn multiply_vector(&self, v: &Vector) -> Quaternion {
        self.multiply(&Quaternion::from_vector(v))
    }

    /// Conjugate `w - xi - yj - zk`
    pub fn conj(&self) -> Quaternion {
        Quaternion::new(self.w, -self.x, -self.y, -self.z)
    }

    /// Multiplicative inverse
    ///
    /// The zero quaternion has none; it maps to itself.
    pub fn inverse(&self) -> Quaternion {
        let n2 = self.norm_squared();
        if n2 == 0.0 {
            return *self;
        }
        self.conj().scalar_multiply(1.0 / n2)
    }

    /// Four-dimensional dot product
    pub fn dot(&self, q: &Quaternion) -> f64 {
        self.w * q.w + self.x * q.x + self.y * q.y + self.z * q.z
    }

    /// Squared norm
    pub fn norm_squared(&self) -> f64 {
        self.dot(self)
    }

    /// Norm
    pub fn norm(&self) -> f64 {
        self.norm_squared().sqrt()
    }

    /// Unit quaternion in the same direction
    ///
    /// The zero quaternion normalizes to the identity.
    pub fn normalize(&self) -> Quaternion {
        let n = self.norm();
        if n == 0.0 {
            return Quaternion::IDENTITY;
        }
        self.scalar_multiply(1.0 / n)
    }

    /// Whether this is the identity rotation exactly
    pub fn is_identity(&self) -> bool {
        *self == Quaternion::IDENTITY
    }

    /// Whether every component is finite
    pub fn is_valid(&self) -> bool {
        self.w.is_finite() && self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Rotate `v` by this orientation
    pub fn rotate_vector(&self, v: &Vector) -> Vector {
        let q = self.normalize();
        q.multiply_vector(v).multiply(&q.conj()).vector_part()
    }

    /// Spherical linear interpolation from `self` (t = 0) to `q` (t = 1)
    ///
    /// Takes the short arc; nearly parallel inputs interpolate linearly.
    pub fn slerp(&self, q: &Quaternion, t: f64) -> Quaternion {
        let mut cosine = self.dot(q);
        let mut target = *q;
        if cosine < 0.0 {
            cosine = -cosine;
            target = target.scalar_multiply(-1.0);
        }

        if cosine > SLERP_LINEAR_THRESHOLD {
            return self
                .scalar_multiply(1.0 - t)
                .add(&target.scalar_multiply(t))
                .normalize();
        }

        let omega = cosine.acos();
        let sin_omega = omega.sin();
        let scale_from = ((1.0 - t) * omega).sin() / sin_omega;
        let scale_to = (t * omega).sin() / sin_omega;
        self.scalar_multiply(scale_from)
            .add(&target.scalar_multiply(scale_to))
    }

    /// Small-angle rotation vector taking `self` to `target`
    ///
    /// Uses the difference `target - self` carried back into the world frame,
    /// which for nearby orientations is half the rotation vector.
    pub fn rotation_to(&self, target: &Quaternion) -> Vector {
        let delta = target.sub(self).multiply(&self.conj());
        let sign = if target.dot(self) < 0.0 { -1.0 } else { 1.0 };
        delta.vector_part().mult(2.0 * sign)
    }

    /// Rotation matrix of the normalized quaternion
    pub fn to_matrix3(&self) -> Matrix3 {
        let q = self.normalize();
        let (w, x, y, z) = (q.w, q.x, q.y, q.z);
        let (xx, yy, zz) = (x * x, y * y, z * z);
        let (xy, xz, yz) = (x * y, x * z, y * z);
        let (wx, wy, wz) = (w * x, w * y, w * z);
        Matrix3::new([
            [1.0 - 2.0 * (yy + zz), 2.0 * (xy - wz), 2.0 * (xz + wy)],
            [2.0 * (xy + wz), 1.0 - 2.0 * (xx + zz), 2.0 * (yz - wx)],
            [2.0 * (xz - wy), 2.0 * (yz + wx), 1.0 - 2.0 * (xx + yy)],
        ])
    }

    /// 4×4 rotation transform, column-major
    pub fn to_transform(&self) -> [f64; 16] {
        super::transform::from_rotation_translation(&self.to_matrix3(), &Vector::ZERO)
    }
}

impl Default for Quaternion {
    fn default() -> Self {
        Quaternion::IDENTITY
    }
}

impl fmt::Display for Quaternion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.w, self.x, self.y, self.z)
    }
}
