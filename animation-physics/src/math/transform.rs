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
//! 4×4 affine transforms handed to the rendering layer
//!
//! Transforms are 16 floats in column-major order, the layout the
//! rendering layer's `matrix3d` commit expects: entries 12..15 hold the
//! translation.

use super::{Matrix3, Vector};

/// A column-major 4×4 affine transform
pub type Transform = [f64; 16];

/// The identity transform
pub const IDENTITY: Transform = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// Pure translation
pub fn translate(offset: &Vector) -> Transform {
    let mut t = IDENTITY;
    t[12] = offset.x;
    t[13] = offset.y;
    t[14] = offset.z;
    t
}

/// Rotation by `rotation` followed by translation by `offset`
pub fn from_rotation_translation(rotation: &Matrix3, offset: &Vector) -> Transform {
    let mut t = IDENTITY;
    for col in 0..3 {
        for row in 0..3 {
            t[col * 4 + row] = rotation.get(row, col);
        }
    }
    t[12] = offset.x;
    t[13] = offset.y;
    t[14] = offset.z;
    t
}

/// Translation part of a transform
pub fn get_translate(t: &Transform) -> Vector {
    Vector::new(t[12], t[13], t[14])
}

/// Apply a transform to a point
pub fn transform_point(t: &Transform, p: &Vector) -> Vector {
    Vector::new(
        t[0] * p.x + t[4] * p.y + t[8] * p.z + t[12],
        t[1] * p.x + t[5] * p.y + t[9] * p.z + t[13],
        t[2] * p.x + t[6] * p.y + t[10] * p.z + t[14],
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Quaternion;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_translate() {
        let t = translate(&Vector::new(1.0, 2.0, 3.0));
        assert_eq!(get_translate(&t), Vector::new(1.0, 2.0, 3.0));
        assert_eq!(transform_point(&t, &Vector::ZERO), Vector::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_rotation_then_translation() {
        let rotation = Quaternion::from_axis_angle(&Vector::Z, FRAC_PI_2).to_matrix3();
        let t = from_rotation_translation(&rotation, &Vector::new(10.0, 0.0, 0.0));
        let p = transform_point(&t, &Vector::X);
        assert!((p.x - 10.0).abs() < 1e-12);
        assert!((p.y - 1.0).abs() < 1e-12);
    }
}
