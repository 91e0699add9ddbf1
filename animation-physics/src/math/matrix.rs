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
//! 3×3 matrices, used for inertia tensors and rotations

use super::Vector;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Determinant magnitude below which a matrix is treated as singular
const SINGULAR_EPSILON: f64 = 1e-300;

/// Row-major 3×3 matrix
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Matrix3 {
    rows: [[f64; 3]; 3],
}

impl Matrix3 {
    /// Create a matrix from rows
    pub const fn new(rows: [[f64; 3]; 3]) -> Self {
        Matrix3 { rows }
    }

    /// The identity matrix
    pub const fn identity() -> Self {
        Matrix3::new([[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]])
    }

    /// The zero matrix
    pub const fn zero() -> Self {
        Matrix3::new([[0.0; 3]; 3])
    }

    /// Diagonal matrix with the given entries
    pub const fn diagonal(a: f64, b: f64, c: f64) -> Self {
        Matrix3::new([[a, 0.0, 0.0], [0.0, b, 0.0], [0.0, 0.0, c]])
    }

    /// Entry at `row`, `col`
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.rows[row][col]
    }

    /// Rows as arrays
    pub fn rows(&self) -> [[f64; 3]; 3] {
        self.rows
    }

    /// Matrix-vector product `M · v`
    pub fn vector_multiply(&self, v: &Vector) -> Vector {
        let r = &self.rows;
        Vector::new(
            r[0][0] * v.x + r[0][1] * v.y + r[0][2] * v.z,
            r[1][0] * v.x + r[1][1] * v.y + r[1][2] * v.z,
            r[2][0] * v.x + r[2][1] * v.y + r[2][2] * v.z,
        )
    }

    /// Matrix product `self · other`
    pub fn multiply(&self, other: &Matrix3) -> Matrix3 {
        let mut out = [[0.0; 3]; 3];
        for (i, row) in out.iter_mut().enumerate() {
            for (j, cell) in row.iter_mut().enumerate() {
                *cell = (0..3).map(|k| self.rows[i][k] * other.rows[k][j]).sum();
            }
        }
        Matrix3::new(out)
    }

    /// Transpose
    pub fn transpose(&self) -> Matrix3 {
        let r = &self.rows;
        Matrix3::new([
            [r[0][0], r[1][0], r[2][0]],
            [r[0][1], r[1][1], r[2][1]],
            [r[0][2], r[1][2], r[2][2]],
        ])
    }

    /// Determinant
    pub fn determinant(&self) -> f64 {
        let r = &self.rows;
        r[0][0] * (r[1][1] * r[2][2] - r[1][2] * r[2][1])
            - r[0][1] * (r[1][0] * r[2][2] - r[1][2] * r[2][0])
            + r[0][2] * (r[1][0] * r[2][1] - r[1][1] * r[2][0])
    }

    /// Inverse, or `None` when the matrix is singular or not finite
    pub fn inverse(&self) -> Option<Matrix3> {
        let det = self.determinant();
        if !det.is_finite() || det.abs() < SINGULAR_EPSILON {
            return None;
        }
        let r = &self.rows;
        let inv_det = 1.0 / det;
        Some(Matrix3::new([
            [
                (r[1][1] * r[2][2] - r[1][2] * r[2][1]) * inv_det,
                -(r[0][1] * r[2][2] - r[0][2] * r[2][1]) * inv_det,
                (r[0][1] * r[1][2] - r[0][2] * r[1][1]) * inv_det,
            ],
            [
                -(r[1][0] * r[2][2] - r[1][2] * r[2][0]) * inv_det,
                (r[0][0] * r[2][2] - r[0][2] * r[2][0]) * inv_det,
                -(r[0][0] * r[1][2] - r[0][2] * r[1][0]) * inv_det,
            ],
            [
                (r[1][0] * r[2][1] - r[1][1] * r[2][0]) * inv_det,
                -(r[0][0] * r[2][1] - r[0][1] * r[2][0]) * inv_det,
                (r[0][0] * r[1][1] - r[0][1] * r[1][0]) * inv_det,
            ],
        ]))
    }

    /// Whether every entry is finite
    pub fn is_valid(&self) -> bool {
        self.rows.iter().flatten().all(|e| e.is_finite())
    }
}

impl Default for Matrix3 {
    fn default() -> Self {
        Matrix3::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx_eq(a: &Matrix3, b: &Matrix3) -> bool {
        (0..3).all(|i| (0..3).all(|j| (a.get(i, j) - b.get(i, j)).abs() < 1e-12))
    }

    #[test]
    fn test_identity_multiply() {
        let m = Matrix3::new([[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 10.0]]);
        assert_eq!(m.multiply(&Matrix3::identity()), m);
        assert_eq!(Matrix3::identity().multiply(&m), m);
    }

    #[test]
    fn test_inverse_round_trip() {
        let m = Matrix3::new([[2.0, 0.0, 1.0], [1.0, 3.0, 0.0], [0.0, 1.0, 4.0]]);
        let inv = m.inverse().expect("matrix is invertible");
        assert!(approx_eq(&m.multiply(&inv), &Matrix3::identity()));
    }

    #[test]
    fn test_diagonal_inverse() {
        let m = Matrix3::diagonal(2.0, 4.0, 8.0);
        let inv = m.inverse().unwrap();
        assert!(approx_eq(&inv, &Matrix3::diagonal(0.5, 0.25, 0.125)));
    }

    #[test]
    fn test_singular_has_no_inverse() {
        assert!(Matrix3::zero().inverse().is_none());
        assert!(Matrix3::diagonal(1.0, 0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn test_vector_multiply_and_transpose() {
        let m = Matrix3::new([[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]]);
        assert_eq!(m.vector_multiply(&Vector::X), Vector::Y);
        assert_eq!(m.transpose().vector_multiply(&Vector::Y), Vector::X);
    }
}
