// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Affine matrix decomposition for transform nodes
//!
//! A transform node only carries translation, XYZ Euler rotation and scale,
//! so an arbitrary 4×4 matrix is approximated. Shear and per-axis non-uniform
//! scale combined with rotation are lost: the normalized basis is read as a
//! rotation as-is and converted through a unit quaternion.

use nalgebra::{Matrix3, Matrix4, Rotation3, UnitQuaternion, Vector3};

const DEGENERATE_SCALE: f64 = 1e-12;

/// Translation, rotation and scale of an affine matrix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Decomposed {
    pub translation: Vector3<f64>,
    /// Euler angles in radians, applied X then Y then Z
    pub rotation: Vector3<f64>,
    pub scale: Vector3<f64>,
}

/// Builds a matrix from row-major rows
pub fn matrix_from_rows(rows: &[[f64; 4]; 4]) -> Matrix4<f64> {
    Matrix4::from_fn(|i, j| rows[i][j])
}

/// Splits `m` into translation, rotation and scale.
///
/// Scale is the length of each basis column. A mirroring matrix (negative
/// determinant) negates all three scale components so the remaining basis
/// is a proper rotation.
pub fn decompose(m: &Matrix4<f64>) -> Decomposed {
    let translation = Vector3::new(m[(0, 3)], m[(1, 3)], m[(2, 3)]);
    let linear: Matrix3<f64> = m.fixed_view::<3, 3>(0, 0).into_owned();

    let mut scale = Vector3::new(
        linear.column(0).norm(),
        linear.column(1).norm(),
        linear.column(2).norm(),
    );
    if linear.determinant() < 0.0 {
        scale = -scale;
    }

    let mut basis = Matrix3::identity();
    for i in 0..3 {
        if scale[i].abs() > DEGENERATE_SCALE {
            basis.set_column(i, &(linear.column(i) / scale[i]));
        }
    }

    let rotation = UnitQuaternion::from_rotation_matrix(&Rotation3::from_matrix_unchecked(basis));
    let (roll, pitch, yaw) = rotation.euler_angles();

    Decomposed {
        translation,
        rotation: Vector3::new(roll, pitch, yaw),
        scale,
    }
}
