use serde::{Deserialize, Serialize};

use crate::linalg::{self, IDENTITY33};

/// Error type for the transforms module.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum TransformError {
    /// The rotation axis has (near) zero length.
    #[error("Cannot compute rotation matrix from a zero vector")]
    ZeroRotationAxis,
}

/// Compute the rotation matrix from an axis and angle.
///
/// # Arguments
///
/// * `axis` - The axis of rotation. It does not need to be normalized.
/// * `angle` - The angle of rotation in radians.
///
/// # Returns
///
/// The rotation matrix.
///
/// Example:
///
/// ```
/// use regkit_3d::transforms::axis_angle_to_rotation_matrix;
///
/// let axis = [0.0, 0.0, 1.0];
/// let angle = std::f64::consts::PI / 2.0;
/// let rotation = axis_angle_to_rotation_matrix(&axis, angle).unwrap();
/// assert!((rotation[1][0] - 1.0).abs() < 1e-12);
/// ```
pub fn axis_angle_to_rotation_matrix(
    axis: &[f64; 3],
    angle: f64,
) -> Result<[[f64; 3]; 3], TransformError> {
    // normalize the vector
    let axis_norm = {
        let magnitude = (axis[0].powi(2) + axis[1].powi(2) + axis[2].powi(2)).sqrt();
        match magnitude < 1e-10 {
            true => return Err(TransformError::ZeroRotationAxis),
            false => [
                axis[0] / magnitude,
                axis[1] / magnitude,
                axis[2] / magnitude,
            ],
        }
    };

    let [x, y, z] = axis_norm;

    let c = angle.cos();
    let s = angle.sin();
    let t = 1.0 - c;

    let m00 = c + x * x * t;
    let m11 = c + y * y * t;
    let m22 = c + z * z * t;

    let m10 = x * y * t + z * s;
    let m01 = x * y * t - z * s;

    let m20 = x * z * t - y * s;
    let m02 = x * z * t + y * s;

    let m12 = y * z * t - x * s;
    let m21 = y * z * t + x * s;

    Ok([[m00, m01, m02], [m10, m11, m12], [m20, m21, m22]])
}

/// A rigid motion in 3D: `p' = rotation * p + translation`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RigidTransform {
    /// Rotation matrix, row-major.
    pub rotation: [[f64; 3]; 3],
    /// Translation vector.
    pub translation: [f64; 3],
}

impl Default for RigidTransform {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidTransform {
    /// Create a rigid transform from a rotation and a translation.
    pub fn new(rotation: [[f64; 3]; 3], translation: [f64; 3]) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    /// The identity transform.
    pub fn identity() -> Self {
        Self::new(IDENTITY33, [0.0; 3])
    }

    /// Apply the transform to a single point.
    pub fn transform_point(&self, point: &[f64; 3]) -> [f64; 3] {
        let p = linalg::matvec33(&self.rotation, point);
        [
            p[0] + self.translation[0],
            p[1] + self.translation[1],
            p[2] + self.translation[2],
        ]
    }

    /// Compose two transforms: the result applies `self` first and then `other`.
    ///
    /// R = R_other * R_self, t = R_other * t_self + t_other
    pub fn then(&self, other: &RigidTransform) -> RigidTransform {
        let mut rotation = [[0.0; 3]; 3];
        linalg::matmul33(&other.rotation, &self.rotation, &mut rotation);
        RigidTransform::new(rotation, other.transform_point(&self.translation))
    }

    /// The inverse transform.
    pub fn inverse(&self) -> RigidTransform {
        let rotation = linalg::transpose33(&self.rotation);
        let t = linalg::matvec33(&rotation, &self.translation);
        RigidTransform::new(rotation, [-t[0], -t[1], -t[2]])
    }

    /// Pack the transform as a 4x4 homogeneous matrix in row-major order.
    ///
    /// The top-left 3x3 block is the rotation, the top-right column is the
    /// translation and the bottom row is `[0, 0, 0, 1]`.
    pub fn to_homogeneous(&self) -> [[f64; 4]; 4] {
        let r = &self.rotation;
        let t = &self.translation;
        [
            [r[0][0], r[0][1], r[0][2], t[0]],
            [r[1][0], r[1][1], r[1][2], t[1]],
            [r[2][0], r[2][1], r[2][2], t[2]],
            [0.0, 0.0, 0.0, 1.0],
        ]
    }

    /// Build a transform from the upper 3x4 block of a homogeneous matrix.
    ///
    /// The bottom row is ignored.
    pub fn from_homogeneous(m: &[[f64; 4]; 4]) -> Self {
        Self::new(
            [
                [m[0][0], m[0][1], m[0][2]],
                [m[1][0], m[1][1], m[1][2]],
                [m[2][0], m[2][1], m[2][2]],
            ],
            [m[0][3], m[1][3], m[2][3]],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_axis_angle_to_rotation_matrix_identity() -> Result<(), TransformError> {
        let rotation = axis_angle_to_rotation_matrix(&[1.0, 0.0, 0.0], 0.0)?;
        for (res, exp) in rotation.iter().zip(IDENTITY33.iter()) {
            for (r, e) in res.iter().zip(exp.iter()) {
                assert_relative_eq!(r, e, epsilon = 1e-12);
            }
        }
        Ok(())
    }

    #[test]
    fn test_axis_angle_to_rotation_matrix_x() -> Result<(), TransformError> {
        let rotation = axis_angle_to_rotation_matrix(&[2.0, 0.0, 0.0], std::f64::consts::PI / 2.0)?;
        let expected = [[1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]];
        for (res, exp) in rotation.iter().zip(expected.iter()) {
            for (r, e) in res.iter().zip(exp.iter()) {
                assert_relative_eq!(r, e, epsilon = 1e-12);
            }
        }
        assert!(linalg::is_proper_rotation(&rotation, 1e-12));
        Ok(())
    }

    #[test]
    fn test_axis_angle_zero_axis() {
        let res = axis_angle_to_rotation_matrix(&[0.0, 0.0, 0.0], 1.0);
        assert_eq!(res, Err(TransformError::ZeroRotationAxis));
    }

    #[test]
    fn test_rigid_transform_compose_inverse() -> Result<(), TransformError> {
        let a = RigidTransform::new(
            axis_angle_to_rotation_matrix(&[0.0, 0.0, 1.0], 0.3)?,
            [1.0, -2.0, 0.5],
        );
        let b = RigidTransform::new(
            axis_angle_to_rotation_matrix(&[1.0, 1.0, 0.0], -0.7)?,
            [0.0, 3.0, -1.0],
        );

        let p = [0.2, 0.4, -1.5];
        let composed = a.then(&b).transform_point(&p);
        let sequential = b.transform_point(&a.transform_point(&p));
        for (c, s) in composed.iter().zip(sequential.iter()) {
            assert_relative_eq!(c, s, epsilon = 1e-12);
        }

        let back = a.inverse().transform_point(&a.transform_point(&p));
        for (b, e) in back.iter().zip(p.iter()) {
            assert_relative_eq!(b, e, epsilon = 1e-12);
        }
        Ok(())
    }

    #[test]
    fn test_homogeneous_layout() {
        let rz = [[0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]];
        let transform = RigidTransform::new(rz, [2.0, 2.0, 0.0]);
        let m = transform.to_homogeneous();
        assert_eq!(m[0], [0.0, -1.0, 0.0, 2.0]);
        assert_eq!(m[1], [1.0, 0.0, 0.0, 2.0]);
        assert_eq!(m[2], [0.0, 0.0, 1.0, 0.0]);
        assert_eq!(m[3], [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(RigidTransform::from_homogeneous(&m), transform);
    }
}
