/// Error type for the linear algebra helpers.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum LinalgError {
    /// The source and destination buffers have different lengths.
    #[error("Source and destination must have the same length: {0} != {1}")]
    MismatchedLengths(usize, usize),
}

/// The 3x3 identity matrix.
pub const IDENTITY33: [[f64; 3]; 3] = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];

/// Transform a set of points using a rotation and translation.
///
/// Each destination point is computed as `dst = R * src + t`.
///
/// # Arguments
///
/// * `src_points` - A set of points to be transformed.
/// * `dst_r_src` - A rotation matrix.
/// * `dst_t_src` - A translation vector.
/// * `dst_points` - A pre-allocated vector to store the transformed points.
///
/// # Errors
///
/// Returns [`LinalgError::MismatchedLengths`] if `dst_points` is not the same size as `src_points`.
///
/// Example:
///
/// ```
/// use regkit_3d::linalg::transform_points3d;
///
/// let src_points = vec![[2.0, 2.0, 2.0], [3.0, 4.0, 5.0]];
/// let rotation = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
/// let translation = [1.0, 0.0, 0.0];
/// let mut dst_points = vec![[0.0; 3]; src_points.len()];
/// transform_points3d(&src_points, &rotation, &translation, &mut dst_points).unwrap();
/// assert_eq!(dst_points[0], [3.0, 2.0, 2.0]);
/// ```
pub fn transform_points3d(
    src_points: &[[f64; 3]],
    dst_r_src: &[[f64; 3]; 3],
    dst_t_src: &[f64; 3],
    dst_points: &mut [[f64; 3]],
) -> Result<(), LinalgError> {
    if src_points.len() != dst_points.len() {
        return Err(LinalgError::MismatchedLengths(
            src_points.len(),
            dst_points.len(),
        ));
    }

    for (point_dst, point_src) in dst_points.iter_mut().zip(src_points.iter()) {
        let rotated = matvec33(dst_r_src, point_src);
        point_dst[0] = rotated[0] + dst_t_src[0];
        point_dst[1] = rotated[1] + dst_t_src[1];
        point_dst[2] = rotated[2] + dst_t_src[2];
    }

    Ok(())
}

/// Compute the dot product of two 3-vectors.
#[inline]
pub fn dot_product3(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Multiply a 3x3 matrix by a 3-vector.
#[inline]
pub fn matvec33(m: &[[f64; 3]; 3], v: &[f64; 3]) -> [f64; 3] {
    [
        dot_product3(&m[0], v),
        dot_product3(&m[1], v),
        dot_product3(&m[2], v),
    ]
}

/// Multiply two 3x3 matrices `m = a * b`.
///
/// Example:
///
/// ```
/// use regkit_3d::linalg::{matmul33, IDENTITY33};
///
/// let a = [[1.0, 2.0, 3.0], [4.0, 5.0, 6.0], [7.0, 8.0, 9.0]];
/// let mut m = [[0.0; 3]; 3];
/// matmul33(&a, &IDENTITY33, &mut m);
/// assert_eq!(m, a);
/// ```
pub fn matmul33(a: &[[f64; 3]; 3], b: &[[f64; 3]; 3], m: &mut [[f64; 3]; 3]) {
    for (i, row) in m.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = a[i][0] * b[0][j] + a[i][1] * b[1][j] + a[i][2] * b[2][j];
        }
    }
}

/// Transpose a 3x3 matrix.
pub fn transpose33(m: &[[f64; 3]; 3]) -> [[f64; 3]; 3] {
    [
        [m[0][0], m[1][0], m[2][0]],
        [m[0][1], m[1][1], m[2][1]],
        [m[0][2], m[1][2], m[2][2]],
    ]
}

/// Compute the determinant of a 3x3 matrix.
pub fn determinant33(m: &[[f64; 3]; 3]) -> f64 {
    m[0][0] * (m[1][1] * m[2][2] - m[1][2] * m[2][1])
        - m[0][1] * (m[1][0] * m[2][2] - m[1][2] * m[2][0])
        + m[0][2] * (m[1][0] * m[2][1] - m[1][1] * m[2][0])
}

/// Check whether a 3x3 matrix is a proper rotation.
///
/// A proper rotation satisfies `R^T * R = I` and `det(R) = +1`, both up to `epsilon`.
pub fn is_proper_rotation(m: &[[f64; 3]; 3], epsilon: f64) -> bool {
    let mut rtr = [[0.0; 3]; 3];
    matmul33(&transpose33(m), m, &mut rtr);

    let orthonormal = rtr
        .iter()
        .zip(IDENTITY33.iter())
        .all(|(row, row_id)| {
            row.iter()
                .zip(row_id.iter())
                .all(|(v, e)| (v - e).abs() <= epsilon)
        });

    orthonormal && (determinant33(m) - 1.0).abs() <= epsilon
}
