use regkit_3d::{
    linalg,
    ops::{centroid, euclidean_distance},
    transforms::RigidTransform,
};

use crate::error::{ensure_not_empty, IcpError};

/// Ratio between the second and the first singular value of the
/// cross-covariance below which the rotation is not uniquely determined.
const DEGENERACY_RATIO: f64 = 1e-12;

/// Nearest neighbours of a source point set inside a target point set.
#[derive(Debug, Clone, PartialEq)]
pub struct Correspondences {
    /// For each source point, the index of its closest target point.
    pub indices: Vec<usize>,
    /// For each source point, its closest target point.
    pub points: Vec<[f64; 3]>,
    /// For each source point, the Euclidean distance to its closest target point.
    pub distances: Vec<f64>,
}

impl Correspondences {
    /// Number of matched pairs.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether there are no matched pairs.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Compute the pairwise Euclidean distance matrix between two point sets.
///
/// Entry `(i, j)` is the distance between `source[i]` and `target[j]`.
///
/// Example:
///
/// ```
/// use regkit_icp::distance_matrix;
///
/// let source = vec![[0.0, 0.0, 0.0]];
/// let target = vec![[3.0, 4.0, 0.0], [0.0, 0.0, 1.0]];
/// let distances = distance_matrix(&source, &target);
/// assert_eq!(distances.nrows(), 1);
/// assert_eq!(distances.read(0, 0), 5.0);
/// assert_eq!(distances.read(0, 1), 1.0);
/// ```
pub fn distance_matrix(source: &[[f64; 3]], target: &[[f64; 3]]) -> faer::Mat<f64> {
    faer::Mat::<f64>::from_fn(source.len(), target.len(), |i, j| {
        euclidean_distance(&source[i], &target[j])
    })
}

/// Find the closest target point for every source point.
///
/// The search is exhaustive over the full distance matrix. When several
/// target points are at the same distance, the one with the lowest index wins.
///
/// # Arguments
///
/// * `source` - The moving point set.
/// * `target` - The fixed point set.
///
/// # Errors
///
/// Returns [`IcpError::EmptyPointSet`] if either set is empty.
///
/// Example:
///
/// ```
/// use regkit_icp::find_correspondences;
///
/// let source = vec![[0.0, 0.0, 0.0], [1.0, 1.0, 0.0]];
/// let target = vec![[1.0, 0.0, 0.0], [1.0, 1.0, 0.0]];
/// let correspondences = find_correspondences(&source, &target).unwrap();
/// assert_eq!(correspondences.indices, vec![0, 1]);
/// ```
pub fn find_correspondences(
    source: &[[f64; 3]],
    target: &[[f64; 3]],
) -> Result<Correspondences, IcpError> {
    ensure_not_empty(source, "source")?;
    ensure_not_empty(target, "target")?;

    let distances = distance_matrix(source, target);

    let mut correspondences = Correspondences {
        indices: Vec::with_capacity(source.len()),
        points: Vec::with_capacity(source.len()),
        distances: Vec::with_capacity(source.len()),
    };

    for i in 0..distances.nrows() {
        let mut best_index = 0;
        let mut best_distance = distances.read(i, 0);
        for j in 1..distances.ncols() {
            let d = distances.read(i, j);
            // strict comparison keeps the first minimum on ties
            if d < best_distance {
                best_index = j;
                best_distance = d;
            }
        }
        correspondences.indices.push(best_index);
        correspondences.points.push(target[best_index]);
        correspondences.distances.push(best_distance);
    }

    Ok(correspondences)
}

/// Compute the centroids of two sets of points.
///
/// # Errors
///
/// Returns [`IcpError::EmptyPointSet`] if either set is empty.
pub fn compute_centroids(
    points1: &[[f64; 3]],
    points2: &[[f64; 3]],
) -> Result<([f64; 3], [f64; 3]), IcpError> {
    let centroid1 = centroid(points1).ok_or(IcpError::EmptyPointSet { name: "points1" })?;
    let centroid2 = centroid(points2).ok_or(IcpError::EmptyPointSet { name: "points2" })?;
    Ok((centroid1, centroid2))
}

/// Compute the rigid transformation that best aligns two matched point sets.
///
/// Finds the rotation `R` and translation `t` minimizing
/// `Σ ‖R · src_i + t − dst_i‖²` with the SVD of the cross-covariance matrix:
///
/// 1. Compute the centroids of both sets and center them.
/// 2. Build `H = Σ (src_i − src_mean) · (dst_i − dst_mean)^T`.
/// 3. Decompose `H = U · S · V^T` and set `R = V · U^T`.
/// 4. If `det(R) < 0`, negate the third row of `V^T` and recompute `R`.
/// 5. Set `t = dst_mean − R · src_mean`.
///
/// The returned rotation is always proper (`det(R) = +1`). When the points are
/// collinear or coincident the rotation is not unique; a warning is logged and
/// one valid solution is returned.
///
/// For more details, see: Arun, K., Huang, T. S., and Blostein, S. D.
/// "Least-squares fitting of two 3-D point sets." IEEE PAMI, 1987.
///
/// # Arguments
///
/// * `points_in_src` - Source points.
/// * `points_in_dst` - Destination points, matched one-to-one with `points_in_src`.
///
/// # Errors
///
/// Returns [`IcpError::EmptyPointSet`] for empty inputs and
/// [`IcpError::MismatchedLengths`] if the sets differ in length.
pub fn fit_transformation(
    points_in_src: &[[f64; 3]],
    points_in_dst: &[[f64; 3]],
) -> Result<RigidTransform, IcpError> {
    if points_in_src.len() != points_in_dst.len() {
        return Err(IcpError::MismatchedLengths {
            left_name: "points_in_src",
            left_len: points_in_src.len(),
            right_name: "points_in_dst",
            right_len: points_in_dst.len(),
        });
    }
    ensure_not_empty(points_in_src, "points_in_src")?;

    // identity transformation is a special case
    if points_in_src == points_in_dst {
        return Ok(RigidTransform::identity());
    }

    let (src_centroid, dst_centroid) = compute_centroids(points_in_src, points_in_dst)?;

    // H = Σ[(src - src_mean) * (dst - dst_mean)^T]
    let mut h = [[0.0; 3]; 3];
    for (p_in_src, p_in_dst) in points_in_src.iter().zip(points_in_dst.iter()) {
        for (r, row) in h.iter_mut().enumerate() {
            let src_centered = p_in_src[r] - src_centroid[r];
            for (c, val) in row.iter_mut().enumerate() {
                *val += src_centered * (p_in_dst[c] - dst_centroid[c]);
            }
        }
    }

    let svd = faer::Mat::<f64>::from_fn(3, 3, |i, j| h[i][j]).svd();
    let s = svd.s_diagonal();
    if s.read(1) <= DEGENERACY_RATIO * s.read(0) {
        log::warn!(
            "Degenerate cross-covariance (singular values {:.3e}, {:.3e}, {:.3e}), rotation is not unique",
            s.read(0),
            s.read(1),
            s.read(2)
        );
    }

    let u = mat_to_array33(svd.u());
    let mut vt = linalg::transpose33(&mat_to_array33(svd.v()));
    let ut = linalg::transpose33(&u);

    // R = V * U^T
    let mut rotation = [[0.0; 3]; 3];
    linalg::matmul33(&linalg::transpose33(&vt), &ut, &mut rotation);

    // reflection: flip the last right singular vector
    if linalg::determinant33(&rotation) < 0.0 {
        vt[2] = [-vt[2][0], -vt[2][1], -vt[2][2]];
        linalg::matmul33(&linalg::transpose33(&vt), &ut, &mut rotation);
    }

    let rotated_centroid = linalg::matvec33(&rotation, &src_centroid);
    let translation = [
        dst_centroid[0] - rotated_centroid[0],
        dst_centroid[1] - rotated_centroid[1],
        dst_centroid[2] - rotated_centroid[2],
    ];

    Ok(RigidTransform::new(rotation, translation))
}

/// Accumulate an incremental transformation into a running one.
///
/// The increment is applied after the running transformation:
/// `R_new = R_delta * R_old` and `t_new = R_delta * t_old + t_delta`.
pub fn update_transformation(
    rr: &mut [[f64; 3]; 3],
    tt: &mut [f64; 3],
    rr_delta: &[[f64; 3]; 3],
    tt_delta: &[f64; 3],
) {
    linalg::matmul33(rr_delta, &rr.clone(), rr);

    let t = linalg::matvec33(rr_delta, tt);
    tt[0] = t[0] + tt_delta[0];
    tt[1] = t[1] + tt_delta[1];
    tt[2] = t[2] + tt_delta[2];
}

fn mat_to_array33(m: faer::MatRef<'_, f64>) -> [[f64; 3]; 3] {
    let mut out = [[0.0; 3]; 3];
    for (i, row) in out.iter_mut().enumerate() {
        for (j, val) in row.iter_mut().enumerate() {
            *val = m.read(i, j);
        }
    }
    out
}
