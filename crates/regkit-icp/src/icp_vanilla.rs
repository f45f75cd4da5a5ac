use serde::{Deserialize, Serialize};

use regkit_3d::{
    linalg::{transform_points3d, IDENTITY33},
    ops::euclidean_distance,
    pointcloud::PointCloud,
    transforms::RigidTransform,
};

use crate::error::{ensure_not_empty, IcpError};
use crate::ops::{find_correspondences, fit_transformation, update_transformation};

/// How the ICP loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ICPTermination {
    /// The mean error changed by less than the tolerance between two iterations.
    Converged,
    /// The iteration budget was exhausted before convergence.
    IterationLimitReached,
}

/// Result of the ICP algorithm.
///
/// The transformation is from the source to the target frame.
#[derive(Debug, Clone)]
pub struct ICPResult {
    /// Estimated rotation matrix, composed over all iterations.
    pub rotation: [[f64; 3]; 3],
    /// Estimated translation vector, composed over all iterations.
    pub translation: [f64; 3],
    /// The rigid transformation solved in the final iteration alone.
    pub last_step: RigidTransform,
    /// Number of iterations that did not meet the convergence test.
    pub num_iterations: usize,
    /// Last computed mean distance between the moved source and its correspondences.
    pub error: f64,
    /// Mean error of every iteration, in order.
    pub error_history: Vec<f64>,
    /// Reason the loop stopped.
    pub termination: ICPTermination,
}

impl ICPResult {
    /// Whether the loop stopped on the convergence test.
    pub fn converged(&self) -> bool {
        self.termination == ICPTermination::Converged
    }

    /// The estimated rotation and translation as a [`RigidTransform`].
    pub fn rigid_transform(&self) -> RigidTransform {
        RigidTransform::new(self.rotation, self.translation)
    }

    /// The estimated transformation as a 4x4 homogeneous matrix in row-major order.
    pub fn transform(&self) -> [[f64; 4]; 4] {
        self.rigid_transform().to_homogeneous()
    }
}

/// Structure to define the ICP parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ICPConvergenceCriteria {
    /// Maximum number of iterations to perform.
    pub max_iterations: usize,
    /// Convergence tolerance as the difference in mean error between two consecutive iterations.
    pub tolerance: f64,
}

impl Default for ICPConvergenceCriteria {
    fn default() -> Self {
        Self {
            max_iterations: 200,
            tolerance: 1e-5,
        }
    }
}

impl ICPConvergenceCriteria {
    fn validate(&self) -> Result<(), IcpError> {
        if self.max_iterations == 0 {
            return Err(IcpError::InvalidCriteria(
                "max_iterations must be positive".to_string(),
            ));
        }
        if self.tolerance.is_nan() || self.tolerance <= 0.0 {
            return Err(IcpError::InvalidCriteria(format!(
                "tolerance must be positive, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

/// Iterative Closest Point (ICP) algorithm using point to point distance,
/// starting from the identity transformation.
///
/// See [`icp_vanilla`] for the details.
pub fn icp(
    source: &PointCloud,
    target: &PointCloud,
    criteria: ICPConvergenceCriteria,
) -> Result<ICPResult, IcpError> {
    icp_vanilla(source, target, IDENTITY33, [0.0; 3], criteria)
}

/// Iterative Closest Point (ICP) algorithm using point to point distance.
///
/// Every iteration matches each moved source point with its nearest target
/// point, solves the best rigid motion for those pairs, moves the source with
/// it and measures the mean distance to the matched points. The loop stops when
/// that error changes by less than `criteria.tolerance`, or once
/// `criteria.max_iterations` iterations have failed to converge. Hitting the
/// iteration limit is not an error: the transformation found so far is returned.
///
/// # Arguments
///
/// * `source` - Source point cloud.
/// * `target` - Target point cloud.
/// * `initial_rot` - Initial rotation matrix. This is the rotation from the source to the target frame.
/// * `initial_trans` - Initial translation vector. This is the translation from the source to the target frame.
/// * `criteria` - Convergence criteria.
///
/// # Returns
///
/// * `result` - Result of the ICP algorithm containing the rotation, translation, and number of iterations.
///
/// # Errors
///
/// Returns [`IcpError`] if a point cloud is empty or the criteria are not positive.
///
/// # Example
///
/// ```
/// use regkit_3d::pointcloud::PointCloud;
/// use regkit_icp::{icp, ICPConvergenceCriteria};
///
/// let source = PointCloud::new(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]]);
/// let target = PointCloud::new(
///     source.points().iter().map(|p| [p[0] + 0.1, p[1], p[2]]).collect(),
/// );
///
/// let result = icp(&source, &target, ICPConvergenceCriteria::default()).unwrap();
/// assert!(result.converged());
/// assert!((result.translation[0] - 0.1).abs() < 1e-6);
/// ```
pub fn icp_vanilla(
    source: &PointCloud,
    target: &PointCloud,
    initial_rot: [[f64; 3]; 3],
    initial_trans: [f64; 3],
    criteria: ICPConvergenceCriteria,
) -> Result<ICPResult, IcpError> {
    criteria.validate()?;
    ensure_not_empty(source.points(), "source")?;
    ensure_not_empty(target.points(), "target")?;

    let mut rotation = initial_rot;
    let mut translation = initial_trans;

    // perform transformation using the initial rotation and translation
    let mut current_source = vec![[0.0; 3]; source.len()];
    transform_points3d(source.points(), &rotation, &translation, &mut current_source)?;
    let mut transformed_points = vec![[0.0; 3]; source.len()];

    let mut prev_error = f64::INFINITY;
    let mut num_iterations = 0;
    let mut error_history = Vec::new();

    // main icp loop
    let (termination, last_step) = loop {
        let now = std::time::Instant::now();

        // find closest points between current source and target
        let correspondences = find_correspondences(&current_source, target.points())?;

        // compute transformation between current source and closest points
        let step = fit_transformation(&current_source, &correspondences.points)?;

        // transform current source using the computed transformation
        transform_points3d(
            &current_source,
            &step.rotation,
            &step.translation,
            &mut transformed_points,
        )?;
        std::mem::swap(&mut current_source, &mut transformed_points);

        update_transformation(
            &mut rotation,
            &mut translation,
            &step.rotation,
            &step.translation,
        );

        // compute error between transformed source and its correspondences
        let current_error = mean_distance(&current_source, &correspondences.points);
        error_history.push(current_error);

        log::debug!(
            "Iteration: {} correspondences: {} error: {} elapsed: {:?}",
            num_iterations,
            correspondences.len(),
            current_error,
            now.elapsed()
        );

        // check convergence and exit if below tolerance
        if (prev_error - current_error).abs() < criteria.tolerance {
            log::debug!(
                "ICP converged after {} iterations with error {}",
                num_iterations,
                current_error
            );
            break (ICPTermination::Converged, step);
        }

        prev_error = current_error;
        num_iterations += 1;

        if num_iterations >= criteria.max_iterations {
            log::debug!(
                "ICP reached the limit of {} iterations with error {}",
                criteria.max_iterations,
                current_error
            );
            break (ICPTermination::IterationLimitReached, step);
        }
    };

    Ok(ICPResult {
        rotation,
        translation,
        last_step,
        num_iterations,
        error: error_history.last().copied().unwrap_or(f64::INFINITY),
        error_history,
        termination,
    })
}

fn mean_distance(points: &[[f64; 3]], matches: &[[f64; 3]]) -> f64 {
    let total = points
        .iter()
        .zip(matches.iter())
        .map(|(p, m)| euclidean_distance(p, m))
        .sum::<f64>();
    total / points.len() as f64
}
