use crate::{linalg, ops, transforms::RigidTransform};

/// An ordered set of 3D points.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    // The points in the point cloud.
    points: Vec<[f64; 3]>,
}

impl PointCloud {
    /// Create a new point cloud from a list of points.
    pub fn new(points: Vec<[f64; 3]>) -> Self {
        Self { points }
    }

    /// Get the number of points in the point cloud.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check if the point cloud is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Get as reference the points in the point cloud.
    pub fn points(&self) -> &[[f64; 3]] {
        &self.points
    }

    /// Consume the point cloud and return its points.
    pub fn into_points(self) -> Vec<[f64; 3]> {
        self.points
    }

    /// The arithmetic mean of the points, `None` for an empty cloud.
    pub fn centroid(&self) -> Option<[f64; 3]> {
        ops::centroid(&self.points)
    }

    /// Return a copy of the point cloud moved by a rigid transform.
    pub fn transformed(&self, transform: &RigidTransform) -> PointCloud {
        let mut points = vec![[0.0; 3]; self.points.len()];
        for (dst, src) in points.iter_mut().zip(self.points.iter()) {
            *dst = transform.transform_point(src);
        }
        PointCloud::new(points)
    }

    /// Apply a rotation and translation to the points in place.
    pub fn transform_mut(
        &mut self,
        rotation: &[[f64; 3]; 3],
        translation: &[f64; 3],
    ) -> Result<(), linalg::LinalgError> {
        let src = self.points.clone();
        linalg::transform_points3d(&src, rotation, translation, &mut self.points)
    }
}

impl From<Vec<[f64; 3]>> for PointCloud {
    fn from(points: Vec<[f64; 3]>) -> Self {
        Self::new(points)
    }
}

impl AsRef<[[f64; 3]]> for PointCloud {
    fn as_ref(&self) -> &[[f64; 3]] {
        &self.points
    }
}
