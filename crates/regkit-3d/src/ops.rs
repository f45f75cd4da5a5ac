/// Utility function to compute the Euclidean distance between two points.
///
/// # Arguments
///
/// * `a` - A point in 3D space.
/// * `b` - Another point in 3D space.
///
/// # Returns
///
/// The Euclidean distance between the two points.
///
/// Example:
/// ```
/// use regkit_3d::ops::euclidean_distance;
///
/// let a = [1.0, 2.0, 3.0];
/// let b = [4.0, 6.0, 3.0];
/// assert_eq!(euclidean_distance(&a, &b), 5.0);
/// ```
pub fn euclidean_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    squared_euclidean_distance(a, b).sqrt()
}

/// Utility function to compute the squared Euclidean distance between two points.
pub fn squared_euclidean_distance(a: &[f64; 3], b: &[f64; 3]) -> f64 {
    (a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)
}

/// Compute the centroid (arithmetic mean per axis) of a set of points.
///
/// Returns `None` if the set is empty.
///
/// Example:
/// ```
/// use regkit_3d::ops::centroid;
///
/// let points = vec![[0.0, 0.0, 0.0], [2.0, 4.0, 6.0]];
/// assert_eq!(centroid(&points), Some([1.0, 2.0, 3.0]));
/// assert_eq!(centroid(&[]), None);
/// ```
pub fn centroid(points: &[[f64; 3]]) -> Option<[f64; 3]> {
    if points.is_empty() {
        return None;
    }

    let mut sum = [0.0; 3];
    for p in points {
        sum[0] += p[0];
        sum[1] += p[1];
        sum[2] += p[2];
    }

    let n = points.len() as f64;
    Some([sum[0] / n, sum[1] / n, sum[2] / n])
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_euclidean_distance() {
        let a = [1.0, 2.0, 3.0];
        let b = [4.0, 5.0, 6.0];
        assert_relative_eq!(euclidean_distance(&a, &b), 27.0f64.sqrt(), epsilon = 1e-12);
        assert_eq!(squared_euclidean_distance(&a, &b), 27.0);
        assert_eq!(euclidean_distance(&a, &a), 0.0);
    }

    #[test]
    fn test_centroid() {
        let points = vec![[1.0, 2.0, 3.0], [4.0, 5.0, 6.0]];
        let c = centroid(&points);
        assert_eq!(c, Some([2.5, 3.5, 4.5]));
    }
}
