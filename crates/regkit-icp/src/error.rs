use regkit_3d::linalg::LinalgError;

/// Error types for the ICP registration routines.
///
/// Every variant is an invalid-input condition raised before a transform is
/// produced; none of them is retried.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum IcpError {
    /// A point set has no points.
    #[error("Point set `{name}` is empty, at least one point is required")]
    EmptyPointSet {
        /// Label of the empty point set.
        name: &'static str,
    },

    /// Two point sets that must be matched one-to-one have different lengths.
    #[error("Mismatched point set lengths: {left_name} ({left_len}) != {right_name} ({right_len})")]
    MismatchedLengths {
        /// Label for the left-hand point set.
        left_name: &'static str,
        /// Length of the left-hand point set.
        left_len: usize,
        /// Label for the right-hand point set.
        right_name: &'static str,
        /// Length of the right-hand point set.
        right_len: usize,
    },

    /// The convergence criteria cannot drive the loop.
    #[error("Invalid convergence criteria: {0}")]
    InvalidCriteria(String),

    /// Error raised by the linear algebra helpers.
    #[error(transparent)]
    Linalg(#[from] LinalgError),
}

/// Fail with [`IcpError::EmptyPointSet`] if `points` is empty.
pub(crate) fn ensure_not_empty(points: &[[f64; 3]], name: &'static str) -> Result<(), IcpError> {
    if points.is_empty() {
        return Err(IcpError::EmptyPointSet { name });
    }
    Ok(())
}
