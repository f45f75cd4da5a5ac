#![deny(missing_docs)]
#![doc = env!("CARGO_PKG_DESCRIPTION")]

mod error;
pub use error::IcpError;

mod icp_vanilla;
pub use icp_vanilla::*;

mod ops;
pub use ops::{
    compute_centroids, distance_matrix, find_correspondences, fit_transformation,
    update_transformation, Correspondences,
};
