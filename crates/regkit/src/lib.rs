#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use regkit_3d as k3d;

#[doc(inline)]
pub use regkit_icp as icp;

#[doc(inline)]
pub use regkit_image as image;

#[doc(inline)]
pub use regkit_imgproc as imgproc;
