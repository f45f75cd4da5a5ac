#![deny(missing_docs)]
//! Histogram and thresholding operations on grayscale images

/// Utilities to compute image histograms.
pub mod histogram;

/// Image thresholding operations.
pub mod threshold;
