//! Registers a freshly captured photo of a climbing wall against a stored
//! reference photo, so that route lines drawn on the reference can be
//! reprojected onto the new frame.
//!
//! Registration is sparse feature matching: AKAZE keypoints and binary
//! descriptors are extracted from both images, correspondences are selected
//! with a nearest-neighbor ratio test under Hamming distance, and a planar
//! homography is estimated from the survivors with ARRSAC over the four-point
//! DLT estimator. The homography then drives a perspective warp of the
//! annotation raster into the new frame.
//!
//! Registration is a best-effort enhancement: every failure mode is reported
//! as a [`RegisterError`] and callers are expected to degrade to "no overlay"
//! rather than surfacing the error to the user.

mod matcher;
mod route;
mod warp;

pub use matcher::*;
pub use route::*;
pub use warp::*;

use thiserror::Error;

/// Failure modes of the registration pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegisterError {
    /// One of the images yielded too few descriptors to even attempt
    /// matching.
    #[error("an input image produced no usable descriptors")]
    InsufficientFeatures,
    /// The ratio test eliminated every candidate correspondence.
    #[error("no matches survived the ratio test")]
    NoGoodMatches,
    /// The consensus process could not produce a homography supported by
    /// enough inliers.
    #[error("homography estimation failed: {inliers} inliers of {matches} matches (need {needed})")]
    EstimationFailed {
        matches: usize,
        inliers: usize,
        needed: usize,
    },
    /// The homography is numerically singular and cannot drive a warp.
    #[error("homography is numerically singular")]
    SingularHomography,
}
