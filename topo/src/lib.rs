//! # `topo`
//!
//! Batteries-included crate for the image-geometry core of a climbing-route
//! catalog. It is useful for quickly writing a measurement or registration
//! routine without assembling the individual crates; production applications
//! should import the member crates directly so that they don't pull in
//! functionality they never call.
//!
//! All of the shared vocabulary types live in the root of the crate. Modules
//! group the algorithms by concern:
//!
//! * [`gauge`] - locating bolts and calibrating pixel distances
//! * [`register`] - registering frames and reprojecting route annotations
//! * [`estimate`] - estimation of models from data
//! * [`consensus`] - finding the best estimated model from noisy data
//! * [`feature`] - feature extraction and description
//! * [`knn`] - searching for nearest neighbors
//! * [`image`] - image opening and processing/manipulation

pub use topo_core::{sample_consensus::*, *};

pub use bitarray;

/// Consensus algorithms (RANSAC)
pub mod consensus {
    pub use arrsac::Arrsac;
}

/// Estimation algorithms
pub mod estimate {
    pub use four_point::FourPoint;
}

/// Feature detection and description
pub mod feature {
    /// A robust and fast feature detector
    pub mod akaze {
        pub use akaze::*;
    }
}

/// Bolt location and pixel-to-real-world distance calibration
pub mod gauge {
    pub use bolt_gauge::*;
}

/// Frame registration and route-annotation reprojection
pub mod register {
    pub use topo_register::*;
}

/// Searching for nearest neighbors in small or large datasets
pub mod knn {
    pub use space::{Knn, LinearKnn, Metric, Neighbor};
}

/// Image opening and processing/manipulation
pub mod image {
    /// Re-export of [`image`](::image) to open and save images
    pub mod image {
        pub use ::image::*;
    }

    /// Re-export of [`imageproc`](::imageproc) for image manipulation routines
    pub mod imageproc {
        pub use ::imageproc::*;
    }
}
