use crate::FeatureMatch;
use derive_more::{AsMut, AsRef, Deref, DerefMut, From, Into};
use nalgebra::{Matrix3, Point2, Vector3};
use sample_consensus::Model;

/// A 3×3 projective transform mapping points in reference-image space to
/// points in target-image space.
///
/// A `Homography` is only ever produced by a successful estimation; a failed
/// or degenerate estimate is represented by the absence of a value, never by a
/// partially valid matrix.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, AsMut, AsRef, Deref, DerefMut, From, Into)]
pub struct Homography(pub Matrix3<f64>);

impl Homography {
    /// The identity transform.
    pub fn identity() -> Self {
        Self(Matrix3::identity())
    }

    /// Applies the transform to a point and performs the projective divide.
    ///
    /// Returns `None` for points mapped onto the plane at infinity.
    pub fn transform(&self, point: Point2<f64>) -> Option<Point2<f64>> {
        let p = self.0 * Vector3::new(point.x, point.y, 1.0);
        if p.z.abs() < 1e-15 {
            return None;
        }
        Some(Point2::new(p.x / p.z, p.y / p.z))
    }

    /// The inverse transform, mapping target-image space back to
    /// reference-image space, if the matrix is invertible.
    pub fn inverse(&self) -> Option<Self> {
        self.0.try_inverse().map(Self)
    }

    /// Forward reprojection error in pixels for a correspondence.
    pub fn reprojection_error(&self, data: &FeatureMatch) -> f64 {
        let FeatureMatch(a, b) = *data;
        self.transform(a)
            .map(|projected| (projected - b).norm())
            .unwrap_or(f64::INFINITY)
    }
}

impl Model<FeatureMatch> for Homography {
    fn residual(&self, data: &FeatureMatch) -> f64 {
        self.reprojection_error(data)
    }
}
