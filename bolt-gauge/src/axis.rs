use topo_core::nalgebra::{Point2, Vector2};

/// The principal axis of a point set: the line through the centroid along the
/// dominant eigenvector of the 2×2 covariance matrix.
///
/// The direction is held as a unit vector rather than a slope so that a
/// vertical axis is representable.
#[derive(Debug, Clone, Copy)]
pub(crate) struct PrincipalAxis {
    pub centroid: Point2<f64>,
    pub direction: Vector2<f64>,
}

impl PrincipalAxis {
    /// Perpendicular distance from a point to the axis line.
    pub fn distance(&self, point: &Point2<f64>) -> f64 {
        let d = point - self.centroid;
        (self.direction.x * d.y - self.direction.y * d.x).abs()
    }
}

/// Computes the centroid and principal axis of a point set with a closed-form
/// 2×2 eigendecomposition. Returns `None` only for an empty set.
///
/// For an isotropic set (a circle outline) the direction is arbitrary, which
/// is fine: the downstream diameter search measures the larger of two spreads
/// and does not care which diameter the band selects.
pub(crate) fn principal_axis(points: &[Point2<f64>]) -> Option<PrincipalAxis> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let centroid = Point2::new(
        points.iter().map(|p| p.x).sum::<f64>() / n,
        points.iter().map(|p| p.y).sum::<f64>() / n,
    );

    let (mut cxx, mut cxy, mut cyy) = (0.0, 0.0, 0.0);
    for p in points {
        let dx = p.x - centroid.x;
        let dy = p.y - centroid.y;
        cxx += dx * dx;
        cxy += dx * dy;
        cyy += dy * dy;
    }
    cxx /= n;
    cxy /= n;
    cyy /= n;

    // Largest eigenvalue of [[cxx, cxy], [cxy, cyy]].
    let half_trace = (cxx + cyy) / 2.0;
    let det = cxx * cyy - cxy * cxy;
    let lambda = half_trace + (half_trace * half_trace - det).max(0.0).sqrt();

    let direction = if cxy.abs() > 1e-12 {
        Vector2::new(lambda - cyy, cxy)
    } else if cxx >= cyy {
        Vector2::new(1.0, 0.0)
    } else {
        Vector2::new(0.0, 1.0)
    };
    let norm = direction.norm();
    let direction = if norm > 1e-12 {
        direction / norm
    } else {
        Vector2::new(1.0, 0.0)
    };

    Some(PrincipalAxis {
        centroid,
        direction,
    })
}
