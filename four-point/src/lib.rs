use float_ord::FloatOrd;
use topo_core::{
    nalgebra::{DMatrix, Matrix3, Point2},
    sample_consensus::Estimator,
    FeatureMatch, Homography,
};

/// Hartley normalization: translate the centroid to the origin and scale so
/// that the mean distance from the origin is sqrt(2).
fn normalizing_transform(points: &[Point2<f64>]) -> Matrix3<f64> {
    let n = points.len() as f64;
    let cx = points.iter().map(|p| p.x).sum::<f64>() / n;
    let cy = points.iter().map(|p| p.y).sum::<f64>() / n;
    let mean_dist = points
        .iter()
        .map(|p| ((p.x - cx).powi(2) + (p.y - cy).powi(2)).sqrt())
        .sum::<f64>()
        / n;
    let s = if mean_dist > 1e-15 {
        core::f64::consts::SQRT_2 / mean_dist
    } else {
        1.0
    };
    Matrix3::new(s, 0.0, -s * cx, 0.0, s, -s * cy, 0.0, 0.0, 1.0)
}

fn apply(t: &Matrix3<f64>, p: Point2<f64>) -> Point2<f64> {
    // Normalizing transforms are affine, so no projective divide is needed.
    Point2::new(
        t[(0, 0)] * p.x + t[(0, 2)],
        t[(1, 1)] * p.y + t[(1, 2)],
    )
}

/// Encodes the direct linear transform constraint rows for each
/// correspondence. Every match contributes two rows of the 2n×9 system.
fn encode_dlt_system(matches: &[(Point2<f64>, Point2<f64>)]) -> DMatrix<f64> {
    let mut a = DMatrix::zeros(2 * matches.len(), 9);
    for (i, (s, d)) in matches.iter().enumerate() {
        a[(2 * i, 3)] = -s.x;
        a[(2 * i, 4)] = -s.y;
        a[(2 * i, 5)] = -1.0;
        a[(2 * i, 6)] = d.y * s.x;
        a[(2 * i, 7)] = d.y * s.y;
        a[(2 * i, 8)] = d.y;

        a[(2 * i + 1, 0)] = s.x;
        a[(2 * i + 1, 1)] = s.y;
        a[(2 * i + 1, 2)] = 1.0;
        a[(2 * i + 1, 6)] = -d.x * s.x;
        a[(2 * i + 1, 7)] = -d.x * s.y;
        a[(2 * i + 1, 8)] = -d.x;
    }
    a
}

/// Performs the [direct linear transformation](https://en.wikipedia.org/wiki/Direct_linear_transformation)
/// with Hartley normalization to estimate a planar homography from four or
/// more point correspondences.
///
/// Four correspondences determine the homography exactly; more than four are
/// solved in the least-squares sense, which is how the consensus inlier set is
/// refit after robust estimation.
#[derive(Copy, Clone, Debug)]
pub struct FourPoint {
    pub epsilon: f64,
    pub iterations: usize,
}

impl FourPoint {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn from_matches<I>(&self, data: I) -> Option<Homography>
    where
        I: Iterator<Item = FeatureMatch> + Clone,
    {
        let matches: Vec<FeatureMatch> = data.collect();
        if matches.len() < 4 {
            return None;
        }
        let src: Vec<Point2<f64>> = matches.iter().map(|&FeatureMatch(a, _)| a).collect();
        let dst: Vec<Point2<f64>> = matches.iter().map(|&FeatureMatch(_, b)| b).collect();

        let t_src = normalizing_transform(&src);
        let t_dst = normalizing_transform(&dst);
        let normalized: Vec<(Point2<f64>, Point2<f64>)> = src
            .iter()
            .zip(dst.iter())
            .map(|(&s, &d)| (apply(&t_src, s), apply(&t_dst, d)))
            .collect();

        let a = encode_dlt_system(&normalized);
        let ata = a.transpose() * &a;
        let eigens = ata.try_symmetric_eigen(self.epsilon, self.iterations)?;
        let eigenvector = eigens
            .eigenvalues
            .iter()
            .enumerate()
            .min_by_key(|&(_, &n)| FloatOrd(n))
            .map(|(ix, _)| eigens.eigenvectors.column(ix).into_owned())?;
        let h = Matrix3::new(
            eigenvector[0],
            eigenvector[1],
            eigenvector[2],
            eigenvector[3],
            eigenvector[4],
            eigenvector[5],
            eigenvector[6],
            eigenvector[7],
            eigenvector[8],
        );

        let h = t_dst.try_inverse()? * h * t_src;
        if !h.iter().all(|v| v.is_finite()) {
            return None;
        }
        // Fix the overall scale so that equal homographies compare equal.
        let scale = h[(2, 2)];
        let h = if scale.abs() > 1e-12 { h / scale } else { h };
        Some(Homography(h))
    }
}

impl Default for FourPoint {
    fn default() -> Self {
        Self {
            epsilon: 1e-12,
            iterations: 1000,
        }
    }
}

impl Estimator<FeatureMatch> for FourPoint {
    type Model = Homography;
    type ModelIter = Option<Homography>;
    const MIN_SAMPLES: usize = 4;

    fn estimate<I>(&self, data: I) -> Self::ModelIter
    where
        I: Iterator<Item = FeatureMatch> + Clone,
    {
        self.from_matches(data)
    }
}
