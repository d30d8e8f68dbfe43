use float_ord::FloatOrd;
use topo_core::nalgebra::Point2;

/// Which coordinate determines the sign when spreading points out from the
/// centroid.
#[derive(Debug, Clone, Copy)]
pub(crate) enum SpreadAxis {
    Horizontal,
    Vertical,
}

/// Finds the extreme pair of a point set along one spread axis.
///
/// Points are keyed by `sign · ‖p − centroid‖²`, where the sign says which
/// side of the centroid the point lies on (horizontally or vertically) and the
/// magnitude is the squared distance to the centroid. The pair is the minimum
/// and maximum of that key, so the two ends of the set's extent along the
/// chosen direction.
pub(crate) fn extreme_pair(
    points: &[Point2<f64>],
    centroid: Point2<f64>,
    axis: SpreadAxis,
) -> (Point2<f64>, Point2<f64>) {
    let key = |p: &Point2<f64>| {
        let offset = match axis {
            SpreadAxis::Horizontal => p.x - centroid.x,
            SpreadAxis::Vertical => p.y - centroid.y,
        };
        let sign = if offset == 0.0 { 0.0 } else { offset.signum() };
        FloatOrd(sign * (p - centroid).norm_squared())
    };
    let first = points
        .iter()
        .min_by_key(|p| key(p))
        .copied()
        .expect("extreme_pair requires a non-empty point set");
    let second = points
        .iter()
        .max_by_key(|p| key(p))
        .copied()
        .expect("extreme_pair requires a non-empty point set");
    (first, second)
}
