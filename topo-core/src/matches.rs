use nalgebra::Point2;

/// A pair of pixel locations judged to refer to the same physical feature,
/// the first in the reference image and the second in the target image.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct FeatureMatch(pub Point2<f64>, pub Point2<f64>);
