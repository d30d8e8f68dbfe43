use crate::ImagePoint;
use nalgebra::Point2;

/// A located bolt: a roughly circular fastener whose apparent diameter
/// calibrates pixel-to-real-world scale.
///
/// Bolts are created by the detector, never mutated afterwards, and are only
/// meaningful relative to the raster they were detected in. The owner of the
/// raster keeps them in an append-only log so that "most recent" and
/// "previous" are well defined under any container semantics.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Bolt {
    /// Center of the bolt in full-image pixel coordinates.
    pub center: Point2<f64>,
    /// Apparent diameter in pixels. Always positive; degenerate contours are
    /// rejected during detection.
    pub diameter_px: f64,
}

impl ImagePoint for Bolt {
    fn image_point(&self) -> Point2<f64> {
        self.center
    }
}
