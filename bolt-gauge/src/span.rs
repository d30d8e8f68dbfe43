use topo_core::Bolt;

/// The width of a standard climbing bolt hanger in inches, the usual
/// real-world calibration reference.
pub const STANDARD_HANGER_IN: f64 = 2.25;

/// A calibrated distance between two bolt centers.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Span {
    /// Euclidean distance between the bolt centers in pixels.
    pub pixels: f64,
    /// The same distance converted to feet using the reference diameter.
    pub feet: f64,
}

/// Estimates the real-world distance between two bolts from their pixel
/// separation, calibrated by the known physical diameter of a bolt.
///
/// The scale factor is the reference diameter in inches over the average of
/// the two apparent diameters in pixels; the result is converted from inches
/// to feet. This assumes both bolts are the same physical size and roughly
/// coplanar with the camera, an approximation rather than a perspective
/// correction. It is symmetric in the two bolts and linear in the reference
/// diameter.
pub fn span_between(a: &Bolt, b: &Bolt, reference_diameter_in: f64) -> Span {
    let pixels = (a.center - b.center).norm();
    let feet = 2.0 * reference_diameter_in * pixels / (a.diameter_px + b.diameter_px) / 12.0;
    Span { pixels, feet }
}
