//! Locates roughly circular fasteners ("bolts") in user-selected regions of a
//! climbing photo and calibrates pixel distances between them into real-world
//! measurements.
//!
//! The pipeline for a single region is: crop, Gaussian smoothing, Canny edge
//! detection, a morphological closing pass to fuse broken edge fragments,
//! contour tracing, and a principal-axis analysis of the largest traced
//! contour that yields the bolt's centroid and apparent diameter. Two located
//! bolts plus the known physical diameter of a bolt hanger then give a scale
//! factor from pixels to inches.
//!
//! [`BoltDetector`] holds the tunable constants and performs a single
//! location. [`BoltMeasurer`] owns the working image and the append-only log
//! of bolts located in it so far.

mod axis;
mod diameter;
mod measurer;
mod span;

pub use measurer::*;
pub use span::*;

use axis::principal_axis;
use diameter::{extreme_pair, SpreadAxis};
use image::{imageops, GrayImage};
use imageproc::{contours::find_contours, distance_transform::Norm, edges, filter, morphology};
use log::*;
use thiserror::Error;
use topo_core::{
    nalgebra::{Point2, Vector2},
    Bolt, RegionOfInterest,
};

/// Failure modes of bolt location. Both are blocking for the interactive
/// measurement flow and should be reported so the user can reselect a tighter
/// or looser region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BoltError {
    /// Edge detection found no closed boundary in the selected region.
    #[error("no contour found in the selected region")]
    NoContourFound,
    /// The axis-banded point set was too small or too collapsed to measure a
    /// diameter, typically because the region is mostly noise or the image
    /// resolution is too low.
    #[error("contour too degenerate to measure ({points} points within the axis band)")]
    DegenerateShape { points: usize },
}

/// A successfully located bolt along with the geometry that produced it, so a
/// presentation layer can render the outline without redoing any analysis.
#[derive(Debug, Clone)]
pub struct LocatedBolt {
    /// The measured bolt in full-image coordinates.
    pub bolt: Bolt,
    /// The winning contour in trace order, in full-image coordinates.
    pub contour: Vec<Point2<f64>>,
    /// The extreme pair whose separation was taken as the diameter.
    pub endpoints: (Point2<f64>, Point2<f64>),
}

/// Contains the tunable parameters of bolt location.
///
/// The defaults are resolution-dependent pragmatics, not tuned optima; expose
/// them to users who work with unusually small or large photos.
#[derive(Debug, Copy, Clone)]
pub struct BoltDetector {
    /// Sigma of the Gaussian smoothing pass applied before edge detection.
    /// The default is the sigma of a 7×7 kernel.
    pub blur_sigma: f32,

    /// Canny low threshold.
    pub canny_low: f32,

    /// Canny high threshold. Equal low/high thresholds disable hysteresis,
    /// which is a deliberate configuration here, not an oversight.
    pub canny_high: f32,

    /// Contour points further than `crop_height / band_divisor` from the
    /// principal axis are discarded before the diameter search.
    pub band_divisor: f64,
}

impl Default for BoltDetector {
    fn default() -> Self {
        Self {
            blur_sigma: 1.4,
            canny_low: 50.0,
            canny_high: 50.0,
            band_divisor: 20.0,
        }
    }
}

impl BoltDetector {
    pub fn new() -> Self {
        Default::default()
    }

    /// Locates a bolt within the normalized region of a grayscale image.
    ///
    /// The returned bolt is expressed in full-image coordinates. Fails with
    /// [`BoltError::NoContourFound`] when the region contains no traceable
    /// boundary and with [`BoltError::DegenerateShape`] when the boundary is
    /// too collapsed to carry a positive diameter.
    pub fn locate(
        &self,
        grayscale: &GrayImage,
        region: RegionOfInterest,
    ) -> Result<LocatedBolt, BoltError> {
        let (width, height) = grayscale.dimensions();
        let bounds = region.pixel_region(width, height);
        debug!(
            "locating bolt in {}x{} region at ({}, {})",
            bounds.width, bounds.height, bounds.x, bounds.y
        );
        let crop =
            imageops::crop_imm(grayscale, bounds.x, bounds.y, bounds.width, bounds.height)
                .to_image();

        let smoothed = filter::gaussian_blur_f32(&crop, self.blur_sigma);
        let edges = edges::canny(&smoothed, self.canny_low, self.canny_high);
        // One dilation and one erosion merge broken edge fragments into
        // connected boundaries before tracing.
        let closed = morphology::erode(&morphology::dilate(&edges, Norm::LInf, 1), Norm::LInf, 1);
        trace!("edge detection finished");

        let contours = find_contours::<i32>(&closed);
        debug!("traced {} contours", contours.len());
        let largest = contours
            .into_iter()
            .max_by_key(|contour| contour.points.len())
            .ok_or(BoltError::NoContourFound)?;

        // Point count, not enclosed area: the cheap proxy for "largest object"
        // that the measurement flow was built around.
        let points: Vec<Point2<f64>> = largest
            .points
            .iter()
            .map(|p| Point2::new(f64::from(p.x), f64::from(p.y)))
            .collect();
        trace!("largest contour has {} points", points.len());

        let axis = principal_axis(&points).ok_or(BoltError::NoContourFound)?;
        let band = f64::from(bounds.height) / self.band_divisor;
        let banded: Vec<Point2<f64>> = points
            .iter()
            .copied()
            .filter(|p| axis.distance(p) < band)
            .collect();
        if banded.len() < 2 {
            return Err(BoltError::DegenerateShape {
                points: banded.len(),
            });
        }

        let (h1, h2) = extreme_pair(&banded, axis.centroid, SpreadAxis::Horizontal);
        let (v1, v2) = extreme_pair(&banded, axis.centroid, SpreadAxis::Vertical);
        let horizontal = (h1 - h2).norm();
        let vertical = (v1 - v2).norm();
        // Whichever spread is larger wins, which keeps the estimate stable for
        // bolts photographed at arbitrary in-plane rotation.
        let (e1, e2, diameter) = if vertical > horizontal {
            (v1, v2, vertical)
        } else {
            (h1, h2, horizontal)
        };
        if diameter <= 0.0 {
            return Err(BoltError::DegenerateShape {
                points: banded.len(),
            });
        }

        let offset = Vector2::new(f64::from(bounds.x), f64::from(bounds.y));
        let bolt = Bolt {
            center: axis.centroid + offset,
            diameter_px: diameter,
        };
        info!(
            "located bolt at ({:.1}, {:.1}) with diameter {:.1} px",
            bolt.center.x, bolt.center.y, bolt.diameter_px
        );
        Ok(LocatedBolt {
            bolt,
            contour: points.into_iter().map(|p| p + offset).collect(),
            endpoints: (e1 + offset, e2 + offset),
        })
    }
}
