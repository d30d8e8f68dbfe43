use crate::{span_between, BoltDetector, BoltError, LocatedBolt, Span};
use image::{DynamicImage, GrayImage, RgbaImage};
use log::*;
use topo_core::{Bolt, RegionOfInterest};

/// The working state of an interactive measurement session: the current
/// raster, its grayscale derivative, and the ordered log of bolts located in
/// it so far.
///
/// Bolts are only meaningful relative to the raster that produced them, so
/// loading a new image discards the log. Detection takes `&mut self`, which
/// serializes "detect then measure" into a single-threaded transaction.
#[derive(Debug, Clone)]
pub struct BoltMeasurer {
    detector: BoltDetector,
    image: RgbaImage,
    grayscale: GrayImage,
    bolts: Vec<Bolt>,
}

impl BoltMeasurer {
    /// Starts a measurement session over an image with the default detector.
    pub fn new(image: &DynamicImage) -> Self {
        Self::with_detector(image, BoltDetector::default())
    }

    pub fn with_detector(image: &DynamicImage, detector: BoltDetector) -> Self {
        Self {
            detector,
            image: image.to_rgba8(),
            grayscale: image.to_luma8(),
            bolts: Vec::new(),
        }
    }

    /// Replaces the working image and discards all bolts located so far.
    pub fn set_image(&mut self, image: &DynamicImage) {
        debug!("resetting measurement session for a new image");
        self.image = image.to_rgba8();
        self.grayscale = image.to_luma8();
        self.bolts.clear();
    }

    /// Locates a bolt in the given region and appends it to the log.
    pub fn detect(&mut self, region: RegionOfInterest) -> Result<LocatedBolt, BoltError> {
        let located = self.detector.locate(&self.grayscale, region)?;
        self.bolts.push(located.bolt);
        Ok(located)
    }

    /// The bolts located so far, in detection order.
    pub fn bolts(&self) -> &[Bolt] {
        &self.bolts
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn grayscale(&self) -> &GrayImage {
        &self.grayscale
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    /// The calibrated distance between the two most recently located bolts,
    /// or `None` when fewer than two bolts have been located.
    pub fn latest_span(&self, reference_diameter_in: f64) -> Option<Span> {
        match self.bolts.as_slice() {
            [.., previous, latest] => Some(span_between(latest, previous, reference_diameter_in)),
            _ => None,
        }
    }
}
