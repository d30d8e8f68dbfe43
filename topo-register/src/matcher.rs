use crate::RegisterError;
use akaze::Akaze;
use arrsac::Arrsac;
use bitarray::{BitArray, Hamming};
use four_point::FourPoint;
use image::DynamicImage;
use log::*;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256PlusPlus;
use space::{Knn, LinearKnn};
use topo_core::{nalgebra::Point2, sample_consensus::Consensus, FeatureMatch, Homography};

/// A successful registration: the homography from reference-image space to
/// target-image space, plus the correspondence counts that supported it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Alignment {
    pub homography: Homography,
    /// Correspondences that survived the ratio test.
    pub matches: usize,
    /// Correspondences consistent with the homography within the inlier
    /// threshold.
    pub inliers: usize,
}

/// Contains the tunable parameters of frame registration.
///
/// A `Registration` is a cheap value constructed per call; no state persists
/// between registrations.
#[derive(Debug, Copy, Clone)]
pub struct Registration {
    /// AKAZE detector response threshold. The default matches the detector's
    /// own default; raise it for sparser, faster extraction.
    pub detector_threshold: f64,

    /// Lowe's ratio: a match is kept only if the nearest descriptor distance
    /// is below this fraction of the second-nearest.
    pub lowes_ratio: f32,

    /// Reprojection error in pixels below which a correspondence counts as an
    /// inlier.
    pub inlier_threshold: f64,

    /// Minimum inlier support for a homography to be considered valid at all.
    pub min_inliers: usize,

    /// Seed for the consensus RNG. Fixed by default so that registering the
    /// same pair of frames twice gives the same answer.
    pub seed: u64,
}

impl Default for Registration {
    fn default() -> Self {
        Self {
            detector_threshold: 0.001,
            lowes_ratio: 0.8,
            inlier_threshold: 3.0,
            min_inliers: 8,
            seed: 0,
        }
    }
}

impl Registration {
    pub fn new() -> Self {
        Default::default()
    }

    /// Estimates the homography mapping `reference` onto `target`.
    ///
    /// Either returns a fully valid homography supported by at least
    /// [`min_inliers`](Self::min_inliers) correspondences, or an error;
    /// partial or degenerate estimates are never returned.
    pub fn register(
        &self,
        reference: &DynamicImage,
        target: &DynamicImage,
    ) -> Result<Alignment, RegisterError> {
        let akaze = Akaze::new(self.detector_threshold);
        let (reference_keypoints, reference_descriptors) = akaze.extract(reference);
        let (target_keypoints, target_descriptors) = akaze.extract(target);
        debug!(
            "extracted {} reference and {} target descriptors",
            reference_descriptors.len(),
            target_descriptors.len()
        );
        // The ratio test needs two neighbors on the target side.
        if reference_descriptors.is_empty() || target_descriptors.len() < 2 {
            return Err(RegisterError::InsufficientFeatures);
        }

        let index_pairs = self.ratio_matches(&reference_descriptors, &target_descriptors);
        if index_pairs.is_empty() {
            return Err(RegisterError::NoGoodMatches);
        }
        let correspondences: Vec<FeatureMatch> = index_pairs
            .iter()
            .map(|&[reference_ix, target_ix]| {
                let (rx, ry) = reference_keypoints[reference_ix].point;
                let (tx, ty) = target_keypoints[target_ix].point;
                FeatureMatch(
                    Point2::new(f64::from(rx), f64::from(ry)),
                    Point2::new(f64::from(tx), f64::from(ty)),
                )
            })
            .collect();
        debug!("{} matches survived the ratio test", correspondences.len());

        let estimator = FourPoint::new();
        let mut consensus = Arrsac::new(
            self.inlier_threshold,
            Xoshiro256PlusPlus::seed_from_u64(self.seed),
        );
        let (model, inliers) = consensus
            .model_inliers(&estimator, correspondences.iter().copied())
            .ok_or(RegisterError::EstimationFailed {
                matches: correspondences.len(),
                inliers: 0,
                needed: self.min_inliers,
            })?;

        // Refit on the full inlier set for a least-squares polish, then score
        // every correspondence against the final model.
        let homography = estimator
            .from_matches(inliers.iter().map(|&ix| correspondences[ix]))
            .unwrap_or(model);
        let inliers = correspondences
            .iter()
            .filter(|m| homography.reprojection_error(m) < self.inlier_threshold)
            .count();
        if inliers < self.min_inliers {
            return Err(RegisterError::EstimationFailed {
                matches: correspondences.len(),
                inliers,
                needed: self.min_inliers,
            });
        }

        info!(
            "registered frames with {} inliers of {} matches",
            inliers,
            correspondences.len()
        );
        Ok(Alignment {
            homography,
            matches: correspondences.len(),
            inliers,
        })
    }

    /// Performs non-symmetric 2-NN matching from the reference descriptors to
    /// the target descriptors and applies Lowe's ratio test, rejecting
    /// correspondences whose two best candidates are nearly equally plausible.
    fn ratio_matches(
        &self,
        reference: &[BitArray<64>],
        target: &[BitArray<64>],
    ) -> Vec<[usize; 2]> {
        let knn = LinearKnn {
            metric: Hamming,
            iter: target.iter(),
        };
        (0..reference.len())
            .filter_map(|reference_ix| {
                let neighbors = knn.knn(&reference[reference_ix], 2);
                (neighbors.len() == 2
                    && (neighbors[0].distance as f32)
                        < self.lowes_ratio * neighbors[1].distance as f32)
                    .then(|| [reference_ix, neighbors[0].index])
            })
            .collect()
    }
}
