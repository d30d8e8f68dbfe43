use arrsac::Arrsac;
use four_point::FourPoint;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use topo_core::{
    nalgebra::{Matrix3, Point2},
    sample_consensus::Consensus,
    FeatureMatch, Homography,
};

fn test_homography() -> Homography {
    // Scale + translation + mild perspective.
    Homography(Matrix3::new(
        3.5, 0.1, 640.0, -0.05, 3.3, 480.0, 0.0001, -0.00005, 1.0,
    ))
}

fn project(h: &Homography, p: Point2<f64>) -> Point2<f64> {
    h.transform(p).expect("test points stay finite")
}

#[test]
fn exact_recovery_from_four_points() {
    let h_true = test_homography();
    let src = [
        Point2::new(0.0, 0.0),
        Point2::new(100.0, 0.0),
        Point2::new(100.0, 100.0),
        Point2::new(0.0, 100.0),
    ];
    let matches: Vec<FeatureMatch> = src
        .iter()
        .map(|&s| FeatureMatch(s, project(&h_true, s)))
        .collect();

    let h = FourPoint::new()
        .from_matches(matches.iter().copied())
        .expect("four non-degenerate points must produce a homography");

    for m in &matches {
        assert!(
            h.reprojection_error(m) < 1e-6,
            "reprojection error too large: {}",
            h.reprojection_error(m)
        );
    }
}

#[test]
fn least_squares_recovery_from_grid() {
    let h_true = test_homography();
    let mut matches = Vec::new();
    for i in 0..5 {
        for j in 0..5 {
            let s = Point2::new(f64::from(i) * 20.0, f64::from(j) * 20.0);
            matches.push(FeatureMatch(s, project(&h_true, s)));
        }
    }

    let h = FourPoint::new()
        .from_matches(matches.iter().copied())
        .expect("grid must produce a homography");

    for m in &matches {
        assert!(h.reprojection_error(m) < 1e-6);
    }
}

#[test]
fn identity_mapping_recovers_identity() {
    let src = [
        Point2::new(10.0, 10.0),
        Point2::new(200.0, 30.0),
        Point2::new(180.0, 220.0),
        Point2::new(20.0, 240.0),
        Point2::new(100.0, 120.0),
    ];
    let matches: Vec<FeatureMatch> = src.iter().map(|&s| FeatureMatch(s, s)).collect();

    let h = FourPoint::new()
        .from_matches(matches.iter().copied())
        .expect("identity mapping must be estimable");

    for &s in &src {
        let p = h.transform(s).expect("finite");
        assert!((p - s).norm() < 1e-8);
    }
}

#[test]
fn too_few_points_is_rejected() {
    let matches = [
        FeatureMatch(Point2::new(0.0, 0.0), Point2::new(1.0, 1.0)),
        FeatureMatch(Point2::new(1.0, 0.0), Point2::new(2.0, 1.0)),
        FeatureMatch(Point2::new(0.0, 1.0), Point2::new(1.0, 2.0)),
    ];
    assert!(FourPoint::new().from_matches(matches.iter().copied()).is_none());
}

#[test]
fn consensus_rejects_outliers() {
    let h_true = test_homography();
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(42);

    // 20 noisy inliers on a grid.
    let mut matches = Vec::new();
    for i in 0..20 {
        let s = Point2::new(f64::from(i % 5) * 30.0, f64::from(i / 5) * 30.0);
        let d = project(&h_true, s);
        let d = Point2::new(
            d.x + rng.gen_range(-0.5..0.5),
            d.y + rng.gen_range(-0.5..0.5),
        );
        matches.push(FeatureMatch(s, d));
    }

    // 8 gross outliers.
    for _ in 0..8 {
        matches.push(FeatureMatch(
            Point2::new(rng.gen_range(0.0..100.0), rng.gen_range(0.0..100.0)),
            Point2::new(rng.gen_range(0.0..1280.0), rng.gen_range(0.0..960.0)),
        ));
    }

    let mut arrsac = Arrsac::new(3.0, Xoshiro256PlusPlus::seed_from_u64(0));
    let (h, inliers) = arrsac
        .model_inliers(&FourPoint::new(), matches.iter().copied())
        .expect("consensus must find the dominant plane");

    assert!(inliers.len() >= 18, "only {} inliers", inliers.len());
    for m in &matches[..20] {
        assert!(h.reprojection_error(m) < 5.0);
    }
}
