use image::{DynamicImage, GrayImage, Luma};
use imageproc::drawing::draw_filled_circle_mut;
use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256PlusPlus;
use topo_core::nalgebra::Point2;
use topo_register::{RegisterError, Registration};

/// A deterministic cluttered scene with enough texture for AKAZE to latch
/// onto: overlapping gray discs on white form unique local constellations.
fn blob_scene(seed: u64) -> GrayImage {
    let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
    let mut img = GrayImage::from_pixel(640, 480, Luma([255u8]));
    for _ in 0..150 {
        let x = rng.gen_range(20i32..620);
        let y = rng.gen_range(20i32..460);
        let radius = rng.gen_range(4i32..24);
        let shade = rng.gen_range(0u8..200);
        draw_filled_circle_mut(&mut img, (x, y), radius, Luma([shade]));
    }
    img
}

fn corners(width: f64, height: f64) -> [Point2<f64>; 4] {
    [
        Point2::new(0.0, 0.0),
        Point2::new(width, 0.0),
        Point2::new(0.0, height),
        Point2::new(width, height),
    ]
}

#[test]
fn identical_images_register_as_identity() {
    let scene = DynamicImage::ImageLuma8(blob_scene(7));
    let alignment = Registration::new()
        .register(&scene, &scene)
        .expect("a scene must register against itself");

    for corner in corners(639.0, 479.0) {
        let mapped = alignment.homography.transform(corner).expect("finite");
        assert!(
            (mapped - corner).norm() < 1.0,
            "corner {:?} mapped to {:?}",
            corner,
            mapped
        );
    }
    assert!(
        alignment.inliers as f64 >= 0.9 * alignment.matches as f64,
        "inlier ratio too low: {}/{}",
        alignment.inliers,
        alignment.matches
    );
}

#[test]
fn translated_image_registers_with_the_offset() {
    let reference = blob_scene(7);
    let (dx, dy) = (25u32, 15u32);
    let mut target = GrayImage::from_pixel(640, 480, Luma([255u8]));
    for (x, y, pixel) in reference.enumerate_pixels() {
        let (tx, ty) = (x + dx, y + dy);
        if tx < 640 && ty < 480 {
            target.put_pixel(tx, ty, *pixel);
        }
    }

    let alignment = Registration::new()
        .register(
            &DynamicImage::ImageLuma8(reference),
            &DynamicImage::ImageLuma8(target),
        )
        .expect("a translated copy must register");

    for corner in corners(639.0, 479.0) {
        let mapped = alignment.homography.transform(corner).expect("finite");
        let expected = Point2::new(corner.x + dx as f64, corner.y + dy as f64);
        assert!(
            (mapped - expected).norm() < 2.0,
            "corner {:?} mapped to {:?}, expected {:?}",
            corner,
            mapped,
            expected
        );
    }
}

#[test]
fn featureless_target_is_rejected() {
    let scene = DynamicImage::ImageLuma8(blob_scene(7));
    let flat = DynamicImage::ImageLuma8(GrayImage::from_pixel(640, 480, Luma([255u8])));

    assert_eq!(
        Registration::new().register(&scene, &flat),
        Err(RegisterError::InsufficientFeatures)
    );
    assert_eq!(
        Registration::new().register(&flat, &scene),
        Err(RegisterError::InsufficientFeatures)
    );
}

#[test]
fn unrelated_scenes_do_not_register() {
    let a = DynamicImage::ImageLuma8(blob_scene(7));
    let b = DynamicImage::ImageLuma8(blob_scene(8));
    // No spurious transform: whatever the specific failure, the result must
    // not be a homography.
    assert!(Registration::new().register(&a, &b).is_err());
}
