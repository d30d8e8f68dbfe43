use image::{Rgba, RgbaImage};
use topo_core::{nalgebra::Matrix3, Homography};
use topo_register::{rasterize_route, warp_overlay, RegisterError, RoutePoint};

const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

fn layer_with_square() -> RgbaImage {
    let mut layer = RgbaImage::from_pixel(100, 80, CLEAR);
    for y in 30..40 {
        for x in 10..20 {
            layer.put_pixel(x, y, RED);
        }
    }
    layer
}

fn translation(dx: f64, dy: f64) -> Homography {
    let mut m = Matrix3::identity();
    m[(0, 2)] = dx;
    m[(1, 2)] = dy;
    Homography(m)
}

#[test]
fn identity_warp_preserves_the_layer() {
    let layer = layer_with_square();
    let warped = warp_overlay(&layer, &Homography::identity(), (100, 80)).expect("identity warps");
    for (x, y, pixel) in warped.enumerate_pixels() {
        let original = layer.get_pixel(x, y);
        for channel in 0..4 {
            assert!(
                (i16::from(pixel[channel]) - i16::from(original[channel])).abs() <= 1,
                "pixel ({}, {}) changed",
                x,
                y
            );
        }
    }
}

#[test]
fn translation_warp_moves_opaque_content() {
    let layer = layer_with_square();
    let warped = warp_overlay(&layer, &translation(30.0, 20.0), (100, 80)).expect("warps");

    // The square's interior lands at the offset location.
    assert_eq!(*warped.get_pixel(45, 55), RED);
    // The original location is uncovered and therefore transparent.
    assert_eq!(warped.get_pixel(15, 35)[3], 0);
    // Outside the warped region stays transparent.
    assert_eq!(warped.get_pixel(5, 5)[3], 0);
}

#[test]
fn singular_homography_cannot_warp() {
    let layer = layer_with_square();
    assert_eq!(
        warp_overlay(&layer, &Homography(Matrix3::zeros()), (100, 80)),
        Err(RegisterError::SingularHomography)
    );
}

#[test]
fn route_rasterization_strokes_the_polyline() {
    let points = [RoutePoint { x: 30, y: 40 }, RoutePoint { x: 30, y: 120 }];
    let canvas = rasterize_route(&points, (200, 200));

    // On the centerline, at a vertex, and just inside the stroke width.
    assert_ne!(canvas.get_pixel(30, 80)[3], 0);
    assert_ne!(canvas.get_pixel(30, 40)[3], 0);
    assert_ne!(canvas.get_pixel(38, 80)[3], 0);
    // Far from the line the canvas stays transparent.
    assert_eq!(canvas.get_pixel(150, 150)[3], 0);
    assert_eq!(canvas.get_pixel(60, 80)[3], 0);
}

#[test]
fn empty_route_is_fully_transparent() {
    let canvas = rasterize_route(&[], (50, 50));
    assert!(canvas.pixels().all(|p| p[3] == 0));
}

#[test]
fn rasterized_route_survives_a_warp() {
    let points = [RoutePoint { x: 30, y: 40 }, RoutePoint { x: 30, y: 120 }];
    let canvas = rasterize_route(&points, (200, 200));
    let warped = warp_overlay(&canvas, &translation(10.0, 0.0), (200, 200)).expect("warps");
    assert_ne!(warped.get_pixel(40, 80)[3], 0);
    assert_eq!(warped.get_pixel(150, 150)[3], 0);
}

#[test]
fn route_point_serialization_matches_the_stored_documents() {
    let point = RoutePoint { x: 30, y: 40 };
    assert_eq!(
        serde_json::to_string(&point).expect("serializes"),
        r#"{"x":30,"y":40}"#
    );

    let parsed: Vec<RoutePoint> =
        serde_json::from_str(r#"[{"x":1,"y":2},{"x":3,"y":4}]"#).expect("parses");
    assert_eq!(
        parsed,
        vec![RoutePoint { x: 1, y: 2 }, RoutePoint { x: 3, y: 4 }]
    );
}
