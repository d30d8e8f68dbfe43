use image::{Rgba, RgbaImage};
use imageproc::{
    drawing::{draw_filled_circle_mut, draw_polygon_mut},
    point::Point,
};
use serde::{Deserialize, Serialize};

/// One vertex of a user-drawn route polyline, in reference-image pixel
/// coordinates. The serialized shape (`{"x": …, "y": …}`) is the persisted
/// annotation format stored alongside a reference photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutePoint {
    pub x: i32,
    pub y: i32,
}

/// Stroke appearance for rasterized route lines.
#[derive(Debug, Clone, Copy)]
pub struct RouteStyle {
    pub color: Rgba<u8>,
    pub stroke_width: u32,
}

impl Default for RouteStyle {
    fn default() -> Self {
        Self {
            // The catalog's route-line blue.
            color: Rgba([0, 51, 170, 255]),
            stroke_width: 20,
        }
    }
}

/// Strokes an ordered route polyline onto a transparent canvas of the given
/// dimensions, producing the annotation layer that [`warp_overlay`] projects
/// onto a captured frame.
///
/// Segments are drawn as filled quads of the stroke width with round joints,
/// so the rasterization matches how the route was originally drawn on screen.
///
/// [`warp_overlay`]: crate::warp_overlay
pub fn rasterize_route(points: &[RoutePoint], dims: (u32, u32)) -> RgbaImage {
    rasterize_route_styled(points, dims, RouteStyle::default())
}

pub fn rasterize_route_styled(
    points: &[RoutePoint],
    dims: (u32, u32),
    style: RouteStyle,
) -> RgbaImage {
    let (width, height) = dims;
    let mut canvas = RgbaImage::from_pixel(width, height, Rgba([0u8, 0, 0, 0]));
    let radius = (style.stroke_width / 2).max(1) as i32;

    // Round joints and caps at every vertex.
    for p in points {
        draw_filled_circle_mut(&mut canvas, (p.x, p.y), radius, style.color);
    }

    for pair in points.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        let (dx, dy) = ((b.x - a.x) as f64, (b.y - a.y) as f64);
        let length = (dx * dx + dy * dy).sqrt();
        if length < 1.0 {
            continue;
        }
        // Perpendicular offset of half the stroke width makes each segment a
        // filled quad.
        let ox = (-dy / length * f64::from(radius)).round() as i32;
        let oy = (dx / length * f64::from(radius)).round() as i32;
        let quad = [
            Point::new(a.x + ox, a.y + oy),
            Point::new(b.x + ox, b.y + oy),
            Point::new(b.x - ox, b.y - oy),
            Point::new(a.x - ox, a.y - oy),
        ];
        if quad[0] != quad[3] && quad[1] != quad[2] {
            draw_polygon_mut(&mut canvas, &quad, style.color);
        }
    }

    canvas
}
