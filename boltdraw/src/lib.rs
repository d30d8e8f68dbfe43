use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing;
use log::*;
use topo::{
    gauge::{BoltMeasurer, LocatedBolt},
    RegionOfInterest,
};

const CONTOUR: Rgba<u8> = Rgba([255, 0, 0, 255]);
const EXTREME: Rgba<u8> = Rgba([0, 0, 0, 255]);
const DIAMETER: Rgba<u8> = Rgba([0, 255, 0, 255]);
const CENTROID: Rgba<u8> = Rgba([255, 0, 255, 255]);
const SPAN: Rgba<u8> = Rgba([0, 0, 0, 255]);

/// Runs bolt detection over each region in turn and renders the detection
/// geometry onto a copy of the image: the winning contour, the diameter
/// endpoints, the centroid, and a segment between each pair of consecutively
/// located bolts. Measured spans go to the log; regions where detection fails
/// are reported and skipped.
pub fn render_bolt_measurements(
    image: &DynamicImage,
    regions: &[RegionOfInterest],
    reference_diameter_in: f64,
) -> DynamicImage {
    let mut measurer = BoltMeasurer::new(image);
    let mut canvas = image.to_rgba8();

    for region in regions {
        let located = match measurer.detect(*region) {
            Ok(located) => located,
            Err(err) => {
                warn!("skipping region {:?}: {}", region, err);
                continue;
            }
        };
        draw_located(&mut canvas, &located);

        if let [.., previous, latest] = measurer.bolts() {
            drawing::draw_line_segment_mut(
                &mut canvas,
                (previous.center.x as f32, previous.center.y as f32),
                (latest.center.x as f32, latest.center.y as f32),
                SPAN,
            );
            if let Some(span) = measurer.latest_span(reference_diameter_in) {
                info!("{:.1} px between bolts: {:.1} feet", span.pixels, span.feet);
            }
        }
    }

    DynamicImage::ImageRgba8(canvas)
}

fn draw_located(canvas: &mut RgbaImage, located: &LocatedBolt) {
    let (width, height) = canvas.dimensions();
    for p in &located.contour {
        let (x, y) = (p.x.round() as i64, p.y.round() as i64);
        if (0..i64::from(width)).contains(&x) && (0..i64::from(height)).contains(&y) {
            canvas.put_pixel(x as u32, y as u32, CONTOUR);
        }
    }

    let (e1, e2) = located.endpoints;
    drawing::draw_line_segment_mut(
        canvas,
        (e1.x as f32, e1.y as f32),
        (e2.x as f32, e2.y as f32),
        DIAMETER,
    );
    drawing::draw_filled_circle_mut(canvas, (e1.x as i32, e1.y as i32), 3, EXTREME);
    drawing::draw_filled_circle_mut(canvas, (e2.x as i32, e2.y as i32), 3, EXTREME);
    drawing::draw_filled_circle_mut(
        canvas,
        (
            located.bolt.center.x as i32,
            located.bolt.center.y as i32,
        ),
        3,
        CENTROID,
    );
}
