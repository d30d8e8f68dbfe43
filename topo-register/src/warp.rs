use crate::RegisterError;
use image::{Rgba, RgbaImage};
use imageproc::geometric_transformations::{warp_into, Interpolation, Projection};
use topo_core::Homography;

/// Warps an annotation layer from reference-image space into target-image
/// space through the estimated homography.
///
/// The output raster has the requested dimensions; everything outside the
/// warped region is fully transparent so the result can be composited over
/// the target frame. This is a pure function of its inputs.
pub fn warp_overlay(
    layer: &RgbaImage,
    homography: &Homography,
    out_dims: (u32, u32),
) -> Result<RgbaImage, RegisterError> {
    let m = homography.0;
    let coefficients = [
        m[(0, 0)] as f32,
        m[(0, 1)] as f32,
        m[(0, 2)] as f32,
        m[(1, 0)] as f32,
        m[(1, 1)] as f32,
        m[(1, 2)] as f32,
        m[(2, 0)] as f32,
        m[(2, 1)] as f32,
        m[(2, 2)] as f32,
    ];
    let projection =
        Projection::from_matrix(coefficients).ok_or(RegisterError::SingularHomography)?;

    let transparent = Rgba([0u8, 0, 0, 0]);
    let (width, height) = out_dims;
    let mut out = RgbaImage::from_pixel(width, height, transparent);
    warp_into(layer, &projection, Interpolation::Bilinear, transparent, &mut out);
    Ok(out)
}
