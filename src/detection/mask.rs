use image::{GrayImage, Luma};
use imageproc::drawing::draw_polygon_mut;

use crate::models::Contour;

const INSIDE: Luma<u8> = Luma([255u8]);

/// Rasterize the contour's filled interior into a blank same-size mask.
///
/// Returns `None` when the contour is too degenerate to enclose anything,
/// which the caller treats the same as a zero-area mask.
pub fn rasterize_interior(contour: &Contour, width: u32, height: u32) -> Option<GrayImage> {
    let mut points = contour.points.clone();
    // draw_polygon_mut closes the path itself and rejects an explicitly
    // repeated endpoint.
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    if points.len() < 3 {
        return None;
    }

    let mut mask = GrayImage::new(width, height);
    draw_polygon_mut(&mut mask, &points, INSIDE);
    Some(mask)
}

/// Apply a binary mask to a grayscale image: pixels outside the mask become
/// zero, pixels inside keep their intensity.
pub fn apply_mask(gray: &GrayImage, mask: &GrayImage) -> GrayImage {
    let mut out = GrayImage::new(gray.width(), gray.height());
    for (x, y, pixel) in gray.enumerate_pixels() {
        if mask.get_pixel(x, y)[0] != 0 {
            out.put_pixel(x, y, *pixel);
        }
    }
    out
}

/// Number of pixels inside the mask.
pub fn mask_area(mask: &GrayImage) -> u64 {
    mask.pixels().filter(|p| p[0] != 0).count() as u64
}
