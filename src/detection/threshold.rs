use image::GrayImage;

/// Classify masked pixels as filled material using an adaptive local-mean
/// threshold.
///
/// A pixel inside the mask counts as filled when it is darker than the mean
/// intensity of its square neighbourhood (side `2 * block_radius + 1`) by
/// more than `offset`. The local mean adapts to uneven lighting across the
/// bin interior where a single global cutoff would not.
///
/// Returns `(filled, total)` pixel counts within the mask.
pub fn count_filled(
    masked: &GrayImage,
    mask: &GrayImage,
    block_radius: u32,
    offset: i32,
) -> (u64, u64) {
    let (width, height) = masked.dimensions();
    let integral = compute_integral_image(masked);

    let mut filled: u64 = 0;
    let mut total: u64 = 0;

    for y in 0..height {
        for x in 0..width {
            if mask.get_pixel(x, y)[0] == 0 {
                continue;
            }
            total += 1;

            let local_mean = region_mean(&integral, width, height, x, y, block_radius);
            let threshold = (local_mean - offset as f64).max(0.0);
            if (masked.get_pixel(x, y)[0] as f64) < threshold {
                filled += 1;
            }
        }
    }

    (filled, total)
}

/// Compute the integral (summed-area table) of a grayscale image.
///
/// `table[y * (width+1) + x]` holds the sum of all pixels in the rectangle
/// from (0, 0) to (x, y), exclusive on both axes; the table carries a
/// zero-padded border row and column.
fn compute_integral_image(gray: &GrayImage) -> Vec<u64> {
    let (w, h) = gray.dimensions();
    let stride = (w + 1) as usize;
    let mut table = vec![0u64; stride * (h + 1) as usize];

    for y in 0..h {
        let mut row_sum: u64 = 0;
        for x in 0..w {
            row_sum += gray.get_pixel(x, y).0[0] as u64;
            let idx = (y + 1) as usize * stride + (x + 1) as usize;
            let above = y as usize * stride + (x + 1) as usize;
            table[idx] = row_sum + table[above];
        }
    }

    table
}

/// Mean pixel value within a square region centred on (cx, cy), clamped to
/// image bounds, via the precomputed integral image.
fn region_mean(
    integral: &[u64],
    img_width: u32,
    img_height: u32,
    cx: u32,
    cy: u32,
    radius: u32,
) -> f64 {
    let stride = (img_width + 1) as usize;

    let x1 = cx.saturating_sub(radius) as usize;
    let y1 = cy.saturating_sub(radius) as usize;
    let x2 = ((cx + radius + 1) as usize).min(img_width as usize);
    let y2 = ((cy + radius + 1) as usize).min(img_height as usize);

    let area = ((x2 - x1) * (y2 - y1)) as f64;
    if area == 0.0 {
        return 0.0;
    }

    // S = I[y2][x2] - I[y1][x2] - I[y2][x1] + I[y1][x1]
    let sum = integral[y2 * stride + x2] as f64 - integral[y1 * stride + x2] as f64
        - integral[y2 * stride + x1] as f64
        + integral[y1 * stride + x1] as f64;

    sum / area
}
