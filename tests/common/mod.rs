#![allow(dead_code)]

use image::{DynamicImage, Rgb, RgbImage};
use tempfile::TempDir;

use binwatch::core::db::BinDb;

pub const WHITE: Rgb<u8> = Rgb([255, 255, 255]);
pub const BLACK: Rgb<u8> = Rgb([0, 0, 0]);

/// Fresh SQLite store in a scratch directory. Keep the TempDir alive for the
/// duration of the test.
pub async fn create_test_db() -> (BinDb, TempDir) {
    let temp_dir = tempfile::TempDir::new().expect("create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let db = BinDb::new(&db_path).await.expect("open test db");
    (db, temp_dir)
}

/// Uniform 500x500 canvas, the estimator's working resolution.
pub fn blank_canvas(color: Rgb<u8>) -> RgbImage {
    RgbImage::from_pixel(500, 500, color)
}

pub fn draw_filled_circle(img: &mut RgbImage, cx: i32, cy: i32, radius: i32, color: Rgb<u8>) {
    for y in 0..img.height() as i32 {
        for x in 0..img.width() as i32 {
            let dx = x - cx;
            let dy = y - cy;
            if dx * dx + dy * dy <= radius * radius {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// Circle outline with the given stroke width, drawn as an annulus.
pub fn draw_ring(img: &mut RgbImage, cx: i32, cy: i32, radius: i32, stroke: i32, color: Rgb<u8>) {
    let inner = radius - stroke;
    for y in 0..img.height() as i32 {
        for x in 0..img.width() as i32 {
            let dx = x - cx;
            let dy = y - cy;
            let d2 = dx * dx + dy * dy;
            if d2 <= radius * radius && d2 > inner * inner {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

pub fn draw_filled_rect(
    img: &mut RgbImage,
    x0: u32,
    y0: u32,
    x1: u32,
    y1: u32,
    color: Rgb<u8>,
) {
    for y in y0..y1 {
        for x in x0..x1 {
            img.put_pixel(x, y, color);
        }
    }
}

/// Fill a disc with a coarse checkerboard of two intensities. Gives the
/// region local contrast, which a local-mean threshold responds to where a
/// uniform dark patch would not.
pub fn speckle_disc(img: &mut RgbImage, cx: i32, cy: i32, radius: i32, dark: u8, light: u8) {
    for y in 0..img.height() as i32 {
        for x in 0..img.width() as i32 {
            let dx = x - cx;
            let dy = y - cy;
            if dx * dx + dy * dy <= radius * radius {
                let value = if (x / 10 + y / 10) % 2 == 0 { dark } else { light };
                img.put_pixel(x as u32, y as u32, Rgb([value, value, value]));
            }
        }
    }
}

pub fn to_dynamic(img: RgbImage) -> DynamicImage {
    DynamicImage::ImageRgb8(img)
}
