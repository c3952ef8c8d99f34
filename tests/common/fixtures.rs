//! Test fixtures and constants.

use image::{Rgb, RgbImage, Rgba, RgbaImage};
use std::path::{Path, PathBuf};

/// Payloads used across tests
pub mod payloads {
    pub const SHORT_URL: &str = "https://mysite.com";

    /// Far beyond what a version 1 symbol holds at any error-correction level
    pub fn oversized() -> String {
        "x".repeat(300)
    }
}

pub const RED: [u8; 4] = [255, 0, 0, 255];

/// Write a solid RGBA PNG logo into `dir` and return its path.
pub fn write_logo(dir: &Path, name: &str, side: u32, color: [u8; 4]) -> PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(side, side, Rgba(color))
        .save(&path)
        .expect("write logo fixture");
    path
}

/// Write a horizontal grey ramp as JPEG into `dir` and return its path.
pub fn write_gradient_jpeg(dir: &Path, name: &str, side: u32) -> PathBuf {
    let path = dir.join(name);
    let image = RgbImage::from_fn(side, side, |x, _| {
        let v = (x * 255 / side.max(1)) as u8;
        Rgb([v, v, v])
    });
    image.save(&path).expect("write gradient fixture");
    path
}

/// PNG bytes of a solid logo, for pipelines that take encoded input.
pub fn logo_bytes(side: u32, color: [u8; 4]) -> Vec<u8> {
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::ImageRgba8(RgbaImage::from_pixel(side, side, Rgba(color)))
        .write_to(&mut out, image::ImageFormat::Png)
        .expect("encode logo fixture");
    out.into_inner()
}
