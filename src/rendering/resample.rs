//! Nearest-neighbour raster scaling.

use image::RgbaImage;

/// Scale `src` to exactly `width x height` by nearest-neighbour sampling.
///
/// Destination pixel `(x, y)` copies source pixel
/// `(x * src_width / width, y * src_height / height)` with all four channels
/// untouched. Upscaling repeats pixels; there is no smoothing. A zero target
/// dimension yields an empty raster. An empty source yields a transparent
/// raster of the requested size.
pub fn resize_nearest(src: &RgbaImage, width: u32, height: u32) -> RgbaImage {
    let (src_width, src_height) = src.dimensions();
    if width == 0 || height == 0 || src_width == 0 || src_height == 0 {
        return RgbaImage::new(width, height);
    }

    RgbaImage::from_fn(width, height, |x, y| {
        let sx = (u64::from(x) * u64::from(src_width) / u64::from(width)) as u32;
        let sy = (u64::from(y) * u64::from(src_height) / u64::from(height)) as u32;
        *src.get_pixel(sx, sy)
    })
}
