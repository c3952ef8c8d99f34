//! PNG serialisation of composited rasters.

use crate::error::QrError;
use image::RgbaImage;
use std::io::Cursor;

/// Encode an RGBA raster as PNG.
///
/// The raster is written with fast settings and then re-compressed with
/// oxipng; if optimisation fails the unoptimised bytes are returned.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, QrError> {
    let (width, height) = image.dimensions();
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| QrError::PngEncode(e.to_string()))?;
        writer
            .write_image_data(image.as_raw())
            .map_err(|e| QrError::PngEncode(e.to_string()))?;
    }
    let png_bytes = buf.into_inner();

    let optimized = match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            ..Default::default()
        },
    ) {
        Ok(bytes) => bytes,
        Err(e) => {
            tracing::warn!(%e, "PNG optimisation failed, keeping unoptimised output");
            png_bytes
        }
    };

    tracing::debug!(width, height, bytes = optimized.len(), "Encoded PNG");
    Ok(optimized)
}
