//! Overlay mode: a logo composited over the centre of a QR code.

use crate::error::QrError;
use crate::models::CompositeRequest;
use crate::rendering::{encode_png, open_raster, resize_nearest};
use crate::services::qr_encoder::{EcLevel, QrEncoder};
use image::{Rgba, RgbaImage};

/// Produce the overlay-mode PNG for `request`.
pub fn render_overlay(
    encoder: &dyn QrEncoder,
    request: &CompositeRequest,
) -> Result<Vec<u8>, QrError> {
    let logo = open_raster(&request.image_path)?;
    let composite = compose_overlay(encoder, request, &logo)?;
    encode_png(&composite)
}

/// Build the composited raster without touching the filesystem.
///
/// The symbol is always built at the highest error-correction level: the
/// logo hides a solid block of modules in the middle of the code.
pub fn compose_overlay(
    encoder: &dyn QrEncoder,
    request: &CompositeRequest,
    logo: &RgbaImage,
) -> Result<RgbaImage, QrError> {
    let symbol = encoder.encode(&request.payload, EcLevel::Highest)?;
    let mut canvas = symbol.render(request.qr_size());

    let side = request.overlay_side();
    let offset = request.offset();
    let resized = resize_nearest(logo, side, side);

    tracing::debug!(
        qr_size = request.qr_size(),
        overlay_side = side,
        offset,
        logo_width = logo.width(),
        logo_height = logo.height(),
        "Compositing overlay"
    );

    for (x, y, pixel) in resized.enumerate_pixels() {
        blend_over(canvas.get_pixel_mut(offset + x, offset + y), *pixel);
    }

    Ok(canvas)
}

/// Source-over alpha compositing of `src` onto `dst`, rounded to nearest.
fn blend_over(dst: &mut Rgba<u8>, src: Rgba<u8>) {
    let sa = u32::from(src.0[3]);
    if sa == 255 {
        *dst = src;
        return;
    }
    if sa == 0 {
        return;
    }

    let da = u32::from(dst.0[3]);
    let inv = 255 - sa;
    // Output alpha scaled by 255
    let out_a = sa * 255 + da * inv;

    for c in 0..3 {
        let sc = u32::from(src.0[c]);
        let dc = u32::from(dst.0[c]);
        dst.0[c] = ((sc * sa * 255 + dc * da * inv + out_a / 2) / out_a) as u8;
    }
    dst.0[3] = ((out_a + 127) / 255) as u8;
}
