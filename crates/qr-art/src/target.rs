//! Target tone plane derived from the source image.
//!
//! The image is flattened onto white, reduced to luma and resampled
//! (nearest neighbour) onto the canvas area it should cover. Canvas pixels
//! outside that area carry no preference.

use image::{imageops, imageops::FilterType, RgbaImage};

use crate::error::ArtError;

/// Per-pixel tone preference over the whole output canvas.
#[derive(Debug, Clone)]
pub struct Target {
    width: usize,
    tones: Vec<Option<u8>>,
}

/// Placement of the image on the canvas, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Target {
    /// Decode `bytes` (PNG, JPEG or GIF, sniffed from content) and lay the
    /// image over `placement` on a `canvas x canvas` plane.
    pub fn decode(bytes: &[u8], canvas: usize, placement: Placement) -> Result<Self, ArtError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| ArtError::Image(e.to_string()))?
            .to_rgba8();
        Ok(Self::from_rgba(&image, canvas, placement))
    }

    pub fn from_rgba(image: &RgbaImage, canvas: usize, placement: Placement) -> Self {
        let mut tones = vec![None; canvas * canvas];
        if image.width() == 0 || image.height() == 0 {
            return Self {
                width: canvas,
                tones,
            };
        }

        let fitted = imageops::resize(
            image,
            placement.width,
            placement.height,
            FilterType::Nearest,
        );
        for (px, py, pixel) in fitted.enumerate_pixels() {
            let cx = placement.x + i64::from(px);
            let cy = placement.y + i64::from(py);
            if cx < 0 || cy < 0 || cx >= canvas as i64 || cy >= canvas as i64 {
                continue;
            }
            tones[cy as usize * canvas + cx as usize] = Some(luma_on_white(pixel.0));
        }

        Self {
            width: canvas,
            tones,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn tone(&self, x: usize, y: usize) -> Option<u8> {
        self.tones[y * self.width + x]
    }
}

/// Rec. 601 luma of an RGBA pixel composited over white.
fn luma_on_white([r, g, b, a]: [u8; 4]) -> u8 {
    let luma = (u32::from(r) * 299 + u32::from(g) * 587 + u32::from(b) * 114) / 1000;
    let alpha = u32::from(a);
    ((luma * alpha + 255 * (255 - alpha) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_luma_extremes() {
        assert_eq!(luma_on_white([0, 0, 0, 255]), 0);
        assert_eq!(luma_on_white([255, 255, 255, 255]), 255);
        // Fully transparent pixels read as white paper
        assert_eq!(luma_on_white([0, 0, 0, 0]), 255);
    }

    #[test]
    fn test_placement_limits_preference() {
        let image = RgbaImage::from_pixel(2, 2, Rgba([0, 0, 0, 255]));
        let placement = Placement {
            x: 2,
            y: 3,
            width: 4,
            height: 4,
        };
        let target = Target::from_rgba(&image, 10, placement);

        assert_eq!(target.tone(2, 3), Some(0));
        assert_eq!(target.tone(5, 6), Some(0));
        assert_eq!(target.tone(1, 3), None);
        assert_eq!(target.tone(6, 6), None);
    }

    #[test]
    fn test_placement_clipped_to_canvas() {
        let image = RgbaImage::from_pixel(1, 1, Rgba([255, 255, 255, 255]));
        let placement = Placement {
            x: -2,
            y: -2,
            width: 4,
            height: 4,
        };
        let target = Target::from_rgba(&image, 3, placement);
        assert_eq!(target.tone(0, 0), Some(255));
        assert_eq!(target.tone(1, 1), Some(255));
        assert_eq!(target.tone(2, 2), None);
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let placement = Placement {
            x: 0,
            y: 0,
            width: 1,
            height: 1,
        };
        let err = Target::decode(b"not an image", 4, placement).unwrap_err();
        assert!(matches!(err, ArtError::Image(_)));
    }
}
