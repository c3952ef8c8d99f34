//! QR symbol construction.
//!
//! The core never builds QR symbols itself; it asks a [`QrEncoder`] for a
//! module grid and renders that grid to pixels. [`FastQrEncoder`] is the
//! production implementation.

use crate::error::QrError;
use image::{Rgba, RgbaImage};

/// Light margin drawn around the symbol, in modules.
pub const QUIET_ZONE: usize = 4;

const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Error-correction level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EcLevel {
    Low,
    Medium,
    Quartile,
    Highest,
}

/// Builds QR symbols for a payload.
pub trait QrEncoder {
    fn encode(&self, text: &str, level: EcLevel) -> Result<QrSymbol, QrError>;
}

/// A square module grid (dark = `true`), row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QrSymbol {
    size: usize,
    modules: Vec<bool>,
}

impl QrSymbol {
    pub fn new(size: usize, modules: Vec<bool>) -> Result<Self, QrError> {
        if size == 0 || modules.len() != size * size {
            return Err(QrError::Encoding(format!(
                "symbol needs {size}x{size} modules, got {}",
                modules.len()
            )));
        }
        Ok(Self { size, modules })
    }

    /// Side length in modules, without quiet zone.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.modules[y * self.size + x]
    }

    /// Render as an opaque `pixels x pixels` raster including the quiet zone.
    ///
    /// Each pixel takes the module under it (nearest mapping), so the output
    /// is always exactly the requested size.
    pub fn render(&self, pixels: u32) -> RgbaImage {
        let total = (self.size + 2 * QUIET_ZONE) as u64;
        if u64::from(pixels) < total {
            tracing::warn!(
                pixels,
                modules = total,
                "QR raster smaller than one pixel per module; modules will be dropped"
            );
        }

        let module_at = |p: u32| -> Option<usize> {
            if pixels == 0 {
                return None;
            }
            let m = (u64::from(p) * total / u64::from(pixels)) as usize;
            m.checked_sub(QUIET_ZONE).filter(|&m| m < self.size)
        };

        RgbaImage::from_fn(pixels, pixels, |x, y| match (module_at(x), module_at(y)) {
            (Some(mx), Some(my)) if self.is_dark(mx, my) => DARK,
            _ => LIGHT,
        })
    }
}

/// [`QrEncoder`] backed by `fast_qr`.
#[derive(Debug, Default, Clone, Copy)]
pub struct FastQrEncoder;

impl QrEncoder for FastQrEncoder {
    fn encode(&self, text: &str, level: EcLevel) -> Result<QrSymbol, QrError> {
        use fast_qr::ECL;

        let ecl = match level {
            EcLevel::Low => ECL::L,
            EcLevel::Medium => ECL::M,
            EcLevel::Quartile => ECL::Q,
            EcLevel::Highest => ECL::H,
        };

        let qr = fast_qr::QRBuilder::new(text.to_owned())
            .ecl(ecl)
            .build()
            .map_err(|e| QrError::Encoding(format!("QR code generation failed: {e}")))?;

        let size = qr.size;
        let mut modules = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                modules.push(qr[row][col].value());
            }
        }
        tracing::debug!(modules = size, ?level, "Built QR symbol");
        QrSymbol::new(size, modules)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn diagonal(size: usize) -> QrSymbol {
        let modules = (0..size * size).map(|i| i % size == i / size).collect();
        QrSymbol::new(size, modules).unwrap()
    }

    #[test]
    fn test_symbol_rejects_wrong_module_count() {
        assert!(QrSymbol::new(3, vec![true; 8]).is_err());
        assert!(QrSymbol::new(0, Vec::new()).is_err());
    }

    #[test]
    fn test_render_exact_size() {
        let symbol = diagonal(21);
        for pixels in [10, 29, 128, 300] {
            assert_eq!(symbol.render(pixels).dimensions(), (pixels, pixels));
        }
    }

    #[test]
    fn test_render_integer_scale() {
        // 5 modules + 8 quiet = 13; 26 px -> 2 px per module
        let symbol = diagonal(5);
        let image = symbol.render(26);
        assert_eq!(image.get_pixel(0, 0), &LIGHT);
        assert_eq!(image.get_pixel(8, 8), &DARK);
        assert_eq!(image.get_pixel(9, 9), &DARK);
        assert_eq!(image.get_pixel(10, 8), &LIGHT);
        assert_eq!(image.get_pixel(16, 16), &DARK);
        assert_eq!(image.get_pixel(18, 18), &LIGHT);
    }

    #[test]
    fn test_render_is_opaque() {
        let image = diagonal(9).render(64);
        assert!(image.pixels().all(|p| p.0[3] == 255));
    }

    #[test]
    fn test_fast_qr_highest_level() {
        let symbol = FastQrEncoder
            .encode("https://example.com", EcLevel::Highest)
            .unwrap();
        // Side length is always 4 * version + 17
        assert!(symbol.size() >= 21);
        assert_eq!((symbol.size() - 17) % 4, 0);
        // Top-left finder pattern corner is dark
        assert!(symbol.is_dark(0, 0));
    }

    #[test]
    fn test_fast_qr_rejects_oversized_payload() {
        let payload = "a".repeat(4000);
        let err = FastQrEncoder.encode(&payload, EcLevel::Highest).unwrap_err();
        assert!(matches!(err, QrError::Encoding(_)));
    }
}
