//! Embedding parameters.
//!
//! [`ArtParams`] collects every knob of the artistic encoder. The defaults
//! produce a version 6 code at 8 pixels per module with the image inset by
//! four modules on each side.

use crate::error::ArtError;

/// Largest pixels-per-module factor accepted by the encoder.
pub const MAX_SCALE: u32 = 64;

/// Configuration for [`encode`](crate::encode).
///
/// # Example
///
/// ```
/// use qr_art::ArtParams;
///
/// let params = ArtParams::new()
///     .seed(42)
///     .version(4)
///     .dither(true);
/// assert_eq!(params.version, 4);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtParams {
    /// Seed for every random choice the encoder makes.
    pub seed: i64,
    /// QR version (1..=40). Larger versions hold longer payloads.
    pub version: u8,
    /// Output pixels per QR module (1..=64).
    pub scale: u32,
    /// QR mask pattern (0..=7).
    pub mask: u8,
    /// Horizontal inset of the image, in modules.
    pub dx: i32,
    /// Vertical inset of the image, in modules.
    pub dy: i32,
    /// Jitter the quantisation threshold with seeded noise.
    pub rand_control: bool,
    /// Use error diffusion instead of a plain threshold.
    pub dither: bool,
    /// Only steer data codeword modules; error-correction modules stay solid.
    pub only_data: bool,
    /// Emit the control image instead of the final code.
    pub save_control: bool,
}

impl Default for ArtParams {
    fn default() -> Self {
        Self {
            seed: 0,
            version: 6,
            scale: 8,
            mask: 2,
            dx: 4,
            dy: 4,
            rand_control: false,
            dither: false,
            only_data: false,
            save_control: false,
        }
    }
}

impl ArtParams {
    /// Create parameters with default values.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(mut self, seed: i64) -> Self {
        self.seed = seed;
        self
    }

    pub fn version(mut self, version: u8) -> Self {
        self.version = version;
        self
    }

    pub fn scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    pub fn mask(mut self, mask: u8) -> Self {
        self.mask = mask;
        self
    }

    pub fn offset(mut self, dx: i32, dy: i32) -> Self {
        self.dx = dx;
        self.dy = dy;
        self
    }

    pub fn rand_control(mut self, enabled: bool) -> Self {
        self.rand_control = enabled;
        self
    }

    pub fn dither(mut self, enabled: bool) -> Self {
        self.dither = enabled;
        self
    }

    pub fn only_data(mut self, enabled: bool) -> Self {
        self.only_data = enabled;
        self
    }

    pub fn save_control(mut self, enabled: bool) -> Self {
        self.save_control = enabled;
        self
    }

    /// Check every ranged parameter.
    pub fn validate(&self) -> Result<(), ArtError> {
        if !(1..=40).contains(&self.version) {
            return Err(ArtError::InvalidParameter {
                name: "version",
                expected: "1..=40",
            });
        }
        if self.mask > 7 {
            return Err(ArtError::InvalidParameter {
                name: "mask",
                expected: "0..=7",
            });
        }
        if !(1..=MAX_SCALE).contains(&self.scale) {
            return Err(ArtError::InvalidParameter {
                name: "scale",
                expected: "1..=64",
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(ArtParams::new().validate().is_ok());
    }

    #[test]
    fn test_builder_sets_fields() {
        let params = ArtParams::new()
            .seed(7)
            .version(3)
            .scale(4)
            .mask(5)
            .offset(1, 2)
            .rand_control(true)
            .dither(true)
            .only_data(true)
            .save_control(true);

        assert_eq!(params.seed, 7);
        assert_eq!(params.version, 3);
        assert_eq!(params.scale, 4);
        assert_eq!(params.mask, 5);
        assert_eq!((params.dx, params.dy), (1, 2));
        assert!(params.rand_control && params.dither && params.only_data && params.save_control);
    }

    #[test]
    fn test_rejects_out_of_range() {
        assert!(ArtParams::new().version(0).validate().is_err());
        assert!(ArtParams::new().version(41).validate().is_err());
        assert!(ArtParams::new().mask(8).validate().is_err());
        assert!(ArtParams::new().scale(0).validate().is_err());
        assert!(ArtParams::new().scale(MAX_SCALE + 1).validate().is_err());
    }
}
