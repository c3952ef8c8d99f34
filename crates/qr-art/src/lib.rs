//! qr-art: QR codes whose pixels are steered by a source image
//!
//! Each module of a regular QR symbol is drawn as a block of pixels. The
//! block's centre keeps the module's colour so the code still scans; the
//! rest of the block follows the tone of a source image. Finder, format and
//! alignment patterns are never touched.
//!
//! # Quick Start
//!
//! ```no_run
//! use qr_art::ArtParams;
//!
//! let photo = std::fs::read("photo.png").unwrap();
//! let params = ArtParams::new().seed(42).version(6).dither(true);
//! let png = qr_art::encode("https://example.com", &photo, &params).unwrap();
//! std::fs::write("qrcode.png", png).unwrap();
//! ```
//!
//! # Determinism
//!
//! All randomness comes from a `StdRng` seeded with [`ArtParams::seed`]. The
//! same payload, image bytes and parameters always produce the same PNG.
//! Choosing a seed (for example from the clock) is the caller's job.

pub mod error;
pub mod grid;
pub mod halftone;
pub mod output;
pub mod params;
pub mod target;

pub use error::ArtError;
pub use grid::{ModuleGrid, ModuleKind};
pub use halftone::{Halftone, QUIET_ZONE};
pub use params::ArtParams;
pub use target::{Placement, Target};

/// Produce an artistic QR code as PNG bytes.
///
/// `image` holds the raw bytes of a PNG, JPEG or GIF file. Returns
/// [`ArtError::DataTooLong`] when `text` does not fit in `params.version`.
pub fn encode(text: &str, image: &[u8], params: &ArtParams) -> Result<Vec<u8>, ArtError> {
    params.validate()?;

    let grid = ModuleGrid::build(text, params.version, params.mask)?;
    let canvas = (grid.size() + 2 * QUIET_ZONE) * params.scale as usize;
    let target = Target::decode(image, canvas, placement(grid.size(), params))?;
    let halftone = halftone::render(&grid, &target, params);

    if params.save_control {
        output::encode_rgb(canvas as u32, &halftone.control_rgb())
    } else {
        output::encode_gray(canvas as u32, halftone.pixels())
    }
}

/// Canvas rectangle covered by the image: the module grid inset by
/// `dx`/`dy` modules per side. Insets are clamped so the area keeps at least
/// one module and never extends past the quiet zone.
fn placement(modules: usize, params: &ArtParams) -> Placement {
    let modules = modules as i64;
    let quiet = QUIET_ZONE as i64;
    let scale = i64::from(params.scale);
    let max_inset = (modules - 1) / 2;
    let dx = i64::from(params.dx).clamp(-quiet, max_inset);
    let dy = i64::from(params.dy).clamp(-quiet, max_inset);

    Placement {
        x: (quiet + dx) * scale,
        y: (quiet + dy) * scale,
        width: ((modules - 2 * dx) * scale) as u32,
        height: ((modules - 2 * dy) * scale) as u32,
    }
}
