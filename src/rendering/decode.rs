//! Raster decoding.
//!
//! The format (PNG, JPEG or GIF) is sniffed from the content, never from the
//! file extension.

use crate::error::QrError;
use image::{ImageReader, RgbaImage};
use std::fs::File;
use std::io::{BufRead, BufReader, Seek};
use std::path::Path;

/// Decode an image from a reader into RGBA.
pub fn decode_raster<R: BufRead + Seek>(reader: R) -> Result<RgbaImage, QrError> {
    let image = ImageReader::new(reader)
        .with_guessed_format()
        .map_err(|e| QrError::Decode(e.to_string()))?
        .decode()
        .map_err(|e| QrError::Decode(e.to_string()))?;
    Ok(image.to_rgba8())
}

/// Open and decode the image at `path`.
///
/// The file handle lives only for the duration of this call.
pub fn open_raster(path: &Path) -> Result<RgbaImage, QrError> {
    let file = File::open(path).map_err(|e| QrError::io(path, e))?;
    let image = decode_raster(BufReader::new(file))?;
    tracing::debug!(
        path = %path.display(),
        width = image.width(),
        height = image.height(),
        "Decoded image"
    );
    Ok(image)
}
