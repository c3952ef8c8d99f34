//! PNG serialisation of rendered canvases.

use std::io::Cursor;

use crate::error::ArtError;

/// Encode a square 8-bit greyscale canvas.
pub fn encode_gray(width: u32, pixels: &[u8]) -> Result<Vec<u8>, ArtError> {
    encode(width, png::ColorType::Grayscale, pixels)
}

/// Encode a square 8-bit RGB canvas.
pub fn encode_rgb(width: u32, pixels: &[u8]) -> Result<Vec<u8>, ArtError> {
    encode(width, png::ColorType::Rgb, pixels)
}

fn encode(width: u32, color_type: png::ColorType, data: &[u8]) -> Result<Vec<u8>, ArtError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, width);
        encoder.set_color(color_type);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ArtError::Png(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| ArtError::Png(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_gray_signature() {
        let bytes = encode_gray(2, &[0, 255, 255, 0]).unwrap();
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn test_encode_rejects_short_buffer() {
        let err = encode_rgb(2, &[0, 0, 0]).unwrap_err();
        assert!(matches!(err, ArtError::Png(_)));
    }
}
