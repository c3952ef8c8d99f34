//! Assertion helpers for tests.

use image::DynamicImage;
use pretty_assertions::assert_eq;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Assert the bytes are a PNG and decode them
pub fn assert_png(bytes: &[u8]) -> DynamicImage {
    assert!(
        bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG image, got {} bytes starting with {:?}",
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
    image::load_from_memory(bytes).expect("PNG should decode")
}

/// Assert the bytes are a PNG of the given dimensions
pub fn assert_png_size(bytes: &[u8], width: u32, height: u32) -> DynamicImage {
    let image = assert_png(bytes);
    assert_eq!(
        (image.width(), image.height()),
        (width, height),
        "Unexpected PNG dimensions"
    );
    image
}
