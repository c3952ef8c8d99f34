//! Overlay pipeline tests against the real QR encoder and image decoder.

mod common;

use common::*;
use image::Rgba;
use pretty_assertions::assert_eq;
use qrmaker::error::QrError;
use qrmaker::models::CompositeRequest;
use qrmaker::services::{render_overlay, FastQrEncoder};

#[test]
fn test_logo_covers_centre_quarter() {
    let dir = tempfile::tempdir().unwrap();
    let logo = write_logo(dir.path(), "logo.png", 40, RED);
    let request = CompositeRequest::new(payloads::SHORT_URL, logo, 512, 25);

    let bytes = render_overlay(&FastQrEncoder, &request).unwrap();
    let image = assert_png_size(&bytes, 512, 512).to_rgba8();

    // 25% of 512 is a 128px logo offset by 192px
    assert_eq!(*image.get_pixel(192, 192), Rgba(RED));
    assert_eq!(*image.get_pixel(319, 319), Rgba(RED));
    assert_eq!(*image.get_pixel(256, 256), Rgba(RED));
    assert_ne!(*image.get_pixel(191, 191), Rgba(RED));
    assert_ne!(*image.get_pixel(320, 320), Rgba(RED));
    // Quiet zone
    assert_eq!(*image.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
}

#[test]
fn test_small_sizes_are_raised_to_minimum() {
    let dir = tempfile::tempdir().unwrap();
    let logo = write_logo(dir.path(), "logo.png", 8, RED);
    let request = CompositeRequest::new(payloads::SHORT_URL, logo, 50, 90);

    let bytes = render_overlay(&FastQrEncoder, &request).unwrap();
    let image = assert_png_size(&bytes, 128, 128).to_rgba8();

    // 40% of 128 is 51px at offset 38
    assert_eq!(*image.get_pixel(38, 38), Rgba(RED));
    assert_eq!(*image.get_pixel(88, 88), Rgba(RED));
    assert_ne!(*image.get_pixel(89, 89), Rgba(RED));
}

#[test]
fn test_jpeg_logo_is_accepted() {
    let dir = tempfile::tempdir().unwrap();
    let logo = write_gradient_jpeg(dir.path(), "photo.jpg", 64);
    let request = CompositeRequest::new(payloads::SHORT_URL, logo, 256, 20);

    let bytes = render_overlay(&FastQrEncoder, &request).unwrap();
    assert_png_size(&bytes, 256, 256);
}

#[test]
fn test_missing_logo_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let request = CompositeRequest::new(payloads::SHORT_URL, dir.path().join("nope.png"), 512, 25);

    let err = render_overlay(&FastQrEncoder, &request).unwrap_err();
    assert!(matches!(err, QrError::Io { .. }), "got {err:?}");
    assert_eq!(err.exit_code(), 1);
}

#[test]
fn test_undecodable_logo_is_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logo.png");
    std::fs::write(&path, b"definitely not an image").unwrap();
    let request = CompositeRequest::new(payloads::SHORT_URL, path, 512, 25);

    let err = render_overlay(&FastQrEncoder, &request).unwrap_err();
    assert!(matches!(err, QrError::Decode(_)), "got {err:?}");
}
