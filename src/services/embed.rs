//! Embed mode: hand the source image to the artistic encoder.

use crate::error::QrError;
use crate::models::EmbedRequest;
use qr_art::{ArtError, ArtParams};

/// Produces artistic QR codes from a payload and raw image bytes.
pub trait ArtEncoder {
    fn embed(&self, text: &str, image: &[u8], params: &ArtParams) -> Result<Vec<u8>, ArtError>;
}

/// [`ArtEncoder`] backed by the `qr-art` crate.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrArtEncoder;

impl ArtEncoder for QrArtEncoder {
    fn embed(&self, text: &str, image: &[u8], params: &ArtParams) -> Result<Vec<u8>, ArtError> {
        qr_art::encode(text, image, params)
    }
}

/// Return `seed`, or the value of `now` when `seed` is the sentinel 0.
pub fn resolve_seed(seed: i64, now: impl FnOnce() -> i64) -> i64 {
    if seed == 0 {
        now()
    } else {
        seed
    }
}

/// Nanoseconds since the Unix epoch, for seeding unseeded runs.
pub fn clock_seed() -> i64 {
    let now = chrono::Utc::now();
    now.timestamp_nanos_opt()
        .unwrap_or_else(|| now.timestamp_micros())
}

/// Run the artistic encoder once and return its output unchanged.
///
/// `request.seed` is passed through as is; resolve the sentinel with
/// [`resolve_seed`] first.
pub fn embed(encoder: &dyn ArtEncoder, request: &EmbedRequest) -> Result<Vec<u8>, QrError> {
    let params = ArtParams::new()
        .seed(request.seed)
        .version(request.version)
        .scale(request.scale)
        .mask(request.mask)
        .offset(request.dx, request.dy)
        .rand_control(request.rand_control)
        .dither(request.dither)
        .only_data(request.only_data)
        .save_control(request.save_control);

    tracing::debug!(
        version = params.version,
        scale = params.scale,
        mask = params.mask,
        seed = params.seed,
        "Embedding image"
    );

    let bytes = encoder
        .embed(&request.payload, &request.image, &params)
        .map_err(|e| match e {
            ArtError::DataTooLong { version, .. } => QrError::capacity(version),
            ArtError::Image(msg) => QrError::Decode(msg),
            other @ ArtError::InvalidParameter { .. } => QrError::Encoding(other.to_string()),
            ArtError::Png(msg) => QrError::PngEncode(msg),
        })?;

    if bytes.is_empty() {
        return Err(QrError::capacity(request.version));
    }
    Ok(bytes)
}
