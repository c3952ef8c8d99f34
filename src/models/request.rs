use std::path::PathBuf;

/// Smallest QR raster the overlay pipeline renders, in pixels.
pub const MIN_QR_SIZE: u32 = 128;
/// Largest QR raster the overlay pipeline renders, in pixels.
pub const MAX_QR_SIZE: u32 = 4096;
/// Allowed logo size range, as a percentage of the QR raster side.
pub const OVERLAY_PCT_RANGE: (u32, u32) = (10, 40);

/// Clamp overlay-mode dimensions into their working ranges.
///
/// Returns `(qr_size, overlay_pct)`. Out-of-range inputs are clamped, never
/// rejected.
pub fn clamp_overlay_dimensions(qr_size: i64, overlay_pct: i64) -> (u32, u32) {
    let (lo, hi) = OVERLAY_PCT_RANGE;
    let size = qr_size.clamp(i64::from(MIN_QR_SIZE), i64::from(MAX_QR_SIZE)) as u32;
    let pct = overlay_pct.clamp(i64::from(lo), i64::from(hi)) as u32;
    (size, pct)
}

/// Parameters of one overlay-mode invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompositeRequest {
    pub payload: String,
    pub image_path: PathBuf,
    qr_size: u32,
    overlay_pct: u32,
}

impl CompositeRequest {
    pub fn new(
        payload: impl Into<String>,
        image_path: impl Into<PathBuf>,
        qr_size: i64,
        overlay_pct: i64,
    ) -> Self {
        let (clamped_size, clamped_pct) = clamp_overlay_dimensions(qr_size, overlay_pct);
        if i64::from(clamped_size) != qr_size {
            tracing::warn!(
                requested = qr_size,
                used = clamped_size,
                "QR size clamped to 128-4096 pixels"
            );
        }
        if i64::from(clamped_pct) != overlay_pct {
            tracing::warn!(
                requested = overlay_pct,
                used = clamped_pct,
                "Overlay size clamped to 10-40%"
            );
        }

        Self {
            payload: payload.into(),
            image_path: image_path.into(),
            qr_size: clamped_size,
            overlay_pct: clamped_pct,
        }
    }

    /// Output raster side in pixels ([`MIN_QR_SIZE`]..=[`MAX_QR_SIZE`]).
    pub fn qr_size(&self) -> u32 {
        self.qr_size
    }

    /// Logo side as a percentage of the raster side (10..=40).
    pub fn overlay_pct(&self) -> u32 {
        self.overlay_pct
    }

    /// Logo side in pixels. The logo is always square.
    pub fn overlay_side(&self) -> u32 {
        overlay_side(self.qr_size, self.overlay_pct)
    }

    /// Top-left corner of the centred logo; identical on both axes.
    pub fn offset(&self) -> u32 {
        (self.qr_size - self.overlay_side()) / 2
    }
}

/// `qr_size * overlay_pct / 100`, computed without overflow.
pub fn overlay_side(qr_size: u32, overlay_pct: u32) -> u32 {
    (u64::from(qr_size) * u64::from(overlay_pct) / 100) as u32
}

/// Parameters of one embed-mode invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedRequest {
    pub payload: String,
    /// Raw bytes of the source image file
    pub image: Vec<u8>,
    /// 0 means "pick one from the clock"
    pub seed: i64,
    pub version: u8,
    pub scale: u32,
    pub mask: u8,
    pub dx: i32,
    pub dy: i32,
    pub rand_control: bool,
    pub dither: bool,
    pub only_data: bool,
    pub save_control: bool,
}

impl EmbedRequest {
    /// A request with the default embed parameters.
    pub fn new(payload: impl Into<String>, image: Vec<u8>) -> Self {
        Self {
            payload: payload.into(),
            image,
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
