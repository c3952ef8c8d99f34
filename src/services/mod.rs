pub mod embed;
pub mod overlay;
pub mod qr_encoder;

pub use embed::{clock_seed, embed, resolve_seed, ArtEncoder, QrArtEncoder};
pub use overlay::{compose_overlay, render_overlay};
pub use qr_encoder::{EcLevel, FastQrEncoder, QrEncoder, QrSymbol};
