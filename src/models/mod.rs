pub mod config;
pub mod request;

pub use config::{AppConfig, EmbedConfig, OverlayConfig};
pub use request::{
    clamp_overlay_dimensions, CompositeRequest, EmbedRequest, MAX_QR_SIZE, MIN_QR_SIZE,
};
