//! qrmaker - QR codes with embedded or overlaid images
//!
//! Two pipelines share one binary: artistic embedding, where the image
//! steers the symbol's own pixels, and logo overlay on a plain
//! high-redundancy code. This library exposes modules for integration testing.

pub mod cli;
pub mod error;
pub mod models;
pub mod rendering;
pub mod services;
