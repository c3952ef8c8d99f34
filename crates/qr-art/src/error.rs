//! Error type for the qr-art public API.

use std::fmt;

/// Everything that can go wrong while producing an artistic QR code.
#[derive(Debug, Clone, PartialEq)]
pub enum ArtError {
    /// A parameter is outside the range the encoder supports
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// Human-readable description of the accepted range
        expected: &'static str,
    },
    /// The payload does not fit in the requested QR version
    DataTooLong {
        /// Requested QR version
        version: u8,
        /// Reason reported by the QR builder
        reason: String,
    },
    /// The source image could not be decoded
    Image(String),
    /// The output PNG could not be written
    Png(String),
}

impl fmt::Display for ArtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArtError::InvalidParameter { name, expected } => {
                write!(f, "invalid {}: expected {}", name, expected)
            }
            ArtError::DataTooLong { version, reason } => {
                write!(f, "payload does not fit in version {}: {}", version, reason)
            }
            ArtError::Image(msg) => write!(f, "image decode error: {}", msg),
            ArtError::Png(msg) => write!(f, "PNG encode error: {}", msg),
        }
    }
}

impl std::error::Error for ArtError {}
