use std::path::PathBuf;
use thiserror::Error;

/// Highest QR version the embed pipeline accepts.
pub const MAX_EMBED_VERSION: u8 = 8;

#[derive(Debug, Error)]
pub enum QrError {
    #[error("No source image given")]
    MissingImage,

    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("QR encoding error: {0}")]
    Encoding(String),

    #[error("Payload does not fit in QR version {version}; {hint}")]
    Capacity { version: u8, hint: String },

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("PNG encode error: {0}")]
    PngEncode(String),
}

impl QrError {
    /// Build a capacity error with guidance for the given version.
    pub fn capacity(version: u8) -> Self {
        let hint = if version < MAX_EMBED_VERSION {
            format!("try a higher version (--version {})", version + 1)
        } else {
            "shorten the payload or use --overlay mode".to_string()
        };
        QrError::Capacity { version, hint }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        QrError::Io {
            path: path.into(),
            source,
        }
    }

    /// Actionable guidance, if this error carries any.
    pub fn hint(&self) -> Option<&str> {
        match self {
            QrError::Capacity { hint, .. } => Some(hint),
            _ => None,
        }
    }

    /// Process exit status for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            QrError::MissingImage => 0,
            _ => 1,
        }
    }
}
