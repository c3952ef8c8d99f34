use crate::error::QrError;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional defaults loaded from a YAML file.
///
/// Every key may be omitted. Command-line flags take precedence over values
/// found here; built-in defaults apply when neither is given.
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    /// Payload text
    pub url: Option<String>,

    /// Destination PNG file
    pub output: Option<PathBuf>,

    pub embed: EmbedConfig,

    pub overlay: OverlayConfig,
}

/// Embed-mode defaults
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct EmbedConfig {
    pub version: Option<u8>,
    pub scale: Option<u32>,
    pub mask: Option<u8>,
    pub dx: Option<i32>,
    pub dy: Option<i32>,
    pub seed: Option<i64>,
    pub rand: Option<bool>,
    pub dither: Option<bool>,
    pub only_data: Option<bool>,
}

/// Overlay-mode defaults
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct OverlayConfig {
    /// Output raster side in pixels (raised to 128 if smaller)
    pub size: Option<i64>,

    /// Logo size in percent (clamped to 10-40)
    pub overlay_size: Option<i64>,
}

impl AppConfig {
    /// Read and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, QrError> {
        let content = std::fs::read_to_string(path).map_err(|e| QrError::io(path, e))?;
        let config = Self::from_yaml(&content)
            .map_err(|e| QrError::Config(format!("{}: {e}", path.display())))?;
        tracing::debug!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Parse and validate YAML configuration text.
    pub fn from_yaml(content: &str) -> Result<Self, String> {
        // An empty file deserialises to unit, not to a mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), String> {
        if let Some(version) = self.embed.version {
            if !(1..=crate::error::MAX_EMBED_VERSION).contains(&version) {
                return Err(format!("embed.version must be 1-8, got {version}"));
            }
        }
        if let Some(mask) = self.embed.mask {
            if mask > 7 {
                return Err(format!("embed.mask must be 0-7, got {mask}"));
            }
        }
        if let Some(scale) = self.embed.scale {
            if !(1..=qr_art::params::MAX_SCALE).contains(&scale) {
                return Err(format!("embed.scale must be 1-64, got {scale}"));
            }
        }
        Ok(())
    }
}
