//! Command-line surface and dispatch.
//!
//! Flags are merged with the optional YAML config (flag > config > built-in
//! default), then exactly one of the two pipelines runs and its PNG is
//! written to the output path. This is the only module that touches the
//! filesystem, apart from the overlay image decode.

use crate::error::QrError;
use crate::models::{AppConfig, CompositeRequest, EmbedRequest};
use crate::services::{
    embed, render_overlay, resolve_seed, ArtEncoder, FastQrEncoder, QrArtEncoder, QrEncoder,
};
use clap::Parser;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DEFAULT_URL: &str = "https://example.com";
pub const DEFAULT_OUTPUT: &str = "qrcode.png";

const AFTER_LONG_HELP: &str = "\
Modes:
  Embed (default): the image pattern steers the QR code's pixels
  Overlay (--overlay): the image is placed on top of the QR code centre

Examples:
  # Embed mode (artistic QR)
  qrmaker --image photo.png --url 'https://mysite.com'
  qrmaker --image photo.png --url 'https://mysite.com' --dither --version 8

  # Overlay mode (logo in centre)
  qrmaker --overlay --image logo.png --url 'https://mysite.com'
  qrmaker --overlay --image logo.png --url 'https://mysite.com' --size 1024
  qrmaker --overlay --image logo.png --url 'https://mysite.com' --size 1024 --overlay-size 30

Styling Tips:
  - Embed: use --dither for photos, a higher --version for longer URLs
  - Overlay: keep --overlay-size under 30% for reliable scanning";

#[derive(Parser, Debug, Clone, Default)]
#[command(name = "qrmaker")]
#[command(about = "QR Code Art Generator - creates QR codes with embedded or overlaid images")]
#[command(after_long_help = AFTER_LONG_HELP)]
pub struct Cli {
    /// Path to the image to embed/overlay in the QR code
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// URL or text to encode in the QR code [default: https://example.com]
    #[arg(long)]
    pub url: Option<String>,

    /// Output file path for the generated QR code [default: qrcode.png]
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Overlay the image on the QR code instead of embedding it
    #[arg(long)]
    pub overlay: bool,

    /// QR code version, 1-8 (embed mode) [default: 6]
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=8))]
    pub version: Option<u8>,

    /// Size of each QR module in pixels (embed mode) [default: 8]
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..=64))]
    pub scale: Option<u32>,

    /// QR mask pattern, 0-7 (embed mode) [default: 2]
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=7))]
    pub mask: Option<u8>,

    /// X offset of the image, in modules (embed mode) [default: 4]
    #[arg(long, allow_negative_numbers = true)]
    pub dx: Option<i32>,

    /// Y offset of the image, in modules (embed mode) [default: 4]
    #[arg(long, allow_negative_numbers = true)]
    pub dy: Option<i32>,

    /// Randomise control pixel selection (embed mode)
    #[arg(long = "rand")]
    pub rand_control: bool,

    /// Dither the image for better tone reproduction (embed mode)
    #[arg(long)]
    pub dither: bool,

    /// Only steer data codeword pixels, leave error correction solid (embed mode)
    #[arg(long)]
    pub only_data: bool,

    /// Save the control image instead of the QR code (embed mode)
    #[arg(long)]
    pub save_control: bool,

    /// Random seed for reproducible results, 0 = use current time
    #[arg(long, allow_negative_numbers = true)]
    pub seed: Option<i64>,

    /// Output image size in pixels, 128-4096 (overlay mode) [default: 512]
    #[arg(long, allow_negative_numbers = true)]
    pub size: Option<i64>,

    /// Overlay image size as a percentage of the QR code, 10-40 (overlay mode) [default: 25]
    #[arg(long, allow_negative_numbers = true)]
    pub overlay_size: Option<i64>,

    /// YAML file with default settings
    #[arg(long, env = "QRMAKER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Log pipeline details to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

/// Fully resolved settings for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub image: PathBuf,
    pub url: String,
    pub output: PathBuf,
    pub overlay: bool,
    pub version: u8,
    pub scale: u32,
    pub mask: u8,
    pub dx: i32,
    pub dy: i32,
    pub seed: i64,
    pub rand_control: bool,
    pub dither: bool,
    pub only_data: bool,
    pub save_control: bool,
    pub size: i64,
    pub overlay_size: i64,
}

impl Settings {
    /// Merge flags over config values over built-in defaults.
    ///
    /// Fails with [`QrError::MissingImage`] when no image path is given.
    pub fn resolve(cli: &Cli, config: &AppConfig) -> Result<Self, QrError> {
        let image = cli.image.clone().ok_or(QrError::MissingImage)?;
        let embed = &config.embed;
        let overlay = &config.overlay;

        Ok(Self {
            image,
            url: cli
                .url
                .clone()
                .or_else(|| config.url.clone())
                .unwrap_or_else(|| DEFAULT_URL.to_string()),
            output: cli
                .output
                .clone()
                .or_else(|| config.output.clone())
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT)),
            overlay: cli.overlay,
            version: cli.version.or(embed.version).unwrap_or(6),
            scale: cli.scale.or(embed.scale).unwrap_or(8),
            mask: cli.mask.or(embed.mask).unwrap_or(2),
            dx: cli.dx.or(embed.dx).unwrap_or(4),
            dy: cli.dy.or(embed.dy).unwrap_or(4),
            seed: cli.seed.or(embed.seed).unwrap_or(0),
            rand_control: cli.rand_control || embed.rand.unwrap_or(false),
            dither: cli.dither || embed.dither.unwrap_or(false),
            only_data: cli.only_data || embed.only_data.unwrap_or(false),
            save_control: cli.save_control,
            size: cli.size.or(overlay.size).unwrap_or(512),
            overlay_size: cli.overlay_size.or(overlay.overlay_size).unwrap_or(25),
        })
    }
}

/// What a successful invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// No image was given; the caller should print usage.
    Help,
    Generated(Summary),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeSummary {
    Embed {
        version: u8,
        scale: u32,
        seed: i64,
        dither: bool,
        rand_control: bool,
        save_control: bool,
    },
    Overlay {
        size: u32,
        overlay_pct: u32,
    },
}

/// Human-readable report of a generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub output: PathBuf,
    pub url: String,
    pub bytes: usize,
    pub mode: ModeSummary,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "QR code generated: {} ({} bytes)",
            self.output.display(),
            self.bytes
        )?;
        writeln!(f, "  URL: {}", self.url)?;
        match &self.mode {
            ModeSummary::Overlay { size, overlay_pct } => {
                writeln!(f, "  Mode: overlay, Size: {size}x{size}, Logo: {overlay_pct}%")?;
            }
            ModeSummary::Embed {
                version,
                scale,
                seed,
                dither,
                rand_control,
                save_control,
            } => {
                writeln!(f, "  Mode: embed, Version: {version}, Scale: {scale}, Seed: {seed}")?;
                if *dither {
                    writeln!(f, "  Dithering: enabled")?;
                }
                if *rand_control {
                    writeln!(f, "  Random control: enabled")?;
                }
                if *save_control {
                    writeln!(f, "  Output: control image")?;
                }
            }
        }
        Ok(())
    }
}

/// Resolve settings and run the selected pipeline with the production encoders.
///
/// A missing image means usage, whatever state the config file is in.
pub fn run(cli: &Cli, clock: impl FnOnce() -> i64) -> Result<Outcome, QrError> {
    if cli.image.is_none() {
        return Ok(Outcome::Help);
    }

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    let settings = Settings::resolve(cli, &config)?;

    generate(&settings, &FastQrEncoder, &QrArtEncoder, clock).map(Outcome::Generated)
}

/// Run one pipeline and persist its output.
pub fn generate(
    settings: &Settings,
    qr_encoder: &dyn QrEncoder,
    art_encoder: &dyn ArtEncoder,
    clock: impl FnOnce() -> i64,
) -> Result<Summary, QrError> {
    let (bytes, mode) = if settings.overlay {
        let request = CompositeRequest::new(
            settings.url.clone(),
            settings.image.clone(),
            settings.size,
            settings.overlay_size,
        );
        let bytes = render_overlay(qr_encoder, &request)?;
        let mode = ModeSummary::Overlay {
            size: request.qr_size(),
            overlay_pct: request.overlay_pct(),
        };
        (bytes, mode)
    } else {
        let request = embed_request(settings, read_image(&settings.image)?, clock);
        let bytes = embed(art_encoder, &request)?;
        let mode = ModeSummary::Embed {
            version: request.version,
            scale: request.scale,
            seed: request.seed,
            dither: request.dither,
            rand_control: request.rand_control,
            save_control: request.save_control,
        };
        (bytes, mode)
    };

    std::fs::write(&settings.output, &bytes).map_err(|e| QrError::io(&settings.output, e))?;
    tracing::info!(
        output = %settings.output.display(),
        bytes = bytes.len(),
        "Wrote QR code"
    );

    Ok(Summary {
        output: settings.output.clone(),
        url: settings.url.clone(),
        bytes: bytes.len(),
        mode,
    })
}

fn read_image(path: &Path) -> Result<Vec<u8>, QrError> {
    std::fs::read(path).map_err(|e| QrError::io(path, e))
}

fn embed_request(settings: &Settings, image: Vec<u8>, clock: impl FnOnce() -> i64) -> EmbedRequest {
    let mut request = EmbedRequest::new(settings.url.clone(), image);
    request.seed = resolve_seed(settings.seed, clock);
    request.version = settings.version;
    request.scale = settings.scale;
    request.mask = settings.mask;
    request.dx = settings.dx;
    request.dy = settings.dy;
    request.rand_control = settings.rand_control;
    request.dither = settings.dither;
    request.only_data = settings.only_data;
    request.save_control = settings.save_control;
    request
}
