//! Pixel steering.
//!
//! Every module is drawn as a `scale x scale` block. A centred sub-block of
//! side `max(1, scale / 3)` always keeps the module's true colour, because
//! that is where scanners sample. The remaining pixels of a steerable module
//! follow the target tone, quantised to black or white.
//!
//! Quantisation is a plain threshold by default. With `dither` it becomes
//! serpentine Floyd-Steinberg error diffusion; pixels pinned to their module
//! colour still push their error into the neighbourhood, so the image tone
//! is preserved around them. With `rand_control` the threshold is jittered
//! by noise from a seeded RNG; the error is always computed from the
//! un-noised value.

use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::grid::{ModuleGrid, ModuleKind};
use crate::params::ArtParams;
use crate::target::Target;

/// Light margin around the symbol, in modules.
pub const QUIET_ZONE: usize = 4;

/// Peak threshold jitter for `rand_control` (0-255 scale).
const JITTER: i16 = 48;

const BLACK: u8 = 0;
const WHITE: u8 = 255;

/// A rendered canvas: final black/white pixels and which of them were steered.
#[derive(Debug, Clone)]
pub struct Halftone {
    width: usize,
    pixels: Vec<u8>,
    steerable: Vec<bool>,
}

impl Halftone {
    pub fn width(&self) -> usize {
        self.width
    }

    /// Greyscale pixels, row-major, each either 0 or 255.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn is_steerable(&self, x: usize, y: usize) -> bool {
        self.steerable[y * self.width + x]
    }

    /// RGB control image: pinned pixels in black/white, steered pixels tinted blue.
    pub fn control_rgb(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .zip(&self.steerable)
            .flat_map(|(&value, &steered)| match (steered, value == BLACK) {
                (true, true) => [0, 0, 128],
                (true, false) => [170, 190, 255],
                (false, _) => [value, value, value],
            })
            .collect()
    }
}

/// Render `grid` onto the canvas described by `target`.
pub fn render(grid: &ModuleGrid, target: &Target, params: &ArtParams) -> Halftone {
    let scale = params.scale.max(1) as usize;
    let width = target.width();
    let modules = grid.size();

    let centre = (scale / 3).max(1);
    let lo = (scale - centre) / 2;
    let hi = lo + centre;

    let len = width * width;
    let mut forced = vec![WHITE; len];
    let mut steerable = vec![false; len];
    let mut has_tone = vec![false; len];
    let mut buffer = vec![0i16; len];

    for y in 0..width {
        for x in 0..width {
            let idx = y * width + x;
            let tone = target.tone(x, y);
            has_tone[idx] = tone.is_some();

            let (mx, my) = (x / scale, y / scale);
            let inside = (QUIET_ZONE..QUIET_ZONE + modules).contains(&mx)
                && (QUIET_ZONE..QUIET_ZONE + modules).contains(&my);
            if inside {
                let (gx, gy) = (mx - QUIET_ZONE, my - QUIET_ZONE);
                if grid.is_dark(gx, gy) {
                    forced[idx] = BLACK;
                }
                let in_centre = (lo..hi).contains(&(x % scale)) && (lo..hi).contains(&(y % scale));
                let allowed = match grid.kind(gx, gy) {
                    ModuleKind::Fixed => false,
                    ModuleKind::Data => true,
                    ModuleKind::Check => !params.only_data,
                };
                steerable[idx] = allowed && !in_centre && tone.is_some();
            }

            buffer[idx] = tone.map_or(i16::from(forced[idx]), i16::from);
        }
    }

    let mut quantiser = Quantiser {
        width,
        buffer,
        forced,
        steerable,
        has_tone,
        pixels: vec![WHITE; len],
        rng: StdRng::seed_from_u64(params.seed as u64),
        dither: params.dither,
        rand_control: params.rand_control,
    };

    for y in 0..width {
        let going_right = !params.dither || y % 2 == 0;
        if going_right {
            for x in 0..width {
                quantiser.process(x, y, true);
            }
        } else {
            for x in (0..width).rev() {
                quantiser.process(x, y, false);
            }
        }
    }

    Halftone {
        width,
        pixels: quantiser.pixels,
        steerable: quantiser.steerable,
    }
}

struct Quantiser {
    width: usize,
    buffer: Vec<i16>,
    forced: Vec<u8>,
    steerable: Vec<bool>,
    has_tone: Vec<bool>,
    pixels: Vec<u8>,
    rng: StdRng,
    dither: bool,
    rand_control: bool,
}

impl Quantiser {
    fn process(&mut self, x: usize, y: usize, going_right: bool) {
        let w = self.width;
        let idx = y * w + x;
        let old_val = self.buffer[idx];

        let new_val = if self.steerable[idx] {
            let noise = if self.rand_control {
                self.rng.gen_range(-JITTER..=JITTER)
            } else {
                0
            };
            if old_val.saturating_add(noise) >= 128 {
                i16::from(WHITE)
            } else {
                i16::from(BLACK)
            }
        } else {
            i16::from(self.forced[idx])
        };
        self.pixels[idx] = new_val as u8;

        if !self.dither || !self.has_tone[idx] {
            return;
        }

        let error = (old_val - new_val).clamp(-255, 255);

        // Left-to-right:      Right-to-left:
        //     X   7/16        7/16   X
        // 3/16 5/16 1/16      1/16 5/16 3/16
        let below = y + 1 < w;
        if going_right {
            if x + 1 < w {
                self.add(idx + 1, error * 7 / 16);
            }
            if below {
                if x > 0 {
                    self.add(idx + w - 1, error * 3 / 16);
                }
                self.add(idx + w, error * 5 / 16);
                if x + 1 < w {
                    self.add(idx + w + 1, error / 16);
                }
            }
        } else {
            if x > 0 {
                self.add(idx - 1, error * 7 / 16);
            }
            if below {
                if x + 1 < w {
                    self.add(idx + w + 1, error * 3 / 16);
                }
                self.add(idx + w, error * 5 / 16);
                if x > 0 {
                    self.add(idx + w - 1, error / 16);
                }
            }
        }
    }

    #[inline]
    fn add(&mut self, idx: usize, delta: i16) {
        self.buffer[idx] = self.buffer[idx].saturating_add(delta);
    }
}
