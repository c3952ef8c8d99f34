//! QR module grid with a per-module role map.
//!
//! The symbol itself comes from `fast_qr`; this module only records which
//! modules belong to function patterns (finders, separators, format and
//! version areas, timing lines, alignment patterns) and, for the rest,
//! whether the codeword placed there carries data or error correction.

use fast_qr::{Mask, QRBuilder, Version, ECL};

use crate::error::ArtError;

/// Role of a single module in the symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleKind {
    /// Function pattern module. Never steered.
    Fixed,
    /// Data codeword module.
    Data,
    /// Error-correction codeword or remainder module. Steered unless
    /// `only_data` is set.
    Check,
}

/// A built QR symbol: module colours plus their roles.
#[derive(Debug, Clone)]
pub struct ModuleGrid {
    size: usize,
    dark: Vec<bool>,
    kinds: Vec<ModuleKind>,
}

impl ModuleGrid {
    /// Build a symbol at error-correction level L with an exact version and
    /// mask.
    ///
    /// Fails with [`ArtError::DataTooLong`] when the payload does not fit.
    pub fn build(text: &str, version: u8, mask: u8) -> Result<Self, ArtError> {
        let qr = QRBuilder::new(text.to_owned())
            .ecl(ECL::L)
            .version(to_fast_version(version)?)
            .mask(to_fast_mask(mask)?)
            .build()
            .map_err(|e| ArtError::DataTooLong {
                version,
                reason: e.to_string(),
            })?;

        let size = qr.size;
        let mut dark = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                dark.push(qr[row][col].value());
            }
        }

        Self::from_modules(size, dark)
    }

    /// Build a grid from raw module colours (row-major, dark = `true`).
    ///
    /// `size` must be a valid symbol side (21, 25, ..., 177) and `dark` must
    /// hold `size * size` modules.
    pub fn from_modules(size: usize, dark: Vec<bool>) -> Result<Self, ArtError> {
        if !(21..=177).contains(&size) || (size - 17) % 4 != 0 {
            return Err(ArtError::InvalidParameter {
                name: "size",
                expected: "17 + 4 * version, version 1..=40",
            });
        }
        if dark.len() != size * size {
            return Err(ArtError::InvalidParameter {
                name: "modules",
                expected: "size * size entries",
            });
        }
        Ok(Self {
            size,
            dark,
            kinds: classify(size),
        })
    }

    /// Width and height in modules.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        self.dark[y * self.size + x]
    }

    pub fn kind(&self, x: usize, y: usize) -> ModuleKind {
        self.kinds[y * self.size + x]
    }
}

/// Classify every module of a symbol of the given (valid) side length.
fn classify(size: usize) -> Vec<ModuleKind> {
    let version = (size - 17) / 4;
    let mut kinds = vec![ModuleKind::Check; size * size];

    let mut fill = |x0: usize, y0: usize, w: usize, h: usize| {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                kinds[y * size + x] = ModuleKind::Fixed;
            }
        }
    };

    // Timing lines
    fill(0, 6, size, 1);
    fill(6, 0, 1, size);

    // Finder + separator + format strip: 9x9 top-left, 8x9 top-right, 9x8 bottom-left
    fill(0, 0, 9, 9);
    fill(size - 8, 0, 8, 9);
    fill(0, size - 8, 9, 8);

    // Version information blocks (6x3 next to the top-right and bottom-left finders)
    if version >= 7 {
        fill(size - 11, 0, 3, 6);
        fill(0, size - 11, 6, 3);
    }

    let positions = alignment_positions(version, size);
    let last = positions.len().saturating_sub(1);
    for (i, &cy) in positions.iter().enumerate() {
        for (j, &cx) in positions.iter().enumerate() {
            // Skip the three centres that sit on finder patterns
            if (i == 0 && j == 0) || (i == 0 && j == last) || (i == last && j == 0) {
                continue;
            }
            fill(cx - 2, cy - 2, 5, 5);
        }
    }

    // Codeword placement: two-column strips from the right edge, alternating
    // upwards and downwards, skipping the vertical timing line. Interleaved
    // data codewords come first, error correction after.
    let data_bits = data_codewords(version) * 8;
    let mut bit = 0;
    let mut right = size - 1;
    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        let upward = (right + 1) & 2 == 0;
        for vert in 0..size {
            let y = if upward { size - 1 - vert } else { vert };
            for x in [right, right - 1] {
                let kind = &mut kinds[y * size + x];
                if *kind != ModuleKind::Fixed {
                    if bit < data_bits {
                        *kind = ModuleKind::Data;
                    }
                    bit += 1;
                }
            }
        }
        if right < 2 {
            break;
        }
        right -= 2;
    }

    kinds
}

/// Modules of a symbol not taken by function patterns.
fn raw_data_modules(version: usize) -> usize {
    let mut modules = (16 * version + 128) * version + 64;
    if version >= 2 {
        let align = version / 7 + 2;
        modules -= (25 * align - 10) * align - 55;
        if version >= 7 {
            modules -= 36;
        }
    }
    modules
}

/// Data codewords of a level-L symbol.
fn data_codewords(version: usize) -> usize {
    const EC_PER_BLOCK: [usize; 40] = [
        7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30,
        30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    ];
    const BLOCKS: [usize; 40] = [
        1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13, 14,
        15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    ];
    let i = version - 1;
    raw_data_modules(version) / 8 - EC_PER_BLOCK[i] * BLOCKS[i]
}

/// Centre coordinates of alignment patterns along one axis, ascending.
fn alignment_positions(version: usize, size: usize) -> Vec<usize> {
    if version < 2 {
        return Vec::new();
    }
    let count = version / 7 + 2;
    let step = if version == 32 {
        26
    } else {
        (version * 4 + count * 2 + 1) / (count * 2 - 2) * 2
    };
    let mut positions: Vec<usize> = (0..count - 1).map(|i| size - 7 - i * step).collect();
    positions.push(6);
    positions.reverse();
    positions
}

fn to_fast_mask(mask: u8) -> Result<Mask, ArtError> {
    Ok(match mask {
        0 => Mask::Checkerboard,
        1 => Mask::HorizontalLines,
        2 => Mask::VerticalLines,
        3 => Mask::DiagonalLines,
        4 => Mask::LargeCheckerboard,
        5 => Mask::Fields,
        6 => Mask::Diamonds,
        7 => Mask::Meadow,
        _ => {
            return Err(ArtError::InvalidParameter {
                name: "mask",
                expected: "0..=7",
            })
        }
    })
}

fn to_fast_version(version: u8) -> Result<Version, ArtError> {
    Ok(match version {
        1 => Version::V01,
        2 => Version::V02,
        3 => Version::V03,
        4 => Version::V04,
        5 => Version::V05,
        6 => Version::V06,
        7 => Version::V07,
        8 => Version::V08,
        9 => Version::V09,
        10 => Version::V10,
        11 => Version::V11,
        12 => Version::V12,
        13 => Version::V13,
        14 => Version::V14,
        15 => Version::V15,
        16 => Version::V16,
        17 => Version::V17,
        18 => Version::V18,
        19 => Version::V19,
        20 => Version::V20,
        21 => Version::V21,
        22 => Version::V22,
        23 => Version::V23,
        24 => Version::V24,
        25 => Version::V25,
        26 => Version::V26,
        27 => Version::V27,
        28 => Version::V28,
        29 => Version::V29,
        30 => Version::V30,
        31 => Version::V31,
        32 => Version::V32,
        33 => Version::V33,
        34 => Version::V34,
        35 => Version::V35,
        36 => Version::V36,
        37 => Version::V37,
        38 => Version::V38,
        39 => Version::V39,
        40 => Version::V40,
        _ => {
            return Err(ArtError::InvalidParameter {
                name: "version",
                expected: "1..=40",
            })
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn count(grid: &ModuleGrid, kind: ModuleKind) -> usize {
        let n = grid.size();
        (0..n)
            .flat_map(|y| (0..n).map(move |x| (x, y)))
            .filter(|&(x, y)| grid.kind(x, y) == kind)
            .count()
    }

    fn blank(size: usize) -> ModuleGrid {
        ModuleGrid::from_modules(size, vec![false; size * size]).unwrap()
    }

    #[test]
    fn test_build_uses_requested_version() {
        let grid = ModuleGrid::build("https://example.com", 3, 2).unwrap();
        assert_eq!(grid.size(), 29);
    }

    #[test]
    fn test_build_rejects_payload_too_long() {
        let payload = "x".repeat(200);
        let err = ModuleGrid::build(&payload, 1, 0).unwrap_err();
        assert!(matches!(err, ArtError::DataTooLong { version: 1, .. }));
    }

    #[test]
    fn test_from_modules_rejects_bad_input() {
        assert!(matches!(
            ModuleGrid::from_modules(21, vec![false; 20]),
            Err(ArtError::InvalidParameter { name: "modules", .. })
        ));
        assert!(matches!(
            ModuleGrid::from_modules(22, vec![false; 22 * 22]),
            Err(ArtError::InvalidParameter { name: "size", .. })
        ));
        assert!(ModuleGrid::from_modules(0, Vec::new()).is_err());
    }

    #[test]
    fn test_finder_corners_are_fixed() {
        let grid = blank(21);
        assert_eq!(grid.kind(0, 0), ModuleKind::Fixed);
        assert_eq!(grid.kind(8, 8), ModuleKind::Fixed);
        assert_eq!(grid.kind(20, 0), ModuleKind::Fixed);
        assert_eq!(grid.kind(0, 20), ModuleKind::Fixed);
        // Bottom-right corner holds the first data codeword
        assert_eq!(grid.kind(20, 20), ModuleKind::Data);
    }

    #[test]
    fn test_timing_is_fixed() {
        let grid = blank(21);
        assert_eq!(grid.kind(10, 6), ModuleKind::Fixed);
        assert_eq!(grid.kind(6, 10), ModuleKind::Fixed);
    }

    #[test]
    fn test_version_one_module_counts() {
        // 3 corner regions (225) + timing between them (8); 26 codewords, 19 of them data
        let grid = blank(21);
        assert_eq!(count(&grid, ModuleKind::Fixed), 233);
        assert_eq!(count(&grid, ModuleKind::Data), 19 * 8);
        assert_eq!(count(&grid, ModuleKind::Check), 7 * 8);
    }

    #[test]
    fn test_version_two_counts_remainder_as_check() {
        // 44 codewords (34 data) plus 7 remainder bits
        let grid = blank(25);
        assert_eq!(count(&grid, ModuleKind::Data), 34 * 8);
        assert_eq!(count(&grid, ModuleKind::Check), 10 * 8 + 7);
    }

    #[test]
    fn test_function_patterns_match_capacity_for_every_version() {
        for version in 1..=40 {
            let size = 17 + 4 * version;
            let grid = blank(size);
            let free = size * size - count(&grid, ModuleKind::Fixed);
            assert_eq!(free, raw_data_modules(version), "version {version}");
        }
    }

    #[test]
    fn test_level_l_data_codewords() {
        assert_eq!(data_codewords(1), 19);
        assert_eq!(data_codewords(6), 136);
        assert_eq!(data_codewords(8), 194);
        assert_eq!(data_codewords(40), 2956);
    }

    #[test]
    fn test_alignment_pattern_is_fixed() {
        // Version 2 has a single alignment pattern centred at (18, 18)
        let grid = blank(25);
        assert_eq!(grid.kind(18, 18), ModuleKind::Fixed);
        assert_eq!(grid.kind(16, 16), ModuleKind::Fixed);
        assert_eq!(grid.kind(15, 15), ModuleKind::Data);
    }

    #[test]
    fn test_alignment_positions_match_standard_table() {
        assert_eq!(alignment_positions(1, 21), Vec::<usize>::new());
        assert_eq!(alignment_positions(2, 25), vec![6, 18]);
        assert_eq!(alignment_positions(7, 45), vec![6, 22, 38]);
        assert_eq!(alignment_positions(8, 49), vec![6, 24, 42]);
    }

    #[test]
    fn test_version_seven_has_version_blocks() {
        let grid = blank(45);
        assert_eq!(grid.kind(34, 0), ModuleKind::Fixed);
        assert_eq!(grid.kind(0, 34), ModuleKind::Fixed);
    }
}
