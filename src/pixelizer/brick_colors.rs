use std::str::FromStr;

use image::{Rgb, RgbImage};
use log::trace;
use once_cell::sync::Lazy;
use palette::Srgb;

use crate::MosaicError;

/// Solid brick colors, in lookup order. Earlier entries win ties.
pub const BRICK_COLORS: &[&str] = &[
    "05131D", // Black
    "0055BF", // Blue
    "237841", // Green
    "008F9B", // Dark Turquoise
    "C91A09", // Red
    "C870A0", // Dark Pink
    "583927", // Brown
    "9BA19D", // Light Gray
    "6D6E5C", // Dark Gray
    "B4D2E3", // Light Blue
    "4B9F4A", // Bright Green
    "55A5AF", // Light Turquoise
    "F2705E", // Salmon
    "FC97AC", // Pink
    "F2CD37", // Yellow
    "FFFFFF", // White
    "C2DAB8", // Light Green
    "FBE696", // Light Yellow
    "E4CD9E", // Tan
    "C9CAE2", // Light Violet
    "81007B", // Purple
    "2032B0", // Dark Blue-Violet
    "FE8A18", // Orange
    "923978", // Magenta
    "BBE90B", // Lime
    "958A73", // Dark Tan
    "E4ADC8", // Bright Pink
    "AC78BA", // Medium Lavender
    "E1D5ED", // Lavender
    "5A93DB", // Medium Blue
    "F8BB3D", // Bright Light Orange
    "A0A5A9", // Light Bluish Gray
    "6C6E68", // Dark Bluish Gray
    "5C9DD1", // Bright Light Blue
    "0A3463", // Dark Blue
    "184632", // Dark Green
    "352100", // Dark Brown
    "720E0F", // Dark Red
    "A95500", // Dark Orange
    "A0BCAC", // Sand Green
    "6074A1", // Sand Blue
    "3F3691", // Dark Purple
    "F6D7B3", // Light Nougat
    "CC702A", // Medium Nougat
    "D09168", // Nougat
    "AA7D55", // Medium Tan
    "FFF03A", // Vibrant Yellow
    "36AEBF", // Medium Azure
];

static DEFAULT_PALETTE: Lazy<BrickPalette> = Lazy::new(|| {
    BrickPalette::from_hex(BRICK_COLORS).expect("built-in brick colors are valid RRGGBB")
});

/// Decode an `RRGGBB` string (a leading `#` is accepted).
pub fn parse_hex_color(hex: &str) -> Result<Srgb<u8>, MosaicError> {
    let trimmed = hex.trim();
    let digits = trimmed.strip_prefix('#').unwrap_or(trimmed);
    let invalid = || MosaicError::InvalidPaletteColor {
        value: hex.to_string(),
    };
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    Srgb::<u8>::from_str(digits).map_err(|_| invalid())
}

/// Decode an `RRGGBB` string straight into an image pixel.
pub fn hex_to_pixel(hex: &str) -> Result<Rgb<u8>, MosaicError> {
    parse_hex_color(hex).map(to_pixel)
}

fn to_pixel(color: Srgb<u8>) -> Rgb<u8> {
    let (r, g, b) = color.into_components();
    Rgb([r, g, b])
}

/// An ordered, immutable set of allowed output colors.
#[derive(Debug, Clone, PartialEq)]
pub struct BrickPalette {
    colors: Vec<Srgb<u8>>,
}

impl BrickPalette {
    /// The built-in brick palette, shared by the whole process.
    pub fn builtin() -> &'static BrickPalette {
        &DEFAULT_PALETTE
    }

    pub fn new(colors: Vec<Srgb<u8>>) -> Result<Self, MosaicError> {
        if colors.is_empty() {
            return Err(MosaicError::EmptyPalette);
        }
        Ok(Self { colors })
    }

    /// Build a palette from hex strings, keeping their order.
    pub fn from_hex<I, S>(hex_colors: I) -> Result<Self, MosaicError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let colors = hex_colors
            .into_iter()
            .map(|hex| parse_hex_color(hex.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Parse a palette file: one `RRGGBB` per line, in lookup order.
    /// Surrounding whitespace is trimmed; blank lines and `//` comments are skipped.
    pub fn from_text(text: &str) -> Result<Self, MosaicError> {
        let colors = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with("//"));
        Self::from_hex(colors)
    }

    pub fn colors(&self) -> &[Srgb<u8>] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Palette entry closest to `color` in RGB space.
    ///
    /// Squared distances are compared, which orders entries exactly as the
    /// Euclidean distance does. The first entry reaching the minimum wins.
    pub fn nearest(&self, color: Rgb<u8>) -> Result<Rgb<u8>, MosaicError> {
        let mut best: Option<(u32, Srgb<u8>)> = None;
        for &candidate in &self.colors {
            let dist = distance_squared(color, to_pixel(candidate));
            match best {
                Some((best_dist, _)) if dist >= best_dist => {}
                _ => best = Some((dist, candidate)),
            }
        }
        let (dist, closest) = best.ok_or(MosaicError::EmptyPalette)?;
        trace!("Nearest brick color to {:?} is {:?} (d^2 = {})", color.0, closest, dist);
        Ok(to_pixel(closest))
    }
}

fn distance_squared(a: Rgb<u8>, b: Rgb<u8>) -> u32 {
    a.0.iter()
        .zip(b.0.iter())
        .map(|(&x, &y)| {
            let d = x as i32 - y as i32;
            (d * d) as u32
        })
        .sum()
}

/// Per-channel mean of all pixels, truncated towards zero.
///
/// A zero-area image gives black; the block drawn for such a tile has no
/// pixels, so the color never shows.
pub fn average_color(img: &RgbImage) -> Rgb<u8> {
    let count = img.width() as u64 * img.height() as u64;
    if count == 0 {
        return Rgb([0, 0, 0]);
    }
    let sums = img.pixels().fold([0u64; 3], |mut acc, p| {
        for (sum, &c) in acc.iter_mut().zip(p.0.iter()) {
            *sum += c as u64;
        }
        acc
    });
    Rgb(sums.map(|s| (s / count) as u8))
}
