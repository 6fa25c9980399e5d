use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_circle_mut;
use log::trace;

use super::brick_colors::{average_color, BrickPalette};
use super::grid::Tile;
use crate::MosaicError;

/// A finished brick: one palette color, shaded, with a stud on top.
pub type StyledBlock = RgbImage;

/// Darkening reached at the bottom-right corner of a block.
const SHADING_STRENGTH: f64 = 0.2;
/// Stud radius as a fraction of the block's shorter side.
const STUD_RADIUS_RATIO: f64 = 0.2;
/// How much lighter a derived stud is than the block corner.
const STUD_HIGHLIGHT: u8 = 30;

/// Diagonal light falloff from the top-left corner, to give the brick a plastic look.
///
/// Each channel is scaled by `1 - 0.2 * (x + y) / (w + h)` and truncated.
pub fn add_shading(block: &mut RgbImage) {
    let (w, h) = block.dimensions();
    let span = (w + h) as f64;
    for (x, y, pixel) in block.enumerate_pixels_mut() {
        let factor = 1.0 - ((x + y) as f64 / span) * SHADING_STRENGTH;
        for c in pixel.0.iter_mut() {
            *c = (*c as f64 * factor) as u8;
        }
    }
}

/// Paint a filled circular stud in the middle of the block.
///
/// Without an explicit color the stud is the top-left pixel lightened by 30
/// per channel, so it follows the brick's own color.
pub fn draw_stud(block: &mut RgbImage, stud_color: Option<Rgb<u8>>) {
    let (w, h) = block.dimensions();
    if w == 0 || h == 0 {
        return;
    }
    let radius = (w.min(h) as f64 * STUD_RADIUS_RATIO) as i32;
    let center = ((w / 2) as i32, (h / 2) as i32);
    let color = stud_color.unwrap_or_else(|| {
        let corner = block.get_pixel(0, 0);
        Rgb(corner.0.map(|c| c.saturating_add(STUD_HIGHLIGHT)))
    });
    draw_filled_circle_mut(block, center, radius, color);
}

/// Turns tiles into styled blocks using a fixed palette.
#[derive(Debug, Clone, Copy)]
pub struct Stylizer<'a> {
    palette: &'a BrickPalette,
    stud_color: Option<Rgb<u8>>,
}

impl<'a> Stylizer<'a> {
    pub fn new(palette: &'a BrickPalette) -> Self {
        Self {
            palette,
            stud_color: None,
        }
    }

    pub fn with_stud_color(mut self, stud_color: Option<Rgb<u8>>) -> Self {
        self.stud_color = stud_color;
        self
    }

    /// Palette color the tile will be rendered with.
    pub fn base_color(&self, tile: &RgbImage) -> Result<Rgb<u8>, MosaicError> {
        self.palette.nearest(average_color(tile))
    }

    pub fn stylize(&self, tile: &Tile) -> Result<StyledBlock, MosaicError> {
        self.stylize_image(&tile.image)
    }

    pub fn stylize_image(&self, tile: &RgbImage) -> Result<StyledBlock, MosaicError> {
        let base = self.base_color(tile)?;
        trace!("Tile {}x{} -> base color {:?}", tile.width(), tile.height(), base.0);
        let mut block = RgbImage::from_pixel(tile.width(), tile.height(), base);
        add_shading(&mut block);
        draw_stud(&mut block, self.stud_color);
        Ok(block)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(w: u32, h: u32) -> RgbImage {
        RgbImage::from_fn(w, h, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([200, 40, 30])
            } else {
                Rgb([90, 160, 220])
            }
        })
    }

    #[test]
    fn shading_darkens_towards_bottom_right() {
        let mut block = RgbImage::from_pixel(10, 10, Rgb([200, 100, 50]));
        add_shading(&mut block);
        assert_eq!(block.get_pixel(0, 0), &Rgb([200, 100, 50]));
        // factor at (9, 9) = 1 - 18/20 * 0.2 = 0.82
        assert_eq!(block.get_pixel(9, 9), &Rgb([164, 82, 41]));
        for y in 0..10 {
            for x in 1..10 {
                assert!(block.get_pixel(x, y).0[0] <= block.get_pixel(x - 1, y).0[0]);
            }
        }
    }

    #[test]
    fn stud_follows_corner_color() {
        let mut block = RgbImage::from_pixel(50, 50, Rgb([240, 10, 100]));
        draw_stud(&mut block, None);
        assert_eq!(block.get_pixel(25, 25), &Rgb([255, 40, 130]));
        assert_eq!(block.get_pixel(0, 0), &Rgb([240, 10, 100]));
        assert_eq!(block.get_pixel(49, 49), &Rgb([240, 10, 100]));
        // radius 10 around (25, 25)
        assert_eq!(block.get_pixel(25, 15), &Rgb([255, 40, 130]));
        assert_eq!(block.get_pixel(25, 13), &Rgb([240, 10, 100]));
    }

    #[test]
    fn explicit_stud_color() {
        let mut block = RgbImage::from_pixel(20, 30, Rgb([0, 0, 0]));
        draw_stud(&mut block, Some(Rgb([1, 2, 3])));
        assert_eq!(block.get_pixel(10, 15), &Rgb([1, 2, 3]));
    }

    #[test]
    fn tiny_block_gets_a_single_pixel_stud() {
        let mut block = RgbImage::from_pixel(3, 3, Rgb([10, 10, 10]));
        draw_stud(&mut block, None);
        assert_eq!(block.get_pixel(1, 1), &Rgb([40, 40, 40]));
        assert_eq!(block.get_pixel(0, 1), &Rgb([10, 10, 10]));
    }

    #[test]
    fn block_keeps_tile_size_and_base_color() {
        let palette = BrickPalette::from_hex(["FF0000", "00FF00", "0000FF"]).unwrap();
        let stylizer = Stylizer::new(&palette);
        let tile = RgbImage::from_pixel(13, 7, Rgb([250, 10, 10]));
        let block = stylizer.stylize_image(&tile).unwrap();
        assert_eq!(block.dimensions(), (13, 7));
        assert_eq!(block.get_pixel(0, 0), &Rgb([255, 0, 0]));
    }

    #[test]
    fn stylize_is_deterministic() {
        let stylizer = Stylizer::new(BrickPalette::builtin());
        let tile = checker(31, 17);
        let first = stylizer.stylize_image(&tile).unwrap();
        for _ in 0..3 {
            assert_eq!(stylizer.stylize_image(&tile).unwrap().as_raw(), first.as_raw());
        }
    }
}
