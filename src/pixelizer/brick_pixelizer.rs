use image::{DynamicImage, Rgb, RgbImage};
use log::debug;

use super::assemble::assemble;
use super::brick_colors::BrickPalette;
use super::grid::{slice, GridSpec};
use super::stylize::{StyledBlock, Stylizer};
use super::Pixelizer;
use crate::MosaicError;

/// Slices an image into a grid and redraws every cell as a brick.
#[derive(Debug, Clone)]
pub struct BrickPixelizer {
    palette: BrickPalette,
    stud_color: Option<Rgb<u8>>,
}

impl BrickPixelizer {
    pub fn new(palette: BrickPalette, stud_color: Option<Rgb<u8>>) -> Self {
        Self {
            palette,
            stud_color,
        }
    }

    pub fn palette(&self) -> &BrickPalette {
        &self.palette
    }

    /// Run the whole pipeline on an RGB image.
    ///
    /// Fails with `GridExceedsImage` when the grid has more columns or rows
    /// than the image has pixels.
    pub fn pixelize_rgb(&self, img: &RgbImage, grid: GridSpec) -> Result<RgbImage, MosaicError> {
        grid.validate()?;
        let (width, height) = img.dimensions();
        if width > 0 && height > 0 && (grid.cols > width || grid.rows > height) {
            return Err(MosaicError::GridExceedsImage {
                cols: grid.cols,
                rows: grid.rows,
                width,
                height,
            });
        }
        let tiles = slice(img, grid)?;
        let stylizer = Stylizer::new(&self.palette).with_stud_color(self.stud_color);
        let blocks = tiles
            .iter()
            .map(|tile| stylizer.stylize(tile))
            .collect::<Result<Vec<StyledBlock>, _>>()?;
        debug!("Stylized {} tiles", blocks.len());
        assemble(&blocks, grid)
    }
}

impl Default for BrickPixelizer {
    fn default() -> Self {
        Self::new(BrickPalette::builtin().clone(), None)
    }
}

impl Pixelizer for BrickPixelizer {
    fn pixelize(&self, img: &DynamicImage, grid: GridSpec) -> Result<DynamicImage, MosaicError> {
        let rgb_img = img.to_rgb8();
        let mosaic = self.pixelize_rgb(&rgb_img, grid)?;
        Ok(DynamicImage::ImageRgb8(mosaic))
    }
}
