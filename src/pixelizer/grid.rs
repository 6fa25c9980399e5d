use image::{imageops, RgbImage};
use log::debug;

use crate::MosaicError;

/// Number of columns and rows the source image is cut into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub cols: u32,
    pub rows: u32,
}

impl GridSpec {
    pub fn new(cols: u32, rows: u32) -> Result<Self, MosaicError> {
        let grid = Self { cols, rows };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<(), MosaicError> {
        if self.cols == 0 || self.rows == 0 {
            return Err(MosaicError::InvalidGrid {
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(())
    }

    pub fn num_cells(&self) -> usize {
        self.cols as usize * self.rows as usize
    }
}

impl Default for GridSpec {
    fn default() -> Self {
        Self { cols: 48, rows: 48 }
    }
}

/// A rectangle cut out of the source image, with its position in the grid.
#[derive(Debug, Clone)]
pub struct Tile {
    pub image: RgbImage,
    pub row: u32,
    pub col: u32,
    /// Top-left corner in source image coordinates.
    pub origin: (u32, u32),
}

impl Tile {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Cut `img` into `grid.cols * grid.rows` tiles, in row-major order.
///
/// Every tile is `width / cols` by `height / rows` pixels, except that the last
/// column and the last row stretch to the image border and take the leftover
/// pixels of the integer division. A grid finer than the image yields
/// zero-sized tiles, with the last row and column holding every pixel.
pub fn slice(img: &RgbImage, grid: GridSpec) -> Result<Vec<Tile>, MosaicError> {
    grid.validate()?;
    let (width, height) = img.dimensions();
    if width == 0 || height == 0 {
        return Err(MosaicError::InvalidImage { width, height });
    }

    let tile_width = width / grid.cols;
    let tile_height = height / grid.rows;
    debug!(
        "Slicing {}x{} image into {}x{} tiles of {}x{}",
        width, height, grid.cols, grid.rows, tile_width, tile_height
    );

    let mut tiles = Vec::with_capacity(grid.num_cells());
    for row in 0..grid.rows {
        let y = row * tile_height;
        let h = if row + 1 == grid.rows { height - y } else { tile_height };
        for col in 0..grid.cols {
            let x = col * tile_width;
            let w = if col + 1 == grid.cols { width - x } else { tile_width };
            tiles.push(Tile {
                image: imageops::crop_imm(img, x, y, w, h).to_image(),
                row,
                col,
                origin: (x, y),
            });
        }
    }
    Ok(tiles)
}
