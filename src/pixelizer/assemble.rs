use image::{imageops, RgbImage};
use log::debug;

use super::grid::GridSpec;
use super::stylize::StyledBlock;
use crate::MosaicError;

/// Lay blocks out on a `cols x rows` canvas, in the same row-major order the
/// slicer produced them.
///
/// The cell size comes from the first block. Blocks are expected to share it;
/// a larger block (from an edge tile) is clipped at the canvas border.
pub fn assemble(blocks: &[StyledBlock], grid: GridSpec) -> Result<RgbImage, MosaicError> {
    grid.validate()?;
    let first = blocks.first().ok_or(MosaicError::EmptyInput)?;

    let expected = grid.num_cells();
    if blocks.len() != expected {
        return Err(MosaicError::BlockCountMismatch {
            expected,
            actual: blocks.len(),
        });
    }

    let (block_width, block_height) = first.dimensions();
    let mut canvas = RgbImage::new(grid.cols * block_width, grid.rows * block_height);
    debug!(
        "Assembling {} blocks of {}x{} into {}x{}",
        blocks.len(),
        block_width,
        block_height,
        canvas.width(),
        canvas.height()
    );

    for (index, block) in blocks.iter().enumerate() {
        let row = index as u32 / grid.cols;
        let col = index as u32 % grid.cols;
        let x = (col * block_width) as i64;
        let y = (row * block_height) as i64;
        imageops::replace(&mut canvas, block, x, y);
    }
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(w: u32, h: u32, v: u8) -> RgbImage {
        RgbImage::from_pixel(w, h, Rgb([v, v, v]))
    }

    #[test]
    fn places_blocks_row_major() {
        let blocks: Vec<RgbImage> = (0..6).map(|i| solid(4, 3, i as u8 * 10)).collect();
        let grid = GridSpec::new(3, 2).unwrap();
        let out = assemble(&blocks, grid).unwrap();
        assert_eq!(out.dimensions(), (12, 6));
        for i in 0..6u32 {
            let (x, y) = ((i % 3) * 4, (i / 3) * 3);
            let v = i as u8 * 10;
            assert_eq!(out.get_pixel(x, y), &Rgb([v, v, v]));
            assert_eq!(out.get_pixel(x + 3, y + 2), &Rgb([v, v, v]));
        }
    }

    #[test]
    fn oversized_edge_blocks_are_clipped() {
        let blocks = vec![solid(5, 5, 1), solid(6, 5, 2)];
        let out = assemble(&blocks, GridSpec::new(2, 1).unwrap()).unwrap();
        assert_eq!(out.dimensions(), (10, 5));
        assert_eq!(out.get_pixel(9, 4), &Rgb([2, 2, 2]));
    }

    #[test]
    fn empty_input() {
        assert_eq!(
            assemble(&[], GridSpec::new(1, 1).unwrap()),
            Err(MosaicError::EmptyInput)
        );
    }

    #[test]
    fn count_mismatch_reports_both_counts() {
        let blocks = vec![solid(2, 2, 0); 3];
        assert_eq!(
            assemble(&blocks, GridSpec::new(2, 2).unwrap()),
            Err(MosaicError::BlockCountMismatch {
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn does_not_touch_input_blocks() {
        let blocks = vec![solid(2, 2, 7); 4];
        let before = blocks.clone();
        assemble(&blocks, GridSpec::new(2, 2).unwrap()).unwrap();
        assert_eq!(blocks, before);
    }
}
