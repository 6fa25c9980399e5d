extern crate image;
use image::{imageops::FilterType, DynamicImage};

use crate::MosaicError;

pub mod assemble;
pub mod brick_colors;
pub mod brick_pixelizer;
pub mod grid;
pub mod stylize;

use grid::GridSpec;

pub trait Pixelizer{
    fn pixelize(&self, img: &DynamicImage, grid: GridSpec) -> Result<DynamicImage, MosaicError>;
}

/// Blow `img` up to `target_width` with nearest-neighbour sampling, keeping the
/// aspect ratio. Images already at least that wide are returned unchanged.
pub fn upscale_to_width(img: DynamicImage, target_width: u32) -> DynamicImage {
    if img.width() == 0 || img.width() >= target_width {
        return img;
    }
    let scale = target_width as f64 / img.width() as f64;
    let new_height = (img.height() as f64 * scale) as u32;
    img.resize_exact(target_width, new_height.max(1), FilterType::Nearest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn upscale_keeps_aspect_ratio() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(96, 48, Rgb([1, 2, 3])));
        let up = upscale_to_width(img, 800);
        assert_eq!((up.width(), up.height()), (800, 400));
        assert_eq!(up.to_rgb8().get_pixel(799, 399), &Rgb([1, 2, 3]));
    }

    #[test]
    fn wide_images_are_left_alone() {
        let img = DynamicImage::ImageRgb8(RgbImage::new(1000, 10));
        let up = upscale_to_width(img, 800);
        assert_eq!((up.width(), up.height()), (1000, 10));
    }
}
