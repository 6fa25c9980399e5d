mod error;
mod pixelizer;
pub use error::MosaicError;
pub use pixelizer::{upscale_to_width, Pixelizer};
pub use pixelizer::assemble::assemble;
pub use pixelizer::brick_colors::{average_color, hex_to_pixel, parse_hex_color, BrickPalette, BRICK_COLORS};
pub use pixelizer::brick_pixelizer::BrickPixelizer;
pub use pixelizer::grid::{slice, GridSpec, Tile};
pub use pixelizer::stylize::{add_shading, draw_stud, StyledBlock, Stylizer};
