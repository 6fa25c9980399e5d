use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MosaicError {
    #[error("Invalid image dimensions: width={width}, height={height}")]
    InvalidImage { width: u32, height: u32 },

    #[error("Invalid grid: cols={cols}, rows={rows} (both must be at least 1)")]
    InvalidGrid { cols: u32, rows: u32 },

    #[error("Grid {cols}x{rows} is finer than the {width}x{height} image")]
    GridExceedsImage {
        cols: u32,
        rows: u32,
        width: u32,
        height: u32,
    },

    #[error("Palette has no colors")]
    EmptyPalette,

    #[error("Invalid palette color {value:?}, expected RRGGBB")]
    InvalidPaletteColor { value: String },

    #[error("No blocks received")]
    EmptyInput,

    #[error("Expected {expected} blocks, got {actual}")]
    BlockCountMismatch { expected: usize, actual: usize },
}
