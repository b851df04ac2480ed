//! Core error types

use thiserror::Error;

/// Errors raised by snapshot and color operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A crop rectangle reaches outside the source image
    #[error(
        "crop {width}x{height} at ({x}, {y}) exceeds image bounds {image_width}x{image_height}"
    )]
    CropOutOfBounds {
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        image_width: u32,
        image_height: u32,
    },

    /// An image with zero width or height was requested
    #[error("image dimensions must be non-zero, got {width}x{height}")]
    EmptyImage { width: u32, height: u32 },

    /// A color string could not be parsed
    #[error("invalid color '{0}': expected #RRGGBB or #AARRGGBB")]
    InvalidColor(String),
}

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;
