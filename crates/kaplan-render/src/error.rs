//! Error types for rendering.

use thiserror::Error;

/// Largest accepted frame edge in pixels.
pub const MAX_DIMENSION: u32 = 16_384;

/// Errors that can occur while rendering or writing frames.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Requested frame size is zero or too large.
    #[error("invalid resolution {width}x{height} (each side must be 1..={MAX_DIMENSION})")]
    InvalidResolution {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Encoding or writing the image failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for render operations.
pub type Result<T> = std::result::Result<T, RenderError>;
