//! Error types for surface generation.

use thiserror::Error;

/// Errors raised when constructing shafts and blades.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A dimension or angle violates its construction invariant.
    #[error("invalid geometry: {what} (got {value})")]
    InvalidGeometry {
        /// Which invariant was violated.
        what: &'static str,
        /// The offending value.
        value: f64,
    },

    /// The shaping function takes the same value at both ends of the blade span,
    /// so the vertical normalization would divide by zero.
    #[error("shaping function `{name}` is degenerate over span {span}")]
    DegenerateShaping {
        /// Name of the shaping function.
        name: String,
        /// Angular span `angle_end - angle_start` it was evaluated over.
        span: f64,
    },

    /// No shaping function preset with this name.
    #[error("unknown shaping function: {0}")]
    UnknownShaping(String),
}

/// Result type for geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;

/// Reject non-finite or non-positive values.
pub(crate) fn ensure_positive(what: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(GeometryError::InvalidGeometry { what, value })
    }
}
