//! Errors returned by scene operations.

use thiserror::Error;

/// Errors returned by scene composition, configuration and export.
#[derive(Error, Debug)]
pub enum KaplanError {
    /// A shaft or blade violates its invariants.
    #[error(transparent)]
    Geometry(#[from] kaplan_geom::GeometryError),
    /// Rendering or image output failed.
    #[error(transparent)]
    Render(#[from] kaplan_render::RenderError),
    /// An I/O error occurred while reading configuration or exporting.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The scene file is not valid TOML or has unexpected fields.
    #[error("invalid scene file: {0}")]
    Config(#[from] toml::de::Error),
    /// A scene file value is out of range.
    #[error("invalid scene setting: {0}")]
    Setting(String),
    /// The geometry is empty (no triangles).
    #[error("Empty geometry")]
    EmptyGeometry,
}

/// Result type for scene operations.
pub type Result<T> = std::result::Result<T, KaplanError>;
