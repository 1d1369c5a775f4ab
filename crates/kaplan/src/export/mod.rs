//! Mesh export formats.

pub mod stl;
