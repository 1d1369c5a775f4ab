#![warn(missing_docs)]

//! Surface generators for the kaplan turbine model.
//!
//! Two closed-form generators produce [`SampledSurface`]s:
//!
//! - [`Shaft`] samples a right circular cylinder.
//! - [`Blade`] samples an elliptically bounded patch of the annulus around
//!   a shaft, warped vertically by a [`ShapingFn`].
//!
//! Generators are pure: they return coordinate arrays and never render.
//! Grid cells outside a blade's footprint carry the [`UNDEFINED`] marker
//! (NaN) in all three coordinates.
//!
//! # Example
//!
//! ```
//! use kaplan_geom::{Blade, Shaft};
//!
//! let shaft = Shaft::new(3.0, 3.0)?;
//! let blade = Blade::new(0.0, 1.0, 3.0)?;
//! let surface = blade.sample(&shaft);
//! assert!(surface.defined_count() > 0);
//! # Ok::<(), kaplan_geom::GeometryError>(())
//! ```

mod blade;
pub mod error;
pub mod grid;
mod shaft;
mod shaping;
mod surface;

pub use blade::Blade;
pub use error::{GeometryError, Result};
pub use grid::{mesh_grid, SamplingGrid};
pub use shaft::Shaft;
pub use shaping::ShapingFn;
pub use surface::{SampledSurface, UNDEFINED};
