#![warn(missing_docs)]

//! Parametric Kaplan turbine model.
//!
//! A [`Scene`] holds one cylindrical [`Shaft`] and a ring of [`Blade`]s. Each
//! part is sampled over a fixed parameter grid into a [`SampledSurface`],
//! with cells outside a blade's elliptical outline left undefined (NaN). The
//! sampled surfaces are then handed to a [`RenderSurface`], tessellated for
//! STL export, or summarized.
//!
//! ```
//! use kaplan::{Rasterizer, Scene};
//!
//! let scene = Scene::reference().unwrap();
//! let mut target = Rasterizer::new(160, 120).unwrap();
//! let frame = scene.render(&mut target).unwrap();
//! assert!(frame.covered_pixels() > 0);
//! ```
//!
//! Scenes can also be described in TOML, see [`config`].

pub mod config;
pub mod error;
pub mod export;
mod scene;

pub use config::SceneConfig;
pub use error::{KaplanError, Result};
pub use scene::{Scene, SceneSurface, BLADE_LAYER, SHAFT_LAYER, SHAFT_NAME};

pub use kaplan_geom::{
    Blade, GeometryError, SampledSurface, SamplingGrid, Shaft, ShapingFn, UNDEFINED,
};
pub use kaplan_math::Point3;
pub use kaplan_render::{
    Aspect, Frame, Rasterizer, RenderError, RenderSurface, Rgb, SurfaceStyle, View,
};
pub use kaplan_tessellate::{tessellate_surface, TessellationParams, TriangleMesh};
