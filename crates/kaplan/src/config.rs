//! TOML scene files.
//!
//! Every section and field is optional; an empty file describes the
//! reference turbine.
//!
//! ```toml
//! [shaft]
//! radius = 3.0
//! height = 3.0
//!
//! [blades]
//! count = 8
//! depth = 3.0
//! span = 1.0
//! pitch = 0.7853981633974483
//! shaping = "identity"
//!
//! [view]
//! elevation = 10.0
//! azimuth = 20.0
//! aspect = "equal"
//! show_axes = false
//!
//! [render]
//! width = 640
//! height = 480
//! ```

use std::f64::consts::FRAC_PI_4;
use std::path::Path;

use kaplan_geom::{Shaft, ShapingFn};
use kaplan_render::{Aspect, View};
use serde::{Deserialize, Serialize};

use crate::error::{KaplanError, Result};
use crate::scene::Scene;

/// Figure size in inches used to turn a DPI into a pixel resolution.
pub const FIGURE_INCHES: (f64, f64) = (6.4, 4.8);

/// A complete scene description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    /// Shaft dimensions.
    pub shaft: ShaftConfig,
    /// Blade ring layout.
    pub blades: BladeConfig,
    /// Camera placement.
    pub view: ViewConfig,
    /// Output resolution.
    pub render: RenderConfig,
}

/// `[shaft]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShaftConfig {
    /// Cylinder radius.
    pub radius: f64,
    /// Cylinder height.
    pub height: f64,
}

impl Default for ShaftConfig {
    fn default() -> Self {
        Self {
            radius: 3.0,
            height: 3.0,
        }
    }
}

/// `[blades]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BladeConfig {
    /// Number of blades.
    pub count: usize,
    /// Radial extent beyond the shaft surface.
    pub depth: f64,
    /// Angular width of each blade (radians).
    pub span: f64,
    /// Angular offset between consecutive blades (radians).
    pub pitch: f64,
    /// Shaping preset name, see [`ShapingFn::from_name`].
    pub shaping: String,
}

impl Default for BladeConfig {
    fn default() -> Self {
        Self {
            count: 8,
            depth: 3.0,
            span: 1.0,
            pitch: FRAC_PI_4,
            shaping: "identity".to_string(),
        }
    }
}

/// Axis scaling as written in scene files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AspectMode {
    /// Same unit length on every axis.
    #[default]
    Equal,
    /// Stretch the bounding box into a cube.
    Box,
}

impl From<AspectMode> for Aspect {
    fn from(mode: AspectMode) -> Self {
        match mode {
            AspectMode::Equal => Aspect::Equal,
            AspectMode::Box => Aspect::Box,
        }
    }
}

/// `[view]` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    /// Degrees above the XY plane.
    pub elevation: f64,
    /// Degrees around Z from +X.
    pub azimuth: f64,
    /// Axis scaling.
    pub aspect: AspectMode,
    /// Draw the bounding box.
    pub show_axes: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        let view = View::default();
        Self {
            elevation: view.elevation,
            azimuth: view.azimuth,
            aspect: AspectMode::Equal,
            show_axes: view.show_axes,
        }
    }
}

/// `[render]` section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::with_dpi(100.0)
    }
}

impl RenderConfig {
    /// Resolution of a 6.4 x 4.8 inch figure at `dpi` dots per inch.
    pub fn with_dpi(dpi: f64) -> Self {
        let px = |inches: f64| (inches * dpi).round().clamp(0.0, u32::MAX as f64) as u32;
        Self {
            width: px(FIGURE_INCHES.0),
            height: px(FIGURE_INCHES.1),
        }
    }
}

impl SceneConfig {
    /// Parse a scene file's contents.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a scene file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        log::debug!("loading scene file {}", path.display());
        Self::from_toml_str(&text)
    }

    /// Check values the geometry constructors cannot see.
    pub fn validate(&self) -> Result<()> {
        if !self.blades.pitch.is_finite() {
            return Err(KaplanError::Setting("blades.pitch must be finite".into()));
        }
        if !self.view.elevation.is_finite() || !self.view.azimuth.is_finite() {
            return Err(KaplanError::Setting(
                "view.elevation and view.azimuth must be finite".into(),
            ));
        }
        if self.render.width == 0 || self.render.height == 0 {
            return Err(KaplanError::Setting(
                "render.width and render.height must be positive".into(),
            ));
        }
        Ok(())
    }

    /// The camera described by `[view]`.
    pub fn view(&self) -> View {
        View {
            elevation: self.view.elevation,
            azimuth: self.view.azimuth,
            aspect: self.view.aspect.into(),
            show_axes: self.view.show_axes,
        }
    }

    /// Output resolution in pixels.
    pub fn resolution(&self) -> (u32, u32) {
        (self.render.width, self.render.height)
    }

    /// Build the scene.
    pub fn to_scene(&self) -> Result<Scene> {
        let shaft = Shaft::new(self.shaft.radius, self.shaft.height)?;
        let shaping = ShapingFn::from_name(&self.blades.shaping)?;
        let scene = Scene::with_blade_ring(
            shaft,
            self.blades.count,
            self.blades.span,
            self.blades.pitch,
            self.blades.depth,
            shaping,
        )?;
        Ok(scene.with_view(self.view()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_file_is_reference_scene() {
        let config = SceneConfig::from_toml_str("").unwrap();
        assert_eq!(config, SceneConfig::default());

        let scene = config.to_scene().unwrap();
        let reference = Scene::reference().unwrap();
        assert_eq!(scene.shaft(), reference.shaft());
        assert_eq!(scene.blades().len(), reference.blades().len());
        for (a, b) in scene.blades().iter().zip(reference.blades()) {
            assert_relative_eq!(a.angle_start(), b.angle_start());
            assert_relative_eq!(a.angle_end(), b.angle_end());
            assert_eq!(a.depth(), b.depth());
            assert_eq!(a.shaping().name(), b.shaping().name());
        }
        assert_eq!(scene.view(), reference.view());
        assert_eq!(config.resolution(), (640, 480));
    }

    #[test]
    fn test_partial_sections() {
        let config = SceneConfig::from_toml_str(
            r#"
            [blades]
            count = 3
            shaping = "power:2"

            [view]
            aspect = "box"
            show_axes = true
            "#,
        )
        .unwrap();
        assert_eq!(config.shaft, ShaftConfig::default());
        assert_eq!(config.blades.count, 3);
        assert_eq!(config.blades.depth, 3.0);

        let scene = config.to_scene().unwrap();
        assert_eq!(scene.blades().len(), 3);
        assert_eq!(scene.blades()[0].shaping().name(), "power:2");
        assert_eq!(scene.view().aspect, Aspect::Box);
        assert!(scene.view().show_axes);
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = SceneConfig::from_toml_str("[shaft]\nradius = 1.0\ncolour = 3\n").unwrap_err();
        assert!(matches!(err, KaplanError::Config(_)));
    }

    #[test]
    fn test_unknown_aspect_rejected() {
        assert!(SceneConfig::from_toml_str("[view]\naspect = \"auto\"\n").is_err());
    }

    #[test]
    fn test_zero_resolution_rejected() {
        let err = SceneConfig::from_toml_str("[render]\nwidth = 0\n").unwrap_err();
        assert!(matches!(err, KaplanError::Setting(_)));
    }

    #[test]
    fn test_invalid_geometry_surfaces_at_build() {
        let config = SceneConfig::from_toml_str("[shaft]\nradius = -1.0\n").unwrap();
        assert!(matches!(config.to_scene(), Err(KaplanError::Geometry(_))));

        let config = SceneConfig::from_toml_str("[blades]\nshaping = \"wobbly\"\n").unwrap();
        assert!(matches!(config.to_scene(), Err(KaplanError::Geometry(_))));

        let config = SceneConfig::from_toml_str("[blades]\nshaping = \"constant:2\"\n").unwrap();
        assert!(matches!(config.to_scene(), Err(KaplanError::Geometry(_))));
    }

    #[test]
    fn test_dpi_resolution() {
        assert_eq!(RenderConfig::with_dpi(100.0), RenderConfig { width: 640, height: 480 });
        assert_eq!(RenderConfig::with_dpi(300.0), RenderConfig { width: 1920, height: 1440 });
    }

    #[test]
    fn test_round_trip_through_toml() {
        let config = SceneConfig::default();
        let text = toml::to_string(&config).unwrap();
        assert_eq!(SceneConfig::from_toml_str(&text).unwrap(), config);
    }
}
