//! Scene composition: one shaft, a ring of blades, one render target.

use std::f64::consts::FRAC_PI_4;

use kaplan_geom::{Blade, SampledSurface, Shaft, ShapingFn};
use kaplan_render::{cycle_color, Frame, RenderSurface, Rgb, SurfaceStyle, View};
use kaplan_tessellate::{tessellate_surface, TessellationParams, TriangleMesh};

use crate::error::Result;

/// Draw priority of the shaft; blades sit one layer above it.
pub const SHAFT_LAYER: i32 = 1;

/// Draw priority of every blade.
pub const BLADE_LAYER: i32 = 2;

/// Name the shaft surface is submitted under.
pub const SHAFT_NAME: &str = "Base";

/// One sampled surface ready to hand to a renderer.
#[derive(Debug, Clone)]
pub struct SceneSurface {
    /// Display name (`Base`, `Turbine 0`, `Turbine 1`, ...).
    pub name: String,
    /// The sampled coordinates.
    pub surface: SampledSurface,
    /// How it should be drawn.
    pub style: SurfaceStyle,
}

/// A shaft with blades mounted around it, plus the view to show them in.
#[derive(Debug, Clone)]
pub struct Scene {
    shaft: Shaft,
    blades: Vec<Blade>,
    view: View,
    blade_edge_color: Option<Rgb>,
}

impl Scene {
    /// A scene with just a shaft, the default view and red blade outlines.
    pub fn new(shaft: Shaft) -> Self {
        Self {
            shaft,
            blades: Vec::new(),
            view: View::default(),
            blade_edge_color: Some(Rgb::RED),
        }
    }

    /// The reference turbine: a 3 x 3 shaft with eight blades of span 1 rad
    /// and depth 3, one every π/4.
    pub fn reference() -> Result<Self> {
        Self::with_blade_ring(Shaft::new(3.0, 3.0)?, 8, 1.0, FRAC_PI_4, 3.0, ShapingFn::identity())
    }

    /// A shaft with `count` blades; blade `n` spans
    /// `[n * pitch, n * pitch + span]`.
    pub fn with_blade_ring(
        shaft: Shaft,
        count: usize,
        span: f64,
        pitch: f64,
        depth: f64,
        shaping: ShapingFn,
    ) -> Result<Self> {
        let mut scene = Self::new(shaft);
        for n in 0..count {
            let start = n as f64 * pitch;
            let blade = Blade::new(start, start + span, depth)?.with_shaping(shaping.clone());
            scene.add_blade(blade)?;
        }
        Ok(scene)
    }

    /// Mount a blade. Rejects blades whose shaping function cannot be
    /// normalized over their span.
    pub fn add_blade(&mut self, blade: Blade) -> Result<()> {
        blade.check_shaping()?;
        self.blades.push(blade);
        Ok(())
    }

    /// Replace the view.
    pub fn with_view(mut self, view: View) -> Self {
        self.view = view;
        self
    }

    /// Outline color for blades, or `None` for no outlines.
    pub fn with_blade_edges(mut self, color: Option<Rgb>) -> Self {
        self.blade_edge_color = color;
        self
    }

    /// The shaft.
    pub fn shaft(&self) -> &Shaft {
        &self.shaft
    }

    /// Mounted blades, in mounting order.
    pub fn blades(&self) -> &[Blade] {
        &self.blades
    }

    /// The view.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Sample the shaft once and every blade against it.
    ///
    /// The shaft comes first. Face colors follow the categorical cycle in
    /// submission order.
    pub fn sample(&self) -> Vec<SceneSurface> {
        let mut out = Vec::with_capacity(self.blades.len() + 1);
        out.push(SceneSurface {
            name: SHAFT_NAME.to_string(),
            surface: self.shaft.sample(),
            style: SurfaceStyle {
                layer: SHAFT_LAYER,
                face_color: cycle_color(0),
                edge_color: None,
            },
        });
        for (n, blade) in self.blades.iter().enumerate() {
            out.push(SceneSurface {
                name: format!("Turbine {n}"),
                surface: blade.sample(&self.shaft),
                style: SurfaceStyle {
                    layer: BLADE_LAYER,
                    face_color: cycle_color(n + 1),
                    edge_color: self.blade_edge_color,
                },
            });
        }
        log::debug!("sampled scene: shaft and {} blades", self.blades.len());
        out
    }

    /// Submit every surface to `target`, apply the view and draw.
    pub fn render(&self, target: &mut impl RenderSurface) -> Result<Frame> {
        for item in self.sample() {
            target.submit(&item.name, &item.surface, item.style);
        }
        target.set_view(self.view);
        Ok(target.finish()?)
    }

    /// Tessellate the whole scene into one mesh.
    pub fn to_mesh(&self, params: &TessellationParams) -> TriangleMesh {
        let mut mesh = TriangleMesh::new();
        for item in self.sample() {
            mesh.merge(&tessellate_surface(&item.surface, params).mesh);
        }
        mesh
    }
}
