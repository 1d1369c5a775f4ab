#![warn(missing_docs)]

//! Software rendering of sampled surfaces for the kaplan turbine model.
//!
//! # Architecture
//!
//! - [`RenderSurface`] - The seam between scene composition and display:
//!   accepts named surfaces with a [`SurfaceStyle`] and a static [`View`]
//! - [`Rasterizer`] - Offscreen implementation producing a [`Frame`]
//! - [`Camera`] - Orthographic projection from elevation/azimuth
//! - [`Frame`] - Color, depth and layer buffers; PNG output
//!
//! Undefined samples are "no data": every grid cell touching one is
//! dropped during tessellation, so an all-undefined surface draws nothing.

mod camera;
mod color;
pub mod error;
mod raster;

pub use camera::{box_corners, Aspect, Camera, View, BOX_EDGES};
pub use color::{cycle_color, Rgb, TAB10};
pub use error::{RenderError, Result};
pub use raster::{Frame, ScreenVertex};

use kaplan_geom::SampledSurface;
use kaplan_math::{Point3, Vec3};
use kaplan_tessellate::{tessellate_surface, SurfaceMesh, TessellationParams};

/// Share of a face's color that does not depend on lighting.
const AMBIENT: f32 = 0.35;

/// Depth pulled off outline segments so they sit on top of their own faces.
const EDGE_BIAS: f32 = 2e-3;

/// How one submitted surface is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceStyle {
    /// Draw priority: on depth ties the higher layer is shown.
    pub layer: i32,
    /// Fill color before shading.
    pub face_color: Rgb,
    /// Outline color of the grid cells, if outlines are drawn.
    pub edge_color: Option<Rgb>,
}

impl Default for SurfaceStyle {
    fn default() -> Self {
        Self {
            layer: 1,
            face_color: cycle_color(0),
            edge_color: None,
        }
    }
}

/// A display target for sampled surfaces.
pub trait RenderSurface {
    /// Add a surface to the scene.
    fn submit(&mut self, name: &str, surface: &SampledSurface, style: SurfaceStyle);

    /// Set the camera and decorations.
    fn set_view(&mut self, view: View);

    /// Draw everything submitted so far.
    fn finish(&mut self) -> Result<Frame>;
}

/// A surface waiting to be drawn.
#[derive(Debug, Clone)]
struct Submission {
    name: String,
    mesh: SurfaceMesh,
    style: SurfaceStyle,
}

/// Offscreen z-buffer rasterizer.
#[derive(Debug, Clone)]
pub struct Rasterizer {
    width: u32,
    height: u32,
    params: TessellationParams,
    view: View,
    items: Vec<Submission>,
}

impl Rasterizer {
    /// A rasterizer producing `width x height` frames on a white background.
    pub fn new(width: u32, height: u32) -> Result<Self> {
        // validate once up front rather than at finish()
        Frame::new(width, height, Rgb::WHITE)?;
        Ok(Self {
            width,
            height,
            params: TessellationParams::default(),
            view: View::default(),
            items: Vec::new(),
        })
    }

    /// Change the tessellation density.
    pub fn with_tessellation(mut self, params: TessellationParams) -> Self {
        self.params = params;
        self
    }

    /// The current view.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Names of submitted surfaces, in submission order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|s| s.name.as_str())
    }

    /// Bounds of every submitted vertex, or `None` if nothing drawable was submitted.
    fn bounds(&self) -> Option<(Point3, Point3)> {
        let mut acc: Option<(Point3, Point3)> = None;
        for item in &self.items {
            let mesh = &item.mesh.mesh;
            for i in 0..mesh.num_vertices() as u32 {
                let p = mesh.vertex(i);
                acc = Some(match acc {
                    None => (p, p),
                    Some((lo, hi)) => (lo.inf(&p), hi.sup(&p)),
                });
            }
        }
        acc
    }

    fn shade(&self, base: Rgb, normal: &Vec3, light: &Vec3) -> Rgb {
        // two-sided: back faces are lit like front faces
        let lambert = normal.dot(light).abs() as f32;
        base.scaled(AMBIENT + (1.0 - AMBIENT) * lambert)
    }

    fn draw_item(&self, frame: &mut Frame, camera: &Camera, light: &Vec3, item: &Submission) {
        let mesh = &item.mesh.mesh;
        let screen: Vec<Point3> = (0..mesh.num_vertices() as u32)
            .map(|i| camera.project(&mesh.vertex(i)))
            .collect();

        for tri in mesh.triangles() {
            let v = tri.map(|i| ScreenVertex {
                pos: screen[i as usize],
                color: self.shade(item.style.face_color, &mesh.normal(i), light),
            });
            frame.fill_triangle(v, item.style.layer);
        }

        if let Some(edge_color) = item.style.edge_color {
            for &[a, b] in &item.mesh.edges {
                frame.draw_line(
                    screen[a as usize],
                    screen[b as usize],
                    edge_color,
                    item.style.layer,
                    EDGE_BIAS,
                );
            }
        }
    }

    fn draw_axes(&self, frame: &mut Frame, camera: &Camera, lo: &Point3, hi: &Point3) {
        let corners = box_corners(lo, hi).map(|c| camera.project(&c));
        for [a, b] in BOX_EDGES {
            frame.draw_line(corners[a], corners[b], Rgb::GRAY, i32::MIN, 0.0);
        }
    }
}

impl RenderSurface for Rasterizer {
    fn submit(&mut self, name: &str, surface: &SampledSurface, style: SurfaceStyle) {
        let mesh = tessellate_surface(surface, &self.params);
        log::debug!(
            "submitted `{}`: {} triangles on layer {}",
            name,
            mesh.mesh.num_triangles(),
            style.layer
        );
        self.items.push(Submission {
            name: name.to_string(),
            mesh,
            style,
        });
    }

    fn set_view(&mut self, view: View) {
        self.view = view;
    }

    fn finish(&mut self) -> Result<Frame> {
        let mut frame = Frame::new(self.width, self.height, Rgb::WHITE)?;
        let Some((lo, hi)) = self.bounds() else {
            log::warn!("nothing to draw: all {} submitted surfaces are empty", self.items.len());
            return Ok(frame);
        };

        let camera = Camera::fit(&self.view, lo, hi, self.width, self.height);
        let light = (camera.eye() + Vec3::z() * 0.5).normalize();

        let mut order: Vec<&Submission> = self.items.iter().collect();
        order.sort_by_key(|s| s.style.layer);
        for item in order {
            self.draw_item(&mut frame, &camera, &light, item);
        }
        if self.view.show_axes {
            self.draw_axes(&mut frame, &camera, &lo, &hi);
        }

        log::debug!(
            "rendered {} surfaces into {}x{} frame, {} pixels covered",
            self.items.len(),
            self.width,
            self.height,
            frame.covered_pixels()
        );
        Ok(frame)
    }
}
