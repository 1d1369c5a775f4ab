//! Orthographic camera placed by elevation and azimuth.

use kaplan_math::{Dir3, Point3, Transform, Vec3};

/// Elevation is clamped short of the poles so the view keeps a defined up direction.
const MAX_ELEVATION_DEG: f64 = 89.9;

/// How the three model axes are scaled relative to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Aspect {
    /// One unit is the same length on every axis.
    #[default]
    Equal,
    /// Each axis is stretched so the bounding box becomes a cube.
    Box,
}

/// Static view settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct View {
    /// Angle of the eye above the XY plane, in degrees.
    pub elevation: f64,
    /// Rotation of the eye around the Z axis, in degrees from +X.
    pub azimuth: f64,
    /// Relative axis scaling.
    pub aspect: Aspect,
    /// Draw the model bounding box as axis decorations.
    pub show_axes: bool,
}

impl Default for View {
    /// Elevation 10°, azimuth 20°, equal aspect, axes hidden.
    fn default() -> Self {
        Self {
            elevation: 10.0,
            azimuth: 20.0,
            aspect: Aspect::Equal,
            show_axes: false,
        }
    }
}

impl View {
    /// Unit vector from the model toward the eye.
    pub fn eye_direction(&self) -> Vec3 {
        let elev = self
            .elevation
            .clamp(-MAX_ELEVATION_DEG, MAX_ELEVATION_DEG)
            .to_radians();
        let azim = self.azimuth.to_radians();
        Vec3::new(
            elev.cos() * azim.cos(),
            elev.cos() * azim.sin(),
            elev.sin(),
        )
    }
}

/// A camera fitted to a bounding box and a pixel viewport.
///
/// Maps world points to `(px, py, depth)`: pixel coordinates with the
/// origin at the top-left corner, and depth normalized to `[0, 1]` over the
/// fitted box (0 nearest the eye).
#[derive(Debug, Clone)]
pub struct Camera {
    to_view: Transform,
    pixel_scale: f64,
    view_center: (f64, f64),
    viewport: (f64, f64),
    depth_range: (f64, f64),
    eye: Vec3,
}

impl Camera {
    /// Fraction of the shorter viewport side left empty around the model.
    const MARGIN: f64 = 0.05;

    /// Fit the view so the box `[lo, hi]` fills a `width x height` viewport.
    pub fn fit(view: &View, lo: Point3, hi: Point3, width: u32, height: u32) -> Self {
        let eye = view.eye_direction();
        let forward = Dir3::new_normalize(-eye);
        let look = Transform::look_along(&forward, &Vec3::z());

        let center = midpoint(&lo, &hi);
        let extent = hi - lo;
        let axis_scale = |e: f64| if e > 1e-12 { 1.0 / e } else { 1.0 };
        let scale = match view.aspect {
            Aspect::Equal => Transform::identity(),
            Aspect::Box => Transform::scale(
                axis_scale(extent.x),
                axis_scale(extent.y),
                axis_scale(extent.z),
            ),
        };
        let to_view = look
            .then(&scale)
            .then(&Transform::translation(-center.x, -center.y, -center.z));

        let (mut x0, mut x1) = (f64::MAX, f64::MIN);
        let (mut y0, mut y1) = (f64::MAX, f64::MIN);
        let (mut z0, mut z1) = (f64::MAX, f64::MIN);
        for corner in box_corners(&lo, &hi) {
            let p = to_view.apply_point(&corner);
            x0 = x0.min(p.x);
            x1 = x1.max(p.x);
            y0 = y0.min(p.y);
            y1 = y1.max(p.y);
            z0 = z0.min(p.z);
            z1 = z1.max(p.z);
        }

        let (w, h) = (width as f64, height as f64);
        let margin = Self::MARGIN * w.min(h);
        let span_x = (x1 - x0).max(1e-12);
        let span_y = (y1 - y0).max(1e-12);
        let pixel_scale = ((w - 2.0 * margin) / span_x)
            .min((h - 2.0 * margin) / span_y)
            .max(1e-12);

        Self {
            to_view,
            pixel_scale,
            view_center: ((x0 + x1) / 2.0, (y0 + y1) / 2.0),
            viewport: (w, h),
            depth_range: (z0, (z1 - z0).max(1e-12)),
            eye,
        }
    }

    /// Project a world point to `(px, py, depth)`.
    pub fn project(&self, p: &Point3) -> Point3 {
        let v = self.to_view.apply_point(p);
        Point3::new(
            self.viewport.0 / 2.0 + self.pixel_scale * (v.x - self.view_center.0),
            self.viewport.1 / 2.0 - self.pixel_scale * (v.y - self.view_center.1),
            (v.z - self.depth_range.0) / self.depth_range.1,
        )
    }

    /// Unit vector from the model toward the eye, in world space.
    pub fn eye(&self) -> Vec3 {
        self.eye
    }
}

fn midpoint(lo: &Point3, hi: &Point3) -> Point3 {
    Point3::from((lo.coords + hi.coords) / 2.0)
}

/// The eight corners of an axis-aligned box.
pub fn box_corners(lo: &Point3, hi: &Point3) -> [Point3; 8] {
    [
        Point3::new(lo.x, lo.y, lo.z),
        Point3::new(hi.x, lo.y, lo.z),
        Point3::new(hi.x, hi.y, lo.z),
        Point3::new(lo.x, hi.y, lo.z),
        Point3::new(lo.x, lo.y, hi.z),
        Point3::new(hi.x, lo.y, hi.z),
        Point3::new(hi.x, hi.y, hi.z),
        Point3::new(lo.x, hi.y, hi.z),
    ]
}

/// Corner index pairs of the twelve box edges, matching [`box_corners`].
pub const BOX_EDGES: [[usize; 2]; 12] = [
    [0, 1],
    [1, 2],
    [2, 3],
    [3, 0],
    [4, 5],
    [5, 6],
    [6, 7],
    [7, 4],
    [0, 4],
    [1, 5],
    [2, 6],
    [3, 7],
];
