//! Z-buffered frame and its rasterization primitives.

use std::path::Path;

use image::RgbImage;
use kaplan_math::Point3;

use crate::color::Rgb;
use crate::error::{RenderError, Result, MAX_DIMENSION};

/// Two fragments closer than this in normalized depth are a tie, settled by layer.
const DEPTH_TIE: f32 = 1e-4;

/// One screen-space vertex: pixel position, normalized depth and shade.
#[derive(Debug, Clone, Copy)]
pub struct ScreenVertex {
    /// Pixel position (x, y) and normalized depth (z).
    pub pos: Point3,
    /// Color at this vertex.
    pub color: Rgb,
}

/// A rendered image with its depth and layer buffers.
#[derive(Debug, Clone)]
pub struct Frame {
    width: u32,
    height: u32,
    color: Vec<[u8; 3]>,
    depth: Vec<f32>,
    layer: Vec<i32>,
}

impl Frame {
    /// A blank frame filled with `background`.
    pub fn new(width: u32, height: u32, background: Rgb) -> Result<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(RenderError::InvalidResolution { width, height });
        }
        let n = width as usize * height as usize;
        Ok(Self {
            width,
            height,
            color: vec![background.to_u8(); n],
            depth: vec![f32::INFINITY; n],
            layer: vec![i32::MIN; n],
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Color of pixel `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.color[self.index(x, y)]
    }

    /// Number of pixels something was drawn on.
    pub fn covered_pixels(&self) -> usize {
        self.depth.iter().filter(|d| d.is_finite()).count()
    }

    /// Whether anything was drawn at `(x, y)`.
    pub fn is_covered(&self, x: u32, y: u32) -> bool {
        self.depth[self.index(x, y)].is_finite()
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Depth test with layer priority, writing the fragment if it wins.
    ///
    /// A strictly nearer fragment always wins; within [`DEPTH_TIE`] the
    /// higher (or equal) layer wins.
    fn plot(&mut self, x: i64, y: i64, depth: f32, layer: i32, color: Rgb) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 || depth.is_nan() {
            return;
        }
        let i = self.index(x as u32, y as u32);
        let current = self.depth[i];
        let wins = depth < current - DEPTH_TIE
            || ((depth - current).abs() <= DEPTH_TIE && layer >= self.layer[i]);
        if wins {
            self.depth[i] = depth.min(current);
            self.layer[i] = layer;
            self.color[i] = color.to_u8();
        }
    }

    /// Fill a triangle, interpolating depth and color across it.
    pub fn fill_triangle(&mut self, v: [ScreenVertex; 3], layer: i32) {
        let [a, b, c] = v.map(|s| s.pos);
        let area = edge(&a, &b, &c);
        if area.abs() < 1e-12 {
            return;
        }

        let min_x = a.x.min(b.x).min(c.x).floor().max(0.0) as i64;
        let max_x = a.x.max(b.x).max(c.x).ceil().min(self.width as f64 - 1.0) as i64;
        let min_y = a.y.min(b.y).min(c.y).floor().max(0.0) as i64;
        let max_y = a.y.max(b.y).max(c.y).ceil().min(self.height as f64 - 1.0) as i64;

        for py in min_y..=max_y {
            for px in min_x..=max_x {
                let p = Point3::new(px as f64 + 0.5, py as f64 + 0.5, 0.0);
                let w0 = edge(&b, &c, &p) / area;
                let w1 = edge(&c, &a, &p) / area;
                let w2 = edge(&a, &b, &p) / area;
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }
                let depth = (w0 * a.z + w1 * b.z + w2 * c.z) as f32;
                let (k0, k1, k2) = (w0 as f32, w1 as f32, w2 as f32);
                let color = Rgb::new(
                    k0 * v[0].color.r + k1 * v[1].color.r + k2 * v[2].color.r,
                    k0 * v[0].color.g + k1 * v[1].color.g + k2 * v[2].color.g,
                    k0 * v[0].color.b + k1 * v[1].color.b + k2 * v[2].color.b,
                );
                self.plot(px, py, depth, layer, color);
            }
        }
    }

    /// Draw a one-pixel line, pulled `bias` toward the eye so it wins over
    /// the faces it outlines.
    pub fn draw_line(&mut self, a: Point3, b: Point3, color: Rgb, layer: i32, bias: f32) {
        let steps = (b.x - a.x).abs().max((b.y - a.y).abs()).ceil().max(1.0) as usize;
        for s in 0..=steps {
            let t = s as f64 / steps as f64;
            let p = a + (b - a) * t;
            self.plot(
                p.x.floor() as i64,
                p.y.floor() as i64,
                p.z as f32 - bias,
                layer,
                color,
            );
        }
    }

    /// Copy into an RGB image.
    pub fn to_image(&self) -> RgbImage {
        RgbImage::from_fn(self.width, self.height, |x, y| image::Rgb(self.pixel(x, y)))
    }

    /// Write the frame as an image; the format follows the file extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        self.to_image().save(path)?;
        log::info!("wrote {}x{} frame to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Twice the signed area of triangle `(a, b, p)` in the XY plane.
fn edge(a: &Point3, b: &Point3, p: &Point3) -> f64 {
    (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex(x: f64, y: f64, z: f64, color: Rgb) -> ScreenVertex {
        ScreenVertex {
            pos: Point3::new(x, y, z),
            color,
        }
    }

    #[test]
    fn test_rejects_bad_resolution() {
        assert!(Frame::new(0, 10, Rgb::WHITE).is_err());
        assert!(Frame::new(10, MAX_DIMENSION + 1, Rgb::WHITE).is_err());
        assert!(Frame::new(1, 1, Rgb::WHITE).is_ok());
    }

    #[test]
    fn test_fill_covers_interior_only() {
        let mut f = Frame::new(10, 10, Rgb::WHITE).unwrap();
        let red = Rgb::RED;
        f.fill_triangle(
            [vertex(0.0, 0.0, 0.5, red), vertex(10.0, 0.0, 0.5, red), vertex(0.0, 10.0, 0.5, red)],
            0,
        );
        assert_eq!(f.pixel(1, 1), [255, 0, 0]);
        assert_eq!(f.pixel(9, 9), [255, 255, 255]);
        assert!(f.covered_pixels() > 40 && f.covered_pixels() < 60);
    }

    #[test]
    fn test_winding_does_not_matter() {
        let mut f = Frame::new(8, 8, Rgb::WHITE).unwrap();
        let c = Rgb::BLACK;
        f.fill_triangle(
            [vertex(0.0, 0.0, 0.5, c), vertex(0.0, 8.0, 0.5, c), vertex(8.0, 0.0, 0.5, c)],
            0,
        );
        assert!(f.is_covered(1, 1));
    }

    #[test]
    fn test_nearer_fragment_wins() {
        let mut f = Frame::new(4, 4, Rgb::WHITE).unwrap();
        let quad = |z: f64, c: Rgb| {
            [
                [vertex(0.0, 0.0, z, c), vertex(4.0, 0.0, z, c), vertex(4.0, 4.0, z, c)],
                [vertex(0.0, 0.0, z, c), vertex(4.0, 4.0, z, c), vertex(0.0, 4.0, z, c)],
            ]
        };
        for t in quad(0.2, Rgb::RED) {
            f.fill_triangle(t, 0);
        }
        for t in quad(0.8, Rgb::BLACK) {
            f.fill_triangle(t, 5);
        }
        assert_eq!(f.pixel(2, 2), [255, 0, 0]);
    }

    #[test]
    fn test_higher_layer_wins_ties() {
        let mut f = Frame::new(4, 4, Rgb::WHITE).unwrap();
        let tri = |c: Rgb| {
            [
                vertex(0.0, 0.0, 0.5, c),
                vertex(4.0, 0.0, 0.5, c),
                vertex(0.0, 4.0, 0.5, c),
            ]
        };
        f.fill_triangle(tri(Rgb::RED), 2);
        f.fill_triangle(tri(Rgb::BLACK), 1);
        assert_eq!(f.pixel(0, 0), [255, 0, 0]);
        f.fill_triangle(tri(Rgb::BLACK), 3);
        assert_eq!(f.pixel(0, 0), [0, 0, 0]);
    }

    #[test]
    fn test_line_with_bias_draws_over_face() {
        let mut f = Frame::new(10, 10, Rgb::WHITE).unwrap();
        let c = Rgb::BLACK;
        f.fill_triangle(
            [vertex(0.0, 0.0, 0.5, c), vertex(10.0, 0.0, 0.5, c), vertex(0.0, 10.0, 0.5, c)],
            0,
        );
        f.draw_line(Point3::new(0.5, 2.5, 0.5), Point3::new(5.5, 2.5, 0.5), Rgb::RED, 0, 1e-3);
        assert_eq!(f.pixel(3, 2), [255, 0, 0]);
    }

    #[test]
    fn test_to_image_dimensions() {
        let f = Frame::new(7, 3, Rgb::WHITE).unwrap();
        let img = f.to_image();
        assert_eq!(img.dimensions(), (7, 3));
        assert_eq!(img.get_pixel(6, 2).0, [255, 255, 255]);
    }
}
