#![warn(missing_docs)]

//! Math types for the kaplan turbine model.
//!
//! Thin wrappers around nalgebra: points, vectors, directions, an affine
//! transform used by the camera, tolerance constants, and the uniform
//! sampling helper every surface generator builds its grid from.

use nalgebra::{Matrix4, Unit, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A 4x4 affine transformation matrix.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix.
    pub matrix: Matrix4<f64>,
}

impl Transform {
    /// Identity transform.
    pub fn identity() -> Self {
        Self {
            matrix: Matrix4::identity(),
        }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Non-uniform scale by `(sx, sy, sz)`.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        let mut m = Matrix4::identity();
        m[(0, 0)] = sx;
        m[(1, 1)] = sy;
        m[(2, 2)] = sz;
        Self { matrix: m }
    }

    /// Rigid rotation that maps world space into a view frame.
    ///
    /// The rows of the result are `right`, `up` and `forward`, so a
    /// transformed point has screen coordinates in `x`/`y` and its distance
    /// along the viewing direction in `z`. `forward` points from the viewer
    /// toward the model and must not be parallel to `up`.
    pub fn look_along(forward: &Dir3, up: &Vec3) -> Self {
        let f = forward.as_ref();
        let right = Dir3::new_normalize(f.cross(up));
        let cam_up = right.as_ref().cross(f);
        let mut m = Matrix4::identity();
        for (row, axis) in [right.into_inner(), cam_up, *f].iter().enumerate() {
            m[(row, 0)] = axis.x;
            m[(row, 1)] = axis.y;
            m[(row, 2)] = axis.z;
        }
        Self { matrix: m }
    }

    /// Compose: `self` then `other` (self * other).
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point.
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in model units.
    pub linear: f64,
}

impl Tolerance {
    /// Default tolerance (1e-9 linear).
    pub const DEFAULT: Self = Self { linear: 1e-9 };

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// `count` evenly spaced samples over the closed interval `[start, end]`.
///
/// The first sample is exactly `start` and the last exactly `end`. A count
/// of one yields `[start]`; zero yields an empty vector.
pub fn linspace(start: f64, end: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (count - 1) as f64;
            (0..count)
                .map(|i| {
                    if i == count - 1 {
                        end
                    } else {
                        start + step * i as f64
                    }
                })
                .collect()
        }
    }
}
