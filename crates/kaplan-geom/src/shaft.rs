//! The turbine shaft.

use std::f64::consts::PI;

use crate::error::{ensure_positive, Result};
use crate::grid::{sample_grid, SamplingGrid};
use crate::surface::SampledSurface;

/// A right circular cylinder standing on the XY plane, axis along +Z.
///
/// Parameterization: `P(a, v) = (radius cos a, radius sin a, v)` for
/// `a ∈ [0, 2π]`, `v ∈ [0, height]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shaft {
    radius: f64,
    height: f64,
}

impl Shaft {
    /// Create a shaft. Both dimensions must be finite and strictly positive.
    pub fn new(radius: f64, height: f64) -> Result<Self> {
        Ok(Self {
            radius: ensure_positive("shaft radius must be positive", radius)?,
            height: ensure_positive("shaft height must be positive", height)?,
        })
    }

    /// Cylinder radius.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Cylinder height.
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Sample the lateral surface on the default 100 x 100 grid.
    pub fn sample(&self) -> SampledSurface {
        self.sample_with(&SamplingGrid::SHAFT)
    }

    /// Sample the lateral surface on a custom grid. Every cell is defined.
    pub fn sample_with(&self, grid: &SamplingGrid) -> SampledSurface {
        let (angle, vertical) = sample_grid((0.0, 2.0 * PI), (0.0, self.height), grid);
        let r = self.radius;
        let x = angle.mapv(|a| r * a.cos());
        let y = angle.mapv(|a| r * a.sin());

        log::trace!(
            "sampled shaft r={} h={} on {}x{} grid",
            r,
            self.height,
            grid.secondary_samples,
            grid.angle_samples
        );

        SampledSurface::from_grid(x, y, vertical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::GeometryError;

    #[test]
    fn test_rejects_non_positive_dimensions() {
        assert!(matches!(
            Shaft::new(0.0, 3.0),
            Err(GeometryError::InvalidGeometry { .. })
        ));
        assert!(Shaft::new(3.0, -1.0).is_err());
        assert!(Shaft::new(f64::NAN, 1.0).is_err());
        assert!(Shaft::new(f64::INFINITY, 1.0).is_err());
    }

    #[test]
    fn test_points_lie_on_cylinder() {
        let shaft = Shaft::new(3.0, 3.0).unwrap();
        let surface = shaft.sample();
        assert_eq!(surface.shape(), (100, 100));
        assert_eq!(surface.defined_count(), 100 * 100);
        for (_, p) in surface.defined_points() {
            let r2 = p.x * p.x + p.y * p.y;
            assert!((r2 - 9.0).abs() < 1e-9, "x²+y² = {r2}");
            assert!((0.0..=3.0).contains(&p.z));
        }
    }

    #[test]
    fn test_grid_orientation() {
        let shaft = Shaft::new(2.0, 5.0).unwrap();
        let s = shaft.sample_with(&SamplingGrid {
            angle_samples: 5,
            secondary_samples: 3,
        });
        assert_eq!(s.shape(), (3, 5));
        // rows climb the shaft, columns walk around it
        assert_eq!(s.z()[[0, 4]], 0.0);
        assert_eq!(s.z()[[2, 0]], 5.0);
        assert_eq!(s.x()[[1, 0]], 2.0);
        assert!((s.x()[[1, 2]] + 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_closed_seam() {
        let s = Shaft::new(1.0, 1.0).unwrap().sample();
        let first = s.point(0, 0).unwrap();
        let last = s.point(0, 99).unwrap();
        assert!((first - last).norm() < 1e-12);
    }
}
