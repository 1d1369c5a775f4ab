//! Turbine blades.
//!
//! A blade is a patch of the horizontal annulus around the shaft, swept over
//! `[angle_start, angle_end]` and reaching `depth` past the shaft surface.
//! Its footprint in `(angle, radial)` parameter space is the half ellipse
//!
//! ```text
//! 4 (a - (s+e)/2)² / (s-e)²  +  (r - R)² / depth²  <  1
//! ```
//!
//! so it attaches to the shaft along its widest chord and narrows toward
//! its tip. Cells outside the footprint are left undefined rather than
//! clipped. Height is warped by the blade's shaping function and normalized
//! into the band `[0.4 H, 0.6 H]` of the shaft.

use ndarray::Zip;

use crate::error::{ensure_positive, GeometryError, Result};
use crate::grid::{sample_grid, SamplingGrid};
use crate::shaft::Shaft;
use crate::shaping::ShapingFn;
use crate::surface::{SampledSurface, UNDEFINED};

/// Lower edge of the blade band as a fraction of shaft height.
const BAND_BASE: f64 = 0.4;

/// Height of the blade band as a fraction of shaft height.
const BAND_SPAN: f64 = 0.2;

/// One blade, parameterized by its angular range and radial depth.
#[derive(Debug, Clone)]
pub struct Blade {
    angle_start: f64,
    angle_end: f64,
    depth: f64,
    shaping: ShapingFn,
}

impl Blade {
    /// Create a blade with the identity shaping function.
    ///
    /// Requires finite angles with `angle_start < angle_end` and a finite,
    /// strictly positive `depth`.
    pub fn new(angle_start: f64, angle_end: f64, depth: f64) -> Result<Self> {
        if !angle_start.is_finite() {
            return Err(GeometryError::InvalidGeometry {
                what: "blade start angle must be finite",
                value: angle_start,
            });
        }
        if !angle_end.is_finite() || angle_end <= angle_start {
            return Err(GeometryError::InvalidGeometry {
                what: "blade end angle must be finite and greater than its start angle",
                value: angle_end,
            });
        }
        Ok(Self {
            angle_start,
            angle_end,
            depth: ensure_positive("blade depth must be positive", depth)?,
            shaping: ShapingFn::identity(),
        })
    }

    /// Replace the shaping function.
    ///
    /// Not validated here: a degenerate function makes [`Blade::sample`]
    /// return an all-undefined surface. Use [`Blade::check_shaping`] to
    /// reject it up front.
    pub fn with_shaping(mut self, shaping: ShapingFn) -> Self {
        self.shaping = shaping;
        self
    }

    /// Start of the angular range (radians).
    pub fn angle_start(&self) -> f64 {
        self.angle_start
    }

    /// End of the angular range (radians).
    pub fn angle_end(&self) -> f64 {
        self.angle_end
    }

    /// `angle_end - angle_start`.
    pub fn span(&self) -> f64 {
        self.angle_end - self.angle_start
    }

    /// Radial extent beyond the shaft surface.
    pub fn depth(&self) -> f64 {
        self.depth
    }

    /// The shaping function.
    pub fn shaping(&self) -> &ShapingFn {
        &self.shaping
    }

    /// Boundary test: whether `(angle, radial)` lies strictly inside the
    /// elliptical footprint of this blade on `shaft`.
    ///
    /// Any NaN input is outside.
    pub fn contains(&self, angle: f64, radial: f64, shaft: &Shaft) -> bool {
        let (s, e) = (self.angle_start, self.angle_end);
        let along = 4.0 * (1.0 / (s - e)).powi(2) * (angle - (s + e) / 2.0).powi(2);
        let across = (1.0 / self.depth).powi(2) * (radial - shaft.radius()).powi(2);
        along + across < 1.0
    }

    /// `f(span) - f(0)`, the normalizer of the vertical warp.
    pub fn shaping_denominator(&self) -> f64 {
        self.shaping.eval(self.span()) - self.shaping.eval(0.0)
    }

    /// True when the shaping function cannot be normalized over this blade's span.
    pub fn shaping_is_degenerate(&self) -> bool {
        let d = self.shaping_denominator();
        d == 0.0 || !d.is_finite()
    }

    /// Reject a degenerate shaping function.
    pub fn check_shaping(&self) -> Result<()> {
        if self.shaping_is_degenerate() {
            return Err(GeometryError::DegenerateShaping {
                name: self.shaping.name().to_string(),
                span: self.span(),
            });
        }
        Ok(())
    }

    /// Height of the blade surface at `angle` on `shaft`.
    ///
    /// Runs from `0.4 H` at `angle_start` to `0.6 H` at `angle_end` for any
    /// monotonic shaping function. Undefined if the shaping is degenerate.
    pub fn height_at(&self, angle: f64, shaft: &Shaft) -> f64 {
        if self.shaping_is_degenerate() {
            return UNDEFINED;
        }
        self.warp(angle, self.shaping.eval(0.0), self.shaping_denominator(), shaft.height())
    }

    #[inline]
    fn warp(&self, angle: f64, base: f64, denom: f64, height: f64) -> f64 {
        let t = (self.shaping.eval(angle - self.angle_start) - base) / denom;
        BAND_SPAN * height * t + BAND_BASE * height
    }

    /// Sample the blade on the default 200 x 200 grid.
    pub fn sample(&self, shaft: &Shaft) -> SampledSurface {
        self.sample_with(shaft, &SamplingGrid::BLADE)
    }

    /// Sample the blade on a custom grid.
    ///
    /// Rows follow the radial position from `R` to `R + depth`, columns the
    /// angle. Cells failing the boundary test are undefined in all three
    /// coordinates, and so is every cell when the shaping is degenerate.
    pub fn sample_with(&self, shaft: &Shaft, grid: &SamplingGrid) -> SampledSurface {
        if self.shaping_is_degenerate() {
            log::warn!(
                "shaping function `{}` is degenerate over [{}, {}], blade left undefined",
                self.shaping.name(),
                self.angle_start,
                self.angle_end
            );
            return SampledSurface::undefined((grid.secondary_samples, grid.angle_samples));
        }

        let r0 = shaft.radius();
        let (mut angle, mut radial) = sample_grid(
            (self.angle_start, self.angle_end),
            (r0, r0 + self.depth),
            grid,
        );

        Zip::from(&mut angle).and(&mut radial).for_each(|a, r| {
            if !self.contains(*a, *r, shaft) {
                *a = UNDEFINED;
                *r = UNDEFINED;
            }
        });

        let x = Zip::from(&radial).and(&angle).map_collect(|&r, &a| r * a.cos());
        let y = Zip::from(&radial).and(&angle).map_collect(|&r, &a| r * a.sin());

        let base = self.shaping.eval(0.0);
        let denom = self.shaping_denominator();
        let h = shaft.height();
        // the shaping function may map NaN to a number, so mask explicitly
        let z = angle.mapv(|a| if a.is_nan() { UNDEFINED } else { self.warp(a, base, denom, h) });

        let surface = SampledSurface::from_grid(x, y, z);
        log::debug!(
            "sampled blade [{:.4}, {:.4}] depth {}: {} of {} cells defined",
            self.angle_start,
            self.angle_end,
            self.depth,
            surface.defined_count(),
            grid.len()
        );
        surface
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn shaft() -> Shaft {
        Shaft::new(3.0, 3.0).unwrap()
    }

    #[test]
    fn test_rejects_invalid_parameters() {
        assert!(Blade::new(1.0, 1.0, 3.0).is_err());
        assert!(Blade::new(1.0, 0.5, 3.0).is_err());
        assert!(Blade::new(0.0, 1.0, 0.0).is_err());
        assert!(Blade::new(0.0, 1.0, -2.0).is_err());
        assert!(Blade::new(f64::NAN, 1.0, 3.0).is_err());
        assert!(Blade::new(0.0, f64::INFINITY, 3.0).is_err());
        assert!(Blade::new(0.0, 1.0, 3.0).is_ok());
    }

    #[test]
    fn test_boundary_test() {
        let blade = Blade::new(0.0, 1.0, 3.0).unwrap();
        let shaft = shaft();
        // widest point: angular midpoint on the shaft surface
        assert!(blade.contains(0.5, 3.0, &shaft));
        // on the boundary is outside (strict inequality)
        assert!(!blade.contains(0.0, 3.0, &shaft));
        assert!(!blade.contains(1.0, 3.0, &shaft));
        assert!(!blade.contains(0.5, 6.0, &shaft));
        assert!(blade.contains(0.5, 5.99, &shaft));
        assert!(!blade.contains(f64::NAN, 4.0, &shaft));
    }

    #[test]
    fn test_reference_blade_ranges() {
        let shaft = shaft();
        let blade = Blade::new(0.0, 1.0, 3.0).unwrap();
        let s = blade.sample(&shaft);
        assert_eq!(s.shape(), (200, 200));
        assert!(s.defined_count() > 0);
        for (_, p) in s.defined_points() {
            assert!(p.z >= 1.2 - 1e-12 && p.z <= 1.8 + 1e-12, "z = {}", p.z);
            let rho = (p.x * p.x + p.y * p.y).sqrt();
            assert!(rho >= 3.0 - 1e-12 && rho <= 6.0 + 1e-12, "rho = {rho}");
        }
    }

    #[test]
    fn test_masked_cells_are_nan_in_every_coordinate() {
        let shaft = shaft();
        let blade = Blade::new(0.0, 1.0, 3.0).unwrap();
        let s = blade.sample(&shaft);
        let (rows, cols) = s.shape();
        for i in 0..rows {
            for j in 0..cols {
                let nan = [s.x()[[i, j]], s.y()[[i, j]], s.z()[[i, j]]].map(f64::is_nan);
                assert!(nan == [true; 3] || nan == [false; 3], "mixed cell at {i},{j}");
            }
        }
        // first and last angle columns sit on the ellipse boundary
        assert!(!s.is_defined(0, 0));
        assert!(!s.is_defined(0, cols - 1));
        // outermost radial row touches the tip only, which is on the boundary
        assert!((0..cols).all(|j| !s.is_defined(rows - 1, j)));
    }

    #[test]
    fn test_mask_ignores_shaping_output_for_nan() {
        let shaft = shaft();
        // maps NaN to a number; masked cells must stay undefined anyway
        let blade = Blade::new(0.0, 1.0, 3.0)
            .unwrap()
            .with_shaping(ShapingFn::new("clamped", |t: f64| if t.is_nan() { 0.0 } else { t }));
        let s = blade.sample(&shaft);
        assert!(s.z()[[0, 0]].is_nan());
        assert_eq!(
            s.defined_count(),
            Blade::new(0.0, 1.0, 3.0).unwrap().sample(&shaft).defined_count()
        );
    }

    #[test]
    fn test_height_band_with_identity() {
        let shaft = shaft();
        let blade = Blade::new(0.3, 1.3, 3.0).unwrap();
        assert_relative_eq!(blade.height_at(0.3, &shaft), 1.2, epsilon = 1e-12);
        assert_relative_eq!(blade.height_at(1.3, &shaft), 1.8, epsilon = 1e-12);
        assert_relative_eq!(blade.height_at(0.8, &shaft), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_height_is_affine_in_angle() {
        let shaft = shaft();
        let blade = Blade::new(0.0, 1.0, 3.0).unwrap();
        let s = blade.sample(&shaft);
        for (_, p) in s.defined_points() {
            let angle = p.y.atan2(p.x);
            assert_relative_eq!(p.z, 1.2 + 0.6 * angle, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_constant_shaping_is_all_undefined() {
        let shaft = shaft();
        let blade = Blade::new(0.0, 1.0, 3.0)
            .unwrap()
            .with_shaping(ShapingFn::constant(2.0));
        assert!(blade.shaping_is_degenerate());
        assert!(matches!(
            blade.check_shaping(),
            Err(GeometryError::DegenerateShaping { .. })
        ));
        let s = blade.sample(&shaft);
        assert_eq!(s.shape(), (200, 200));
        assert!(s.is_empty());
        assert!(s.x().iter().chain(s.y().iter()).chain(s.z().iter()).all(|v| v.is_nan()));
        assert!(blade.height_at(0.5, &shaft).is_nan());
    }

    #[test]
    fn test_periodic_shaping_is_degenerate_not_infinite() {
        // sin(0) == sin(π): zero denominator with a nonzero numerator inside
        let shaft = shaft();
        let blade = Blade::new(0.0, std::f64::consts::PI, 3.0)
            .unwrap()
            .with_shaping(ShapingFn::new("sin", |t: f64| (t.sin() * 1e6).round()));
        assert!(blade.shaping_is_degenerate());
        let s = blade.sample(&shaft);
        assert!(s.z().iter().all(|v| v.is_nan()));
    }

    #[test]
    fn test_shrinking_depth_shrinks_footprint() {
        let shaft = shaft();
        let radial: Vec<f64> = kaplan_math::linspace(3.0, 6.0, 80);
        let angle: Vec<f64> = kaplan_math::linspace(0.0, 1.0, 80);
        let inside = |depth: f64| {
            let blade = Blade::new(0.0, 1.0, depth).unwrap();
            radial
                .iter()
                .flat_map(|&r| angle.iter().map(move |&a| (a, r)))
                .filter(|&(a, r)| blade.contains(a, r, &shaft))
                .count()
        };
        let counts: Vec<usize> = [3.0, 2.0, 1.0, 0.5].iter().map(|&d| inside(d)).collect();
        assert!(counts.windows(2).all(|w| w[1] < w[0]), "{counts:?}");
    }

    #[test]
    fn test_sampling_is_idempotent() {
        let shaft = shaft();
        let blade = Blade::new(0.25, 1.5, 2.0)
            .unwrap()
            .with_shaping(ShapingFn::quadratic());
        let a = blade.sample(&shaft);
        let b = blade.sample(&shaft);
        for (u, v) in [(a.x(), b.x()), (a.y(), b.y()), (a.z(), b.z())] {
            assert!(u
                .iter()
                .zip(v.iter())
                .all(|(p, q)| p.to_bits() == q.to_bits() || (p.is_nan() && q.is_nan())));
        }
    }
}
