//! Parameter grids shared by the surface generators.

use kaplan_math::linspace;
use ndarray::Array2;

/// Sample counts for a two-parameter surface.
///
/// `angle_samples` become the columns of every produced array and
/// `secondary_samples` (height for the shaft, radial position for a blade)
/// become the rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplingGrid {
    /// Number of samples along the angular parameter.
    pub angle_samples: usize,
    /// Number of samples along the second parameter.
    pub secondary_samples: usize,
}

impl SamplingGrid {
    /// Default resolution for the shaft: 100 x 100.
    pub const SHAFT: Self = Self::square(100);

    /// Default resolution for a blade: 200 x 200.
    pub const BLADE: Self = Self::square(200);

    /// Same sample count along both parameters.
    pub const fn square(samples: usize) -> Self {
        Self {
            angle_samples: samples,
            secondary_samples: samples,
        }
    }

    /// Total number of grid cells.
    pub fn len(&self) -> usize {
        self.angle_samples * self.secondary_samples
    }

    /// True when either parameter has no samples.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Outer product of two sampled parameters.
///
/// Returns `(angle, secondary)` grids of shape
/// `(secondary.len(), angle.len())`: entry `[i, j]` pairs `angle[j]` with
/// `secondary[i]`.
pub fn mesh_grid(angle: &[f64], secondary: &[f64]) -> (Array2<f64>, Array2<f64>) {
    let shape = (secondary.len(), angle.len());
    let a = Array2::from_shape_fn(shape, |(_, j)| angle[j]);
    let s = Array2::from_shape_fn(shape, |(i, _)| secondary[i]);
    (a, s)
}

/// Sample both parameter ranges uniformly and form their outer-product grid.
pub(crate) fn sample_grid(
    angle_range: (f64, f64),
    secondary_range: (f64, f64),
    grid: &SamplingGrid,
) -> (Array2<f64>, Array2<f64>) {
    let angle = linspace(angle_range.0, angle_range.1, grid.angle_samples);
    let secondary = linspace(secondary_range.0, secondary_range.1, grid.secondary_samples);
    mesh_grid(&angle, &secondary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mesh_grid_layout() {
        let (a, s) = mesh_grid(&[0.0, 1.0, 2.0], &[10.0, 20.0]);
        assert_eq!(a.dim(), (2, 3));
        assert_eq!(s.dim(), (2, 3));
        assert_eq!(a[[1, 2]], 2.0);
        assert_eq!(s[[1, 2]], 20.0);
        assert_eq!(a[[0, 0]], 0.0);
        assert_eq!(s[[0, 1]], 10.0);
    }

    #[test]
    fn test_sample_grid_covers_ranges() {
        let (a, s) = sample_grid((0.0, 1.0), (3.0, 6.0), &SamplingGrid::BLADE);
        assert_eq!(a.dim(), (200, 200));
        assert_eq!(a[[0, 0]], 0.0);
        assert_eq!(a[[0, 199]], 1.0);
        assert_eq!(s[[0, 0]], 3.0);
        assert_eq!(s[[199, 0]], 6.0);
    }

    #[test]
    fn test_grid_len() {
        assert_eq!(SamplingGrid::SHAFT.len(), 10_000);
        assert!(SamplingGrid::square(0).is_empty());
    }
}
