//! Sampled surfaces: the output of every generator.

use kaplan_math::Point3;
use ndarray::Array2;

/// Marker for a grid point with no geometry.
///
/// Arithmetic on it propagates it, and renderers treat it as "no data".
pub const UNDEFINED: f64 = f64::NAN;

/// Three equal-shape coordinate arrays describing a sampled surface.
///
/// Rows follow the generator's secondary parameter and columns its angle.
/// A cell is *defined* when none of its three coordinates is [`UNDEFINED`].
#[derive(Debug, Clone, PartialEq)]
pub struct SampledSurface {
    x: Array2<f64>,
    y: Array2<f64>,
    z: Array2<f64>,
}

impl SampledSurface {
    /// Assemble a surface from coordinate arrays.
    ///
    /// Returns `None` if the three shapes differ.
    pub fn from_arrays(x: Array2<f64>, y: Array2<f64>, z: Array2<f64>) -> Option<Self> {
        if x.dim() != y.dim() || x.dim() != z.dim() {
            return None;
        }
        Some(Self { x, y, z })
    }

    /// Arrays derived from one parameter grid always share a shape.
    pub(crate) fn from_grid(x: Array2<f64>, y: Array2<f64>, z: Array2<f64>) -> Self {
        debug_assert!(x.dim() == y.dim() && x.dim() == z.dim());
        Self { x, y, z }
    }

    /// A surface where every cell is undefined.
    pub fn undefined(shape: (usize, usize)) -> Self {
        Self {
            x: Array2::from_elem(shape, UNDEFINED),
            y: Array2::from_elem(shape, UNDEFINED),
            z: Array2::from_elem(shape, UNDEFINED),
        }
    }

    /// `(rows, cols)` of the coordinate arrays.
    pub fn shape(&self) -> (usize, usize) {
        self.x.dim()
    }

    /// X coordinates.
    pub fn x(&self) -> &Array2<f64> {
        &self.x
    }

    /// Y coordinates.
    pub fn y(&self) -> &Array2<f64> {
        &self.y
    }

    /// Z coordinates.
    pub fn z(&self) -> &Array2<f64> {
        &self.z
    }

    /// Whether the cell at `(row, col)` carries geometry.
    ///
    /// Out-of-range indices are reported as undefined.
    pub fn is_defined(&self, row: usize, col: usize) -> bool {
        self.point(row, col).is_some()
    }

    /// The point at `(row, col)`, or `None` if undefined or out of range.
    pub fn point(&self, row: usize, col: usize) -> Option<Point3> {
        let x = *self.x.get((row, col))?;
        let y = *self.y.get((row, col))?;
        let z = *self.z.get((row, col))?;
        if x.is_nan() || y.is_nan() || z.is_nan() {
            None
        } else {
            Some(Point3::new(x, y, z))
        }
    }

    /// Iterate over defined cells as `((row, col), point)`.
    pub fn defined_points(&self) -> impl Iterator<Item = ((usize, usize), Point3)> + '_ {
        let (rows, cols) = self.shape();
        (0..rows)
            .flat_map(move |i| (0..cols).map(move |j| (i, j)))
            .filter_map(move |(i, j)| self.point(i, j).map(|p| ((i, j), p)))
    }

    /// Number of defined cells.
    pub fn defined_count(&self) -> usize {
        self.defined_points().count()
    }

    /// True when no cell carries geometry.
    pub fn is_empty(&self) -> bool {
        self.defined_points().next().is_none()
    }

    /// Axis-aligned bounds of the defined cells, or `None` if there are none.
    pub fn bounds(&self) -> Option<(Point3, Point3)> {
        self.defined_points().fold(None, |acc, (_, p)| match acc {
            None => Some((p, p)),
            Some((lo, hi)) => Some((lo.inf(&p), hi.sup(&p))),
        })
    }
}
