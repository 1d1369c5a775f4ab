//! Property-based tests for the shaft and blade generators.

use kaplan_geom::{Blade, SamplingGrid, Shaft};
use proptest::prelude::*;

const TOL: f64 = 1e-9;

/// A coarse grid keeps each case fast.
const GRID: SamplingGrid = SamplingGrid::square(40);

fn arb_dimension() -> impl Strategy<Value = f64> {
    0.1f64..50.0
}

fn arb_blade() -> impl Strategy<Value = (f64, f64, f64)> {
    (-6.0f64..6.0, 0.05f64..3.0, 0.1f64..10.0)
        .prop_map(|(start, span, depth)| (start, start + span, depth))
}

// ---------------------------------------------------------------------------
// Shaft points lie on the cylinder and inside its height
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn shaft_points_on_cylinder(radius in arb_dimension(), height in arb_dimension()) {
        let shaft = Shaft::new(radius, height).unwrap();
        let surface = shaft.sample_with(&GRID);
        prop_assert_eq!(surface.defined_count(), GRID.len());
        for (_, p) in surface.defined_points() {
            let r2 = p.x * p.x + p.y * p.y;
            prop_assert!((r2 - radius * radius).abs() < TOL * radius * radius,
                "x²+y²={} radius²={}", r2, radius * radius);
            prop_assert!(p.z >= 0.0 && p.z <= height, "z={} height={}", p.z, height);
        }
    }
}

// ---------------------------------------------------------------------------
// Defined blade cells pass the boundary test; undefined cells are NaN throughout
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn blade_cells_respect_boundary(
        (start, end, depth) in arb_blade(),
        radius in arb_dimension(),
        height in arb_dimension(),
    ) {
        let shaft = Shaft::new(radius, height).unwrap();
        let blade = Blade::new(start, end, depth).unwrap();
        let surface = blade.sample_with(&shaft, &GRID);

        let angles = kaplan_math::linspace(start, end, GRID.angle_samples);
        let radials = kaplan_math::linspace(radius, radius + depth, GRID.secondary_samples);
        for (i, &r) in radials.iter().enumerate() {
            for (j, &a) in angles.iter().enumerate() {
                let inside = blade.contains(a, r, &shaft);
                prop_assert_eq!(surface.is_defined(i, j), inside);
                if !inside {
                    prop_assert!(surface.x()[[i, j]].is_nan());
                    prop_assert!(surface.y()[[i, j]].is_nan());
                    prop_assert!(surface.z()[[i, j]].is_nan());
                }
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Blade heights stay in the [0.4 H, 0.6 H] band with the identity shaping
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn blade_heights_in_band(
        (start, end, depth) in arb_blade(),
        height in arb_dimension(),
    ) {
        let shaft = Shaft::new(3.0, height).unwrap();
        let blade = Blade::new(start, end, depth).unwrap();
        let surface = blade.sample_with(&shaft, &GRID);
        let slack = TOL * height.max(1.0);
        for (_, p) in surface.defined_points() {
            prop_assert!(p.z >= 0.4 * height - slack && p.z <= 0.6 * height + slack,
                "z={} outside band for height {}", p.z, height);
        }
    }
}

// ---------------------------------------------------------------------------
// Shrinking the depth never grows the footprint on a fixed parameter grid
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn footprint_monotonic_in_depth(
        (start, end, depth) in arb_blade(),
        shrink in 0.1f64..0.9,
    ) {
        let shaft = Shaft::new(3.0, 3.0).unwrap();
        let deep = Blade::new(start, end, depth).unwrap();
        let shallow = Blade::new(start, end, depth * shrink).unwrap();
        let angles = kaplan_math::linspace(start, end, 40);
        let radials = kaplan_math::linspace(3.0, 3.0 + depth, 40);
        for &r in &radials {
            for &a in &angles {
                if shallow.contains(a, r, &shaft) {
                    prop_assert!(deep.contains(a, r, &shaft));
                }
            }
        }
    }
}
