#![warn(missing_docs)]

//! Sampled surface to triangle mesh tessellation for the kaplan turbine model.
//!
//! Converts a [`SampledSurface`] into triangles by:
//! 1. Thinning the sample grid to at most `max_rows x max_cols` cells
//! 2. Keeping every cell whose four corners are defined
//! 3. Splitting each kept cell into two triangles and recording its outline
//!
//! A cell touching an undefined sample is dropped, so masked regions show
//! up as holes and an all-undefined surface produces an empty mesh.

use std::collections::HashSet;

use kaplan_geom::SampledSurface;
use kaplan_math::{Point3, Tolerance, Vec3};

/// Output triangle mesh for rendering and export.
#[derive(Debug, Clone)]
pub struct TriangleMesh {
    /// Flat array of vertex positions: `[x0, y0, z0, x1, y1, z1, ...]` (f32).
    pub vertices: Vec<f32>,
    /// Flat array of triangle indices: `[i0, i1, i2, ...]` (u32).
    pub indices: Vec<u32>,
    /// Flat array of vertex normals: `[nx0, ny0, nz0, ...]` (f32). Same length as vertices.
    pub normals: Vec<f32>,
}

impl TriangleMesh {
    /// Create an empty mesh.
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            indices: Vec::new(),
            normals: Vec::new(),
        }
    }

    /// Number of triangles.
    pub fn num_triangles(&self) -> usize {
        self.indices.len() / 3
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.vertices.len() / 3
    }

    /// True when the mesh has no triangles.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Position of vertex `i`.
    pub fn vertex(&self, i: u32) -> Point3 {
        let k = i as usize * 3;
        Point3::new(
            self.vertices[k] as f64,
            self.vertices[k + 1] as f64,
            self.vertices[k + 2] as f64,
        )
    }

    /// Normal of vertex `i`.
    pub fn normal(&self, i: u32) -> Vec3 {
        let k = i as usize * 3;
        Vec3::new(
            self.normals[k] as f64,
            self.normals[k + 1] as f64,
            self.normals[k + 2] as f64,
        )
    }

    /// Iterate over triangles as vertex index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    /// Merge another mesh into this one.
    pub fn merge(&mut self, other: &TriangleMesh) {
        let offset = self.num_vertices() as u32;
        self.vertices.extend_from_slice(&other.vertices);
        self.normals.extend_from_slice(&other.normals);
        self.indices.extend(other.indices.iter().map(|&i| i + offset));
    }
}

impl Default for TriangleMesh {
    fn default() -> Self {
        Self::new()
    }
}

/// A tessellated surface: triangles plus the outlines of the grid cells
/// they came from.
#[derive(Debug, Clone, Default)]
pub struct SurfaceMesh {
    /// Filled geometry.
    pub mesh: TriangleMesh,
    /// Cell outline segments as vertex index pairs into `mesh`, each listed once.
    pub edges: Vec<[u32; 2]>,
}

/// Tessellation parameters controlling mesh density.
#[derive(Debug, Clone, Copy)]
pub struct TessellationParams {
    /// Maximum number of cells along the row (secondary) direction.
    pub max_rows: usize,
    /// Maximum number of cells along the column (angular) direction.
    pub max_cols: usize,
}

impl Default for TessellationParams {
    /// 50 x 50 cells, the default density of common surface plotters.
    fn default() -> Self {
        Self {
            max_rows: 50,
            max_cols: 50,
        }
    }
}

impl TessellationParams {
    /// Keep every sample of the surface.
    pub fn full() -> Self {
        Self {
            max_rows: usize::MAX,
            max_cols: usize::MAX,
        }
    }
}

/// Indices kept when thinning `n` samples to at most `max_cells` cells.
///
/// Always keeps the first and last sample.
fn strided(n: usize, max_cells: usize) -> Vec<usize> {
    if n == 0 {
        return Vec::new();
    }
    let stride = (n - 1).div_ceil(max_cells.max(1)).max(1);
    let mut idx: Vec<usize> = (0..n - 1).step_by(stride).collect();
    idx.push(n - 1);
    idx
}

/// Mesh vertices created on demand, so samples no kept cell touches are left out.
struct VertexPool {
    /// Grid slot to mesh vertex.
    slot_vertex: Vec<Option<u32>>,
    positions: Vec<Point3>,
    accum: Vec<Vec3>,
}

impl VertexPool {
    fn new(slots: usize) -> Self {
        Self {
            slot_vertex: vec![None; slots],
            positions: Vec::new(),
            accum: Vec::new(),
        }
    }

    fn vertex(&mut self, slot: usize, p: Point3) -> u32 {
        if let Some(v) = self.slot_vertex[slot] {
            return v;
        }
        let v = self.positions.len() as u32;
        self.positions.push(p);
        self.accum.push(Vec3::zeros());
        self.slot_vertex[slot] = Some(v);
        v
    }
}

/// Tessellate a sampled surface.
pub fn tessellate_surface(surface: &SampledSurface, params: &TessellationParams) -> SurfaceMesh {
    let (rows, cols) = surface.shape();
    let row_idx = strided(rows, params.max_rows);
    let col_idx = strided(cols, params.max_cols);

    let samples: Vec<Option<Point3>> = row_idx
        .iter()
        .flat_map(|&i| col_idx.iter().map(move |&j| surface.point(i, j)))
        .collect();
    let width = col_idx.len();

    let mut pool = VertexPool::new(samples.len());
    let mut indices: Vec<u32> = Vec::new();
    let mut edges: HashSet<[u32; 2]> = HashSet::new();
    let mut edge_list: Vec<[u32; 2]> = Vec::new();

    let tol = Tolerance::DEFAULT;
    for r in 0..row_idx.len().saturating_sub(1) {
        for c in 0..width.saturating_sub(1) {
            let slots = [
                r * width + c,
                r * width + c + 1,
                (r + 1) * width + c,
                (r + 1) * width + c + 1,
            ];
            let [Some(p00), Some(p01), Some(p10), Some(p11)] = slots.map(|k| samples[k]) else {
                continue;
            };
            let corners = [(slots[0], p00), (slots[1], p01), (slots[2], p10), (slots[3], p11)];
            let [c00, c01, c10, c11] = corners;

            let kept: Vec<([(usize, Point3); 3], Vec3)> = [[c00, c01, c11], [c00, c11, c10]]
                .into_iter()
                .filter_map(|tri| {
                    let [a, b, c] = tri.map(|(_, p)| p);
                    let n = (b - a).cross(&(c - a));
                    (!tol.is_zero(n.norm())).then_some((tri, n))
                })
                .collect();
            if kept.is_empty() {
                continue;
            }

            for (tri, n) in kept {
                for (slot, p) in tri {
                    let v = pool.vertex(slot, p);
                    pool.accum[v as usize] += n;
                    indices.push(v);
                }
            }
            let [v00, v01, v10, v11] = corners.map(|(slot, p)| pool.vertex(slot, p));
            for (a, b) in [(v00, v01), (v01, v11), (v11, v10), (v10, v00)] {
                let key = if a < b { [a, b] } else { [b, a] };
                if edges.insert(key) {
                    edge_list.push(key);
                }
            }
        }
    }

    let mut mesh = TriangleMesh::new();
    mesh.indices = indices;
    for (p, n) in pool.positions.iter().zip(&pool.accum) {
        mesh.vertices.extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
        let n = if tol.is_zero(n.norm()) {
            Vec3::z()
        } else {
            n.normalize()
        };
        mesh.normals.extend_from_slice(&[n.x as f32, n.y as f32, n.z as f32]);
    }

    log::trace!(
        "tessellated {}x{} surface into {} triangles, {} edges",
        rows,
        cols,
        mesh.num_triangles(),
        edge_list.len()
    );

    SurfaceMesh {
        mesh,
        edges: edge_list,
    }
}
