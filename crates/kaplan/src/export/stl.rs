//! Binary STL export.
//!
//! Layout: 80-byte header, little-endian `u32` triangle count, then per
//! triangle a facet normal, three vertices (all `f32` triples) and a zero
//! `u16` attribute word.

use std::path::Path;

use kaplan_tessellate::{TessellationParams, TriangleMesh};

use crate::error::{KaplanError, Result};
use crate::scene::Scene;

const HEADER: &[u8] = b"kaplan turbine model";

/// Bytes per triangle record.
const RECORD_LEN: usize = 50;

/// Encode a mesh as binary STL.
pub fn to_stl_bytes(mesh: &TriangleMesh) -> Result<Vec<u8>> {
    if mesh.is_empty() {
        return Err(KaplanError::EmptyGeometry);
    }
    let num_triangles = mesh.num_triangles();
    let mut data = Vec::with_capacity(84 + num_triangles * RECORD_LEN);

    let mut header = [b' '; 80];
    header[..HEADER.len()].copy_from_slice(HEADER);
    data.extend_from_slice(&header);
    data.extend_from_slice(&(num_triangles as u32).to_le_bytes());

    for tri in mesh.triangles() {
        let [a, b, c] = tri.map(|i| mesh.vertex(i));
        let n = (b - a).cross(&(c - a));
        let n = if n.norm() > 1e-10 {
            n.normalize()
        } else {
            kaplan_math::Vec3::z()
        };
        for v in [n.x, n.y, n.z] {
            data.extend_from_slice(&(v as f32).to_le_bytes());
        }
        for p in [a, b, c] {
            for v in [p.x, p.y, p.z] {
                data.extend_from_slice(&(v as f32).to_le_bytes());
            }
        }
        data.extend_from_slice(&0u16.to_le_bytes());
    }
    Ok(data)
}

/// Tessellate every surface of `scene` and write it to `path` as binary STL.
///
/// Undefined cells are skipped, so blades appear with their elliptical
/// outline. Fails with [`KaplanError::EmptyGeometry`] if nothing is left.
pub fn export_stl(
    scene: &Scene,
    params: &TessellationParams,
    path: impl AsRef<Path>,
) -> Result<usize> {
    let path = path.as_ref();
    let mesh = scene.to_mesh(params);
    let bytes = to_stl_bytes(&mesh)?;
    std::fs::write(path, bytes)?;
    log::info!("wrote {} triangles to {}", mesh.num_triangles(), path.display());
    Ok(mesh.num_triangles())
}
