//! Mesh assembly: lifting the 2D triangulation into 3D, mirroring it into a
//! closed solid, and smoothing.

pub mod smooth;
pub mod symmetrize;

pub use smooth::{VertexAdjacency, build_network, hc_filter, laplacian_filter};
pub use symmetrize::symmetrize;

use glam::DVec3;
use hashbrown::HashMap;

use crate::topology::{Triangulation, VertexId};

/// Axis-aligned bounding box.
#[derive(Debug, Copy, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Default for Aabb {
    fn default() -> Self {
        Aabb {
            min: DVec3::ZERO,
            max: DVec3::ZERO,
        }
    }
}

impl Aabb {
    pub fn from_points(points: &[DVec3]) -> Self {
        let mut iter = points.iter();
        let Some(&first) = iter.next() else {
            return Aabb::default();
        };
        let (mut min, mut max) = (first, first);
        for &p in iter {
            min = min.min(p);
            max = max.max(p);
        }
        Aabb { min, max }
    }

    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }
}

/// Indexed triangle mesh with per-vertex normals.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Mesh {
    pub positions: Vec<DVec3>,
    pub triangles: Vec<[u32; 3]>,
    pub normals: Vec<DVec3>,
    pub bounds: Aabb,
}

impl Mesh {
    pub fn new(positions: Vec<DVec3>, triangles: Vec<[u32; 3]>) -> Self {
        let mut mesh = Mesh {
            positions,
            triangles,
            normals: Vec::new(),
            bounds: Aabb::default(),
        };
        mesh.recalculate_normals();
        mesh.recalculate_bounds();
        mesh
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// Area-weighted vertex normals: each face's cross product accumulates
    /// onto its three corners before normalization.
    pub fn recalculate_normals(&mut self) {
        let mut normals = vec![DVec3::ZERO; self.positions.len()];
        for &[a, b, c] in &self.triangles {
            let (pa, pb, pc) = (
                self.positions[a as usize],
                self.positions[b as usize],
                self.positions[c as usize],
            );
            let n = (pb - pa).cross(pc - pa);
            normals[a as usize] += n;
            normals[b as usize] += n;
            normals[c as usize] += n;
        }
        self.normals = normals.into_iter().map(|n| n.normalize_or_zero()).collect();
    }

    pub fn recalculate_bounds(&mut self) {
        self.bounds = Aabb::from_points(&self.positions);
    }
}

/// Lifts the triangulation into 3D, mapping each vertex to
/// `(x, y, -height)`. Vertices absent from the height table sit at zero.
pub fn build_mesh(tri: &Triangulation, heights: &HashMap<VertexId, f64>) -> Mesh {
    let mut indices: HashMap<VertexId, u32> = HashMap::new();
    let mut positions: Vec<DVec3> = Vec::new();
    let mut triangles: Vec<[u32; 3]> = Vec::new();

    for (_, t) in tri.triangles() {
        let ids = t.vertices().map(|v| {
            *indices.entry(v).or_insert_with(|| {
                let p = tri.position(v);
                let h = heights.get(&v).copied().unwrap_or(0.0);
                positions.push(DVec3::new(p.x, p.y, -h));
                (positions.len() - 1) as u32
            })
        });
        triangles.push(ids);
    }
    Mesh::new(positions, triangles)
}
