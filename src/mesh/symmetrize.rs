//! Mirroring the single-sided height field into a closed solid.

use glam::DVec3;
use hashbrown::HashMap;

use crate::mesh::Mesh;

/// A vertex on the base plane keeps a single copy; heights are stored as
/// negative z, so "on or above" means z within epsilon of zero or higher.
#[inline]
fn on_base_plane(p: DVec3) -> bool {
    p.z > -f64::EPSILON
}

/// Closes the inflated half-solid by mirroring every off-plane vertex across
/// z = 0 and emitting a reverse-winding twin for every triangle.
pub fn symmetrize(src: &Mesh) -> Mesh {
    let mut positions = src.positions.clone();
    let mut mirror: HashMap<u32, u32> = HashMap::new();
    for (i, &p) in src.positions.iter().enumerate() {
        if !on_base_plane(p) {
            mirror.insert(i as u32, positions.len() as u32);
            positions.push(DVec3::new(p.x, p.y, -p.z));
        }
    }

    let mut triangles = Vec::with_capacity(src.triangles.len() * 2);
    for &[a, b, c] in &src.triangles {
        triangles.push([a, b, c]);
        let m = |v: u32| mirror.get(&v).copied().unwrap_or(v);
        triangles.push([m(a), m(c), m(b)]);
    }

    Mesh::new(positions, triangles)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hashbrown::HashMap as Map;

    fn tent() -> Mesh {
        // Two base vertices and one raised apex (negative z).
        Mesh::new(
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(0.5, 1.0, -0.5),
            ],
            vec![[0, 1, 2]],
        )
    }

    #[test]
    fn off_plane_vertices_are_duplicated() {
        let mesh = symmetrize(&tent());
        assert_eq!(mesh.vertex_count(), 4);
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.positions[3], DVec3::new(0.5, 1.0, 0.5));
        assert_eq!(mesh.triangles[1], [0, 3, 1]);
    }

    #[test]
    fn base_edges_close_the_solid() {
        let mesh = symmetrize(&tent());
        // Every edge between two base-plane vertices must now belong to
        // exactly two triangles.
        let mut edge_uses: Map<(u32, u32), usize> = Map::new();
        for &[a, b, c] in &mesh.triangles {
            for (u, v) in [(a, b), (b, c), (c, a)] {
                let key = (u.min(v), u.max(v));
                *edge_uses.entry(key).or_default() += 1;
            }
        }
        assert_eq!(edge_uses[&(0, 1)], 2);
    }
}
