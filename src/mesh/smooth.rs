//! Laplacian and HC (Humphrey's Classes) mesh smoothing.
//!
//! Both filters run over the vertex-adjacency network derived from the
//! triangle list, so topology never changes; only positions move. The HC
//! variant corrects the Laplacian's volume shrinkage by pushing each vertex
//! back along the difference between its smoothed position and a blend of
//! its original and previous positions.

use glam::DVec3;
use hashbrown::{HashMap, HashSet};

use crate::mesh::Mesh;

/// Vertex index -> adjacent vertex indices, symmetric.
pub type VertexAdjacency = HashMap<u32, HashSet<u32>>;

/// Vertex-connectivity network of a triangle list.
pub fn build_network(triangles: &[[u32; 3]]) -> VertexAdjacency {
    let mut network: VertexAdjacency = HashMap::new();
    for &[a, b, c] in triangles {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            network.entry(u).or_default().insert(v);
            network.entry(v).or_default().insert(u);
        }
    }
    network
}

fn laplacian_step(network: &VertexAdjacency, origin: &[DVec3]) -> Vec<DVec3> {
    origin
        .iter()
        .enumerate()
        .map(|(i, &p)| match network.get(&(i as u32)) {
            Some(adjacent) if !adjacent.is_empty() => {
                let sum: DVec3 = adjacent.iter().map(|&j| origin[j as usize]).sum();
                sum / adjacent.len() as f64
            }
            _ => p,
        })
        .collect()
}

/// Plain Laplacian smoothing: each pass moves every connected vertex to the
/// unweighted average of its neighbors. `times = 0` is the identity.
pub fn laplacian_filter(mut mesh: Mesh, times: usize) -> Mesh {
    let network = build_network(&mesh.triangles);
    for _ in 0..times {
        mesh.positions = laplacian_step(&network, &mesh.positions);
    }
    mesh.recalculate_normals();
    mesh.recalculate_bounds();
    mesh
}

/// HC smoothing. `alpha` blends the shrink-correction anchor between the
/// original positions (1.0) and the previous iteration (0.0); `beta` weighs
/// a vertex's own correction against its neighbors'. Both are clamped to
/// `[0, 1]`.
pub fn hc_filter(mut mesh: Mesh, times: usize, alpha: f64, beta: f64) -> Mesh {
    let alpha = alpha.clamp(0.0, 1.0);
    let beta = beta.clamp(0.0, 1.0);
    let network = build_network(&mesh.triangles);

    let origin = mesh.positions.clone();
    for _ in 0..times {
        mesh.positions = hc_step(&network, &origin, &mesh.positions, alpha, beta);
    }
    mesh.recalculate_normals();
    mesh.recalculate_bounds();
    mesh
}

fn hc_step(
    network: &VertexAdjacency,
    origin: &[DVec3],
    current: &[DVec3],
    alpha: f64,
    beta: f64,
) -> Vec<DVec3> {
    let mut smoothed = laplacian_step(network, current);
    let correction: Vec<DVec3> = smoothed
        .iter()
        .zip(origin.iter().zip(current))
        .map(|(&p, (&o, &q))| p - (o * alpha + q * (1.0 - alpha)))
        .collect();

    for (i, p) in smoothed.iter_mut().enumerate() {
        match network.get(&(i as u32)) {
            Some(adjacent) if !adjacent.is_empty() => {
                let sum: DVec3 = adjacent.iter().map(|&j| correction[j as usize]).sum();
                *p -= correction[i] * beta + sum * ((1.0 - beta) / adjacent.len() as f64);
            }
            _ => *p = correction[i],
        }
    }
    smoothed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pyramid() -> Mesh {
        Mesh::new(
            vec![
                DVec3::new(0.0, 0.0, 0.0),
                DVec3::new(1.0, 0.0, 0.0),
                DVec3::new(1.0, 1.0, 0.0),
                DVec3::new(0.0, 1.0, 0.0),
                DVec3::new(0.5, 0.5, 1.0),
            ],
            vec![[0, 1, 4], [1, 2, 4], [2, 3, 4], [3, 0, 4]],
        )
    }

    #[test]
    fn network_is_symmetric() {
        let mesh = pyramid();
        let network = build_network(&mesh.triangles);
        assert_eq!(network.len(), 5);
        for (&v, adjacent) in &network {
            for &u in adjacent {
                assert!(network[&u].contains(&v), "{u} <-> {v}");
            }
        }
        // The apex touches every base vertex.
        assert_eq!(network[&4].len(), 4);
    }

    #[test]
    fn laplacian_zero_times_is_identity() {
        let mesh = pyramid();
        let before = mesh.positions.clone();
        let after = laplacian_filter(mesh, 0);
        assert_eq!(after.positions, before);
    }

    #[test]
    fn laplacian_moves_apex_to_neighbor_average() {
        let mesh = pyramid();
        let after = laplacian_filter(mesh, 1);
        let apex = after.positions[4];
        assert!((apex - DVec3::new(0.5, 0.5, 0.0)).length() < 1e-12);
    }

    #[test]
    fn laplacian_preserves_topology() {
        let mesh = pyramid();
        let (nv, nt) = (mesh.vertex_count(), mesh.triangle_count());
        let after = laplacian_filter(mesh, 3);
        assert_eq!(after.vertex_count(), nv);
        assert_eq!(after.triangle_count(), nt);
    }

    #[test]
    fn hc_with_full_anchor_weights_is_identity() {
        // alpha = 1 anchors the correction to the original positions and
        // beta = 1 applies it fully, so each pass undoes its own Laplacian
        // step exactly.
        let mesh = pyramid();
        let before = mesh.positions.clone();
        let after = hc_filter(mesh, 4, 1.0, 1.0);
        for (p, q) in after.positions.iter().zip(&before) {
            assert!((*p - *q).length() < 1e-12);
        }
    }

    #[test]
    fn hc_shrinks_less_than_laplacian() {
        let laplacian = laplacian_filter(pyramid(), 5);
        let hc = hc_filter(pyramid(), 5, 0.2, 0.5);
        let apex_l = laplacian.positions[4].z;
        let apex_hc = hc.positions[4].z;
        assert!(apex_hc > apex_l, "hc keeps more volume: {apex_hc} vs {apex_l}");
    }
}
