//! Height propagation over the vertex-connectivity graph.
//!
//! Every vertex of the final triangulation gets a scalar height: zero on the
//! silhouette, and for interior vertices an average over already-elevated
//! neighbors of (distance to the neighbor when it sits on the contour, else
//! the neighbor's height). The relaxation runs a fixed 3 sweeps rather than
//! to convergence; heights settle outward from the contour one ring per
//! sweep, which is a bounded approximation of distance-to-boundary.

use glam::DVec2;
use hashbrown::{HashMap, HashSet};
use log::debug;

use crate::geometry::Silhouette;
use crate::topology::{Triangulation, VertexId};

const SWEEPS: usize = 3;

struct Node {
    vertex: VertexId,
    position: DVec2,
    height: f64,
    contour: bool,
    elevated: bool,
    neighbors: HashSet<usize>,
}

/// Assigns a height to every vertex referenced by a live triangle.
pub fn elevate(tri: &Triangulation, sil: &Silhouette) -> HashMap<VertexId, f64> {
    let mut nodes: Vec<Node> = Vec::new();
    let mut index: HashMap<VertexId, usize> = HashMap::new();

    let mut slot = |nodes: &mut Vec<Node>, index: &mut HashMap<VertexId, usize>, v: VertexId| {
        *index.entry(v).or_insert_with(|| {
            let position = tri.position(v);
            let contour = sil.contains_point(position);
            nodes.push(Node {
                vertex: v,
                position,
                height: 0.0,
                contour,
                elevated: contour,
                neighbors: HashSet::new(),
            });
            nodes.len() - 1
        })
    };

    for (_, t) in tri.triangles() {
        let [a, b, c] = t.vertices();
        let ia = slot(&mut nodes, &mut index, a);
        let ib = slot(&mut nodes, &mut index, b);
        let ic = slot(&mut nodes, &mut index, c);
        for (i, j) in [(ia, ib), (ib, ic), (ic, ia)] {
            nodes[i].neighbors.insert(j);
            nodes[j].neighbors.insert(i);
        }
    }

    for _ in 0..SWEEPS {
        for i in 0..nodes.len() {
            if nodes[i].elevated {
                continue;
            }
            let neighbors: Vec<usize> = nodes[i].neighbors.iter().copied().collect();
            if !neighbors.iter().any(|&j| nodes[j].elevated) {
                continue;
            }
            let mut sum = 0.0;
            let mut count = 0usize;
            for &j in &neighbors {
                if nodes[j].contour {
                    sum += nodes[j].position.distance(nodes[i].position);
                    count += 1;
                } else if nodes[j].elevated {
                    sum += nodes[j].height;
                    count += 1;
                }
            }
            nodes[i].height = sum / count as f64;
            nodes[i].elevated = true;
        }
    }

    let unreached = nodes.iter().filter(|n| !n.elevated).count();
    if unreached > 0 {
        debug!("{unreached} vertices left unelevated after {SWEEPS} sweeps");
    }
    nodes.into_iter().map(|n| (n.vertex, n.height)).collect()
}
