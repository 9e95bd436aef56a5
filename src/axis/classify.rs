//! Face classification and the face/segment adjacency index.
//!
//! A segment counts as external when it lies, full length, along some
//! silhouette segment; equality alone is not enough because later passes
//! split boundary edges in half.

use hashbrown::HashMap;
use log::debug;

use crate::axis::face::{Face, FaceArena, FaceId, FaceKind};
use crate::geometry::Silhouette;
use crate::topology::{SegKey, Triangle, Triangulation};

/// Whether the segment `s` lies along the silhouette.
pub fn is_external(tri: &Triangulation, sil: &Silhouette, s: SegKey) -> bool {
    sil.contains_segment(tri.position(s.a()), tri.position(s.b()))
}

/// Classifies a triangle from its external-edge count.
pub fn face_kind(tri: &Triangulation, sil: &Silhouette, t: &Triangle) -> FaceKind {
    let count = t
        .segments()
        .iter()
        .filter(|&&s| is_external(tri, sil, s))
        .count();
    match count {
        0 => FaceKind::Junction,
        1 => FaceKind::Sleeve,
        _ => FaceKind::Terminal,
    }
}

/// Wraps every live triangle in a classified [`Face`], in id order.
/// Classification is total and exclusive; re-running it on the same triangle
/// set yields the same tags.
pub fn classify(tri: &Triangulation, sil: &Silhouette) -> FaceArena {
    let mut arena = FaceArena::default();
    for (tid, t) in tri.triangles() {
        arena.push(Face::new(face_kind(tri, sil, t), tid, *t));
    }
    debug!(
        "classified {} faces ({} boundary segments)",
        arena.len(),
        sil.len()
    );
    arena
}

/// Face adjacency through shared segments. The axis builder removes each
/// visited face so the traversal cannot re-enter it.
#[derive(Debug, Clone)]
pub struct FaceAdjacency {
    by_segment: HashMap<SegKey, Vec<FaceId>>,
}

impl FaceAdjacency {
    pub fn new(faces: &FaceArena) -> Self {
        let mut by_segment: HashMap<SegKey, Vec<FaceId>> = HashMap::new();
        for (id, face) in faces.iter() {
            for s in face.shape.segments() {
                by_segment.entry(s).or_default().push(id);
            }
        }
        FaceAdjacency { by_segment }
    }

    /// Unvisited neighbors of `f`, with the joining segment, in the face's
    /// edge order.
    pub fn neighbors(&self, f: FaceId, faces: &FaceArena) -> Vec<(FaceId, SegKey)> {
        let mut out = Vec::new();
        for s in faces.get(f).shape.segments() {
            if let Some(list) = self.by_segment.get(&s) {
                out.extend(list.iter().filter(|&&g| g != f).map(|&g| (g, s)));
            }
        }
        out
    }

    /// Removes `f` from the index, preventing further visits.
    pub fn remove(&mut self, f: FaceId, faces: &FaceArena) {
        for s in faces.get(f).shape.segments() {
            if let Some(list) = self.by_segment.get_mut(&s) {
                list.retain(|&g| g != f);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn square_setup() -> (Triangulation, Silhouette) {
        let tri = Triangulation::from_polygon(&[
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ])
        .unwrap();
        let sil = tri.boundary_silhouette();
        (tri, sil)
    }

    #[test]
    fn square_faces_are_terminal() {
        let (tri, sil) = square_setup();
        let faces = classify(&tri, &sil);
        assert_eq!(faces.len(), 2);
        for (_, f) in faces.iter() {
            assert_eq!(f.kind, FaceKind::Terminal);
        }
    }

    #[test]
    fn classification_is_idempotent() {
        let (tri, sil) = square_setup();
        let first: Vec<FaceKind> = classify(&tri, &sil).iter().map(|(_, f)| f.kind).collect();
        let second: Vec<FaceKind> = classify(&tri, &sil).iter().map(|(_, f)| f.kind).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn adjacency_links_the_two_square_faces() {
        let (tri, sil) = square_setup();
        let faces = classify(&tri, &sil);
        let mut adj = FaceAdjacency::new(&faces);
        let (f0, f1) = (FaceId(0), FaceId(1));
        let n0 = adj.neighbors(f0, &faces);
        assert_eq!(n0.len(), 1);
        assert_eq!(n0[0].0, f1);

        adj.remove(f0, &faces);
        assert!(adj.neighbors(f1, &faces).is_empty());
    }
}
