//! Chordal axis construction.
//!
//! The axis connects midpoints of internal edges (and junction centroids)
//! into a tree rooted at an arbitrary terminal face. When the traversal
//! passes *through* a junction face, an auxiliary "interval" chord is
//! spliced between the incoming chord's destination and the midpoint of the
//! joining edge, so two distinct axis segments through a 3-way junction do
//! not collapse into one.

use log::debug;

use crate::axis::chord::{ChordArena, ChordId};
use crate::axis::classify::{FaceAdjacency, is_external};
use crate::axis::face::{FaceArena, FaceId, FaceKind};
use crate::error::InflateError;
use crate::geometry::Silhouette;
use crate::topology::{SegKey, Triangulation, VertexId};

/// Builds the chordal axis over the classified faces. Returns the arena and
/// the root chord (anchored at the first terminal face).
pub fn build_chordal_axis(
    tri: &mut Triangulation,
    faces: &FaceArena,
    sil: &Silhouette,
) -> Result<(ChordArena, ChordId), InflateError> {
    let root_face = faces
        .find_kind(FaceKind::Terminal)
        .ok_or_else(|| InflateError::internal("triangulation has no terminal face"))?;

    let mut chords = ChordArena::default();
    let root = root_chord(tri, faces, sil, root_face, &mut chords);

    let mut adjacency = FaceAdjacency::new(faces);
    let mut stack: Vec<ChordId> = vec![root];
    while let Some(cur) = stack.pop() {
        let origin = chords.get(cur).face;
        let neighbors = adjacency.neighbors(origin, faces);
        adjacency.remove(origin, faces);

        for (neighbor, joint) in neighbors {
            let (destination, dst_edge) = destination_of(tri, faces, sil, origin, neighbor, joint);

            let next = if faces.get(origin).kind == FaceKind::Junction {
                let joint_mid = tri.midpoint(joint);
                let cur_chord = chords.get(cur);
                let (cur_dst, cur_dst_edge) = (cur_chord.dst, cur_chord.dst_edge);
                let interval = chords.push(
                    cur_dst,
                    tri.get_or_add_vertex(joint_mid),
                    origin,
                    cur_dst_edge,
                    Some(joint),
                );
                let interval_dst = chords.get(interval).dst;
                let next = chords.push(interval_dst, destination, neighbor, Some(joint), dst_edge);
                chords.connect(cur, interval);
                chords.connect(interval, next);
                next
            } else {
                let cur_chord = chords.get(cur);
                let (cur_dst, cur_dst_edge) = (cur_chord.dst, cur_chord.dst_edge);
                let next = chords.push(cur_dst, destination, neighbor, cur_dst_edge, dst_edge);
                chords.connect(cur, next);
                next
            };
            stack.push(next);
        }
    }

    debug!("chordal axis: {} chords over {} faces", chords.len(), faces.len());
    Ok((chords, root))
}

/// The root chord of a terminal face runs from the vertex shared by its two
/// external edges to the midpoint of its single internal edge.
fn root_chord(
    tri: &mut Triangulation,
    faces: &FaceArena,
    sil: &Silhouette,
    root_face: FaceId,
    chords: &mut ChordArena,
) -> ChordId {
    let t = faces.get(root_face).shape;
    let [s0, s1, s2] = t.segments();
    let e0 = is_external(tri, sil, s0);
    let e1 = is_external(tri, sil, s1);

    let (src, dst_edge) = if e0 && e1 {
        (shared_vertex(s0, s1), s2)
    } else if e1 && is_external(tri, sil, s2) {
        (shared_vertex(s1, s2), s0)
    } else {
        (shared_vertex(s2, s0), s1)
    };
    let mid = tri.midpoint(dst_edge);
    let dst = tri.get_or_add_vertex(mid);
    chords.push(src, dst, root_face, None, Some(dst_edge))
}

/// Destination point (and exit edge) on a neighbor face, by its kind.
fn destination_of(
    tri: &mut Triangulation,
    faces: &FaceArena,
    sil: &Silhouette,
    origin: FaceId,
    neighbor: FaceId,
    joint: SegKey,
) -> (VertexId, Option<SegKey>) {
    let face = faces.get(neighbor);
    match face.kind {
        FaceKind::Junction => {
            let centroid = tri.centroid(&face.shape);
            (tri.get_or_add_vertex(centroid), None)
        }
        FaceKind::Sleeve => {
            let others = face.shape.exclude_segment(joint);
            let exit = if !is_external(tri, sil, others[0]) {
                others[0]
            } else {
                others[1]
            };
            let mid = tri.midpoint(exit);
            (tri.get_or_add_vertex(mid), Some(exit))
        }
        FaceKind::Terminal => (face.uncommon_vertex(faces.get(origin)), None),
    }
}

/// Endpoint of `b` that also lies on `a`.
fn shared_vertex(a: SegKey, b: SegKey) -> VertexId {
    if a.contains(b.a()) { b.a() } else { b.b() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::classify::classify;
    use glam::DVec2;

    #[test]
    fn square_axis_is_a_two_chord_path() {
        let mut tri = Triangulation::from_polygon(&[
            DVec2::new(0.0, 0.0),
            DVec2::new(1.0, 0.0),
            DVec2::new(1.0, 1.0),
            DVec2::new(0.0, 1.0),
        ])
        .unwrap();
        let sil = tri.boundary_silhouette();
        let faces = classify(&tri, &sil);
        let (chords, root) = build_chordal_axis(&mut tri, &faces, &sil).unwrap();

        assert_eq!(chords.len(), 2);
        let root_chord = chords.get(root);
        assert_eq!(root_chord.links().len(), 1);
        let leaf = root_chord.links()[0];
        // Both chords meet at the diagonal midpoint.
        assert_eq!(chords.get(leaf).src, root_chord.dst);
        let mid = tri.position(root_chord.dst);
        assert!((mid - DVec2::new(0.5, 0.5)).length() < 1e-9);
    }
}
