//! Spine subdivision of the surviving sleeve and junction triangles.
//!
//! Sleeve triangles still spanned by an unpruned chord are split into four
//! around the chord, so the sewer later gets an edge along the spine to hang
//! cross-sections from. Junction chords split their face across the chord's
//! single entry or exit edge. Removals are collected during the walk and
//! applied afterwards in one batch.

use crate::axis::chord::{ChordArena, ChordId};
use crate::axis::face::{FaceArena, FaceKind};
use crate::error::InflateError;
use crate::topology::{SegKey, TriId, Triangulation, VertexId};

pub fn subdivide(
    tri: &mut Triangulation,
    faces: &FaceArena,
    chords: &ChordArena,
    root: ChordId,
) -> Result<(), InflateError> {
    let mut dead_tris: Vec<TriId> = Vec::new();
    let mut dead_segs: Vec<SegKey> = Vec::new();

    let mut stack: Vec<(ChordId, Option<ChordId>)> = vec![(root, None)];
    while let Some((cur, from)) = stack.pop() {
        let chord = chords.get(cur);
        let face = faces.get(chord.face);
        if !chord.pruned() {
            match face.kind {
                FaceKind::Sleeve => {
                    let src_edge = chord
                        .src_edge
                        .ok_or_else(|| InflateError::internal("sleeve chord without entry edge"))?;
                    let dst_edge = chord
                        .dst_edge
                        .ok_or_else(|| InflateError::internal("sleeve chord without exit edge"))?;
                    let (src, dst, tri_id) = (chord.src, chord.dst, face.tri);
                    split_sleeve(tri, src, dst, src_edge, dst_edge)?;
                    dead_tris.push(tri_id);
                }
                FaceKind::Junction => {
                    // Exactly one of the two edge references is set; the
                    // chord runs between that edge and the centroid.
                    let (top, bottom, edge) = match (chord.src_edge, chord.dst_edge) {
                        (Some(edge), None) => (chord.dst, chord.src, edge),
                        (None, Some(edge)) => (chord.src, chord.dst, edge),
                        _ => continue,
                    };
                    tri.add_triangle(top, edge.a(), bottom)?;
                    tri.add_triangle(top, edge.b(), bottom)?;
                    dead_segs.push(edge);
                }
                FaceKind::Terminal => {}
            }
        }

        for &next in chords.get(cur).links() {
            if Some(next) != from {
                stack.push((next, Some(cur)));
            }
        }
    }

    for id in dead_tris {
        tri.remove_triangle(id);
    }
    for s in dead_segs {
        tri.remove_by_segment(s);
    }
    Ok(())
}

/// Replaces one sleeve triangle with a refined quad fan around the chord.
fn split_sleeve(
    tri: &mut Triangulation,
    src: VertexId,
    dst: VertexId,
    src_edge: SegKey,
    dst_edge: SegKey,
) -> Result<(), InflateError> {
    let (top, lb) = if dst_edge.contains(src_edge.a()) {
        (src_edge.a(), src_edge.b())
    } else {
        (src_edge.b(), src_edge.a())
    };
    let rb = if dst_edge.a() == top {
        dst_edge.b()
    } else {
        dst_edge.a()
    };

    let bottom_pos = (tri.position(lb) + tri.position(rb)) * 0.5;
    let bottom = tri.get_or_add_vertex(bottom_pos);

    tri.add_triangle(top, src, dst)?;
    tri.add_triangle(src, lb, bottom)?;
    tri.add_triangle(dst, bottom, rb)?;
    tri.add_triangle(src, bottom, dst)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::build::build_chordal_axis;
    use crate::axis::classify::classify;
    use crate::axis::prune::prune;
    use glam::DVec2;

    /// Long rectangle strip triangulated by hand: two terminal caps around a
    /// run of sleeve triangles.
    fn strip() -> Triangulation {
        let mut tri = Triangulation::new();
        let bottom: Vec<_> = (0..4)
            .map(|i| tri.get_or_add_vertex(DVec2::new(i as f64, 0.0)))
            .collect();
        let top: Vec<_> = (0..4)
            .map(|i| tri.get_or_add_vertex(DVec2::new(i as f64, 1.0)))
            .collect();
        for i in 0..3 {
            tri.add_triangle(bottom[i], bottom[i + 1], top[i]).unwrap();
            tri.add_triangle(bottom[i + 1], top[i + 1], top[i]).unwrap();
        }
        tri
    }

    #[test]
    fn sleeves_split_into_four() {
        let mut tri = strip();
        let sil = tri.boundary_silhouette();
        let mut faces = classify(&tri, &sil);
        let sleeves = faces
            .iter()
            .filter(|(_, f)| f.kind == FaceKind::Sleeve)
            .count();
        assert_eq!(sleeves, 4);

        let (mut chords, root) = build_chordal_axis(&mut tri, &faces, &sil).unwrap();
        prune(&mut tri, &mut faces, &mut chords, &sil, root).unwrap();

        let survivors: Vec<ChordId> = chords
            .iter()
            .filter(|(_, c)| !c.pruned() && faces.get(c.face).kind == FaceKind::Sleeve)
            .map(|(id, _)| id)
            .collect();
        let before = tri.live_triangle_count();
        subdivide(&mut tri, &faces, &chords, root).unwrap();

        // Pruning eats the caps and their neighboring sleeves, not the
        // middle of the strip; each surviving sleeve trades one triangle
        // for four.
        assert!(!survivors.is_empty());
        assert_eq!(
            tri.live_triangle_count(),
            before + 3 * survivors.len()
        );
    }
}
