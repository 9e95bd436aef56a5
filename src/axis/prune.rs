//! Fan-collapse pruning of insignificant axis branches.
//!
//! Starting from every terminal chord, the walk grows a semicircle whose
//! diameter is the current internal edge. While every vertex gathered so far
//! fits inside the circle, the branch is insignificant and the walk keeps
//! advancing; the first vertex that escapes stops the walk, and all gathered
//! triangles are replaced by a fan from the circle center.
//!
//! A branch that runs all the way into a junction collapses onto the
//! junction centroid instead. The first branch to do so also records which
//! fan triangles straddle the junction's far side (its `divides`), so a
//! later branch arriving over another edge removes exactly its own divide
//! triangle and re-fans without double-covering the wedge.

use itertools::Itertools;
use log::warn;

use crate::axis::chord::{ChordArena, ChordId};
use crate::axis::classify::is_external;
use crate::axis::face::{FaceArena, FaceKind};
use crate::error::InflateError;
use crate::geometry::{self, CIRCLE_EPS, Silhouette};
use crate::topology::{SegKey, TriId, Triangle, Triangulation, VertexId};

/// Prunes every insignificant branch of the axis. Returns the convergence
/// vertices (fan centers), one per collapsed branch.
pub fn prune(
    tri: &mut Triangulation,
    faces: &mut FaceArena,
    chords: &mut ChordArena,
    sil: &Silhouette,
    root: ChordId,
) -> Result<Vec<VertexId>, InflateError> {
    let terminals = chords.collect(root, |c| faces.get(c.face).kind == FaceKind::Terminal);

    let mut convergence = Vec::new();
    for start in terminals {
        let mut stack: Vec<(ChordId, Option<ChordId>, Vec<ChordId>)> = vec![(start, None, Vec::new())];
        while let Some((cur, from, mut past)) = stack.pop() {
            // A chord pruned by an earlier branch is already fanned over.
            if chords.get(cur).pruned() {
                continue;
            }
            let face_id = chords.get(cur).face;
            if faces.get(face_id).kind == FaceKind::Junction {
                past.push(cur);
                if let Some(cv) = collapse_junction(tri, faces, chords, cur, &past)? {
                    convergence.push(cv);
                    finish(tri, faces, chords, &past);
                }
                continue;
            }

            let diameter = branch_diameter(tri, faces, chords, sil, cur, from)?;
            past.push(cur);

            let center = tri.midpoint(diameter);
            let radius = center.distance(tri.position(diameter.a()));
            let violated = past.iter().any(|&ch| {
                let shape = faces.get(chords.get(ch).face).shape;
                shape.vertices().iter().any(|&v| {
                    !diameter.contains(v)
                        && tri.position(v).distance(center) - radius > CIRCLE_EPS
                })
            });

            if violated {
                let cv = collapse_branch(tri, faces, chords, &past, diameter)?;
                convergence.push(cv);
                finish(tri, faces, chords, &past);
                continue;
            }

            let links: Vec<ChordId> = chords.get(cur).links().to_vec();
            for link in links {
                if Some(link) != from {
                    stack.push((link, Some(cur), past.clone()));
                }
            }
        }
    }
    Ok(convergence)
}

/// Internal edge the branch is currently growing its semicircle over.
fn branch_diameter(
    tri: &Triangulation,
    faces: &FaceArena,
    chords: &ChordArena,
    sil: &Silhouette,
    cur: ChordId,
    from: Option<ChordId>,
) -> Result<SegKey, InflateError> {
    let face = faces.get(chords.get(cur).face);
    if face.kind == FaceKind::Terminal {
        let [s0, s1, s2] = face.shape.segments();
        if !is_external(tri, sil, s0) {
            Ok(s0)
        } else if !is_external(tri, sil, s1) {
            Ok(s1)
        } else {
            Ok(s2)
        }
    } else {
        let from = from
            .ok_or_else(|| InflateError::internal("sleeve chord reached without a predecessor"))?;
        let segments = face.uncommon_segments(faces.get(chords.get(from).face));
        if !is_external(tri, sil, segments[0]) {
            Ok(segments[0])
        } else {
            Ok(segments[1])
        }
    }
}

/// Uncommon vertices between consecutive faces along the walked branch.
fn branch_points(faces: &FaceArena, chords: &ChordArena, past: &[ChordId]) -> Vec<VertexId> {
    past.iter()
        .tuple_windows()
        .map(|(&c0, &c1)| {
            faces
                .get(chords.get(c0).face)
                .uncommon_vertex(faces.get(chords.get(c1).face))
        })
        .collect()
}

/// Replaces the walked triangles with a fan from the semicircle center over
/// `diameter`, ordered by angle from `diameter.a`. Returns the fan center.
fn collapse_branch(
    tri: &mut Triangulation,
    faces: &FaceArena,
    chords: &ChordArena,
    past: &[ChordId],
    diameter: SegKey,
) -> Result<VertexId, InflateError> {
    let last = *past.last().ok_or_else(|| InflateError::internal("empty branch"))?;
    let mut points = branch_points(faces, chords, past);
    points.push(faces.get(chords.get(last).face).shape.opposite(diameter));

    let center = tri.midpoint(diameter);
    let basis = tri.position(diameter.a());
    let sorted = points
        .into_iter()
        .sorted_by(|&p, &q| {
            let ap = geometry::angle_between(center, basis, tri.position(p));
            let aq = geometry::angle_between(center, basis, tri.position(q));
            ap.total_cmp(&aq)
        });

    let mut rim = vec![diameter.a()];
    rim.extend(sorted);
    rim.push(diameter.b());

    let cv = tri.get_or_add_vertex(center);
    for (&b, &c) in rim.iter().tuple_windows() {
        if b == c || b == cv || c == cv {
            continue;
        }
        tri.add_triangle(cv, b, c)?;
    }
    Ok(cv)
}

/// Collapses a branch that ran into a junction onto the junction centroid.
/// Returns `None` when a re-pruned junction offers no matching divide, in
/// which case the branch is left as is.
fn collapse_junction(
    tri: &mut Triangulation,
    faces: &mut FaceArena,
    chords: &ChordArena,
    cur: ChordId,
    past: &[ChordId],
) -> Result<Option<VertexId>, InflateError> {
    let chord = chords.get(cur);
    let (face_id, src, dst) = (chord.face, chord.src, chord.dst);
    if faces.get(face_id).consumed() {
        warn!("branch arrived at a fully consumed junction");
        return Ok(None);
    }
    let shape = faces.get(face_id).shape;
    let centroid = tri.centroid(&shape);
    let cv = tri.get_or_add_vertex(centroid);

    let mut points = branch_points(faces, chords, past);
    points.extend(shape.vertices());

    let mut ignores: Vec<VertexId> = Vec::new();
    let mut divide_vertex: Option<VertexId> = None;
    let was_pruned = faces.get(face_id).pruned();

    if !was_pruned {
        // First arrival: the vertex opposite the entry edge marks the far
        // side of the junction.
        let entry = tri.position(src);
        let (pa, pb, pc) = (
            tri.position(shape.a),
            tri.position(shape.b),
            tri.position(shape.c),
        );
        divide_vertex = Some(if geometry::approx_eq(entry, (pa + pb) * 0.5) {
            shape.c
        } else if geometry::approx_eq(entry, (pb + pc) * 0.5) {
            shape.a
        } else {
            shape.b
        });
    } else {
        let divides = faces.get(face_id).divides().to_vec();
        if divides.len() < 2 {
            warn!("re-pruned junction has {} divide triangles", divides.len());
            return Ok(None);
        }
        let arrival = tri.position(dst);
        let mut matched = None;
        for (tid, divide) in &divides[..2] {
            let [u, w] = divide.exclude_vertex(cv);
            let mid = (tri.position(u) + tri.position(w)) * 0.5;
            if geometry::approx_eq(arrival, mid) {
                matched = Some((*tid, [u, w]));
                break;
            }
        }
        let Some((tid, pair)) = matched else {
            warn!("junction re-prune: branch arrival matches no divide edge");
            return Ok(None);
        };
        tri.remove_triangle(tid);
        if divides[..2].iter().all(|(id, _)| tri.triangle(*id).is_none()) {
            faces.get_mut(face_id).mark_consumed();
        }
        let ignore = shape
            .vertices()
            .into_iter()
            .find(|v| !pair.contains(v))
            .ok_or_else(|| InflateError::internal("divide edge covers the whole junction"))?;
        ignores.push(ignore);
    }

    let rim: Vec<VertexId> = points
        .into_iter()
        .sorted_by(|&p, &q| {
            let ap = geometry::polar_angle(centroid, tri.position(p));
            let aq = geometry::polar_angle(centroid, tri.position(q));
            ap.total_cmp(&aq)
        })
        .collect();

    let mut fresh: Vec<(TriId, Triangle)> = Vec::new();
    let n = rim.len();
    for i in 0..n {
        let (b, c) = (rim[i], rim[(i + 1) % n]);
        if b == c || b == cv || c == cv || ignores.contains(&b) || ignores.contains(&c) {
            continue;
        }
        let id = tri.add_triangle(cv, b, c)?;
        fresh.push((id, Triangle::new(cv, b, c)));
    }

    if !was_pruned {
        if let Some(dp) = divide_vertex {
            let divides: Vec<(TriId, Triangle)> = fresh
                .iter()
                .filter(|(_, t)| t.has_vertex(dp))
                .copied()
                .collect();
            faces.get_mut(face_id).set_divides(divides);
        }
    }
    Ok(Some(cv))
}

/// Marks every walked chord pruned and drops its face triangle.
fn finish(
    tri: &mut Triangulation,
    faces: &FaceArena,
    chords: &mut ChordArena,
    past: &[ChordId],
) {
    for &ch in past {
        chords.mark_pruned(ch);
        tri.remove_triangle(faces.get(chords.get(ch).face).tri);
    }
}
