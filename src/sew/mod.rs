//! Cross-section sewing along the pruned spine.
//!
//! Every triangle touching an unpruned chord is torn out and replaced by a
//! ladder of `division` rows whose new vertices follow a quarter-oval height
//! profile, rounding the inflated cross-section. A triangle can be reached
//! by two different chords; the second arrival tears down the first ladder
//! and rebuilds it, since the edge pairing depends on the approach
//! direction. Spine tips (chords whose continuations are all pruned) get one
//! extra pass at their far endpoint to close the tip.

use hashbrown::HashMap;
use log::debug;

use crate::axis::chord::{ChordArena, ChordId};
use crate::error::InflateError;
use crate::topology::{SegKey, TriId, Triangle, Triangulation, VertexId};

const HALF_PI: f64 = std::f64::consts::FRAC_PI_2;

/// Quarter-oval elevation profile over the arc parameter `r` in `[0, 1]`.
/// Non-negative heights bow outward immediately; negative ones ease in so
/// the far side stays concave.
#[inline]
pub fn quarter_oval(height: f64, r: f64) -> f64 {
    if height >= 0.0 {
        height * (r * HALF_PI).sin()
    } else {
        height * (1.0 - ((1.0 - r) * HALF_PI).sin())
    }
}

/// Replaces spine-adjacent triangles with quarter-oval ladders.
pub fn sew(
    tri: &mut Triangulation,
    heights: &mut HashMap<VertexId, f64>,
    chords: &ChordArena,
    root: ChordId,
    division: usize,
) -> Result<(), InflateError> {
    let snapshot: Vec<(TriId, Triangle)> =
        tri.triangles().map(|(id, t)| (id, *t)).collect();
    let mut sews: HashMap<TriId, Vec<TriId>> = HashMap::new();

    let mut stack: Vec<(ChordId, Option<ChordId>)> = vec![(root, None)];
    while let Some((cur, from)) = stack.pop() {
        let chord = chords.get(cur);
        let (src, dst, pruned) = (chord.src, chord.dst, chord.pruned());

        if !pruned {
            for &(tid, t) in &snapshot {
                if !(t.has_vertex(src) && (t.has_vertex(dst) || !sews.contains_key(&tid))) {
                    continue;
                }
                let segments = if t.has_vertex(dst) {
                    t.exclude_segment(SegKey::new(src, dst))
                } else {
                    t.segments_at(src)
                };
                resew(tri, heights, &mut sews, tid, segments, division)?;
            }
        }

        let next: Vec<ChordId> = chord
            .links()
            .iter()
            .copied()
            .filter(|&c| Some(c) != from)
            .collect();

        // A spine tip: every continuation was pruned away, so the far
        // endpoint also needs its incident triangles closed.
        let tip = next.iter().all(|&c| chords.get(c).pruned());
        if tip && !pruned {
            for &(tid, t) in &snapshot {
                if sews.contains_key(&tid) || !t.has_vertex(dst) {
                    continue;
                }
                let segments = t.segments_at(dst);
                resew(tri, heights, &mut sews, tid, segments, division)?;
            }
        }

        for &c in next.iter().rev() {
            stack.push((c, Some(cur)));
        }
    }

    debug!("sewed {} triangles at division {division}", sews.len());
    Ok(())
}

fn resew(
    tri: &mut Triangulation,
    heights: &mut HashMap<VertexId, f64>,
    sews: &mut HashMap<TriId, Vec<TriId>>,
    tid: TriId,
    segments: [SegKey; 2],
    division: usize,
) -> Result<(), InflateError> {
    if let Some(old) = sews.remove(&tid) {
        for id in old {
            tri.remove_triangle(id);
        }
    }
    tri.remove_triangle(tid);
    let ladder = sew_ladder(tri, heights, segments[0], segments[1], division)?;
    sews.insert(tid, ladder);
    Ok(())
}

/// Builds one ladder between two segments sharing an apex, registering
/// heights for each new rung vertex.
fn sew_ladder(
    tri: &mut Triangulation,
    heights: &mut HashMap<VertexId, f64>,
    left: SegKey,
    right: SegKey,
    division: usize,
) -> Result<Vec<TriId>, InflateError> {
    let (top, lb, rb) = if left.a() == right.a() {
        (left.a(), left.b(), right.b())
    } else if left.a() == right.b() {
        (left.a(), left.b(), right.a())
    } else if left.b() == right.a() {
        (left.b(), left.a(), right.b())
    } else {
        (left.b(), left.a(), right.a())
    };

    let lookup = |heights: &HashMap<VertexId, f64>, v: VertexId| {
        heights
            .get(&v)
            .copied()
            .ok_or_else(|| InflateError::internal(format!("vertex {v} missing from height table")))
    };
    let th = lookup(heights, top)?;
    let lh = lookup(heights, lb)? - th;
    let rh = lookup(heights, rb)? - th;

    let top_pos = tri.position(top);
    let ld = tri.position(lb) - top_pos;
    let rd = tri.position(rb) - top_pos;

    let mut lp = vec![lb; division];
    let mut rp = vec![rb; division];
    let inv = 1.0 / division as f64;
    for i in 0..division - 1 {
        let r = (i + 1) as f64 * inv;

        let lv = tri.get_or_add_vertex(top_pos + ld * r);
        heights.entry(lv).or_insert_with(|| th + quarter_oval(lh, r));
        lp[i] = lv;

        let rv = tri.get_or_add_vertex(top_pos + rd * r);
        heights.entry(rv).or_insert_with(|| th + quarter_oval(rh, r));
        rp[i] = rv;
    }

    let mut out = Vec::with_capacity(2 * division - 1);
    out.push(tri.add_triangle(top, lp[0], rp[0])?);
    for i in 0..division - 1 {
        out.push(tri.add_triangle(lp[i], rp[i], lp[i + 1])?);
        out.push(tri.add_triangle(rp[i], rp[i + 1], lp[i + 1])?);
    }
    Ok(out)
}
