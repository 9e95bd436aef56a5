//! The shared mutable triangulation store.
//!
//! The store owns the authoritative triangle set for one inflation run and
//! exposes the add/remove primitives the passes rebuild geometry with. The
//! initial constrained triangulation of the silhouette polygon is delegated
//! to `spade`; after that single call the core never triangulates
//! geometrically, it only retiles through [`Triangulation::add_triangle`]
//! and the removal primitives.
//!
//! # Determinism
//! Triangle slots are handed out monotonically and iterated in id order, and
//! vertex deduplication goes through an epsilon-sized spatial grid, so a
//! given polygon always produces the same structure.

use glam::DVec2;
use hashbrown::HashMap;
use spade::{ConstrainedDelaunayTriangulation, Point2 as SpadePoint, Triangulation as _};

use crate::error::InflateError;
use crate::geometry::{self, EPS, Silhouette};
use crate::topology::segment::SegKey;
use crate::topology::triangle::{TriId, Triangle};
use crate::topology::vertex::VertexId;

/// Indexed, mutable triangle store over a deduplicated vertex pool.
///
/// Vertices are append-only for the lifetime of a run; triangles come and go
/// as the pruner, subdivider, and sewer locally retile the shape.
#[derive(Debug, Clone, Default)]
pub struct Triangulation {
    positions: Vec<DVec2>,
    /// Spatial grid (cell size [`EPS`]) for get-or-create vertex dedup.
    grid: HashMap<(i64, i64), Vec<VertexId>>,
    /// Triangle slots; `None` marks a removed triangle.
    tris: Vec<Option<Triangle>>,
    /// Segment -> incident live triangles.
    by_segment: HashMap<SegKey, Vec<TriId>>,
}

impl Triangulation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Constrained triangulation of a simple closed polygon.
    ///
    /// Consecutive duplicate points (and a repeated closing point) are
    /// dropped; fewer than 3 distinct points is an error. Self-intersecting
    /// polygons are a precondition violation with undefined results.
    pub fn from_polygon(points: &[DVec2]) -> Result<Self, InflateError> {
        let mut ring: Vec<DVec2> = Vec::with_capacity(points.len());
        for &p in points {
            if ring.last().is_none_or(|&q| !geometry::approx_eq(q, p)) {
                ring.push(p);
            }
        }
        if ring.len() > 1 && geometry::approx_eq(ring[0], *ring.last().unwrap()) {
            ring.pop();
        }
        if ring.len() < 3 {
            return Err(InflateError::InvalidInput(format!(
                "polygon must contain at least 3 distinct points, got {}",
                ring.len()
            )));
        }

        let mut cdt: ConstrainedDelaunayTriangulation<SpadePoint<f64>> =
            ConstrainedDelaunayTriangulation::new();
        let mut handles = Vec::with_capacity(ring.len());
        for p in &ring {
            let h = cdt
                .insert(SpadePoint::new(p.x, p.y))
                .map_err(|e| InflateError::Triangulation(format!("{e:?}")))?;
            handles.push(h);
        }
        for i in 0..handles.len() {
            let j = (i + 1) % handles.len();
            if handles[i] != handles[j] {
                cdt.add_constraint(handles[i], handles[j]);
            }
        }

        let mut tri = Triangulation::new();
        for face in cdt.inner_faces() {
            let [pa, pb, pc] = face.positions();
            let (pa, pb, pc) = (
                DVec2::new(pa.x, pa.y),
                DVec2::new(pb.x, pb.y),
                DVec2::new(pc.x, pc.y),
            );
            // The CDT covers the convex hull; keep only faces inside the ring.
            let centroid = (pa + pb + pc) / 3.0;
            if !geometry::point_in_polygon(&ring, centroid) {
                continue;
            }
            let a = tri.get_or_add_vertex(pa);
            let b = tri.get_or_add_vertex(pb);
            let c = tri.get_or_add_vertex(pc);
            tri.add_triangle(a, b, c)?;
        }
        if tri.live_triangle_count() == 0 {
            return Err(InflateError::Triangulation(
                "polygon interior produced no triangles".into(),
            ));
        }
        Ok(tri)
    }

    // --- vertex pool ------------------------------------------------------

    /// Returns the vertex at `p`, creating it if no geometrically equal
    /// vertex exists yet. Near-equal points (within [`EPS`]) dedup onto the
    /// existing vertex.
    pub fn get_or_add_vertex(&mut self, p: DVec2) -> VertexId {
        let (cx, cy) = Self::cell(p);
        for dx in -1..=1 {
            for dy in -1..=1 {
                if let Some(cands) = self.grid.get(&(cx + dx, cy + dy)) {
                    for &v in cands {
                        if geometry::approx_eq(self.positions[v.index()], p) {
                            return v;
                        }
                    }
                }
            }
        }
        let v = VertexId::from_index(self.positions.len());
        self.positions.push(p);
        self.grid.entry((cx, cy)).or_default().push(v);
        v
    }

    #[inline]
    fn cell(p: DVec2) -> (i64, i64) {
        ((p.x / EPS).floor() as i64, (p.y / EPS).floor() as i64)
    }

    #[inline]
    pub fn position(&self, v: VertexId) -> DVec2 {
        self.positions[v.index()]
    }

    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    #[inline]
    pub fn midpoint(&self, s: SegKey) -> DVec2 {
        (self.position(s.a()) + self.position(s.b())) * 0.5
    }

    #[inline]
    pub fn centroid(&self, t: &Triangle) -> DVec2 {
        (self.position(t.a) + self.position(t.b) + self.position(t.c)) / 3.0
    }

    // --- triangle store ---------------------------------------------------

    /// Adds a triangle over three distinct vertices.
    pub fn add_triangle(
        &mut self,
        a: VertexId,
        b: VertexId,
        c: VertexId,
    ) -> Result<TriId, InflateError> {
        if a == b || b == c || c == a {
            return Err(InflateError::internal(format!(
                "degenerate triangle ({a}, {b}, {c})"
            )));
        }
        let id = TriId(u32::try_from(self.tris.len()).map_err(|_| {
            InflateError::internal("triangle store exceeds u32 range")
        })?);
        let t = Triangle::new(a, b, c);
        for s in t.segments() {
            self.by_segment.entry(s).or_default().push(id);
        }
        self.tris.push(Some(t));
        Ok(id)
    }

    /// Removes a triangle; returns whether it was still live. Removing an
    /// already-removed triangle is a no-op.
    pub fn remove_triangle(&mut self, id: TriId) -> bool {
        let Some(slot) = self.tris.get_mut(id.index()) else {
            return false;
        };
        let Some(t) = slot.take() else {
            return false;
        };
        for s in t.segments() {
            if let Some(list) = self.by_segment.get_mut(&s) {
                list.retain(|&tid| tid != id);
                if list.is_empty() {
                    self.by_segment.remove(&s);
                }
            }
        }
        true
    }

    /// Removes every live triangle incident to `s`; returns how many fell.
    pub fn remove_by_segment(&mut self, s: SegKey) -> usize {
        let ids: Vec<TriId> = match self.by_segment.get(&s) {
            Some(list) => list.clone(),
            None => return 0,
        };
        let mut removed = 0;
        for id in ids {
            if self.remove_triangle(id) {
                removed += 1;
            }
        }
        removed
    }

    #[inline]
    pub fn triangle(&self, id: TriId) -> Option<&Triangle> {
        self.tris.get(id.index()).and_then(|slot| slot.as_ref())
    }

    /// Live triangles in id order.
    pub fn triangles(&self) -> impl Iterator<Item = (TriId, &Triangle)> {
        self.tris
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|t| (TriId(i as u32), t)))
    }

    pub fn live_triangle_count(&self) -> usize {
        self.tris.iter().filter(|slot| slot.is_some()).count()
    }

    /// Live triangles incident to `s`.
    pub fn triangles_with_segment(&self, s: SegKey) -> &[TriId] {
        self.by_segment.get(&s).map_or(&[], |list| list.as_slice())
    }

    /// Snapshot of the boundary: every segment belonging to exactly one live
    /// triangle, in canonical segment order.
    pub fn boundary_silhouette(&self) -> Silhouette {
        let mut keys: Vec<SegKey> = self
            .by_segment
            .iter()
            .filter(|(_, tids)| tids.len() == 1)
            .map(|(&s, _)| s)
            .collect();
        keys.sort_unstable();
        Silhouette::new(
            keys.into_iter()
                .map(|s| (self.position(s.a()), self.position(s.b())))
                .collect(),
        )
    }
}
