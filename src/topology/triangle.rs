//! Triangles and their membership/exclusion queries.
//!
//! A [`Triangle`] is a value type (three vertex handles); the passes keep
//! copies of triangles they intend to remove, so queries stay valid even
//! after the triangle leaves the store.

use std::fmt;

use crate::topology::segment::SegKey;
use crate::topology::vertex::VertexId;

/// Handle to a triangle slot in the [`Triangulation`](crate::topology::Triangulation) store.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct TriId(pub(crate) u32);

impl TriId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for TriId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TriId").field(&self.0).finish()
    }
}

/// Three vertices; the three derived segments are `a-b`, `b-c`, `c-a`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub struct Triangle {
    pub a: VertexId,
    pub b: VertexId,
    pub c: VertexId,
}

impl Triangle {
    #[inline]
    pub fn new(a: VertexId, b: VertexId, c: VertexId) -> Self {
        Triangle { a, b, c }
    }

    #[inline]
    pub fn vertices(&self) -> [VertexId; 3] {
        [self.a, self.b, self.c]
    }

    /// Derived segments in edge order `a-b`, `b-c`, `c-a`.
    #[inline]
    pub fn segments(&self) -> [SegKey; 3] {
        [
            SegKey::new(self.a, self.b),
            SegKey::new(self.b, self.c),
            SegKey::new(self.c, self.a),
        ]
    }

    #[inline]
    pub fn has_vertex(&self, v: VertexId) -> bool {
        self.a == v || self.b == v || self.c == v
    }

    #[inline]
    pub fn has_segment(&self, s: SegKey) -> bool {
        self.segments().contains(&s)
    }

    /// The two segments of this triangle other than `s`.
    pub fn exclude_segment(&self, s: SegKey) -> [SegKey; 2] {
        let [s0, s1, s2] = self.segments();
        if s == s0 {
            [s1, s2]
        } else if s == s1 {
            [s0, s2]
        } else {
            debug_assert_eq!(s, s2, "segment does not belong to this triangle");
            [s0, s1]
        }
    }

    /// The two vertices of this triangle other than `v`.
    pub fn exclude_vertex(&self, v: VertexId) -> [VertexId; 2] {
        if v == self.a {
            [self.b, self.c]
        } else if v == self.b {
            [self.a, self.c]
        } else {
            debug_assert_eq!(v, self.c, "vertex does not belong to this triangle");
            [self.a, self.b]
        }
    }

    /// The two segments incident to `v`.
    pub fn segments_at(&self, v: VertexId) -> [SegKey; 2] {
        let [u, w] = self.exclude_vertex(v);
        [SegKey::new(v, u), SegKey::new(v, w)]
    }

    /// The vertex opposite `s` (the one not on `s`).
    pub fn opposite(&self, s: SegKey) -> VertexId {
        if !s.contains(self.a) {
            self.a
        } else if !s.contains(self.b) {
            self.b
        } else {
            self.c
        }
    }
}
