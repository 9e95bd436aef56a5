//! `SegKey`: canonical key for an undirected triangulation edge.
//!
//! Equality and hashing must be order-independent (`{a,b} == {b,a}`) because
//! segments key the face-adjacency and incidence maps. Rather than a custom
//! symmetric `Hash`, the pair is canonicalized on construction: the smaller
//! `VertexId` always comes first.

use std::fmt;

use crate::topology::vertex::VertexId;

/// Undirected edge between two distinct vertices, stored in canonical order.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
pub struct SegKey {
    a: VertexId,
    b: VertexId,
}

impl SegKey {
    /// Canonicalizes the pair. The two endpoints must be distinct; a segment
    /// with coincident endpoints violates the triangulation invariants.
    #[inline]
    pub fn new(u: VertexId, v: VertexId) -> Self {
        debug_assert_ne!(u, v, "segment endpoints must be distinct");
        if u <= v {
            SegKey { a: u, b: v }
        } else {
            SegKey { a: v, b: u }
        }
    }

    #[inline]
    pub fn a(self) -> VertexId {
        self.a
    }

    #[inline]
    pub fn b(self) -> VertexId {
        self.b
    }

    #[inline]
    pub fn contains(self, v: VertexId) -> bool {
        self.a == v || self.b == v
    }

    /// The endpoint that is not `v`, or `None` if `v` is not an endpoint.
    #[inline]
    pub fn other(self, v: VertexId) -> Option<VertexId> {
        if v == self.a {
            Some(self.b)
        } else if v == self.b {
            Some(self.a)
        } else {
            None
        }
    }
}

impl fmt::Debug for SegKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SegKey({}-{})", self.a, self.b)
    }
}
