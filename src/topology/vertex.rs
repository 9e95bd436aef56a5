//! `VertexId`: a strong, zero-cost handle for triangulation vertices.
//!
//! Vertices are created once per distinct coordinate (see
//! [`Triangulation::get_or_add_vertex`](crate::topology::Triangulation::get_or_add_vertex))
//! and never destroyed within an inflation run, so a `VertexId` stays valid
//! for the whole pipeline. The wrapped value is nonzero so that 0 stays
//! reserved as an invalid/sentinel value.

use std::{fmt, num::NonZeroU32};

/// Opaque handle to a triangulation vertex.
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct VertexId(NonZeroU32);

impl VertexId {
    /// Builds a handle from a dense arena index.
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        let raw = u32::try_from(index + 1).expect("vertex arena exceeds u32 range");
        VertexId(NonZeroU32::new(raw).expect("index + 1 is nonzero"))
    }

    /// Dense arena index of this vertex.
    #[inline]
    pub const fn index(self) -> usize {
        self.0.get() as usize - 1
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VertexId").field(&self.0.get()).finish()
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.get())
    }
}
