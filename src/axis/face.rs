//! Faces: triangles tagged with their chordal-axis class.
//!
//! A face keeps a *value copy* of its triangle so that uncommon-point and
//! uncommon-segment queries keep working after the pruner removes the
//! triangle from the store.

use std::fmt;

use crate::topology::{SegKey, TriId, Triangle, VertexId};

/// Chordal-axis class of a triangle, by boundary-edge count:
/// 2-3 external edges -> Terminal, 1 -> Sleeve, 0 -> Junction.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
pub enum FaceKind {
    Terminal,
    Sleeve,
    Junction,
}

/// Handle into a [`FaceArena`].
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct FaceId(pub(crate) u32);

impl FaceId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for FaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("FaceId").field(&self.0).finish()
    }
}

/// A classified triangle plus its pruning state.
#[derive(Debug, Clone)]
pub struct Face {
    pub kind: FaceKind,
    /// Store slot the triangle occupied at classification time.
    pub tri: TriId,
    /// Value copy, valid after removal from the store.
    pub shape: Triangle,
    /// Replacement triangles recorded when a junction is first pruned.
    divides: Vec<(TriId, Triangle)>,
    /// Every incident branch has pruned through this junction; further
    /// arrivals indicate a traversal inconsistency.
    consumed: bool,
}

impl Face {
    pub fn new(kind: FaceKind, tri: TriId, shape: Triangle) -> Self {
        Face {
            kind,
            tri,
            shape,
            divides: Vec::new(),
            consumed: false,
        }
    }

    /// Pruned iff a subdivision has been recorded.
    #[inline]
    pub fn pruned(&self) -> bool {
        !self.divides.is_empty()
    }

    pub fn divides(&self) -> &[(TriId, Triangle)] {
        &self.divides
    }

    pub fn set_divides(&mut self, divides: Vec<(TriId, Triangle)>) {
        self.divides = divides;
    }

    #[inline]
    pub fn consumed(&self) -> bool {
        self.consumed
    }

    pub fn mark_consumed(&mut self) {
        self.consumed = true;
    }

    /// First vertex of this face's triangle that `other` does not share.
    pub fn uncommon_vertex(&self, other: &Face) -> VertexId {
        let t = &self.shape;
        if !other.shape.has_vertex(t.a) {
            t.a
        } else if !other.shape.has_vertex(t.b) {
            t.b
        } else {
            t.c
        }
    }

    /// The two segments of this face's triangle not shared with `other`.
    pub fn uncommon_segments(&self, other: &Face) -> [SegKey; 2] {
        let [s0, s1, s2] = self.shape.segments();
        if other.shape.has_segment(s0) {
            [s1, s2]
        } else if other.shape.has_segment(s1) {
            [s0, s2]
        } else {
            [s0, s1]
        }
    }
}

/// Dense arena of classified faces, in triangle-id order.
#[derive(Debug, Clone, Default)]
pub struct FaceArena {
    faces: Vec<Face>,
}

impl FaceArena {
    pub fn push(&mut self, face: Face) -> FaceId {
        let id = FaceId(self.faces.len() as u32);
        self.faces.push(face);
        id
    }

    #[inline]
    pub fn get(&self, id: FaceId) -> &Face {
        &self.faces[id.index()]
    }

    #[inline]
    pub fn get_mut(&mut self, id: FaceId) -> &mut Face {
        &mut self.faces[id.index()]
    }

    pub fn len(&self) -> usize {
        self.faces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FaceId, &Face)> {
        self.faces
            .iter()
            .enumerate()
            .map(|(i, f)| (FaceId(i as u32), f))
    }

    /// First face of the given kind, in arena order.
    pub fn find_kind(&self, kind: FaceKind) -> Option<FaceId> {
        self.iter().find(|(_, f)| f.kind == kind).map(|(id, _)| id)
    }
}
