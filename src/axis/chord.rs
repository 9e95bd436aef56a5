//! Chords: directed axis segments forming the chordal-axis tree.
//!
//! Chords are mutually referential (symmetric adjacency), so they live in an
//! arena addressed by [`ChordId`]; adjacency is a list of ids, and "visited"
//! tracking during walks is the `from`-id discipline rather than identity
//! comparison on live references.

use std::fmt;

use crate::axis::face::FaceId;
use crate::topology::{SegKey, VertexId};

/// Handle into a [`ChordArena`].
#[derive(
    Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize,
)]
#[repr(transparent)]
pub struct ChordId(pub(crate) u32);

impl ChordId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for ChordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ChordId").field(&self.0).finish()
    }
}

/// One directed axis segment through a face.
#[derive(Debug, Clone)]
pub struct Chord {
    pub src: VertexId,
    pub dst: VertexId,
    pub face: FaceId,
    /// Triangle edge the chord entered through, when one exists.
    pub src_edge: Option<SegKey>,
    /// Triangle edge the chord exits through, when one exists.
    pub dst_edge: Option<SegKey>,
    pruned: bool,
    links: Vec<ChordId>,
}

impl Chord {
    #[inline]
    pub fn pruned(&self) -> bool {
        self.pruned
    }

    #[inline]
    pub fn links(&self) -> &[ChordId] {
        &self.links
    }
}

/// Arena of chords with symmetric connect/disconnect.
#[derive(Debug, Clone, Default)]
pub struct ChordArena {
    chords: Vec<Chord>,
}

impl ChordArena {
    pub fn push(
        &mut self,
        src: VertexId,
        dst: VertexId,
        face: FaceId,
        src_edge: Option<SegKey>,
        dst_edge: Option<SegKey>,
    ) -> ChordId {
        let id = ChordId(self.chords.len() as u32);
        self.chords.push(Chord {
            src,
            dst,
            face,
            src_edge,
            dst_edge,
            pruned: false,
            links: Vec::new(),
        });
        id
    }

    #[inline]
    pub fn get(&self, id: ChordId) -> &Chord {
        &self.chords[id.index()]
    }

    pub fn len(&self) -> usize {
        self.chords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ChordId, &Chord)> {
        self.chords
            .iter()
            .enumerate()
            .map(|(i, c)| (ChordId(i as u32), c))
    }

    /// Symmetric connection between two chords.
    pub fn connect(&mut self, a: ChordId, b: ChordId) {
        self.chords[a.index()].links.push(b);
        self.chords[b.index()].links.push(a);
    }

    /// Symmetric disconnection; no-op if not connected.
    pub fn disconnect(&mut self, a: ChordId, b: ChordId) {
        self.chords[a.index()].links.retain(|&c| c != b);
        self.chords[b.index()].links.retain(|&c| c != a);
    }

    pub fn mark_pruned(&mut self, id: ChordId) {
        self.chords[id.index()].pruned = true;
    }

    /// Depth-first collection over the chord tree of every chord matching
    /// `pred`, starting at `root`. Explicit work stack; the `from` id keeps
    /// the walk from revisiting the edge it arrived on.
    pub fn collect<F>(&self, root: ChordId, pred: F) -> Vec<ChordId>
    where
        F: Fn(&Chord) -> bool,
    {
        let mut out = Vec::new();
        let mut stack: Vec<(ChordId, Option<ChordId>)> = vec![(root, None)];
        while let Some((cur, from)) = stack.pop() {
            let chord = self.get(cur);
            if pred(chord) {
                out.push(cur);
            }
            for &next in chord.links() {
                if Some(next) != from {
                    stack.push((next, Some(cur)));
                }
            }
        }
        out
    }
}
