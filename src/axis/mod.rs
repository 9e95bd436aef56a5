//! The chordal axis: face classification, axis construction, pruning, and
//! spine subdivision.
//!
//! These are stages 2-5 of the inflation pipeline. They share the mutable
//! [`Triangulation`](crate::topology::Triangulation) and communicate through
//! the [`FaceArena`](face::FaceArena) and [`ChordArena`](chord::ChordArena).

pub mod build;
pub mod chord;
pub mod classify;
pub mod face;
pub mod prune;
pub mod subdivide;

pub use build::build_chordal_axis;
pub use chord::{Chord, ChordArena, ChordId};
pub use classify::{FaceAdjacency, classify};
pub use face::{Face, FaceArena, FaceId, FaceKind};
pub use prune::prune;
pub use subdivide::subdivide;
