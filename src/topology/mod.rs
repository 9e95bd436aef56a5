//! Mutable triangulation topology: strong handles, undirected segment keys,
//! triangle queries, and the shared triangle store every pipeline stage
//! mutates in turn.

pub mod segment;
pub mod triangle;
pub mod triangulation;
pub mod vertex;

pub use segment::SegKey;
pub use triangle::{TriId, Triangle};
pub use triangulation::Triangulation;
pub use vertex::VertexId;
