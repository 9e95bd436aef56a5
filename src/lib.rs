//! # sketch-inflate
//!
//! sketch-inflate turns a closed 2D silhouette polygon into a rounded,
//! closed 3D solid, the way sketch-based modelers inflate a drawn outline.
//! The pipeline triangulates the silhouette, classifies triangles against
//! the boundary, traces the chordal axis, prunes insignificant branches,
//! subdivides and sews quarter-oval cross-sections along the spine, and
//! finally mirrors the height field into a double-sided mesh with optional
//! Laplacian or HC smoothing.
//!
//! ## Usage
//!
//! ```no_run
//! use glam::DVec2;
//! use sketch_inflate::prelude::*;
//!
//! let outline = vec![
//!     DVec2::new(0.0, 0.0),
//!     DVec2::new(4.0, 0.0),
//!     DVec2::new(4.0, 1.0),
//!     DVec2::new(0.0, 1.0),
//! ];
//! let inflated = inflate(&outline, &InflateOptions::default())?;
//! assert!(!inflated.mesh.triangles.is_empty());
//! # Ok::<(), sketch_inflate::InflateError>(())
//! ```
//!
//! ## Determinism
//!
//! A given polygon always produces the same mesh: triangle slots are handed
//! out monotonically and every traversal iterates in id order, so no stage
//! depends on hash iteration order.
//!
//! Self-intersecting polygons are a precondition violation; results for
//! them are undefined.

pub mod axis;
pub mod error;
pub mod geometry;
pub mod height;
pub mod inflate;
pub mod mesh;
pub mod sew;
pub mod topology;

pub use error::InflateError;
pub use inflate::{Inflated, Inflation, inflate};

/// The most-used types and entry points.
pub mod prelude {
    pub use crate::axis::{Chord, ChordArena, ChordId, Face, FaceArena, FaceId, FaceKind};
    pub use crate::error::InflateError;
    pub use crate::geometry::Silhouette;
    pub use crate::inflate::{Inflated, InflateOptions, Inflation, Smoothing, inflate};
    pub use crate::mesh::{Aabb, Mesh, VertexAdjacency, build_network};
    pub use crate::sew::quarter_oval;
    pub use crate::topology::{SegKey, TriId, Triangle, Triangulation, VertexId};
}
