//! The inflation pipeline, end to end.
//!
//! [`Inflation::new`] runs the 2D half of the pipeline (triangulate,
//! classify, axis, prune, subdivide, elevate, sew) and keeps every
//! intermediate stage readable for inspection; [`Inflation::build`] lifts
//! the result into a closed, optionally smoothed 3D mesh. [`inflate`] is the
//! one-call wrapper over both.

use glam::DVec2;
use hashbrown::HashMap;
use log::debug;

use crate::axis::{self, ChordArena, ChordId, FaceArena};
use crate::error::InflateError;
use crate::geometry::Silhouette;
use crate::height;
use crate::mesh::{self, Mesh, VertexAdjacency};
use crate::sew;
use crate::topology::{Triangulation, VertexId};

/// Post-inflation smoothing method.
#[derive(
    Copy, Clone, PartialEq, Eq, Debug, Default, serde::Serialize, serde::Deserialize,
)]
pub enum Smoothing {
    #[default]
    None,
    Laplacian,
    Hc,
}

/// Pipeline configuration.
#[derive(Copy, Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
pub struct InflateOptions {
    pub smoothing: Smoothing,
    /// Smoothing iterations.
    pub iterations: usize,
    /// HC anchor blend, clamped to `[0, 1]`.
    pub alpha: f64,
    /// HC correction weight, clamped to `[0, 1]`.
    pub beta: f64,
    /// Rows per sewn cross-section ladder, at least 1.
    pub division: usize,
}

impl Default for InflateOptions {
    fn default() -> Self {
        InflateOptions {
            smoothing: Smoothing::None,
            iterations: 5,
            alpha: 0.2,
            beta: 0.5,
            division: 3,
        }
    }
}

impl InflateOptions {
    pub fn validate(&self) -> Result<(), InflateError> {
        if self.division < 1 {
            return Err(InflateError::InvalidInput(
                "division must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

/// Result of a full inflation run.
#[derive(Debug, Clone)]
pub struct Inflated {
    pub mesh: Mesh,
    /// Vertex-connectivity of the final mesh, for post-hoc neighbor queries.
    pub adjacency: VertexAdjacency,
}

/// The 2D half of the pipeline with its intermediate stages retained.
#[derive(Debug, Clone)]
pub struct Inflation {
    tri: Triangulation,
    silhouette: Silhouette,
    faces: FaceArena,
    chords: ChordArena,
    root: ChordId,
    heights: HashMap<VertexId, f64>,
    convergence: Vec<VertexId>,
}

impl Inflation {
    /// Runs triangulation through sewing on a simple closed polygon.
    pub fn new(points: &[DVec2], division: usize) -> Result<Self, InflateError> {
        if division < 1 {
            return Err(InflateError::InvalidInput(
                "division must be at least 1".into(),
            ));
        }

        let mut tri = Triangulation::from_polygon(points)?;
        let silhouette = tri.boundary_silhouette();
        let mut faces = axis::classify(&tri, &silhouette);
        let (mut chords, root) = axis::build_chordal_axis(&mut tri, &faces, &silhouette)?;
        let convergence = axis::prune(&mut tri, &mut faces, &mut chords, &silhouette, root)?;
        debug!("pruned {} branch(es)", convergence.len());
        axis::subdivide(&mut tri, &faces, &chords, root)?;
        let mut heights = height::elevate(&tri, &silhouette);
        sew::sew(&mut tri, &mut heights, &chords, root, division)?;

        Ok(Inflation {
            tri,
            silhouette,
            faces,
            chords,
            root,
            heights,
            convergence,
        })
    }

    /// Lifts the sewn triangulation into a closed 3D mesh, applying the
    /// configured smoothing.
    pub fn build(&self, options: &InflateOptions) -> (Mesh, VertexAdjacency) {
        let flat = mesh::build_mesh(&self.tri, &self.heights);
        let solid = mesh::symmetrize(&flat);
        let solid = match options.smoothing {
            Smoothing::None => solid,
            Smoothing::Laplacian => mesh::laplacian_filter(solid, options.iterations),
            Smoothing::Hc => {
                mesh::hc_filter(solid, options.iterations, options.alpha, options.beta)
            }
        };
        let adjacency = mesh::build_network(&solid.triangles);
        (solid, adjacency)
    }

    pub fn triangulation(&self) -> &Triangulation {
        &self.tri
    }

    pub fn silhouette(&self) -> &Silhouette {
        &self.silhouette
    }

    pub fn faces(&self) -> &FaceArena {
        &self.faces
    }

    pub fn chords(&self) -> &ChordArena {
        &self.chords
    }

    pub fn root(&self) -> ChordId {
        self.root
    }

    pub fn heights(&self) -> &HashMap<VertexId, f64> {
        &self.heights
    }

    /// Fan centers introduced by the pruner.
    pub fn convergence(&self) -> &[VertexId] {
        &self.convergence
    }
}

/// Inflates a simple closed polygon into a rounded solid.
pub fn inflate(points: &[DVec2], options: &InflateOptions) -> Result<Inflated, InflateError> {
    options.validate()?;
    let run = Inflation::new(points, options.division)?;
    let (mesh, adjacency) = run.build(options);
    debug!(
        "inflated {} input points into {} vertices / {} triangles",
        points.len(),
        mesh.vertex_count(),
        mesh.triangle_count()
    );
    Ok(Inflated { mesh, adjacency })
}
