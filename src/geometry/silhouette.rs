//! The silhouette: the original boundary of the sketched polygon.
//!
//! Boundary segments are captured once, right after triangulation, as every
//! segment that belongs to exactly one triangle. Later passes subdivide
//! boundary edges, so containment queries test *full-length containment* on a
//! silhouette segment rather than exact segment equality.

use glam::DVec2;

use crate::geometry::{approx_eq, on_segment};

/// Immutable snapshot of the silhouette's boundary segments, with the
/// epsilon-tolerant containment queries the classifier, pruner, and height
/// propagator need.
#[derive(Debug, Clone)]
pub struct Silhouette {
    segments: Vec<(DVec2, DVec2)>,
}

impl Silhouette {
    pub fn new(segments: Vec<(DVec2, DVec2)>) -> Self {
        Self { segments }
    }

    /// Number of boundary segments.
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[(DVec2, DVec2)] {
        &self.segments
    }

    /// Whether the segment `a..b` lies along some boundary segment. Both
    /// endpoints must be contained in the *same* boundary segment, so that
    /// segments split during subdivision still classify as external.
    pub fn contains_segment(&self, a: DVec2, b: DVec2) -> bool {
        self.segments
            .iter()
            .any(|&(sa, sb)| on_segment(sa, sb, a) && on_segment(sa, sb, b))
    }

    /// Whether `p` lies on the silhouette (an endpoint of, or interior to,
    /// any boundary segment).
    pub fn contains_point(&self, p: DVec2) -> bool {
        self.segments
            .iter()
            .any(|&(sa, sb)| approx_eq(sa, p) || approx_eq(sb, p) || on_segment(sa, sb, p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Silhouette {
        Silhouette::new(vec![
            (DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0)),
            (DVec2::new(1.0, 0.0), DVec2::new(1.0, 1.0)),
            (DVec2::new(1.0, 1.0), DVec2::new(0.0, 1.0)),
            (DVec2::new(0.0, 1.0), DVec2::new(0.0, 0.0)),
        ])
    }

    #[test]
    fn whole_and_partial_segments_are_external() {
        let sil = unit_square();
        // Exact boundary segment.
        assert!(sil.contains_segment(DVec2::new(0.0, 0.0), DVec2::new(1.0, 0.0)));
        // A half of a boundary segment (as produced by subdivision).
        assert!(sil.contains_segment(DVec2::new(0.25, 0.0), DVec2::new(0.75, 0.0)));
        // The diagonal is internal.
        assert!(!sil.contains_segment(DVec2::new(0.0, 0.0), DVec2::new(1.0, 1.0)));
        // Endpoints on two *different* boundary segments do not count.
        assert!(!sil.contains_segment(DVec2::new(0.5, 0.0), DVec2::new(1.0, 0.5)));
    }

    #[test]
    fn contour_points() {
        let sil = unit_square();
        assert!(sil.contains_point(DVec2::new(0.0, 0.0)));
        assert!(sil.contains_point(DVec2::new(0.5, 1.0)));
        assert!(!sil.contains_point(DVec2::new(0.5, 0.5)));
    }
}
