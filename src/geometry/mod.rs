//! Scalar geometric predicates shared by the inflation passes.
//!
//! # Epsilon policy
//! All point comparisons use a single fixed tolerance, [`EPS`]. Tie-breaks
//! favor *merging* near-equal points (dedup bias) so that the triangulation
//! stays consistent while passes subdivide and re-fan triangles.

pub mod silhouette;

pub use silhouette::Silhouette;

use glam::DVec2;

/// Geometric tolerance for point coincidence and point-on-segment tests.
pub const EPS: f64 = 1e-4;

/// Tolerance for the pruner's empty-circle containment test. Much tighter
/// than [`EPS`]: a vertex sitting exactly on the circle must not count as
/// outside.
pub const CIRCLE_EPS: f64 = 1e-9;

/// Whether two points coincide within [`EPS`].
#[inline]
pub fn approx_eq(a: DVec2, b: DVec2) -> bool {
    a.distance_squared(b) <= EPS * EPS
}

/// Whether `p` lies on the segment `a..b` (endpoints included) within [`EPS`].
pub fn on_segment(a: DVec2, b: DVec2, p: DVec2) -> bool {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= EPS * EPS {
        return approx_eq(a, p);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    let closest = a + ab * t;
    closest.distance_squared(p) <= EPS * EPS
}

/// Even-odd ray-cast point-in-polygon test. The polygon is implicitly closed.
pub fn point_in_polygon(polygon: &[DVec2], p: DVec2) -> bool {
    let n = polygon.len();
    if n == 0 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (polygon[i], polygon[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x = a.x + (p.y - a.y) / (b.y - a.y) * (b.x - a.x);
            if p.x < x {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Polar angle of `to` as seen from `from`, in `(-PI, PI]`.
#[inline]
pub fn polar_angle(from: DVec2, to: DVec2) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Unsigned angle in `[0, PI]` between the directions `origin -> to0` and
/// `origin -> to1`.
pub fn angle_between(origin: DVec2, to0: DVec2, to1: DVec2) -> f64 {
    let v0 = to0 - origin;
    let v1 = to1 - origin;
    let denom = (v0.length_squared() * v1.length_squared()).sqrt();
    if denom <= f64::MIN_POSITIVE {
        return 0.0;
    }
    (v0.dot(v1) / denom).clamp(-1.0, 1.0).acos()
}
