//! Property-based checks over randomly jittered blob silhouettes.

use glam::DVec2;
use proptest::prelude::*;

use sketch_inflate::axis::{self, FaceKind};
use sketch_inflate::inflate::{InflateOptions, inflate};
use sketch_inflate::topology::Triangulation;

/// Star-shaped polygon around the origin; always simple.
fn blob(radii: &[f64]) -> Vec<DVec2> {
    let n = radii.len();
    radii
        .iter()
        .enumerate()
        .map(|(i, &r)| {
            let theta = i as f64 / n as f64 * std::f64::consts::TAU;
            DVec2::new(r * theta.cos(), r * theta.sin())
        })
        .collect()
}

fn radii() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(0.6f64..1.4, 6..=16)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn classification_is_total_and_exclusive(radii in radii()) {
        let points = blob(&radii);
        let tri = Triangulation::from_polygon(&points).unwrap();
        let sil = tri.boundary_silhouette();
        let faces = axis::classify(&tri, &sil);

        prop_assert_eq!(faces.len(), tri.live_triangle_count());
        let again = axis::classify(&tri, &sil);
        for ((_, f), (_, g)) in faces.iter().zip(again.iter()) {
            prop_assert_eq!(f.kind, g.kind);
        }
    }

    #[test]
    fn axis_is_a_spanning_tree_with_one_chord_per_tip(radii in radii()) {
        let points = blob(&radii);
        let mut tri = Triangulation::from_polygon(&points).unwrap();
        let sil = tri.boundary_silhouette();
        let faces = axis::classify(&tri, &sil);
        let terminal_faces = faces
            .iter()
            .filter(|(_, f)| f.kind == FaceKind::Terminal)
            .count();
        prop_assert!(terminal_faces >= 1, "a simple polygon always has ears");

        let (chords, root) = axis::build_chordal_axis(&mut tri, &faces, &sil).unwrap();

        // Connected and acyclic: a walk from the root reaches every chord
        // exactly once.
        let reached = chords.collect(root, |_| true);
        prop_assert_eq!(reached.len(), chords.len());

        let terminal_chords = chords
            .iter()
            .filter(|(_, c)| faces.get(c.face).kind == FaceKind::Terminal)
            .count();
        prop_assert_eq!(terminal_chords, terminal_faces);
    }

    #[test]
    fn blobs_inflate_into_mirrored_meshes(radii in radii()) {
        let points = blob(&radii);
        let inflated = inflate(&points, &InflateOptions::default()).unwrap();
        let mesh = inflated.mesh;

        prop_assert!(!mesh.triangles.is_empty());
        prop_assert!(mesh.vertex_count() >= points.len());
        for idx in mesh.triangles.iter().flatten() {
            prop_assert!((*idx as usize) < mesh.vertex_count());
        }

        // Heights mirror across the base plane.
        prop_assert!((mesh.bounds.max.z + mesh.bounds.min.z).abs() < 1e-9);

        // Adjacency is symmetric and covers every referenced vertex.
        for (&v, adjacent) in &inflated.adjacency {
            for &u in adjacent {
                prop_assert!(inflated.adjacency[&u].contains(&v));
            }
        }
    }

    #[test]
    fn division_scales_sewn_detail(radii in radii()) {
        let points = blob(&radii);
        let coarse = inflate(
            &points,
            &InflateOptions { division: 1, ..InflateOptions::default() },
        )
        .unwrap();
        let fine = inflate(
            &points,
            &InflateOptions { division: 4, ..InflateOptions::default() },
        )
        .unwrap();
        prop_assert!(fine.mesh.triangle_count() >= coarse.mesh.triangle_count());
    }
}
