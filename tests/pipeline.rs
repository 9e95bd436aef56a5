//! End-to-end pipeline scenarios over concrete silhouettes.

use glam::DVec2;
use hashbrown::HashMap;

use sketch_inflate::axis::{self, FaceKind};
use sketch_inflate::height;
use sketch_inflate::inflate::{InflateOptions, Inflation, Smoothing, inflate};
use sketch_inflate::mesh::{Mesh, build_mesh, symmetrize};
use sketch_inflate::sew;
use sketch_inflate::topology::Triangulation;

fn square() -> Vec<DVec2> {
    vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(1.0, 0.0),
        DVec2::new(1.0, 1.0),
        DVec2::new(0.0, 1.0),
    ]
}

fn edge_uses(mesh: &Mesh) -> HashMap<(u32, u32), usize> {
    let mut uses: HashMap<(u32, u32), usize> = HashMap::new();
    for &[a, b, c] in &mesh.triangles {
        for (u, v) in [(a, b), (b, c), (c, a)] {
            *uses.entry((u.min(v), u.max(v))).or_default() += 1;
        }
    }
    uses
}

#[test]
fn square_classifies_into_two_terminals() {
    let tri = Triangulation::from_polygon(&square()).unwrap();
    assert_eq!(tri.live_triangle_count(), 2);

    let sil = tri.boundary_silhouette();
    assert_eq!(sil.len(), 4);

    let faces = axis::classify(&tri, &sil);
    assert_eq!(faces.len(), 2);
    assert!(faces.iter().all(|(_, f)| f.kind == FaceKind::Terminal));
}

#[test]
fn square_axis_connects_the_uncommon_corners() {
    let mut tri = Triangulation::from_polygon(&square()).unwrap();
    let sil = tri.boundary_silhouette();
    let faces = axis::classify(&tri, &sil);
    let (chords, root) = axis::build_chordal_axis(&mut tri, &faces, &sil).unwrap();

    // Two chords meeting at the diagonal midpoint, ends at the two corners
    // not shared between the faces.
    assert_eq!(chords.len(), 2);
    let ends: Vec<DVec2> = chords
        .iter()
        .map(|(_, c)| {
            if c.src == chords.get(root).dst {
                tri.position(c.dst)
            } else {
                tri.position(c.src)
            }
        })
        .collect();
    assert_ne!(ends[0], ends[1]);
    for end in ends {
        assert!(sil.contains_point(end));
    }
}

#[test]
fn square_inflates_into_a_flat_closed_mesh() {
    let run = Inflation::new(&square(), 3).unwrap();
    let (mesh, adjacency) = run.build(&InflateOptions::default());

    // All four corners lie on the contour, so every height is zero and the
    // mesh stays in the base plane.
    assert!(mesh.positions.iter().all(|p| p.z == 0.0));
    assert!(!mesh.triangles.is_empty());
    assert_eq!(adjacency.len(), mesh.vertex_count());

    // Contour edges belong to exactly one top triangle and its mirror.
    let sil = run.silhouette();
    let uses = edge_uses(&mesh);
    let mut contour_edges = 0;
    for (&(a, b), &count) in &uses {
        let (pa, pb) = (mesh.positions[a as usize], mesh.positions[b as usize]);
        if sil.contains_segment(pa.truncate(), pb.truncate()) {
            assert_eq!(count, 2, "contour edge {a}-{b} open");
            contour_edges += 1;
        }
    }
    assert!(contour_edges >= 4);
}

/// A three-lobed star around one junction triangle, built by hand so the
/// diagonal choices of the triangulator cannot vary the scenario: shallow
/// terminal caps on every side of a central triangle with no boundary edge.
fn junction_star() -> Triangulation {
    let mut tri = Triangulation::new();
    let a = tri.get_or_add_vertex(DVec2::new(-1.0, -0.577));
    let b = tri.get_or_add_vertex(DVec2::new(1.0, -0.577));
    let c = tri.get_or_add_vertex(DVec2::new(0.0, 1.155));
    let p_ab = tri.get_or_add_vertex(DVec2::new(0.0, -0.9));
    let p_bc = tri.get_or_add_vertex(DVec2::new(0.9, 0.5));
    let p_ca = tri.get_or_add_vertex(DVec2::new(-0.9, 0.5));
    tri.add_triangle(a, b, p_ab).unwrap();
    tri.add_triangle(b, c, p_bc).unwrap();
    tri.add_triangle(c, a, p_ca).unwrap();
    tri.add_triangle(a, b, c).unwrap();
    tri
}

#[test]
fn junction_star_prunes_all_three_branches() {
    let mut tri = junction_star();
    let sil = tri.boundary_silhouette();
    let mut faces = axis::classify(&tri, &sil);

    let kinds: Vec<FaceKind> = faces.iter().map(|(_, f)| f.kind).collect();
    assert_eq!(
        kinds.iter().filter(|&&k| k == FaceKind::Junction).count(),
        1
    );
    assert_eq!(
        kinds.iter().filter(|&&k| k == FaceKind::Terminal).count(),
        3
    );

    let (mut chords, root) = axis::build_chordal_axis(&mut tri, &faces, &sil).unwrap();
    // Root chord, junction entry, and interval + leaf per remaining lobe.
    assert_eq!(chords.len(), 6);

    let convergence = axis::prune(&mut tri, &mut faces, &mut chords, &sil, root).unwrap();

    // Every lobe collapses onto the junction centroid.
    assert_eq!(convergence.len(), 3);
    let centroid = tri.position(convergence[0]);
    assert!((centroid - DVec2::new(0.0, 0.0)).length() < 0.01);
    assert!(convergence.iter().all(|&v| v == convergence[0]));
    assert!(chords.iter().all(|(_, c)| c.pruned()));

    // The surviving triangulation is one full fan around the centroid.
    assert_eq!(tri.live_triangle_count(), 6);
    for (_, t) in tri.triangles() {
        assert!(t.has_vertex(convergence[0]));
    }
}

#[test]
fn junction_star_builds_a_closed_solid() {
    let mut tri = junction_star();
    let sil = tri.boundary_silhouette();
    let mut faces = axis::classify(&tri, &sil);
    let (mut chords, root) = axis::build_chordal_axis(&mut tri, &faces, &sil).unwrap();
    axis::prune(&mut tri, &mut faces, &mut chords, &sil, root).unwrap();
    axis::subdivide(&mut tri, &faces, &chords, root).unwrap();

    let mut heights = height::elevate(&tri, &sil);
    sew::sew(&mut tri, &mut heights, &chords, root, 3).unwrap();

    let flat = build_mesh(&tri, &heights);
    let solid = symmetrize(&flat);

    // The fan center is the only interior vertex; it gains height and a
    // mirrored twin, and every edge of the solid is shared by two triangles.
    assert_eq!(solid.vertex_count(), flat.vertex_count() + 1);
    assert_eq!(solid.triangle_count(), flat.triangle_count() * 2);
    assert!(solid.positions.iter().any(|p| p.z < 0.0));
    assert!(solid.positions.iter().any(|p| p.z > 0.0));
    for (&(a, b), &count) in &edge_uses(&solid) {
        assert_eq!(count, 2, "edge {a}-{b} is not two-sided");
    }
}

/// Two wide lobes joined by a long thin neck.
fn dog_bone() -> Vec<DVec2> {
    vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(2.0, 0.0),
        DVec2::new(2.0, 1.2),
        DVec2::new(6.0, 1.2),
        DVec2::new(6.0, 0.0),
        DVec2::new(8.0, 0.0),
        DVec2::new(8.0, 3.0),
        DVec2::new(6.0, 3.0),
        DVec2::new(6.0, 1.8),
        DVec2::new(2.0, 1.8),
        DVec2::new(2.0, 3.0),
        DVec2::new(0.0, 3.0),
    ]
}

#[test]
fn dog_bone_neck_survives_pruning() {
    let mut tri = Triangulation::from_polygon(&dog_bone()).unwrap();
    let sil = tri.boundary_silhouette();
    let mut faces = axis::classify(&tri, &sil);
    let (mut chords, root) = axis::build_chordal_axis(&mut tri, &faces, &sil).unwrap();
    axis::prune(&mut tri, &mut faces, &mut chords, &sil, root).unwrap();

    // The lobes are wide enough to collapse into fans, but the neck is
    // significant: its sleeve chords stay unpruned and keep their triangles,
    // so the spine through the neck reaches the sewer intact.
    let surviving_sleeves = chords
        .iter()
        .filter(|(_, c)| !c.pruned() && faces.get(c.face).kind == FaceKind::Sleeve)
        .count();
    assert!(surviving_sleeves >= 1, "neck pruned away");
    assert!(tri.live_triangle_count() > 0);
}

#[test]
fn dog_bone_inflates_end_to_end() {
    let inflated = inflate(&dog_bone(), &InflateOptions::default()).unwrap();
    assert!(!inflated.mesh.triangles.is_empty());
    assert!(inflated.mesh.positions.iter().any(|p| p.z != 0.0));
}

#[test]
fn rectangle_inflates_with_positive_relief() {
    let points = vec![
        DVec2::new(0.0, 0.0),
        DVec2::new(2.0, 0.0),
        DVec2::new(4.0, 0.0),
        DVec2::new(4.0, 1.0),
        DVec2::new(2.0, 1.0),
        DVec2::new(0.0, 1.0),
    ];
    let inflated = inflate(&points, &InflateOptions::default()).unwrap();
    let mesh = &inflated.mesh;

    assert!(!mesh.triangles.is_empty());
    assert!(mesh.positions.iter().any(|p| p.z != 0.0));

    // Mirrored across the base plane.
    assert!((mesh.bounds.max.z + mesh.bounds.min.z).abs() < 1e-9);
    for &p in &mesh.positions {
        if p.z != 0.0 {
            assert!(
                mesh.positions
                    .iter()
                    .any(|&q| q.x == p.x && q.y == p.y && q.z == -p.z),
                "no mirror for {p:?}"
            );
        }
    }

    // The adjacency network mirrors the triangle list.
    for &[a, b, c] in &mesh.triangles {
        assert!(inflated.adjacency[&a].contains(&b));
        assert!(inflated.adjacency[&b].contains(&c));
        assert!(inflated.adjacency[&c].contains(&a));
    }
}

#[test]
fn options_and_mesh_round_trip_through_serde() {
    let opts = InflateOptions::default();
    let json = serde_json::to_string(&opts).unwrap();
    let back: InflateOptions = serde_json::from_str(&json).unwrap();
    assert_eq!(back, opts);

    let inflated = inflate(&square(), &opts).unwrap();
    let json = serde_json::to_string(&inflated.mesh).unwrap();
    let back: Mesh = serde_json::from_str(&json).unwrap();
    assert_eq!(back.positions, inflated.mesh.positions);
    assert_eq!(back.triangles, inflated.mesh.triangles);
}

#[test]
fn smoothing_preserves_topology_end_to_end() {
    let points = square();
    let base = inflate(&points, &InflateOptions::default()).unwrap();
    for smoothing in [Smoothing::Laplacian, Smoothing::Hc] {
        let opts = InflateOptions {
            smoothing,
            iterations: 2,
            ..InflateOptions::default()
        };
        let smoothed = inflate(&points, &opts).unwrap();
        assert_eq!(smoothed.mesh.vertex_count(), base.mesh.vertex_count());
        assert_eq!(smoothed.mesh.triangle_count(), base.mesh.triangle_count());
    }
}
