//! Integration tests for sartor-index.

use sartor_index::{nearest_linear, SpatialIndex};
use sartor_math::Vec3;
use sartor_mesh::generators::{quad_grid, sphere_shell};
use sartor_mesh::MeshSnapshot;

#[test]
fn build_rejects_empty_set() {
    let empty = MeshSnapshot::default();
    assert!(SpatialIndex::build(&empty).is_err());
}

#[test]
fn single_point() {
    let mut snap = MeshSnapshot::default();
    snap.push(1.0, 2.0, 3.0);
    let index = SpatialIndex::build(&snap).unwrap();
    let (i, d) = index.query(Vec3::new(1.0, 2.0, 4.0));
    assert_eq!(i, 0);
    assert!((d - 1.0).abs() < 1e-6);
}

#[test]
fn query_on_vertices_returns_self() {
    let snap = quad_grid(6, 6, 2.0, 2.0);
    let index = SpatialIndex::build(&snap).unwrap();
    for i in 0..snap.vertex_count() {
        let (found, dist) = index.query(snap.position_vec3(i));
        assert_eq!(found as usize, i);
        assert_eq!(dist, 0.0);
    }
}

#[test]
fn matches_linear_scan_on_grid() {
    let snap = quad_grid(9, 9, 2.0, 2.0);
    let index = SpatialIndex::build(&snap).unwrap();

    // Probe at off-lattice points spread over and beyond the grid.
    for a in -4..=14 {
        for b in -4..=14 {
            let p = Vec3::new(a as f32 * 0.17 - 1.1, b as f32 * 0.13 - 0.9, 0.05);
            let (ti, td) = index.query(p);
            let (li, ld) = nearest_linear(&snap, p).unwrap();
            assert_eq!(ti, li, "probe {:?}", p);
            assert_eq!(td, ld, "probe {:?}", p);
        }
    }
}

#[test]
fn matches_linear_scan_on_shell() {
    let snap = sphere_shell(1.0, 10, 14);
    let index = SpatialIndex::build(&snap).unwrap();

    for i in 0..snap.vertex_count() {
        let p = snap.position_vec3(i) * 1.03 + Vec3::new(0.01, -0.02, 0.005);
        let (ti, _) = index.query(p);
        let (li, _) = nearest_linear(&snap, p).unwrap();
        assert_eq!(ti, li, "probe from vertex {}", i);
    }
}

#[test]
fn duplicate_points_tie_to_lower_index() {
    let mut snap = MeshSnapshot::default();
    snap.push(0.0, 0.0, 0.0);
    snap.push(5.0, 5.0, 5.0); // duplicated below
    snap.push(5.0, 5.0, 5.0);
    snap.push(5.0, 5.0, 5.0);
    let index = SpatialIndex::build(&snap).unwrap();

    let (i, d) = index.query(Vec3::new(5.0, 5.0, 4.0));
    assert_eq!(i, 1);
    assert!((d - 1.0).abs() < 1e-6);
}

#[test]
fn symmetric_tie_is_deterministic() {
    // Probe equidistant from all four corners of a square.
    let mut snap = MeshSnapshot::default();
    snap.push(0.0, 0.0, 0.0);
    snap.push(1.0, 0.0, 0.0);
    snap.push(1.0, 1.0, 0.0);
    snap.push(0.0, 1.0, 0.0);
    let index = SpatialIndex::build(&snap).unwrap();

    let (i, _) = index.query(Vec3::new(0.5, 0.5, 0.0));
    assert_eq!(i, 0);

    // Same answer every time.
    for _ in 0..10 {
        let (j, _) = index.query(Vec3::new(0.5, 0.5, 0.0));
        assert_eq!(j, 0);
    }
}

#[test]
fn len_reports_point_count() {
    let snap = quad_grid(3, 3, 1.0, 1.0);
    let index = SpatialIndex::build(&snap).unwrap();
    assert_eq!(index.len(), 16);
    assert!(!index.is_empty());
}

#[test]
fn nearest_linear_empty_is_none() {
    let empty = MeshSnapshot::default();
    assert!(nearest_linear(&empty, Vec3::ZERO).is_none());
}
