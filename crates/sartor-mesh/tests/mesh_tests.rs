//! Integration tests for sartor-mesh.

use sartor_mesh::generators::{quad_grid, sphere_shell};
use sartor_mesh::MeshSnapshot;

// ─── MeshSnapshot Tests ───────────────────────────────────────

fn make_triangle() -> MeshSnapshot {
    MeshSnapshot {
        pos_x: vec![0.0, 1.0, 0.0],
        pos_y: vec![0.0, 0.0, 1.0],
        pos_z: vec![0.0, 0.0, 0.0],
    }
}

#[test]
fn basic_counts() {
    let snap = make_triangle();
    assert_eq!(snap.vertex_count(), 3);
    assert!(!snap.is_empty());
}

#[test]
fn position_access() {
    let snap = make_triangle();
    assert_eq!(snap.position(1), [1.0, 0.0, 0.0]);
    assert_eq!(snap.position_vec3(2).y, 1.0);
    assert_eq!(snap.position_dvec3(1).x, 1.0);
}

#[test]
fn validate_ok() {
    assert!(make_triangle().validate().is_ok());
}

#[test]
fn validate_catches_inconsistent_lengths() {
    let mut snap = make_triangle();
    snap.pos_y.push(99.0);
    assert!(snap.validate().is_err());
}

#[test]
fn validate_catches_non_finite() {
    let mut snap = make_triangle();
    snap.pos_z[1] = f32::NAN;
    assert!(snap.validate().is_err());
}

#[test]
fn from_interleaved() {
    let positions = vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
    let snap = MeshSnapshot::from_interleaved(&positions).unwrap();
    assert_eq!(snap.vertex_count(), 3);
    assert_eq!(snap.pos_x, vec![0.0, 1.0, 0.0]);
}

#[test]
fn from_interleaved_rejects_ragged() {
    assert!(MeshSnapshot::from_interleaved(&[1.0, 2.0]).is_err());
}

#[test]
fn interleaved_round_trip() {
    let snap = make_triangle();
    let flat = snap.to_interleaved();
    let back = MeshSnapshot::from_interleaved(&flat).unwrap();
    assert_eq!(back.pos_x, snap.pos_x);
    assert_eq!(back.pos_y, snap.pos_y);
    assert_eq!(back.pos_z, snap.pos_z);
}

#[test]
fn centroid_of_subset() {
    let snap = MeshSnapshot {
        pos_x: vec![0.0, 2.0, 4.0, 100.0],
        pos_y: vec![0.0, 2.0, 4.0, 100.0],
        pos_z: vec![0.0, 0.0, 0.0, 100.0],
    };
    let c = snap.centroid_of(&[0, 1, 2]).unwrap();
    assert_eq!(c.x, 2.0);
    assert_eq!(c.y, 2.0);
    assert_eq!(c.z, 0.0);
}

#[test]
fn centroid_of_rejects_out_of_range() {
    let snap = make_triangle();
    assert!(snap.centroid_of(&[0, 5]).is_err());
}

#[test]
fn centroid_of_rejects_empty_subset() {
    let snap = make_triangle();
    assert!(snap.centroid_of(&[]).is_err());
}

// ─── Generator Tests ──────────────────────────────────────────

#[test]
fn quad_grid_2x2() {
    let snap = quad_grid(2, 2, 1.0, 1.0);
    assert_eq!(snap.vertex_count(), 9);
    assert!(snap.validate().is_ok());
}

#[test]
fn quad_grid_dimensions() {
    let snap = quad_grid(4, 4, 2.0, 2.0);
    assert!((snap.pos_x[0] - (-1.0)).abs() < 1e-6);
    assert!((snap.pos_y[0] - 1.0).abs() < 1e-6);
    assert!((snap.pos_x[4] - 1.0).abs() < 1e-6);
}

#[test]
fn sphere_shell_basic() {
    let snap = sphere_shell(1.0, 8, 16);
    assert!(snap.vertex_count() > 0);
    assert!(snap.validate().is_ok());
}

#[test]
fn sphere_shell_radius() {
    let snap = sphere_shell(2.5, 8, 16);
    for i in 0..snap.vertex_count() {
        let [x, y, z] = snap.position(i);
        let dist = (x * x + y * y + z * z).sqrt();
        assert!((dist - 2.5).abs() < 1e-4, "Vertex {} at distance {}", i, dist);
    }
}
