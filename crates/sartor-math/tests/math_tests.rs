//! Integration tests for sartor-math.

use sartor_math::{centroid, narrow, DVec3};

#[test]
fn centroid_of_points() {
    let points = vec![
        DVec3::new(0.0, 0.0, 0.0),
        DVec3::new(1.0, 0.0, 0.0),
        DVec3::new(1.0, 1.0, 0.0),
        DVec3::new(0.0, 1.0, 0.0),
    ];
    let c = centroid(points).unwrap();
    assert_eq!(c, DVec3::new(0.5, 0.5, 0.0));
}

#[test]
fn centroid_single_point() {
    let c = centroid([DVec3::new(2.0, -3.0, 4.5)]).unwrap();
    assert_eq!(c, DVec3::new(2.0, -3.0, 4.5));
}

#[test]
fn centroid_empty_is_none() {
    assert!(centroid(std::iter::empty()).is_none());
}

#[test]
fn centroid_accumulates_in_double() {
    // Many small contributions around a large coordinate: a f32
    // accumulator would lose them entirely.
    let base = 1.0e7f64;
    let points: Vec<DVec3> = (0..1000)
        .map(|i| DVec3::new(base + (i % 2) as f64 * 1.0e-3, 0.0, 0.0))
        .collect();
    let c = centroid(points).unwrap();
    assert!((c.x - (base + 0.5e-3)).abs() < 1.0e-6);
}

#[test]
fn narrow_round_trips_f32_values() {
    let v = DVec3::new(0.25, -1.5, 3.75);
    let n = narrow(v);
    assert_eq!(n.x, 0.25);
    assert_eq!(n.y, -1.5);
    assert_eq!(n.z, 3.75);
}
