//! Centroid accumulation at double precision.
//!
//! Joint placement and offset replay both reduce point subsets to a
//! centroid. Accumulation runs at f64 regardless of storage precision
//! so the result does not drift when the same subset is reduced
//! repeatedly across a multi-step pipeline.

use glam::{DVec3, Vec3};

/// Computes the arithmetic mean of a point sequence at f64.
///
/// Returns `None` for an empty sequence — the caller decides whether
/// that is an error (it always is for tagged vertex sets).
pub fn centroid<I>(points: I) -> Option<DVec3>
where
    I: IntoIterator<Item = DVec3>,
{
    let mut sum = DVec3::ZERO;
    let mut count: u64 = 0;
    for p in points {
        sum += p;
        count += 1;
    }
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}

/// Narrows an f64 accumulation result back to storage precision.
#[inline]
pub fn narrow(v: DVec3) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}
