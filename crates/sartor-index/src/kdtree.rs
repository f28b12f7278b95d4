//! Balanced kd-tree for nearest-point queries.
//!
//! The tree is stored implicitly: vertex indices are permuted so that
//! the subtree covering range `[lo, hi)` has its root at the range
//! midpoint, splitting on the axis `depth % 3`. No per-node allocation,
//! no incremental removal — build once, query many.

use sartor_math::{DVec3, Vec3};
use sartor_mesh::MeshSnapshot;
use sartor_types::{SartorError, SartorResult};

/// Nearest-neighbor index over an immutable point set.
///
/// The index copies the positions it is built over; the caller's
/// snapshot is not retained.
pub struct SpatialIndex {
    /// Vertex indices permuted into kd order.
    order: Vec<u32>,
    pos_x: Vec<f32>,
    pos_y: Vec<f32>,
    pos_z: Vec<f32>,
}

impl SpatialIndex {
    /// Builds the index over a point set in O(n log n).
    ///
    /// Errors with a correspondence error for an empty set — a
    /// nearest-point query over nothing has no answer.
    pub fn build(points: &MeshSnapshot) -> SartorResult<Self> {
        if points.is_empty() {
            return Err(SartorError::Correspondence(
                "Cannot build a spatial index over an empty point set".into(),
            ));
        }
        points.validate()?;

        let n = points.vertex_count();
        let mut order: Vec<u32> = (0..n as u32).collect();
        split(&mut order, 0, points);

        Ok(Self {
            order,
            pos_x: points.pos_x.clone(),
            pos_y: points.pos_y.clone(),
            pos_z: points.pos_z.clone(),
        })
    }

    /// Returns the number of indexed points.
    #[inline]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Returns true if the index holds no points. Never true for a
    /// successfully built index.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Returns the nearest indexed point to `point` as
    /// `(vertex_index, euclidean_distance)`.
    ///
    /// O(log n) average. Distance ties resolve to the lower vertex
    /// index, so the result is deterministic for identical build input.
    pub fn query(&self, point: Vec3) -> (u32, f32) {
        let p = DVec3::new(point.x as f64, point.y as f64, point.z as f64);
        let mut best = (u32::MAX, f64::INFINITY);
        self.search(0, self.order.len(), 0, p, &mut best);
        (best.0, best.1.sqrt() as f32)
    }

    #[inline]
    fn coord(&self, idx: u32, axis: usize) -> f32 {
        let i = idx as usize;
        match axis {
            0 => self.pos_x[i],
            1 => self.pos_y[i],
            _ => self.pos_z[i],
        }
    }

    #[inline]
    fn point_d(&self, idx: u32) -> DVec3 {
        let i = idx as usize;
        DVec3::new(
            self.pos_x[i] as f64,
            self.pos_y[i] as f64,
            self.pos_z[i] as f64,
        )
    }

    fn search(&self, lo: usize, hi: usize, depth: usize, p: DVec3, best: &mut (u32, f64)) {
        if lo >= hi {
            return;
        }
        let mid = lo + (hi - lo) / 2;
        let idx = self.order[mid];

        let d2 = self.point_d(idx).distance_squared(p);
        if d2 < best.1 || (d2 == best.1 && idx < best.0) {
            *best = (idx, d2);
        }

        let axis = depth % 3;
        let delta = p[axis] - self.coord(idx, axis) as f64;

        let (near, far) = if delta < 0.0 {
            ((lo, mid), (mid + 1, hi))
        } else {
            ((mid + 1, hi), (lo, mid))
        };

        self.search(near.0, near.1, depth + 1, p, best);

        // The far half can only improve on the best candidate if the
        // splitting plane is within the best distance. `<=` keeps
        // equal-distance candidates reachable for the index tie-break.
        if delta * delta <= best.1 {
            self.search(far.0, far.1, depth + 1, p, best);
        }
    }
}

/// Recursively permutes `order` into kd layout: median at the range
/// midpoint, splitting on `depth % 3`, cycling axes per level.
fn split(order: &mut [u32], depth: usize, points: &MeshSnapshot) {
    if order.len() <= 1 {
        return;
    }

    let axis = depth % 3;
    let mid = order.len() / 2;
    order.select_nth_unstable_by(mid, |&a, &b| {
        axis_coord(points, a, axis)
            .total_cmp(&axis_coord(points, b, axis))
            .then(a.cmp(&b))
    });

    let (lower, rest) = order.split_at_mut(mid);
    split(lower, depth + 1, points);
    split(&mut rest[1..], depth + 1, points);
}

#[inline]
fn axis_coord(points: &MeshSnapshot, idx: u32, axis: usize) -> f32 {
    let i = idx as usize;
    match axis {
        0 => points.pos_x[i],
        1 => points.pos_y[i],
        _ => points.pos_z[i],
    }
}

/// Reference nearest-point scan in O(n).
///
/// Applies the same lower-index tie rule as [`SpatialIndex::query`];
/// tests cross-validate the tree against this.
pub fn nearest_linear(points: &MeshSnapshot, point: Vec3) -> Option<(u32, f32)> {
    if points.is_empty() {
        return None;
    }

    let p = DVec3::new(point.x as f64, point.y as f64, point.z as f64);
    let mut best = (0u32, f64::INFINITY);
    for i in 0..points.vertex_count() {
        let d2 = points.position_dvec3(i).distance_squared(p);
        // Strict `<` keeps the first (lowest-index) point on ties.
        if d2 < best.1 {
            best = (i as u32, d2);
        }
    }
    Some((best.0, best.1.sqrt() as f32))
}
