//! Mesh snapshot type with SoA (Structure of Arrays) layout.
//!
//! The SoA layout stores each coordinate channel contiguously:
//! - `pos_x: [x0, x1, x2, ...]`
//! - `pos_y: [y0, y1, y2, ...]`
//! - `pos_z: [z0, z1, z2, ...]`
//!
//! A snapshot is captured once and never mutated afterward; the engine
//! borrows it for the duration of a single call.

use serde::{Deserialize, Serialize};
use sartor_math::{DVec3, Vec3};
use sartor_types::{SartorError, SartorResult};

/// An ordered capture of world-space vertex positions.
///
/// Vertex order is significant: correspondence tables and tagged vertex
/// sets address vertices by their index in this order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MeshSnapshot {
    /// X coordinates of all vertices.
    pub pos_x: Vec<f32>,
    /// Y coordinates of all vertices.
    pub pos_y: Vec<f32>,
    /// Z coordinates of all vertices.
    pub pos_z: Vec<f32>,
}

impl MeshSnapshot {
    /// Creates an empty snapshot with pre-allocated capacity.
    pub fn with_capacity(vertex_capacity: usize) -> Self {
        Self {
            pos_x: Vec::with_capacity(vertex_capacity),
            pos_y: Vec::with_capacity(vertex_capacity),
            pos_z: Vec::with_capacity(vertex_capacity),
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos_x.len()
    }

    /// Returns true if the snapshot holds no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pos_x.is_empty()
    }

    /// Returns the position of vertex `i` as `[x, y, z]`.
    #[inline]
    pub fn position(&self, i: usize) -> [f32; 3] {
        [self.pos_x[i], self.pos_y[i], self.pos_z[i]]
    }

    /// Returns the position as a `glam::Vec3`.
    #[inline]
    pub fn position_vec3(&self, i: usize) -> Vec3 {
        Vec3::new(self.pos_x[i], self.pos_y[i], self.pos_z[i])
    }

    /// Returns the position widened to f64 for accumulation.
    #[inline]
    pub fn position_dvec3(&self, i: usize) -> DVec3 {
        DVec3::new(
            self.pos_x[i] as f64,
            self.pos_y[i] as f64,
            self.pos_z[i] as f64,
        )
    }

    /// Appends a vertex.
    #[inline]
    pub fn push(&mut self, x: f32, y: f32, z: f32) {
        self.pos_x.push(x);
        self.pos_y.push(y);
        self.pos_z.push(z);
    }

    /// Validates snapshot integrity.
    ///
    /// Checks:
    /// - All SoA arrays have the same length
    /// - All coordinates are finite
    pub fn validate(&self) -> SartorResult<()> {
        let n = self.pos_x.len();
        if self.pos_y.len() != n || self.pos_z.len() != n {
            return Err(SartorError::InvalidSnapshot(
                "Position arrays have inconsistent lengths".into(),
            ));
        }

        for i in 0..n {
            if !self.pos_x[i].is_finite()
                || !self.pos_y[i].is_finite()
                || !self.pos_z[i].is_finite()
            {
                return Err(SartorError::InvalidSnapshot(format!(
                    "Vertex {} has a non-finite coordinate",
                    i
                )));
            }
        }

        Ok(())
    }

    /// Constructs a snapshot from interleaved position data
    /// `[x0, y0, z0, x1, y1, z1, ...]`, the layout host exporters emit.
    pub fn from_interleaved(positions: &[f32]) -> SartorResult<Self> {
        if positions.len() % 3 != 0 {
            return Err(SartorError::InvalidSnapshot(
                "Interleaved positions length not divisible by 3".into(),
            ));
        }

        let n = positions.len() / 3;
        let mut snapshot = Self::with_capacity(n);
        for i in 0..n {
            snapshot.push(
                positions[i * 3],
                positions[i * 3 + 1],
                positions[i * 3 + 2],
            );
        }

        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Flattens back to interleaved `[x0, y0, z0, ...]` layout.
    pub fn to_interleaved(&self) -> Vec<f32> {
        let n = self.vertex_count();
        let mut out = Vec::with_capacity(n * 3);
        for i in 0..n {
            out.push(self.pos_x[i]);
            out.push(self.pos_y[i]);
            out.push(self.pos_z[i]);
        }
        out
    }

    /// Computes the centroid of the vertex subset `indices` at f64.
    ///
    /// Errors if `indices` is empty or references a vertex outside
    /// this snapshot.
    pub fn centroid_of(&self, indices: &[u32]) -> SartorResult<DVec3> {
        let n = self.vertex_count();
        for &idx in indices {
            if idx as usize >= n {
                return Err(SartorError::SnapshotSize {
                    expected: idx as usize + 1,
                    actual: n,
                });
            }
        }

        sartor_math::centroid(indices.iter().map(|&i| self.position_dvec3(i as usize)))
            .ok_or_else(|| {
                SartorError::InvalidSnapshot("Centroid of an empty vertex subset".into())
            })
    }
}
