//! Result snapshot serialization for inspection and archival.
//!
//! Snapshots capture a fitted garment's evaluated positions at the end
//! of a run. Serialized with `bincode` for compact binary output.

use serde::{Deserialize, Serialize};
use sartor_scene::MeshObject;
use sartor_types::{SartorError, SartorResult};

/// A fitted garment's final state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResultSnapshot {
    /// Garment object name.
    pub garment: String,
    /// Number of vertices.
    pub vertex_count: usize,
    /// Evaluated positions (flat: `[x0, y0, z0, x1, y1, z1, ...]`).
    pub positions: Vec<f32>,
    /// Body vertices masked under this garment.
    pub masked_vertices: u32,
}

impl ResultSnapshot {
    /// Captures the object's evaluated pose.
    pub fn from_object(object: &MeshObject, masked_vertices: u32) -> Self {
        let evaluated = object.evaluated_snapshot();
        Self {
            garment: object.name.clone(),
            vertex_count: evaluated.vertex_count(),
            positions: evaluated.to_interleaved(),
            masked_vertices,
        }
    }

    /// Serializes to compact binary format.
    pub fn to_bytes(&self) -> Vec<u8> {
        bincode::serialize(self).expect("Snapshot serialization should not fail")
    }

    /// Deserializes from binary format.
    pub fn from_bytes(data: &[u8]) -> SartorResult<Self> {
        bincode::deserialize(data)
            .map_err(|e| SartorError::Serialization(format!("Snapshot deserialization failed: {}", e)))
    }
}
