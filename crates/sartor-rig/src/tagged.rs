//! Tagged vertex sets: the authored link between a joint and the
//! source-mesh vertices that carry it.
//!
//! Each joint endpoint stores a vertex subset plus the offset between
//! the endpoint and the subset's centroid at authoring time. After any
//! body deformation the endpoint is recoverable as
//! `centroid(deformed subset) + relative offset`, for the lifetime of
//! the rig topology.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sartor_math::{DVec3, Vec3};
use sartor_mesh::MeshSnapshot;
use sartor_types::SartorResult;

/// Per-joint vertex subsets and relative offsets.
///
/// The field layout is the persisted schema: it travels with the rig
/// across save/load boundaries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedVertexSet {
    /// Source-mesh vertices that carry the joint head.
    pub head_verts: Vec<u32>,
    /// Head position minus head centroid, captured at authoring time.
    pub head_relative_co: [f32; 3],
    /// Source-mesh vertices that carry the joint tail.
    pub tail_verts: Vec<u32>,
    /// Tail position minus tail centroid, captured at authoring time.
    pub tail_relative_co: [f32; 3],
}

/// Tagged vertex sets for a whole rig, keyed by bone name.
///
/// A `BTreeMap` keeps correction order deterministic.
pub type JointVertexSets = BTreeMap<String, TaggedVertexSet>;

impl TaggedVertexSet {
    /// Captures a set from the authoring-time snapshot and joint
    /// endpoints: relative offsets are `endpoint − centroid(subset)`.
    pub fn capture(
        snapshot: &MeshSnapshot,
        head_verts: Vec<u32>,
        head: Vec3,
        tail_verts: Vec<u32>,
        tail: Vec3,
    ) -> SartorResult<Self> {
        let head_centroid = snapshot.centroid_of(&head_verts)?;
        let tail_centroid = snapshot.centroid_of(&tail_verts)?;

        let head_rel = DVec3::new(head.x as f64, head.y as f64, head.z as f64) - head_centroid;
        let tail_rel = DVec3::new(tail.x as f64, tail.y as f64, tail.z as f64) - tail_centroid;

        Ok(Self {
            head_verts,
            head_relative_co: [head_rel.x as f32, head_rel.y as f32, head_rel.z as f32],
            tail_verts,
            tail_relative_co: [tail_rel.x as f32, tail_rel.y as f32, tail_rel.z as f32],
        })
    }
}
