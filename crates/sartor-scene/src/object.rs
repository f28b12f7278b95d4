//! Mesh objects: base positions, shape keys, vertex groups, drivers.
//!
//! A `MeshObject` is the mutable document-side counterpart of a
//! [`MeshSnapshot`]: the base buffer plus the layered state (shape keys,
//! groups, driver bindings) that fitting operations create and consume.

use serde::{Deserialize, Serialize};
use sartor_math::DVec3;
use sartor_mesh::MeshSnapshot;
use sartor_types::{ArmatureId, SartorError, SartorResult};

/// Which bone channel a driver reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransformType {
    Location,
    Rotation,
    Scale,
}

/// Which space the driven bone channel is evaluated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransformSpace {
    World,
    Local,
}

/// A single-bone driver bound to a shape key.
///
/// The document-side materialization of a driver descriptor: the
/// expression maps the named bone channel to the key's value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverBinding {
    /// Driver expression (e.g. `"var * 2.0"`).
    pub expression: String,
    /// Name of the bone the driver variable reads.
    pub bone: String,
    /// Bone channel the variable samples.
    pub transform_type: TransformType,
    /// Space the channel is evaluated in.
    pub transform_space: TransformSpace,
}

/// A named per-vertex delta layer over the base positions.
///
/// Deltas are stored SoA like the base buffer. The evaluated position
/// of vertex `i` is `base[i] + Σ key.value * key.delta[i]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeKey {
    /// Key name (e.g. "Body Proportions").
    pub name: String,
    /// X components of per-vertex deltas.
    pub delta_x: Vec<f32>,
    /// Y components of per-vertex deltas.
    pub delta_y: Vec<f32>,
    /// Z components of per-vertex deltas.
    pub delta_z: Vec<f32>,
    /// Current blend value (1.0 = fully applied).
    pub value: f32,
    /// Optional bone driver controlling `value`.
    pub driver: Option<DriverBinding>,
}

/// A named weighted vertex subset (masking, skinning).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VertexGroup {
    /// Group name.
    pub name: String,
    /// Member vertex indices.
    pub indices: Vec<u32>,
    /// Per-member weights, same length as `indices`.
    pub weights: Vec<f32>,
}

/// A mesh object in a document.
#[derive(Debug, Clone)]
pub struct MeshObject {
    /// Object name, unique within a document by convention.
    pub name: String,
    /// Base vertex positions.
    pub base: MeshSnapshot,
    /// Shape key layers, in creation order.
    shape_keys: Vec<ShapeKey>,
    /// Vertex groups, in creation order.
    groups: Vec<VertexGroup>,
    /// Armature this object is parented to, if bound.
    pub parent_armature: Option<ArmatureId>,
}

impl MeshObject {
    /// Creates an object from a base snapshot.
    pub fn new(name: impl Into<String>, base: MeshSnapshot) -> Self {
        Self {
            name: name.into(),
            base,
            shape_keys: Vec::new(),
            groups: Vec::new(),
            parent_armature: None,
        }
    }

    /// Returns the number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.base.vertex_count()
    }

    // ─── Shape keys ───────────────────────────────────────────────

    /// Returns true if the object carries any shape keys.
    pub fn has_shape_keys(&self) -> bool {
        !self.shape_keys.is_empty()
    }

    /// Returns true if a shape key with this name exists.
    pub fn has_shape_key(&self, name: &str) -> bool {
        self.shape_keys.iter().any(|k| k.name == name)
    }

    /// Returns the shape key with this name.
    pub fn shape_key(&self, name: &str) -> Option<&ShapeKey> {
        self.shape_keys.iter().find(|k| k.name == name)
    }

    /// Returns the shape key with this name, mutably.
    pub fn shape_key_mut(&mut self, name: &str) -> Option<&mut ShapeKey> {
        self.shape_keys.iter_mut().find(|k| k.name == name)
    }

    /// All shape keys in creation order.
    pub fn shape_keys(&self) -> &[ShapeKey] {
        &self.shape_keys
    }

    /// All shape keys, mutably.
    pub fn shape_keys_mut(&mut self) -> &mut [ShapeKey] {
        &mut self.shape_keys
    }

    /// Inserts a shape key, replacing any existing key of the same name.
    ///
    /// Errors if the key's delta arrays do not match the vertex count.
    pub fn add_shape_key(&mut self, key: ShapeKey) -> SartorResult<()> {
        let n = self.vertex_count();
        if key.delta_x.len() != n || key.delta_y.len() != n || key.delta_z.len() != n {
            return Err(SartorError::SnapshotSize {
                expected: n,
                actual: key.delta_x.len(),
            });
        }
        if let Some(existing) = self.shape_key_mut(&key.name) {
            *existing = key;
        } else {
            self.shape_keys.push(key);
        }
        Ok(())
    }

    /// Evaluates base plus all shape keys at their current values.
    ///
    /// This is the "fully evaluated pose" snapshot. Accumulation runs
    /// at f64 and narrows once per coordinate on output.
    pub fn evaluated_snapshot(&self) -> MeshSnapshot {
        let n = self.vertex_count();
        let mut out = MeshSnapshot::with_capacity(n);

        for i in 0..n {
            let mut p = DVec3::new(
                self.base.pos_x[i] as f64,
                self.base.pos_y[i] as f64,
                self.base.pos_z[i] as f64,
            );
            for key in &self.shape_keys {
                let v = key.value as f64;
                p.x += v * key.delta_x[i] as f64;
                p.y += v * key.delta_y[i] as f64;
                p.z += v * key.delta_z[i] as f64;
            }
            out.push(p.x as f32, p.y as f32, p.z as f32);
        }

        out
    }

    /// Collapses all shape keys into the base buffer and removes them.
    ///
    /// Destructive: driver bindings on the removed keys are lost, so
    /// callers that need them must extract descriptors first.
    pub fn apply_shape_keys(&mut self) {
        if self.shape_keys.is_empty() {
            return;
        }
        self.base = self.evaluated_snapshot();
        self.shape_keys.clear();
    }

    // ─── Vertex groups ────────────────────────────────────────────

    /// Returns true if a vertex group with this name exists.
    pub fn has_group(&self, name: &str) -> bool {
        self.groups.iter().any(|g| g.name == name)
    }

    /// Returns the vertex group with this name.
    pub fn group(&self, name: &str) -> Option<&VertexGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// All vertex groups in creation order.
    pub fn groups(&self) -> &[VertexGroup] {
        &self.groups
    }

    /// Inserts a vertex group, replacing any existing group of the
    /// same name.
    ///
    /// Errors if `indices` and `weights` lengths differ or an index is
    /// out of range.
    pub fn set_group(
        &mut self,
        name: impl Into<String>,
        indices: Vec<u32>,
        weights: Vec<f32>,
    ) -> SartorResult<()> {
        if indices.len() != weights.len() {
            return Err(SartorError::InvalidSnapshot(format!(
                "Vertex group index count ({}) != weight count ({})",
                indices.len(),
                weights.len()
            )));
        }
        let n = self.vertex_count();
        for &idx in &indices {
            if idx as usize >= n {
                return Err(SartorError::SnapshotSize {
                    expected: idx as usize + 1,
                    actual: n,
                });
            }
        }

        let group = VertexGroup {
            name: name.into(),
            indices,
            weights,
        };
        if let Some(existing) = self.groups.iter_mut().find(|g| g.name == group.name) {
            *existing = group;
        } else {
            self.groups.push(group);
        }
        Ok(())
    }
}
