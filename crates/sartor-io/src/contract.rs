//! Fitting input/output contract types.
//!
//! These types define the I/O boundary of the engine. They are
//! serializable for API transport and CLI configuration, and convert
//! into the document model on the way in.

use serde::{Deserialize, Serialize};
use sartor_mesh::MeshSnapshot;
use sartor_pipeline::{CharacterReport, FitParams};
use sartor_rig::{DriverDescriptor, JointVertexSets};
use sartor_scene::{Armature, MeshObject, ShapeKey};
use sartor_types::{SartorError, SartorResult};

/// A shape key as shipped in a content package: interleaved deltas.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeKeyRecord {
    /// Key name.
    pub name: String,
    /// Per-vertex deltas, interleaved `[dx0, dy0, dz0, ...]`.
    pub deltas: Vec<f32>,
    /// Blend value.
    pub value: f32,
}

/// A vertex group as shipped in a content package.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupRecord {
    /// Group name.
    pub name: String,
    /// Member vertex indices.
    pub indices: Vec<u32>,
    /// Per-member weights.
    pub weights: Vec<f32>,
}

/// A mesh with its layered state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeshRecord {
    /// Object name.
    pub name: String,
    /// Base positions, interleaved `[x0, y0, z0, ...]`.
    pub positions: Vec<f32>,
    /// Shape keys, if any.
    #[serde(default)]
    pub shape_keys: Vec<ShapeKeyRecord>,
    /// Vertex groups, if any.
    #[serde(default)]
    pub groups: Vec<GroupRecord>,
}

/// One bone of the destination skeleton.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoneRecord {
    /// Bone name.
    pub name: String,
    /// Head position.
    pub head: [f32; 3],
    /// Tail position.
    pub tail: [f32; 3],
}

/// The destination skeleton.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArmatureRecord {
    /// Armature name.
    pub name: String,
    /// Bones in creation order.
    pub bones: Vec<BoneRecord>,
}

/// Complete input for one character fitting run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitInput {
    /// The body mesh (with its reshaping keys).
    pub body: MeshRecord,
    /// Garments to fit, in batch order.
    pub garments: Vec<MeshRecord>,
    /// The character's skeleton.
    pub armature: ArmatureRecord,
    /// Tagged vertex sets persisted with the rig, keyed by bone name.
    #[serde(default)]
    pub joint_sets: JointVertexSets,
    /// Corrective-shape drivers packaged with the body.
    #[serde(default)]
    pub drivers: Vec<DriverDescriptor>,
    /// Fitting parameters.
    #[serde(default)]
    pub params: FitParams,
}

/// Output from a completed fitting run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitReport {
    /// Character-level outcome (bones, drivers, garment batch).
    pub character: CharacterReport,
    /// Live objects in the document after the run. Equals the input
    /// object count: fitting adds no objects and leaks no scratch.
    pub object_count: usize,
}

impl MeshRecord {
    /// Converts into a document object, validating as it goes.
    pub fn into_object(self) -> SartorResult<MeshObject> {
        let base = MeshSnapshot::from_interleaved(&self.positions)?;
        let n = base.vertex_count();
        let mut object = MeshObject::new(self.name, base);

        for record in self.shape_keys {
            if record.deltas.len() != n * 3 {
                return Err(SartorError::SnapshotSize {
                    expected: n,
                    actual: record.deltas.len() / 3,
                });
            }
            let mut delta_x = Vec::with_capacity(n);
            let mut delta_y = Vec::with_capacity(n);
            let mut delta_z = Vec::with_capacity(n);
            for i in 0..n {
                delta_x.push(record.deltas[i * 3]);
                delta_y.push(record.deltas[i * 3 + 1]);
                delta_z.push(record.deltas[i * 3 + 2]);
            }
            object.add_shape_key(ShapeKey {
                name: record.name,
                delta_x,
                delta_y,
                delta_z,
                value: record.value,
                driver: None,
            })?;
        }

        for group in self.groups {
            object.set_group(group.name, group.indices, group.weights)?;
        }

        Ok(object)
    }
}

impl ArmatureRecord {
    /// Converts into a document armature.
    pub fn into_armature(self) -> Armature {
        let mut armature = Armature::new(self.name);
        for bone in self.bones {
            armature.add_bone(bone.name, bone.head.into(), bone.tail.into());
        }
        armature
    }
}
