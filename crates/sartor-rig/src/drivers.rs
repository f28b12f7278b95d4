//! Corrective-shape driver retargeting.
//!
//! A driver binds a shape key's value to one bone channel. Destructive
//! operations (modifier application, object duplication, rig
//! regeneration) lose these bindings, so they are exported to
//! rig-independent descriptors beforehand and re-bound afterward.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use sartor_scene::{Armature, DriverBinding, MeshObject, TransformSpace, TransformType};
use sartor_types::{SartorError, SartorResult};

/// A serializable, rig-independent description of a single-bone-driven
/// corrective shape.
///
/// Descriptors survive save/load boundaries: content packaged with
/// baked corrective shapes ships them alongside the mesh data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriverDescriptor {
    /// Name of the driven shape key.
    pub shape_key: String,
    /// Driver expression.
    pub expression: String,
    /// Name of the bone the driver reads.
    pub bone: String,
    /// Bone channel the driver samples.
    pub transform_type: TransformType,
    /// Space the channel is evaluated in.
    pub transform_space: TransformSpace,
}

/// Exports all driver bindings from an object's shape keys, removing
/// them from the object (destructive export).
///
/// Returns descriptors keyed by shape-key name, ready to be carried
/// across a destructive step and re-applied.
pub fn extract_drivers(object: &mut MeshObject) -> BTreeMap<String, DriverDescriptor> {
    let mut extracted = BTreeMap::new();

    for key in object.shape_keys_mut() {
        if let Some(binding) = key.driver.take() {
            extracted.insert(
                key.name.clone(),
                DriverDescriptor {
                    shape_key: key.name.clone(),
                    expression: binding.expression,
                    bone: binding.bone,
                    transform_type: binding.transform_type,
                    transform_space: binding.transform_space,
                },
            );
        }
    }

    extracted
}

/// Re-binds one descriptor onto the named shape key, reading the bone
/// from the destination armature.
///
/// The bone check runs first: if the destination skeleton lacks
/// `descriptor.bone` this is a missing-bone error and no driver is
/// created. A silent skip would leave an undriven, frozen corrective
/// shape — a correctness bug the engine surfaces instead of hiding.
pub fn apply_driver(
    object: &mut MeshObject,
    armature: &Armature,
    descriptor: &DriverDescriptor,
) -> SartorResult<()> {
    if !armature.has_bone(&descriptor.bone) {
        return Err(SartorError::MissingBone {
            bone: descriptor.bone.clone(),
        });
    }

    let key = object
        .shape_key_mut(&descriptor.shape_key)
        .ok_or_else(|| SartorError::MissingShapeKey {
            key: descriptor.shape_key.clone(),
        })?;

    key.driver = Some(DriverBinding {
        expression: descriptor.expression.clone(),
        bone: descriptor.bone.clone(),
        transform_type: descriptor.transform_type,
        transform_space: descriptor.transform_space,
    });

    Ok(())
}
