//! Fitting input validation.
//!
//! Validates inputs before the engine receives them, catching
//! data-level errors early with clear diagnostics.

use sartor_types::{SartorError, SartorResult};

use crate::contract::{FitInput, MeshRecord};

/// Validates a complete fitting input.
///
/// Checks:
/// - Body and garment meshes (position layout, shape-key/group sizes)
/// - Armature has at least one bone
/// - Tagged vertex sets reference body vertices that exist
/// - Parameters are reasonable
pub fn validate_input(input: &FitInput) -> SartorResult<()> {
    validate_mesh(&input.body, "Body")?;

    if input.garments.is_empty() {
        return Err(SartorError::InvalidConfig(
            "No garments to fit".into(),
        ));
    }
    for garment in &input.garments {
        validate_mesh(garment, "Garment")?;
    }

    if input.armature.bones.is_empty() {
        return Err(SartorError::InvalidConfig(
            "Armature has no bones".into(),
        ));
    }

    let body_verts = input.body.positions.len() / 3;
    for (bone, set) in &input.joint_sets {
        if set.head_verts.is_empty() || set.tail_verts.is_empty() {
            return Err(SartorError::InvalidConfig(format!(
                "Tagged vertex set for bone '{}' has an empty subset",
                bone
            )));
        }
        for &idx in set.head_verts.iter().chain(&set.tail_verts) {
            if idx as usize >= body_verts {
                return Err(SartorError::InvalidConfig(format!(
                    "Tagged vertex set for bone '{}' references vertex {} (body has {})",
                    bone, idx, body_verts
                )));
            }
        }
    }

    for driver in &input.drivers {
        if driver.expression.is_empty() {
            return Err(SartorError::InvalidConfig(format!(
                "Driver for shape key '{}' has an empty expression",
                driver.shape_key
            )));
        }
    }

    validate_params(input)?;

    Ok(())
}

fn validate_mesh(mesh: &MeshRecord, label: &str) -> SartorResult<()> {
    if mesh.positions.is_empty() {
        return Err(SartorError::InvalidSnapshot(format!(
            "{} mesh '{}' has no vertices",
            label, mesh.name
        )));
    }
    if mesh.positions.len() % 3 != 0 {
        return Err(SartorError::InvalidSnapshot(format!(
            "{} mesh '{}': positions length not divisible by 3",
            label, mesh.name
        )));
    }

    let n = mesh.positions.len() / 3;
    for key in &mesh.shape_keys {
        if key.deltas.len() != mesh.positions.len() {
            return Err(SartorError::InvalidSnapshot(format!(
                "{} mesh '{}': shape key '{}' delta count ({}) != position count ({})",
                label,
                mesh.name,
                key.name,
                key.deltas.len(),
                mesh.positions.len()
            )));
        }
    }

    for group in &mesh.groups {
        if group.indices.len() != group.weights.len() {
            return Err(SartorError::InvalidSnapshot(format!(
                "{} mesh '{}': group '{}' index count ({}) != weight count ({})",
                label,
                mesh.name,
                group.name,
                group.indices.len(),
                group.weights.len()
            )));
        }
        for &idx in &group.indices {
            if idx as usize >= n {
                return Err(SartorError::InvalidSnapshot(format!(
                    "{} mesh '{}': group '{}' references vertex {} (mesh has {})",
                    label, mesh.name, group.name, idx, n
                )));
            }
        }
    }

    Ok(())
}

fn validate_params(input: &FitInput) -> SartorResult<()> {
    let params = &input.params;
    if params.shape_key_name.is_empty() {
        return Err(SartorError::InvalidConfig(
            "Fit shape key name must not be empty".into(),
        ));
    }
    if params.mask_group.is_empty() {
        return Err(SartorError::InvalidConfig(
            "Mask group name must not be empty".into(),
        ));
    }
    if params.mask_threshold < 0.0 {
        return Err(SartorError::InvalidConfig(
            "Mask threshold must be non-negative".into(),
        ));
    }
    Ok(())
}
