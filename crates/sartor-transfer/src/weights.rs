//! Nearest-vertex skin-weight transfer.
//!
//! A garment fitted through a correspondence table can inherit the
//! body's skinning through the same mapping: each garment vertex takes
//! the group weights of its nearest body vertex. No authored weighting
//! between the two meshes is required.

use sartor_scene::{Document, MeshObject};
use sartor_types::{ObjectId, SartorError, SartorResult};

use crate::correspondence::CorrespondenceTable;

/// Copies every vertex group from `body` onto `garment` through the
/// table. Returns the number of groups written.
///
/// The table must have been built with `body` as source and `garment`
/// as target; mismatched sizes are snapshot-size errors.
pub fn transfer_weights(
    doc: &mut Document,
    table: &CorrespondenceTable,
    body: ObjectId,
    garment: ObjectId,
) -> SartorResult<u32> {
    let (body_obj, garment_obj) = doc.object_pair_mut(body, garment)?;

    if body_obj.vertex_count() != table.source_len() {
        return Err(SartorError::SnapshotSize {
            expected: table.source_len(),
            actual: body_obj.vertex_count(),
        });
    }
    if garment_obj.vertex_count() != table.len() {
        return Err(SartorError::SnapshotSize {
            expected: table.len(),
            actual: garment_obj.vertex_count(),
        });
    }

    let group_names: Vec<String> = body_obj.groups().iter().map(|g| g.name.clone()).collect();
    let mut transferred = 0;

    for name in &group_names {
        let dense = dense_weights(body_obj, name)?;

        let mut indices = Vec::new();
        let mut weights = Vec::new();
        for (i, entry) in table.entries().iter().enumerate() {
            let w = dense[entry.source_index as usize];
            if w > 0.0 {
                indices.push(i as u32);
                weights.push(w);
            }
        }

        if !indices.is_empty() {
            garment_obj.set_group(name.clone(), indices, weights)?;
            transferred += 1;
        }
    }

    Ok(transferred)
}

/// Expands a sparse vertex group into a dense per-vertex weight array.
fn dense_weights(object: &MeshObject, group_name: &str) -> SartorResult<Vec<f32>> {
    let group = object.group(group_name).ok_or_else(|| {
        SartorError::InvalidSnapshot(format!("Object has no vertex group '{}'", group_name))
    })?;

    let mut dense = vec![0.0f32; object.vertex_count()];
    for (idx, &w) in group.indices.iter().zip(&group.weights) {
        dense[*idx as usize] = w;
    }
    Ok(dense)
}
