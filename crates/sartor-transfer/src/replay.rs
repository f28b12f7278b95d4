//! Deformation replay: re-derive target positions from new source
//! positions through a built correspondence.
//!
//! Replay is a pure transform — `new_source[entry.source_index] +
//! entry.offset` per target vertex, accumulated at f64 and narrowed
//! once on output. Identical inputs produce bit-identical output.
//!
//! The preserved offset is a fixed world-space vector, so replay is
//! exact only while the source deforms approximately rigidly around
//! each mapped vertex. Under large non-rigid reshaping the carried
//! slack rotates out of alignment; `CorrespondenceTable::max_offset_len`
//! bounds how much surface that error can act over.

use sartor_mesh::MeshSnapshot;
use sartor_scene::{MeshObject, ShapeKey};
use sartor_types::{SartorError, SartorResult};

use crate::correspondence::CorrespondenceTable;

/// Computes replayed target positions.
///
/// `new_source` must have exactly the vertex count the table was built
/// against; anything else is a snapshot-size error (the mapping indexes
/// by position, so a resized source silently meaning something
/// different would be worse than failing).
pub fn replay(
    table: &CorrespondenceTable,
    new_source: &MeshSnapshot,
) -> SartorResult<Vec<[f32; 3]>> {
    if new_source.vertex_count() != table.source_len() {
        return Err(SartorError::SnapshotSize {
            expected: table.source_len(),
            actual: new_source.vertex_count(),
        });
    }

    let mut out = Vec::with_capacity(table.len());
    for entry in table.entries() {
        let p = new_source.position_dvec3(entry.source_index as usize) + entry.offset;
        out.push([p.x as f32, p.y as f32, p.z as f32]);
    }
    Ok(out)
}

/// Write-back mode (a): overwrite the object's base positions.
///
/// Used when the target is a throwaway scratch copy for
/// corrective-shape baking — the original object keeps its base.
pub fn apply_overwrite(object: &mut MeshObject, positions: &[[f32; 3]]) -> SartorResult<()> {
    let n = object.vertex_count();
    if positions.len() != n {
        return Err(SartorError::SnapshotSize {
            expected: n,
            actual: positions.len(),
        });
    }

    for (i, p) in positions.iter().enumerate() {
        object.base.pos_x[i] = p[0];
        object.base.pos_y[i] = p[1];
        object.base.pos_z[i] = p[2];
    }
    Ok(())
}

/// Write-back mode (b): store the replayed positions as a named shape
/// key holding the delta from the current base, value set to 1.
///
/// Used for live, non-destructive clothing fitting — a later body
/// reshape replays into the same key instead of touching the base.
/// An existing key of the same name is replaced; its driver binding
/// (if any) is carried onto the replacement.
pub fn apply_shape_key(
    object: &mut MeshObject,
    name: &str,
    positions: &[[f32; 3]],
) -> SartorResult<()> {
    let n = object.vertex_count();
    if positions.len() != n {
        return Err(SartorError::SnapshotSize {
            expected: n,
            actual: positions.len(),
        });
    }

    let mut delta_x = Vec::with_capacity(n);
    let mut delta_y = Vec::with_capacity(n);
    let mut delta_z = Vec::with_capacity(n);
    for (i, p) in positions.iter().enumerate() {
        delta_x.push((p[0] as f64 - object.base.pos_x[i] as f64) as f32);
        delta_y.push((p[1] as f64 - object.base.pos_y[i] as f64) as f32);
        delta_z.push((p[2] as f64 - object.base.pos_z[i] as f64) as f32);
    }

    let driver = object
        .shape_key(name)
        .and_then(|existing| existing.driver.clone());

    object.add_shape_key(ShapeKey {
        name: name.to_string(),
        delta_x,
        delta_y,
        delta_z,
        value: 1.0,
        driver,
    })
}
