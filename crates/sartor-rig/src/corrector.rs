//! Joint correction: reposition bone endpoints after a body deformation.
//!
//! Runs after the source mesh's shape keys are evaluated to final
//! coordinates and before skin/parenting is re-bound — the pipeline
//! enforces that ordering. All endpoint mutation happens inside a
//! scoped [`EditSession`], so the armature's prior mode is restored on
//! every exit path.

use sartor_math::DVec3;
use sartor_mesh::MeshSnapshot;
use sartor_scene::{Armature, EditSession};
use sartor_types::SartorResult;

use crate::tagged::JointVertexSets;

/// Recomputes every tagged joint from the deformed source snapshot:
/// `head = centroid(deformed[head_verts]) + head_relative_co`, tail
/// analogous. Returns the number of bones repositioned.
///
/// Errors: a set naming a bone the armature lacks is a missing-bone
/// error; a vertex index outside the snapshot is a snapshot-size
/// error; a session that cannot be entered is a mode-transition error.
/// Any error mid-correction still restores the armature mode.
pub fn correct_bones(
    armature: &mut Armature,
    deformed: &MeshSnapshot,
    sets: &JointVertexSets,
) -> SartorResult<u32> {
    let mut session = EditSession::enter(armature)?;
    let mut corrected = 0u32;

    for (bone_name, set) in sets {
        let head_centroid = deformed.centroid_of(&set.head_verts)?;
        let tail_centroid = deformed.centroid_of(&set.tail_verts)?;

        let head = head_centroid
            + DVec3::new(
                set.head_relative_co[0] as f64,
                set.head_relative_co[1] as f64,
                set.head_relative_co[2] as f64,
            );
        let tail = tail_centroid
            + DVec3::new(
                set.tail_relative_co[0] as f64,
                set.tail_relative_co[1] as f64,
                set.tail_relative_co[2] as f64,
            );

        let bone = session.bone_mut(bone_name)?;
        bone.head = sartor_math::narrow(head);
        bone.tail = sartor_math::narrow(tail);
        corrected += 1;
    }

    Ok(corrected)
}
