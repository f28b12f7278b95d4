//! Character-level orchestration.
//!
//! Runs the hard-sequenced steps for one character in their required
//! order: joint correction against the evaluated body pose, then
//! driver re-binding, then the garment batch (which parents to the
//! corrected armature). The first two steps abort the whole run on
//! failure — partial rig state is unusable — while garment failures
//! stay isolated per item inside the batch.

use serde::{Deserialize, Serialize};
use sartor_rig::{apply_driver, correct_bones, DriverDescriptor, JointVertexSets};
use sartor_scene::Document;
use sartor_telemetry::{EventBus, EventKind, FitEvent};
use sartor_types::{ArmatureId, ObjectId, SartorResult};

use crate::batch::{BatchItem, BatchReport, BatchRunner, CancelToken};
use crate::fit::FitParams;

/// Outcome of a full character pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CharacterReport {
    /// Bones repositioned from tagged vertex sets.
    pub corrected_bones: u32,
    /// Corrective-shape drivers re-bound onto the body.
    pub drivers_bound: u32,
    /// Garment batch outcome.
    pub batch: BatchReport,
}

/// Fits every garment on one character.
///
/// Joint correction runs against the body's fully evaluated pose and
/// must precede any armature re-binding; failure there (or in driver
/// re-binding) aborts the run before any garment is touched.
#[allow(clippy::too_many_arguments)]
pub fn run_character(
    doc: &mut Document,
    body: ObjectId,
    armature: ArmatureId,
    joint_sets: &JointVertexSets,
    drivers: &[DriverDescriptor],
    items: &[BatchItem],
    params: &FitParams,
    bus: &mut EventBus,
    cancel: &CancelToken,
) -> SartorResult<CharacterReport> {
    // 1. Joint correction, after shape keys are evaluated to final
    //    coordinates and before anything re-binds to the armature.
    let deformed = doc.object(body)?.evaluated_snapshot();
    let corrected = {
        let arm = doc.armature_mut(armature)?;
        correct_bones(arm, &deformed, joint_sets)?
    };
    if corrected > 0 {
        bus.emit(FitEvent::new(
            doc.object(body)?.name.clone(),
            EventKind::BonesCorrected {
                bone_count: corrected,
            },
        ));
    }

    // 2. Re-bind packaged corrective-shape drivers onto the body.
    let mut drivers_bound = 0u32;
    if !drivers.is_empty() {
        let (obj, arm) = doc.object_mut_with_armature(body, armature)?;
        for descriptor in drivers {
            apply_driver(obj, arm, descriptor)?;
            drivers_bound += 1;
        }
        bus.emit(FitEvent::new(
            doc.object(body)?.name.clone(),
            EventKind::DriversRebound {
                driver_count: drivers_bound,
            },
        ));
    }

    // 3. Garment batch, per-item isolated.
    let batch = BatchRunner::run(doc, body, armature, items, params, bus, cancel);
    bus.flush();

    Ok(CharacterReport {
        corrected_bones: corrected,
        drivers_bound,
        batch,
    })
}
