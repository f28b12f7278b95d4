//! The "fit one clothing item" state machine.
//!
//! Stages are one-way: IMPORTED → CORRESPONDENCE_BUILT → DEFORMED →
//! MASKED → ARMATURE_BOUND → DONE. Calling a step out of order is a
//! sequence error; a failed step leaves the machine in its prior stage
//! and never leaves scratch duplicates in the document.

use serde::{Deserialize, Serialize};
use sartor_index::SpatialIndex;
use sartor_scene::{Document, ScratchGuard};
use sartor_telemetry::{EventBus, EventKind, FitEvent};
use sartor_transfer::{
    apply_overwrite, apply_shape_key, build_correspondence, replay, transfer_weights,
    CorrespondenceTable,
};
use sartor_types::{constants, ArmatureId, ObjectId, SartorError, SartorResult};

/// Fit progress, strictly forward-only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitStage {
    Imported,
    CorrespondenceBuilt,
    Deformed,
    Masked,
    ArmatureBound,
    Done,
}

impl FitStage {
    /// Stage name for diagnostics and reports.
    pub fn name(self) -> &'static str {
        match self {
            FitStage::Imported => "imported",
            FitStage::CorrespondenceBuilt => "correspondence_built",
            FitStage::Deformed => "deformed",
            FitStage::Masked => "masked",
            FitStage::ArmatureBound => "armature_bound",
            FitStage::Done => "done",
        }
    }
}

/// How replayed positions are written back to the garment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteBack {
    /// Overwrite the garment's base positions. For throwaway scratch
    /// copies used in corrective-shape baking.
    Overwrite,
    /// Write a named shape key at value 1 so a later reshape can
    /// re-drive the same key. For live, non-destructive fitting.
    ShapeKey,
}

/// Configuration for one fitting pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitParams {
    /// Shape key written in [`WriteBack::ShapeKey`] mode.
    pub shape_key_name: String,
    /// Vertex group the body mask is written to.
    pub mask_group: String,
    /// Distance (meters) within which a body vertex counts as covered.
    pub mask_threshold: f32,
    /// Write-back mode.
    pub write_back: WriteBack,
    /// Whether to carry body skin weights onto the garment at bind time.
    pub transfer_weights: bool,
}

impl Default for FitParams {
    fn default() -> Self {
        Self {
            shape_key_name: constants::DEFAULT_FIT_KEY.to_string(),
            mask_group: "clothing_mask".to_string(),
            mask_threshold: constants::DEFAULT_MASK_THRESHOLD,
            write_back: WriteBack::ShapeKey,
            transfer_weights: true,
        }
    }
}

impl FitParams {
    /// Creates params for corrective-shape baking: overwrite the
    /// (scratch) target directly, skip skinning.
    pub fn baking() -> Self {
        Self {
            write_back: WriteBack::Overwrite,
            transfer_weights: false,
            ..Default::default()
        }
    }
}

/// Statistics from a completed fit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitSummary {
    /// Garment object name.
    pub garment: String,
    /// Body vertices the correspondence was built over.
    pub source_vertices: usize,
    /// Garment vertices mapped.
    pub target_vertices: usize,
    /// Largest preserved offset (meters).
    pub max_offset: f64,
    /// Body vertices tagged into the mask group.
    pub masked_vertices: u32,
    /// Vertex groups carried onto the garment.
    pub groups_transferred: u32,
}

/// The fit state machine for one garment against one body.
///
/// Owns the correspondence table for its lifetime; the table is
/// discarded with the machine and never persisted.
pub struct GarmentFit {
    body: ObjectId,
    garment: ObjectId,
    params: FitParams,
    stage: FitStage,
    table: Option<CorrespondenceTable>,
    masked_vertices: u32,
    groups_transferred: u32,
}

impl GarmentFit {
    /// Starts a fit in the IMPORTED stage.
    pub fn new(body: ObjectId, garment: ObjectId, params: FitParams) -> Self {
        Self {
            body,
            garment,
            params,
            stage: FitStage::Imported,
            table: None,
            masked_vertices: 0,
            groups_transferred: 0,
        }
    }

    /// Current stage.
    pub fn stage(&self) -> FitStage {
        self.stage
    }

    fn require(&self, expected: FitStage) -> SartorResult<()> {
        if self.stage != expected {
            return Err(SartorError::Sequence {
                expected: expected.name(),
                actual: self.stage.name(),
            });
        }
        Ok(())
    }

    fn table(&self) -> SartorResult<&CorrespondenceTable> {
        self.table.as_ref().ok_or(SartorError::Sequence {
            expected: FitStage::CorrespondenceBuilt.name(),
            actual: FitStage::Imported.name(),
        })
    }

    /// Builds the one-time correspondence from the garment to the
    /// body's base (undeformed) positions.
    pub fn build_correspondence(&mut self, doc: &Document, bus: &EventBus) -> SartorResult<()> {
        self.require(FitStage::Imported)?;

        let body = doc.object(self.body)?;
        let garment = doc.object(self.garment)?;
        let table = build_correspondence(&body.base, &garment.base)?;

        bus.emit(FitEvent::new(
            garment.name.clone(),
            EventKind::CorrespondenceBuilt {
                source_vertices: table.source_len(),
                target_vertices: table.len(),
                max_offset: table.max_offset_len,
            },
        ));

        self.table = Some(table);
        self.stage = FitStage::CorrespondenceBuilt;
        Ok(())
    }

    /// Replays the garment onto the body's current (reshaped) pose.
    ///
    /// The body's shape keys are collapsed on a scratch duplicate to
    /// obtain the fully evaluated pose; the duplicate is reclaimed on
    /// every exit path.
    pub fn deform(&mut self, doc: &mut Document, bus: &EventBus) -> SartorResult<()> {
        self.require(FitStage::CorrespondenceBuilt)?;

        let (new_source, scratch_name) = {
            let mut scratch = ScratchGuard::duplicate(doc, self.body)?;
            let name = scratch.object()?.name.clone();
            scratch.object_mut()?.apply_shape_keys();
            (scratch.object()?.base.clone(), name)
        };
        bus.emit(FitEvent::new(
            doc.object(self.body)?.name.clone(),
            EventKind::ScratchReclaimed {
                object: scratch_name,
            },
        ));

        let positions = replay(self.table()?, &new_source)?;

        let garment = doc.object_mut(self.garment)?;
        let mode = match self.params.write_back {
            WriteBack::Overwrite => {
                apply_overwrite(garment, &positions)?;
                "overwrite"
            }
            WriteBack::ShapeKey => {
                apply_shape_key(garment, &self.params.shape_key_name, &positions)?;
                "shape_key"
            }
        };

        bus.emit(FitEvent::new(
            garment.name.clone(),
            EventKind::ReplayApplied {
                mode: mode.to_string(),
                vertex_count: positions.len(),
            },
        ));

        self.stage = FitStage::Deformed;
        Ok(())
    }

    /// Tags body vertices covered by the fitted garment into the mask
    /// vertex group, so the host can hide the skin underneath.
    pub fn mask(&mut self, doc: &mut Document, bus: &EventBus) -> SartorResult<u32> {
        self.require(FitStage::Deformed)?;

        let garment_eval = doc.object(self.garment)?.evaluated_snapshot();
        let index = SpatialIndex::build(&garment_eval)?;

        let body_eval = doc.object(self.body)?.evaluated_snapshot();
        let mut indices = Vec::new();
        for i in 0..body_eval.vertex_count() {
            let (_, dist) = index.query(body_eval.position_vec3(i));
            if dist <= self.params.mask_threshold {
                indices.push(i as u32);
            }
        }

        let count = indices.len() as u32;
        let weights = vec![1.0f32; indices.len()];
        let body = doc.object_mut(self.body)?;
        body.set_group(self.params.mask_group.clone(), indices, weights)?;

        bus.emit(FitEvent::new(
            body.name.clone(),
            EventKind::MaskTagged {
                group: self.params.mask_group.clone(),
                vertex_count: count as usize,
            },
        ));

        self.masked_vertices = count;
        self.stage = FitStage::Masked;
        Ok(count)
    }

    /// Parents the garment to the armature, optionally carrying the
    /// body's skin weights through the correspondence first.
    pub fn bind_armature(
        &mut self,
        doc: &mut Document,
        armature: ArmatureId,
        bus: &EventBus,
    ) -> SartorResult<()> {
        self.require(FitStage::Masked)?;

        // Fail before any mutation if the armature handle is stale.
        doc.armature(armature)?;

        if self.params.transfer_weights {
            let transferred = transfer_weights(doc, self.table()?, self.body, self.garment)?;
            self.groups_transferred = transferred;
            bus.emit(FitEvent::new(
                doc.object(self.garment)?.name.clone(),
                EventKind::WeightsTransferred {
                    group_count: transferred,
                },
            ));
        }

        doc.object_mut(self.garment)?.parent_armature = Some(armature);
        self.stage = FitStage::ArmatureBound;
        Ok(())
    }

    /// Completes the fit and returns its summary. The correspondence
    /// table is dropped with the machine.
    pub fn finish(&mut self, doc: &Document) -> SartorResult<FitSummary> {
        self.require(FitStage::ArmatureBound)?;

        let table = self.table()?;
        let summary = FitSummary {
            garment: doc.object(self.garment)?.name.clone(),
            source_vertices: table.source_len(),
            target_vertices: table.len(),
            max_offset: table.max_offset_len,
            masked_vertices: self.masked_vertices,
            groups_transferred: self.groups_transferred,
        };

        self.stage = FitStage::Done;
        Ok(summary)
    }

    /// Runs every stage in order.
    pub fn run_all(
        &mut self,
        doc: &mut Document,
        armature: ArmatureId,
        bus: &EventBus,
    ) -> SartorResult<FitSummary> {
        self.build_correspondence(doc, bus)?;
        self.deform(doc, bus)?;
        self.mask(doc, bus)?;
        self.bind_armature(doc, armature, bus)?;
        self.finish(doc)
    }
}
