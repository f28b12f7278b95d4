//! Fitting event types.
//!
//! Structured events emitted by the engine at the boundaries of each
//! fitting operation. Events are lightweight value types carrying just
//! enough data for monitoring and debugging.

use serde::{Deserialize, Serialize};

/// A fitting event emitted by the engine.
///
/// Events are tagged with the name of the object or batch item they
/// concern and carry operation-specific data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FitEvent {
    /// Name of the object or batch item the event concerns.
    pub context: String,
    /// Event payload.
    pub kind: EventKind,
}

/// Event payload variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum EventKind {
    /// A correspondence table was built.
    CorrespondenceBuilt {
        /// Number of source vertices indexed.
        source_vertices: usize,
        /// Number of target vertices mapped.
        target_vertices: usize,
        /// Largest preserved offset length (meters). Large values
        /// flag fits where the local-rigidity assumption is weakest.
        max_offset: f64,
    },

    /// Replayed positions were written back to a target.
    ReplayApplied {
        /// Write-back mode ("overwrite" or "shape_key").
        mode: String,
        /// Number of vertices written.
        vertex_count: usize,
    },

    /// Body vertices were tagged as covered by a garment.
    MaskTagged {
        /// Vertex group the mask was written to.
        group: String,
        /// Number of vertices tagged.
        vertex_count: usize,
    },

    /// Skin weights were carried from body to garment.
    WeightsTransferred {
        /// Number of vertex groups transferred.
        group_count: u32,
    },

    /// Joint endpoints were recomputed from tagged vertex sets.
    BonesCorrected {
        /// Number of bones repositioned.
        bone_count: u32,
    },

    /// Corrective-shape drivers were re-bound after a destructive step.
    DriversRebound {
        /// Number of drivers re-created.
        driver_count: u32,
    },

    /// A scratch duplicate was removed from the document.
    ScratchReclaimed {
        /// Name of the reclaimed object.
        object: String,
    },

    /// A batch item started.
    ItemBegin,

    /// A batch item finished.
    ItemEnd {
        /// Whether the item completed without error.
        succeeded: bool,
    },

    /// Custom event for extensibility.
    Custom {
        /// Arbitrary label.
        label: String,
        /// JSON-encoded payload.
        payload: String,
    },
}

impl FitEvent {
    /// Creates a new event for the given context.
    pub fn new(context: impl Into<String>, kind: EventKind) -> Self {
        Self {
            context: context.into(),
            kind,
        }
    }
}
