//! Sequential garment batch with per-item failure isolation.
//!
//! Items run strictly one after another. An item's failure is captured
//! in the report without aborting the rest of the batch — garments are
//! independent. Cancellation is honored only between items: the
//! in-flight item always runs to completion, because a partially
//! written target is not valid state to leave behind.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use sartor_scene::Document;
use sartor_telemetry::{EventBus, EventKind, FitEvent};
use sartor_types::{ArmatureId, ObjectId};

use crate::fit::{FitParams, FitSummary, GarmentFit};

/// One garment to fit.
#[derive(Debug, Clone)]
pub struct BatchItem {
    /// Item name for reporting.
    pub name: String,
    /// The garment object.
    pub garment: ObjectId,
}

/// Cooperative cancellation flag, checked between batch items.
#[derive(Debug, Default)]
pub struct CancelToken {
    requested: AtomicBool,
}

impl CancelToken {
    /// Creates an unset token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation. The in-flight item still completes.
    pub fn request(&self) {
        self.requested.store(true, Ordering::Relaxed);
    }

    /// Returns true once cancellation has been requested.
    pub fn is_requested(&self) -> bool {
        self.requested.load(Ordering::Relaxed)
    }
}

/// Per-item outcome.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemReport {
    /// Item name.
    pub name: String,
    /// Whether the fit completed.
    pub succeeded: bool,
    /// Error text for a failed item.
    pub error: Option<String>,
    /// Fit statistics for a completed item.
    pub summary: Option<FitSummary>,
}

/// Outcome of a whole batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchReport {
    /// Per-item outcomes, in execution order. Items skipped by a
    /// cancellation do not appear.
    pub items: Vec<ItemReport>,
    /// Number of completed items.
    pub completed: u32,
    /// Number of failed items.
    pub failed: u32,
    /// True if the batch stopped early on a cancellation request.
    pub cancelled: bool,
}

/// Executes garment batches as a strict sequence of synchronous fits.
pub struct BatchRunner;

impl BatchRunner {
    /// Fits every item against the same body and armature.
    ///
    /// Never returns an error: per-item failures land in the report.
    pub fn run(
        doc: &mut Document,
        body: ObjectId,
        armature: ArmatureId,
        items: &[BatchItem],
        params: &FitParams,
        bus: &mut EventBus,
        cancel: &CancelToken,
    ) -> BatchReport {
        let mut report = BatchReport::default();

        for item in items {
            if cancel.is_requested() {
                report.cancelled = true;
                break;
            }

            bus.emit(FitEvent::new(item.name.clone(), EventKind::ItemBegin));

            let mut fit = GarmentFit::new(body, item.garment, params.clone());
            let outcome = fit.run_all(doc, armature, bus);

            let succeeded = outcome.is_ok();
            bus.emit(FitEvent::new(
                item.name.clone(),
                EventKind::ItemEnd { succeeded },
            ));

            match outcome {
                Ok(summary) => {
                    report.completed += 1;
                    report.items.push(ItemReport {
                        name: item.name.clone(),
                        succeeded: true,
                        error: None,
                        summary: Some(summary),
                    });
                }
                Err(e) => {
                    report.failed += 1;
                    report.items.push(ItemReport {
                        name: item.name.clone(),
                        succeeded: false,
                        error: Some(e.to_string()),
                        summary: None,
                    });
                }
            }

            // Deliver this item's events before the next one starts.
            bus.flush();
        }

        report
    }
}
