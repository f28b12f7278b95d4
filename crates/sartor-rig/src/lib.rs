//! # sartor-rig
//!
//! Skeleton-side machinery of the fitting engine.
//!
//! ## Key Types
//!
//! - [`TaggedVertexSet`] — per-joint vertex subsets plus relative
//!   offsets, authored once per rig topology and persisted with it.
//! - [`correct_bones`] — recomputes joint endpoints from centroids of
//!   the tagged subsets after a body deformation.
//! - [`DriverDescriptor`] / driver retargeting — extracts and re-binds
//!   corrective-shape drivers across destructive operations.

pub mod corrector;
pub mod drivers;
pub mod tagged;

pub use corrector::correct_bones;
pub use drivers::{apply_driver, extract_drivers, DriverDescriptor};
pub use tagged::{JointVertexSets, TaggedVertexSet};
