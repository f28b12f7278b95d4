//! # sartor-io
//!
//! The serializable boundary of the fitting engine: input records for
//! API transport and CLI configuration, early validation with clear
//! diagnostics, and compact result snapshots for inspection.

pub mod contract;
pub mod snapshot;
pub mod validator;

pub use contract::{ArmatureRecord, BoneRecord, FitInput, FitReport, GroupRecord, MeshRecord, ShapeKeyRecord};
pub use snapshot::ResultSnapshot;
pub use validator::validate_input;
