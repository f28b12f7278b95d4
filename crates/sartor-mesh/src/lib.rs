//! # sartor-mesh
//!
//! World-space mesh snapshots with SoA (Structure of Arrays) layout.
//!
//! ## Key Types
//!
//! - [`MeshSnapshot`] — An ordered, immutable capture of vertex positions
//!   at one instant (a base mesh, a shape key at value 1, or a fully
//!   evaluated pose). Correspondence and replay operate on snapshots only;
//!   no topology is carried.
//! - Procedural generators for test and demo point sets.

pub mod generators;
pub mod snapshot;

pub use snapshot::MeshSnapshot;
