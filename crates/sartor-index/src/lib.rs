//! # sartor-index
//!
//! Nearest-neighbor index over a point set.
//!
//! ## Key Types
//!
//! - [`SpatialIndex`] — Balanced kd-tree. Build once in O(n log n),
//!   query nearest in O(log n) average. Deterministic for identical
//!   input order; distance ties break to the lower vertex index.
//! - [`nearest_linear`] — Reference linear scan used to cross-validate
//!   the tree in tests.

pub mod kdtree;

pub use kdtree::{nearest_linear, SpatialIndex};
