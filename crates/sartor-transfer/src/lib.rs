//! # sartor-transfer
//!
//! Correspondence building and deformation replay — the core of the
//! fitting engine.
//!
//! ## Key Types
//!
//! - [`CorrespondenceTable`] — per-target-vertex record of the nearest
//!   source vertex plus the preserved world-space offset.
//! - [`build_correspondence`] — one-time nearest-point mapping between
//!   a source and a target snapshot.
//! - [`replay`] — re-derives target positions from new source positions
//!   through a previously built table.
//! - Write-backs onto a document object: [`apply_overwrite`] for
//!   scratch-copy baking, [`apply_shape_key`] for live fitting.
//! - [`transfer_weights`] — nearest-vertex skin-weight transfer through
//!   the same table.

pub mod correspondence;
pub mod replay;
pub mod weights;

pub use correspondence::{build_correspondence, CorrespondenceEntry, CorrespondenceTable};
pub use replay::{apply_overwrite, apply_shape_key, replay};
pub use weights::transfer_weights;
