//! # sartor-types
//!
//! Shared types, identifiers, error types, and numeric constants
//! for the Sartor accessory fitting engine.
//!
//! This crate has zero domain logic — it defines the vocabulary
//! that all other Sartor crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{SartorError, SartorResult};
pub use ids::{ArmatureId, ObjectId};
pub use scalar::{Accum, Scalar};
