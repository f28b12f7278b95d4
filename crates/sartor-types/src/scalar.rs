//! Scalar type aliases for the engine.
//!
//! Positions are stored at `f32` (host documents and exchange formats
//! use single precision), but every accumulation — offsets, centroids,
//! shape-key evaluation, replay — runs at `f64` so that error stays
//! bounded across pipelines that apply, then reapply, shape keys and
//! rig transforms.

/// The floating-point type used for stored vertex data.
pub type Scalar = f32;

/// The floating-point type used for all internal accumulation.
pub type Accum = f64;
