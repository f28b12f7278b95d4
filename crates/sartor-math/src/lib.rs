//! # sartor-math
//!
//! Vector math primitives for the Sartor fitting engine.
//!
//! Provides:
//! - Re-exports of `glam` types (`Vec3`, `DVec3`, etc.)
//! - Double-precision centroid accumulation over point subsets

pub mod centroid;

// Re-export glam types as the canonical math types for Sartor.
pub use glam::{DVec3, Mat3, Mat4, Quat, Vec2, Vec3, Vec4};

pub use centroid::{centroid, narrow};
