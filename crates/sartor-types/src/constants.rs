//! Numeric defaults and tolerances.

/// Default name for the shape key written by live clothing fitting.
pub const DEFAULT_FIT_KEY: &str = "Body Proportions";

/// Default distance (meters) within which a body vertex counts as
/// covered by a garment during masking.
pub const DEFAULT_MASK_THRESHOLD: f32 = 0.005;

/// Tolerance for centroid-based joint placement checks.
pub const CENTROID_TOLERANCE: f64 = 1.0e-6;

/// Epsilon for floating-point comparisons on stored coordinates.
pub const EPSILON: f32 = 1.0e-7;
