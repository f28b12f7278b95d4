//! Error types for the Sartor engine.
//!
//! All crates return `SartorResult<T>` from fallible operations.
//! Every variant is a caller/input error: none are retried, all
//! propagate immediately.

use thiserror::Error;

/// Unified error type for the Sartor engine.
#[derive(Debug, Error)]
pub enum SartorError {
    /// A correspondence could not be built (e.g., empty point set).
    #[error("Correspondence error: {0}")]
    Correspondence(String),

    /// Snapshot sizes differ between correspondence build and replay.
    #[error("Snapshot size mismatch: expected {expected} vertices, got {actual}")]
    SnapshotSize { expected: usize, actual: usize },

    /// The destination armature lacks a bone the operation requires.
    #[error("Armature has no bone named '{bone}'")]
    MissingBone { bone: String },

    /// The object lacks a shape key the operation requires.
    #[error("Object has no shape key named '{key}'")]
    MissingShapeKey { key: String },

    /// A joint-editing session could not be entered or exited.
    #[error("Mode transition failed: {0}")]
    ModeTransition(String),

    /// A pipeline step was invoked out of order.
    #[error("Pipeline step out of order: expected stage '{expected}', current stage is '{actual}'")]
    Sequence {
        expected: &'static str,
        actual: &'static str,
    },

    /// No object with the given handle exists in the document.
    #[error("No object with id {id} in document")]
    UnknownObject { id: u32 },

    /// No armature with the given handle exists in the document.
    #[error("No armature with id {id} in document")]
    UnknownArmature { id: u32 },

    /// Snapshot data is malformed or inconsistent.
    #[error("Invalid snapshot: {0}")]
    InvalidSnapshot(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, SartorError>`.
pub type SartorResult<T> = Result<T, SartorError>;
