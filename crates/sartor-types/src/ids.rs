//! Strongly-typed identifiers for document entities.
//!
//! Newtype wrappers prevent accidental mixing of object handles
//! with armature handles or raw vertex indices.

use serde::{Deserialize, Serialize};

/// Handle to a mesh object in a `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectId(pub u32);

/// Handle to an armature in a `Document`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArmatureId(pub u32);

impl ObjectId {
    /// Returns the raw handle value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl ArmatureId {
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for ObjectId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}

impl From<u32> for ArmatureId {
    fn from(val: u32) -> Self {
        Self(val)
    }
}
