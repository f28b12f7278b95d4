//! Guaranteed-cleanup scratch copies.
//!
//! A scratch copy is a temporary duplicate of a mesh object created
//! solely to compute an intermediate pose. It is exclusively owned by
//! the operation that created it, and its removal is tied to `Drop`:
//! success, early `?` return, or panic — the duplicate never survives
//! into the document.

use sartor_types::{ObjectId, SartorResult};

use crate::document::Document;
use crate::object::MeshObject;

/// Exclusive owner of one scratch duplicate.
///
/// The guard holds the document borrow for its whole lifetime, so no
/// other mutation can interleave with the scratch's existence, and the
/// duplicate is removed when the guard goes out of scope.
pub struct ScratchGuard<'d> {
    doc: &'d mut Document,
    id: ObjectId,
}

impl<'d> ScratchGuard<'d> {
    /// Duplicates `source` into a scratch copy owned by the guard.
    pub fn duplicate(doc: &'d mut Document, source: ObjectId) -> SartorResult<Self> {
        let id = doc.duplicate_object(source)?;
        Ok(Self { doc, id })
    }

    /// Handle of the scratch object. Valid only while the guard lives.
    pub fn id(&self) -> ObjectId {
        self.id
    }

    /// The scratch object.
    pub fn object(&self) -> SartorResult<&MeshObject> {
        self.doc.object(self.id)
    }

    /// The scratch object, mutably.
    pub fn object_mut(&mut self) -> SartorResult<&mut MeshObject> {
        self.doc.object_mut(self.id)
    }

    /// The underlying document, for reads that need other objects
    /// while the scratch is alive.
    pub fn doc(&self) -> &Document {
        self.doc
    }
}

impl Drop for ScratchGuard<'_> {
    fn drop(&mut self) {
        self.doc.remove_object(self.id);
    }
}
