//! The document: an explicit, owned store of objects and armatures.
//!
//! Engine calls receive a `&mut Document` instead of reading ambient
//! global state. Object counts are observable so callers (and tests)
//! can verify that operations leave no orphaned scratch copies behind.

use sartor_types::{ArmatureId, ObjectId, SartorError, SartorResult};

use crate::armature::Armature;
use crate::object::MeshObject;

/// An in-memory host document.
#[derive(Debug, Default)]
pub struct Document {
    objects: Vec<(ObjectId, MeshObject)>,
    armatures: Vec<(ArmatureId, Armature)>,
    next_object: u32,
    next_armature: u32,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    // ─── Objects ──────────────────────────────────────────────────

    /// Adds an object and returns its handle.
    pub fn add_object(&mut self, object: MeshObject) -> ObjectId {
        let id = ObjectId(self.next_object);
        self.next_object += 1;
        self.objects.push((id, object));
        id
    }

    /// Returns the number of live objects.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Looks up an object by handle.
    pub fn object(&self, id: ObjectId) -> SartorResult<&MeshObject> {
        self.objects
            .iter()
            .find(|(oid, _)| *oid == id)
            .map(|(_, obj)| obj)
            .ok_or(SartorError::UnknownObject { id: id.raw() })
    }

    /// Looks up an object by handle, mutably.
    pub fn object_mut(&mut self, id: ObjectId) -> SartorResult<&mut MeshObject> {
        self.objects
            .iter_mut()
            .find(|(oid, _)| *oid == id)
            .map(|(_, obj)| obj)
            .ok_or(SartorError::UnknownObject { id: id.raw() })
    }

    /// Looks up an object by name.
    pub fn find_object(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, obj)| obj.name == name)
            .map(|(id, _)| *id)
    }

    /// Duplicates an object under a derived name and returns the new
    /// handle. Shape keys, groups, and driver bindings are cloned.
    pub fn duplicate_object(&mut self, id: ObjectId) -> SartorResult<ObjectId> {
        let source = self.object(id)?;
        let mut copy = source.clone();
        copy.name = format!("{}.copy", source.name);
        Ok(self.add_object(copy))
    }

    /// Removes an object. Returns true if the handle was live.
    pub fn remove_object(&mut self, id: ObjectId) -> bool {
        let before = self.objects.len();
        self.objects.retain(|(oid, _)| *oid != id);
        self.objects.len() != before
    }

    /// Borrows two distinct objects, the second mutably.
    ///
    /// Needed by operations that read one mesh while writing another
    /// (weight transfer). Errors if the handles are equal.
    pub fn object_pair_mut(
        &mut self,
        read: ObjectId,
        write: ObjectId,
    ) -> SartorResult<(&MeshObject, &mut MeshObject)> {
        if read == write {
            return Err(SartorError::InvalidConfig(
                "Cannot borrow the same object for read and write".into(),
            ));
        }

        let read_pos = self
            .objects
            .iter()
            .position(|(oid, _)| *oid == read)
            .ok_or(SartorError::UnknownObject { id: read.raw() })?;
        let write_pos = self
            .objects
            .iter()
            .position(|(oid, _)| *oid == write)
            .ok_or(SartorError::UnknownObject { id: write.raw() })?;

        if read_pos < write_pos {
            let (lo, hi) = self.objects.split_at_mut(write_pos);
            Ok((&lo[read_pos].1, &mut hi[0].1))
        } else {
            let (lo, hi) = self.objects.split_at_mut(read_pos);
            Ok((&hi[0].1, &mut lo[write_pos].1))
        }
    }

    // ─── Armatures ────────────────────────────────────────────────

    /// Adds an armature and returns its handle.
    pub fn add_armature(&mut self, armature: Armature) -> ArmatureId {
        let id = ArmatureId(self.next_armature);
        self.next_armature += 1;
        self.armatures.push((id, armature));
        id
    }

    /// Looks up an armature by handle.
    pub fn armature(&self, id: ArmatureId) -> SartorResult<&Armature> {
        self.armatures
            .iter()
            .find(|(aid, _)| *aid == id)
            .map(|(_, arm)| arm)
            .ok_or(SartorError::UnknownArmature { id: id.raw() })
    }

    /// Looks up an armature by handle, mutably.
    pub fn armature_mut(&mut self, id: ArmatureId) -> SartorResult<&mut Armature> {
        self.armatures
            .iter_mut()
            .find(|(aid, _)| *aid == id)
            .map(|(_, arm)| arm)
            .ok_or(SartorError::UnknownArmature { id: id.raw() })
    }

    /// Borrows an object mutably and an armature immutably at once
    /// (driver re-binding reads the armature while writing the object).
    pub fn object_mut_with_armature(
        &mut self,
        object: ObjectId,
        armature: ArmatureId,
    ) -> SartorResult<(&mut MeshObject, &Armature)> {
        let arm_pos = self
            .armatures
            .iter()
            .position(|(aid, _)| *aid == armature)
            .ok_or(SartorError::UnknownArmature { id: armature.raw() })?;
        let obj = self
            .objects
            .iter_mut()
            .find(|(oid, _)| *oid == object)
            .map(|(_, obj)| obj)
            .ok_or(SartorError::UnknownObject { id: object.raw() })?;
        Ok((obj, &self.armatures[arm_pos].1))
    }
}
