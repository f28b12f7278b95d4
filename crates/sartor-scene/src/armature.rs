//! Armatures and the scoped joint-editing session.
//!
//! Joint endpoints may only be mutated inside an [`EditSession`]. The
//! session restores the armature's prior mode on every exit path —
//! normal return, `?` propagation, or panic — via `Drop`, replacing the
//! implicit global mode toggles a host application would otherwise
//! require.

use sartor_math::Vec3;
use sartor_types::{SartorError, SartorResult};

/// Interaction mode of an armature, mirroring the host document's
/// object/edit/pose modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditMode {
    Object,
    Edit,
    Pose,
}

/// A single joint: a named head/tail segment in world space.
#[derive(Debug, Clone)]
pub struct Bone {
    /// Bone name, unique within the armature.
    pub name: String,
    /// Joint head position.
    pub head: Vec3,
    /// Joint tail position.
    pub tail: Vec3,
}

/// A skeleton: a flat list of named bones plus an interaction mode.
#[derive(Debug, Clone)]
pub struct Armature {
    /// Armature name.
    pub name: String,
    bones: Vec<Bone>,
    mode: EditMode,
    session_active: bool,
}

impl Armature {
    /// Creates an empty armature in object mode.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bones: Vec::new(),
            mode: EditMode::Object,
            session_active: false,
        }
    }

    /// Appends a bone.
    pub fn add_bone(&mut self, name: impl Into<String>, head: Vec3, tail: Vec3) {
        self.bones.push(Bone {
            name: name.into(),
            head,
            tail,
        });
    }

    /// Returns true if a bone with this name exists.
    pub fn has_bone(&self, name: &str) -> bool {
        self.bones.iter().any(|b| b.name == name)
    }

    /// Returns the bone with this name.
    pub fn bone(&self, name: &str) -> Option<&Bone> {
        self.bones.iter().find(|b| b.name == name)
    }

    /// All bones in creation order.
    pub fn bones(&self) -> &[Bone] {
        &self.bones
    }

    /// Returns the current interaction mode.
    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Sets the interaction mode outside any edit session.
    ///
    /// Errors while a session is active: the session owns the mode
    /// until it is released.
    pub fn set_mode(&mut self, mode: EditMode) -> SartorResult<()> {
        if self.session_active {
            return Err(SartorError::ModeTransition(format!(
                "Armature '{}' is inside an edit session",
                self.name
            )));
        }
        self.mode = mode;
        Ok(())
    }
}

/// Scoped joint-editing session.
///
/// Entering switches the armature to edit mode; dropping the session
/// unconditionally restores the prior mode, so no failure path can
/// leave the armature mid-edit.
pub struct EditSession<'a> {
    armature: &'a mut Armature,
    prior: EditMode,
}

impl<'a> EditSession<'a> {
    /// Enters edit mode on the armature.
    ///
    /// Errors with a mode-transition failure if a session is already
    /// active — the session surface is non-reentrant.
    pub fn enter(armature: &'a mut Armature) -> SartorResult<Self> {
        if armature.session_active {
            return Err(SartorError::ModeTransition(format!(
                "Armature '{}' already has an active edit session",
                armature.name
            )));
        }
        let prior = armature.mode;
        armature.mode = EditMode::Edit;
        armature.session_active = true;
        Ok(Self { armature, prior })
    }

    /// Read access to the armature under edit.
    pub fn armature(&self) -> &Armature {
        self.armature
    }

    /// Returns the named bone for endpoint mutation.
    pub fn bone_mut(&mut self, name: &str) -> SartorResult<&mut Bone> {
        self.armature
            .bones
            .iter_mut()
            .find(|b| b.name == name)
            .ok_or_else(|| SartorError::MissingBone { bone: name.into() })
    }
}

impl Drop for EditSession<'_> {
    fn drop(&mut self) {
        self.armature.mode = self.prior;
        self.armature.session_active = false;
    }
}
