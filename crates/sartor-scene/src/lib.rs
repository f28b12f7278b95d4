//! # sartor-scene
//!
//! The host-document model the engine mutates: mesh objects with shape
//! keys and vertex groups, armatures with a scoped joint-editing
//! session, and guaranteed-cleanup scratch copies.
//!
//! There is no ambient "current document" — every engine call receives
//! an explicit [`Document`] (or a handle into one) and a `&mut` borrow
//! is the only mutation path, so the surface is single-threaded and
//! non-reentrant by construction.

pub mod armature;
pub mod document;
pub mod object;
pub mod scratch;

pub use armature::{Armature, Bone, EditMode, EditSession};
pub use document::Document;
pub use object::{DriverBinding, MeshObject, ShapeKey, TransformSpace, TransformType, VertexGroup};
pub use scratch::ScratchGuard;
