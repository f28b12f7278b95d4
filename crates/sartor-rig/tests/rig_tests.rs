//! Integration tests for sartor-rig.

use sartor_math::Vec3;
use sartor_mesh::MeshSnapshot;
use sartor_rig::{
    apply_driver, correct_bones, extract_drivers, DriverDescriptor, JointVertexSets,
    TaggedVertexSet,
};
use sartor_scene::{
    Armature, DriverBinding, EditMode, MeshObject, ShapeKey, TransformSpace, TransformType,
};
use sartor_types::SartorError;

fn make_snapshot() -> MeshSnapshot {
    let mut snap = MeshSnapshot::default();
    for i in 0..10 {
        let t = i as f32;
        snap.push(t * 0.1, t * 0.2, 0.0);
    }
    snap
}

fn raised(snap: &MeshSnapshot, dz: f32) -> MeshSnapshot {
    let mut out = MeshSnapshot::with_capacity(snap.vertex_count());
    for i in 0..snap.vertex_count() {
        let [x, y, z] = snap.position(i);
        out.push(x, y, z + dz);
    }
    out
}

// ─── TaggedVertexSet Tests ────────────────────────────────────

#[test]
fn capture_records_relative_offsets() {
    let snap = make_snapshot();
    let head = Vec3::new(0.5, 1.0, 0.2);
    let tail = Vec3::new(0.5, 1.5, 0.2);
    let set = TaggedVertexSet::capture(&snap, vec![3, 7, 9], head, vec![0, 1], tail).unwrap();

    // head centroid of {3, 7, 9}: x = (0.3 + 0.7 + 0.9) / 3
    let cx = (0.3f64 + 0.7 + 0.9) / 3.0;
    assert!((set.head_relative_co[0] as f64 - (0.5 - cx)).abs() < 1e-6);
    assert!((set.head_relative_co[2] - 0.2).abs() < 1e-6);
}

#[test]
fn capture_rejects_bad_indices() {
    let snap = make_snapshot();
    assert!(TaggedVertexSet::capture(&snap, vec![99], Vec3::ZERO, vec![0], Vec3::ZERO).is_err());
    assert!(TaggedVertexSet::capture(&snap, vec![], Vec3::ZERO, vec![0], Vec3::ZERO).is_err());
}

// ─── BoneCorrector Tests ──────────────────────────────────────

#[test]
fn corrected_head_is_centroid_plus_offset() {
    let snap = make_snapshot();
    let head = Vec3::new(0.5, 1.0, 0.2);
    let tail = Vec3::new(0.6, 1.5, 0.3);
    let set =
        TaggedVertexSet::capture(&snap, vec![3, 7, 9], head, vec![0, 1, 2], tail).unwrap();

    let mut arm = Armature::new("rig");
    arm.add_bone("spine", head, tail);

    let mut sets = JointVertexSets::new();
    sets.insert("spine".to_string(), set.clone());

    let deformed = raised(&snap, 0.4);
    let corrected = correct_bones(&mut arm, &deformed, &sets).unwrap();
    assert_eq!(corrected, 1);

    let bone = arm.bone("spine").unwrap();
    let head_centroid = deformed.centroid_of(&set.head_verts).unwrap();
    let expected_x = head_centroid.x + set.head_relative_co[0] as f64;
    let expected_z = head_centroid.z + set.head_relative_co[2] as f64;
    assert!((bone.head.x as f64 - expected_x).abs() < 1e-6);
    assert!((bone.head.z as f64 - expected_z).abs() < 1e-6);

    // The whole rig rode the deformation upward.
    assert!((bone.head.z - (head.z + 0.4)).abs() < 1e-6);
    assert!((bone.tail.z - (tail.z + 0.4)).abs() < 1e-6);
}

#[test]
fn correction_is_stable_under_identity() {
    let snap = make_snapshot();
    let head = Vec3::new(0.5, 1.0, 0.2);
    let tail = Vec3::new(0.6, 1.5, 0.3);
    let set = TaggedVertexSet::capture(&snap, vec![3, 7, 9], head, vec![0, 1], tail).unwrap();

    let mut arm = Armature::new("rig");
    arm.add_bone("spine", head, tail);
    let mut sets = JointVertexSets::new();
    sets.insert("spine".to_string(), set);

    correct_bones(&mut arm, &snap, &sets).unwrap();
    let bone = arm.bone("spine").unwrap();
    assert!((bone.head - head).length() < 1e-6);
    assert!((bone.tail - tail).length() < 1e-6);
}

#[test]
fn correction_missing_bone_restores_mode() {
    let snap = make_snapshot();
    let set =
        TaggedVertexSet::capture(&snap, vec![1, 2], Vec3::ZERO, vec![3, 4], Vec3::ZERO).unwrap();

    let mut arm = Armature::new("rig");
    arm.add_bone("spine", Vec3::ZERO, Vec3::Y);
    arm.set_mode(EditMode::Pose).unwrap();

    let mut sets = JointVertexSets::new();
    sets.insert("no_such_bone".to_string(), set);

    let result = correct_bones(&mut arm, &snap, &sets);
    assert!(matches!(result, Err(SartorError::MissingBone { .. })));
    assert_eq!(arm.mode(), EditMode::Pose);
}

#[test]
fn correction_rejects_out_of_range_vertices() {
    let snap = make_snapshot();
    let mut arm = Armature::new("rig");
    arm.add_bone("spine", Vec3::ZERO, Vec3::Y);

    let mut sets = JointVertexSets::new();
    sets.insert(
        "spine".to_string(),
        TaggedVertexSet {
            head_verts: vec![99],
            head_relative_co: [0.0; 3],
            tail_verts: vec![0],
            tail_relative_co: [0.0; 3],
        },
    );

    assert!(matches!(
        correct_bones(&mut arm, &snap, &sets),
        Err(SartorError::SnapshotSize { .. })
    ));
    assert_eq!(arm.mode(), EditMode::Object);
}

// ─── DriverRetargeter Tests ───────────────────────────────────

fn object_with_driven_key() -> MeshObject {
    let mut snap = MeshSnapshot::default();
    snap.push(0.0, 0.0, 0.0);
    snap.push(1.0, 0.0, 0.0);

    let mut obj = MeshObject::new("body", snap);
    obj.add_shape_key(ShapeKey {
        name: "bend".into(),
        delta_x: vec![0.0, 0.0],
        delta_y: vec![0.1, 0.2],
        delta_z: vec![0.0, 0.0],
        value: 0.0,
        driver: Some(DriverBinding {
            expression: "var * 2.0".into(),
            bone: "forearm".into(),
            transform_type: TransformType::Rotation,
            transform_space: TransformSpace::Local,
        }),
    })
    .unwrap();
    obj
}

#[test]
fn extract_is_destructive() {
    let mut obj = object_with_driven_key();
    let extracted = extract_drivers(&mut obj);

    assert_eq!(extracted.len(), 1);
    let descriptor = &extracted["bend"];
    assert_eq!(descriptor.shape_key, "bend");
    assert_eq!(descriptor.bone, "forearm");
    assert_eq!(descriptor.expression, "var * 2.0");

    // The binding is gone from the object.
    assert!(obj.shape_key("bend").unwrap().driver.is_none());

    // A second extract finds nothing.
    assert!(extract_drivers(&mut obj).is_empty());
}

#[test]
fn extract_then_apply_round_trips() {
    let mut obj = object_with_driven_key();
    let original = obj.shape_key("bend").unwrap().driver.clone().unwrap();
    let extracted = extract_drivers(&mut obj);

    let mut arm = Armature::new("rig2");
    arm.add_bone("forearm", Vec3::ZERO, Vec3::X);

    for descriptor in extracted.values() {
        apply_driver(&mut obj, &arm, descriptor).unwrap();
    }

    let rebound = obj.shape_key("bend").unwrap().driver.clone().unwrap();
    assert_eq!(rebound, original);
}

#[test]
fn apply_missing_bone_creates_no_driver() {
    let mut obj = object_with_driven_key();
    let extracted = extract_drivers(&mut obj);

    let arm = Armature::new("rig2"); // no bones at all
    let descriptor = &extracted["bend"];

    let result = apply_driver(&mut obj, &arm, descriptor);
    assert!(matches!(result, Err(SartorError::MissingBone { .. })));
    assert!(obj.shape_key("bend").unwrap().driver.is_none());
}

#[test]
fn apply_missing_shape_key_errors() {
    let mut obj = object_with_driven_key();
    let mut arm = Armature::new("rig2");
    arm.add_bone("forearm", Vec3::ZERO, Vec3::X);

    let descriptor = DriverDescriptor {
        shape_key: "no_such_key".into(),
        expression: "var".into(),
        bone: "forearm".into(),
        transform_type: TransformType::Location,
        transform_space: TransformSpace::World,
    };
    assert!(matches!(
        apply_driver(&mut obj, &arm, &descriptor),
        Err(SartorError::MissingShapeKey { .. })
    ));
}

#[test]
fn descriptor_serializes_with_schema_fields() {
    let descriptor = DriverDescriptor {
        shape_key: "bend".into(),
        expression: "var * 2.0".into(),
        bone: "forearm".into(),
        transform_type: TransformType::Rotation,
        transform_space: TransformSpace::Local,
    };

    let json = serde_json::to_string(&descriptor).unwrap();
    assert!(json.contains("\"ROTATION\""));
    assert!(json.contains("\"LOCAL\""));

    let back: DriverDescriptor = serde_json::from_str(&json).unwrap();
    assert_eq!(back, descriptor);
}
