// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! `.vrgame` save/load through the filesystem.

use vrplatform_core::math::{Quaternion, Vec3, FRAC_PI_2};
use vrplatform_core::{ObjectType, VrObject};
use vrplatform_scene::format::HEADER_MAGIC_BYTES;
use vrplatform_scene::{Scene, SceneEvent, SceneIoError};

fn populated_scene() -> Scene {
    let mut scene = Scene::new();
    scene.add_object(
        VrObject::new(ObjectType::Terrain)
            .with_position(Vec3::new(0.0, -1.0, 0.0))
            .with_scale(Vec3::new(20.0, 0.1, 20.0))
            .into_static(),
    );
    let mut sphere = VrObject::new(ObjectType::Sphere).with_position(Vec3::new(1.0, 2.0, -3.0));
    sphere.rotation = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
    sphere.mass = 2.5;
    sphere.is_grabbable = false;
    sphere.mesh_id = 7;
    sphere.is_grabbed = true;
    scene.add_object(sphere);
    scene
}

#[test]
fn save_then_load_restores_objects() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("level.vrgame");

    let original = populated_scene();
    original.save(&path).expect("save");

    let bytes = std::fs::read(&path).expect("file written");
    assert_eq!(&bytes[..8], &HEADER_MAGIC_BYTES);

    let mut loaded = Scene::new();
    loaded.load(&path).expect("load");
    assert_eq!(loaded.len(), 2);

    let restored: Vec<&VrObject> = loaded.iter().map(|(_, o)| o).collect();
    let expected: Vec<&VrObject> = original.iter().map(|(_, o)| o).collect();
    assert_eq!(restored[0], expected[0]);
    assert_eq!(restored[1].rotation, expected[1].rotation);
    assert_eq!(restored[1].mass, 2.5);
    assert!(!restored[1].is_grabbable);
    assert_eq!(restored[1].mesh_id, 7);
    // Grab state is runtime-only.
    assert!(!restored[1].is_grabbed);
}

#[test]
fn load_replaces_contents_with_fresh_ids() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("level.vrgame");
    populated_scene().save(&path).expect("save");

    let mut scene = Scene::new();
    for _ in 0..3 {
        scene.add_object(VrObject::new(ObjectType::Cube));
    }
    let old_ids = scene.ids();
    scene.events().drain();

    scene.load(&path).expect("load");
    assert_eq!(scene.len(), 2);
    for id in scene.ids() {
        assert!(!old_ids.contains(&id));
    }

    let events = scene.events().drain();
    let removed = events
        .iter()
        .filter(|e| matches!(e, SceneEvent::ObjectRemoved { .. }))
        .count();
    let added = events
        .iter()
        .filter(|e| matches!(e, SceneEvent::ObjectAdded { .. }))
        .count();
    assert_eq!((removed, added), (3, 2));
}

#[test]
fn load_missing_file_is_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut scene = Scene::new();
    let err = scene
        .load(dir.path().join("absent.vrgame"))
        .expect_err("missing file");
    assert!(matches!(err, SceneIoError::Io { .. }));
}

#[test]
fn failed_load_leaves_scene_untouched() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("junk.vrgame");
    std::fs::write(&path, b"this is definitely not a scene file at all, sorry!").expect("write");

    let mut scene = populated_scene();
    let err = scene.load(&path).expect_err("junk");
    assert!(matches!(err, SceneIoError::BadMagic));
    assert_eq!(scene.len(), 2);
}

#[test]
fn truncated_file_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("cut.vrgame");
    populated_scene().save(&path).expect("save");

    let bytes = std::fs::read(&path).expect("read");
    std::fs::write(&path, &bytes[..bytes.len() - 10]).expect("rewrite");

    let mut scene = Scene::new();
    assert!(matches!(
        scene.load(&path),
        Err(SceneIoError::Truncated { .. })
    ));
}
