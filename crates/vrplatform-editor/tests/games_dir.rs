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

//! Saving and publishing games into a games directory.

use vrplatform_core::math::Vec3;
use vrplatform_core::ObjectType;
use vrplatform_editor::{EditorError, GameCreator, PublishManifest};
use vrplatform_scene::Scene;

fn build_scene(creator: &mut GameCreator) -> Scene {
    let mut scene = Scene::new();
    creator.spawn_object(&mut scene, ObjectType::Terrain, Vec3::new(0.0, -1.0, 0.0));
    let cube = creator.spawn_object(&mut scene, ObjectType::Cube, Vec3::new(0.0, 1.0, -3.0));
    creator
        .duplicate_object(&mut scene, cube)
        .expect("cube exists");
    scene
}

#[test]
fn save_game_writes_vrgame_under_games_dir() {
    let dir = tempfile::tempdir().expect("tempdir");
    let games = dir.path().join("games");
    let mut creator = GameCreator::new();
    let scene = build_scene(&mut creator);

    let path = creator
        .save_game(&scene, &games, "MyGame")
        .expect("save");
    assert_eq!(path, games.join("MyGame.vrgame"));
    assert!(path.is_file());

    let mut reloaded = Scene::new();
    reloaded.load(&path).expect("load");
    assert_eq!(reloaded.len(), 3);
}

#[test]
fn save_game_rejects_escaping_names() {
    let dir = tempfile::tempdir().expect("tempdir");
    let creator = GameCreator::new();
    let scene = Scene::new();
    for name in ["", "../outside", "sub/dir"] {
        assert!(matches!(
            creator.save_game(&scene, dir.path(), name),
            Err(EditorError::InvalidGameName(_))
        ));
    }
    assert_eq!(std::fs::read_dir(dir.path()).expect("readable").count(), 0);
}

#[test]
fn publish_game_writes_manifest_next_to_scene() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut creator = GameCreator::new();
    let scene = build_scene(&mut creator);

    let manifest = creator
        .publish_game(&scene, dir.path(), "Arena", "Knock the cubes off the table")
        .expect("publish");
    assert_eq!(manifest.object_count, 3);
    assert_eq!(manifest.scene_file, "Arena.vrgame");

    assert!(dir.path().join("Arena.vrgame").is_file());
    let on_disk = PublishManifest::read(&dir.path().join("Arena.publish.json")).expect("manifest");
    assert_eq!(on_disk, manifest);
    assert_eq!(on_disk.description, "Knock the cubes off the table");
}
