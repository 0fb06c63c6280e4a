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

//! The sample scene the runtime starts with.

use vrplatform_core::math::Vec3;
use vrplatform_core::{ObjectId, ObjectType, VrObject};
use vrplatform_scene::Scene;

/// Number of interactive cubes in the sample scene.
pub const CUBE_COUNT: usize = 5;

/// Handles of the objects created by [`example_scene`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleScene {
    /// The static ground slab.
    pub ground: ObjectId,
    /// The grabbable cubes, left to right.
    pub cubes: Vec<ObjectId>,
    /// The grabbable sphere behind the cubes.
    pub sphere: ObjectId,
    /// The overhead light.
    pub light: ObjectId,
}

/// Populates `scene` with a ground slab, a row of grabbable cubes, a sphere
/// and a light.
pub fn example_scene(scene: &mut Scene) -> ExampleScene {
    log::info!("Creating sample VR scene...");

    let ground = scene.add_object(
        VrObject::new(ObjectType::Cube)
            .with_position(Vec3::new(0.0, -1.0, 0.0))
            .with_scale(Vec3::new(20.0, 0.1, 20.0))
            .into_static(),
    );
    log::info!("Ground plane added");

    let cubes = (0..CUBE_COUNT)
        .map(|i| {
            let mut cube = VrObject::new(ObjectType::Cube)
                .with_position(Vec3::new(i as f32 * 2.0 - 4.0, 1.0, -3.0))
                .with_scale(Vec3::splat(0.5));
            cube.is_grabbable = true;

            let id = scene.add_object(cube);
            scene.on_grabbed(id, move || log::info!("Cube {i} grabbed!"));
            scene.on_released(id, move || log::info!("Cube {i} released!"));
            id
        })
        .collect();
    log::info!("{CUBE_COUNT} interactive cubes added");

    let mut sphere = VrObject::new(ObjectType::Sphere)
        .with_position(Vec3::new(0.0, 2.0, -5.0))
        .with_scale(Vec3::splat(0.8));
    sphere.is_grabbable = true;
    let sphere = scene.add_object(sphere);
    log::info!("Interactive sphere added");

    let mut light = VrObject::new(ObjectType::Light)
        .with_position(Vec3::new(0.0, 5.0, 0.0))
        .into_static();
    light.is_grabbable = false;
    light.is_interactable = false;
    let light = scene.add_object(light);
    log::info!("Light added");

    ExampleScene {
        ground,
        cubes,
        sphere,
        light,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vrplatform_core::math::vec3_approx_eq;

    #[test]
    fn test_layout() {
        let mut scene = Scene::new();
        let demo = example_scene(&mut scene);
        assert_eq!(scene.len(), CUBE_COUNT + 3);

        let ground = scene.get(demo.ground).unwrap();
        assert_eq!(ground.object_type, ObjectType::Cube);
        assert!(ground.is_kinematic);
        assert!(vec3_approx_eq(ground.scale, Vec3::new(20.0, 0.1, 20.0)));

        let xs: Vec<f32> = demo
            .cubes
            .iter()
            .map(|id| scene.get(*id).unwrap().position.x)
            .collect();
        assert_eq!(xs, [-4.0, -2.0, 0.0, 2.0, 4.0]);
        for id in &demo.cubes {
            let cube = scene.get(*id).unwrap();
            assert!(cube.is_grabbable);
            assert!(vec3_approx_eq(cube.scale, Vec3::splat(0.5)));
        }

        let sphere = scene.get(demo.sphere).unwrap();
        assert_eq!(sphere.object_type, ObjectType::Sphere);
        assert!(sphere.is_grabbable);
        assert!(vec3_approx_eq(sphere.position, Vec3::new(0.0, 2.0, -5.0)));
        assert!(vec3_approx_eq(sphere.scale, Vec3::splat(0.8)));

        assert_eq!(scene.get(demo.light).unwrap().object_type, ObjectType::Light);
    }

    #[test]
    fn test_cubes_answer_grab_and_release() {
        let mut scene = Scene::new();
        let demo = example_scene(&mut scene);
        let cube = demo.cubes[2];

        assert!(scene.notify_grabbed(cube));
        assert!(scene.get(cube).unwrap().is_grabbed);
        assert!(scene.notify_released(cube));
        assert!(!scene.get(cube).unwrap().is_grabbed);
    }

    #[test]
    fn test_ground_stays_put() {
        let mut scene = Scene::new();
        let demo = example_scene(&mut scene);
        scene.update(1.0);
        assert!(vec3_approx_eq(
            scene.get(demo.ground).unwrap().position,
            Vec3::new(0.0, -1.0, 0.0)
        ));
    }
}
