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

use crate::publish::{self, PublishManifest};
use crate::{EditorError, Tool};
use std::path::{Path, PathBuf};
use vrplatform_core::math::{Quaternion, Vec3};
use vrplatform_core::{ObjectId, ObjectType, VrObject};
use vrplatform_scene::{Scene, DEFAULT_RAYCAST_DISTANCE};
use vrplatform_xr::{Gizmo, HandPose, HandTracker, HandType, StereoRenderer};

/// Lower bound of the scale factor applied by the scale tool.
const MIN_SCALE_FACTOR: f32 = 0.1;

/// Offset of a duplicate from its source object.
const DUPLICATE_OFFSET: Vec3 = Vec3::new(1.0, 0.0, 0.0);

/// Transform of the selection when it was picked up.
#[derive(Debug, Clone, Copy, PartialEq)]
struct OriginalTransform {
    position: Vec3,
    rotation: Quaternion,
    scale: Vec3,
}

impl OriginalTransform {
    fn of(object: &VrObject) -> Self {
        Self {
            position: object.position,
            rotation: object.rotation,
            scale: object.scale,
        }
    }
}

/// The in-VR scene editor.
#[derive(Debug, Default)]
pub struct GameCreator {
    selected: Option<ObjectId>,
    tool: Tool,
    play_mode: bool,
    original: Option<OriginalTransform>,
    grab_pose: Option<HandPose>,
}

impl GameCreator {
    /// Creates an editor in edit mode with the select tool and nothing selected.
    pub fn new() -> Self {
        log::info!("Game creator initialized");
        Self::default()
    }

    /// The current selection.
    pub fn selected(&self) -> Option<ObjectId> {
        self.selected
    }

    /// The active tool.
    pub fn tool(&self) -> Tool {
        self.tool
    }

    /// Per-frame editor logic, driven by the right hand. Does nothing in play mode.
    ///
    /// 1. Trigger pressed with nothing selected: pick the object nearest to the hand.
    /// 2. Selection held with grip: apply the active tool.
    /// 3. Selection held without grip: release it.
    pub fn update(&mut self, _dt: f32, hands: &dyn HandTracker, scene: &mut Scene) {
        if self.play_mode {
            return;
        }
        let hand = hands.hand_pose(HandType::Right);

        if hand.is_trigger_pressed && self.selected.is_none() {
            if let Some(hit) = scene.raycast(hand.position, Vec3::FORWARD, DEFAULT_RAYCAST_DISTANCE)
            {
                if self.select_object(scene, hit).is_ok() {
                    self.grab_pose = Some(hand);
                }
            }
        }

        if let Some(id) = self.selected {
            if !scene.contains(id) {
                // Removed behind the editor's back.
                self.clear_selection();
                return;
            }
            if hand.is_gripping {
                self.manipulate(id, &hand, scene);
            } else {
                self.deselect_object(scene);
            }
        }
    }

    fn manipulate(&mut self, id: ObjectId, hand: &HandPose, scene: &mut Scene) {
        let grab = *self.grab_pose.get_or_insert(*hand);
        let Some(original) = self.original else {
            return;
        };

        match self.tool {
            Tool::Move => {
                scene.set_position(id, hand.position);
            }
            Tool::Rotate => {
                if let Some(obj) = scene.get_mut(id) {
                    let delta = hand.rotation * grab.rotation.inverse();
                    obj.rotation = (delta * original.rotation).normalize();
                }
            }
            Tool::Scale => {
                if let Some(obj) = scene.get_mut(id) {
                    let dy = hand.position.y - grab.position.y;
                    let factor = (1.0 + dy).max(MIN_SCALE_FACTOR);
                    obj.scale = original.scale * factor;
                }
            }
            Tool::Select | Tool::Spawn => {}
        }
    }

    /// Selects `id`, remembering its transform for [`GameCreator::cancel_manipulation`].
    ///
    /// A previous selection is released first. The object is marked grabbed and
    /// its grab callback fires.
    pub fn select_object(&mut self, scene: &mut Scene, id: ObjectId) -> Result<(), EditorError> {
        let original = scene
            .get(id)
            .map(OriginalTransform::of)
            .ok_or(EditorError::UnknownObject(id))?;

        if self.selected.is_some_and(|current| current != id) {
            self.deselect_object(scene);
        }

        self.selected = Some(id);
        self.original = Some(original);
        self.grab_pose = None;
        scene.notify_grabbed(id);
        log::info!("Object {id} selected");
        Ok(())
    }

    /// Releases the selection, firing its release callback. No-op without a selection.
    pub fn deselect_object(&mut self, scene: &mut Scene) {
        if let Some(id) = self.selected {
            scene.notify_released(id);
            self.clear_selection();
            log::info!("Object {id} deselected");
        }
    }

    /// Restores the selection's transform from when it was picked, then releases it.
    pub fn cancel_manipulation(&mut self, scene: &mut Scene) {
        if let (Some(id), Some(original)) = (self.selected, self.original) {
            if let Some(obj) = scene.get_mut(id) {
                obj.rotation = original.rotation;
                obj.scale = original.scale;
            }
            scene.set_position(id, original.position);
            log::info!("Manipulation of {id} cancelled");
        }
        self.deselect_object(scene);
    }

    /// Forgets the selection without touching any scene. Used when the scene
    /// the selection pointed into has been replaced.
    pub fn forget_selection(&mut self) {
        self.clear_selection();
    }

    fn clear_selection(&mut self) {
        self.selected = None;
        self.original = None;
        self.grab_pose = None;
    }

    /// Draws the gizmo of the active tool around the selection, in edit mode only.
    pub fn render(&self, renderer: &mut dyn StereoRenderer, scene: &Scene) {
        if self.play_mode {
            return;
        }
        let Some(id) = self.selected else {
            return;
        };
        if let Some(obj) = scene.get(id) {
            renderer.draw_gizmo(&Gizmo {
                target: id,
                kind: self.tool.gizmo_kind(),
                position: obj.position,
            });
        }
    }

    /// Adds a default object of `object_type` at `position`.
    pub fn spawn_object(
        &mut self,
        scene: &mut Scene,
        object_type: ObjectType,
        position: Vec3,
    ) -> ObjectId {
        let id = scene.add_object(VrObject::new(object_type).with_position(position));
        log::info!(
            "Spawned new {object_type} at position: {}, {}, {}",
            position.x,
            position.y,
            position.z
        );
        id
    }

    /// Removes `id` from the scene, dropping the selection if it pointed there.
    pub fn delete_object(
        &mut self,
        scene: &mut Scene,
        id: ObjectId,
    ) -> Result<VrObject, EditorError> {
        let removed = scene
            .remove_object(id)
            .ok_or(EditorError::UnknownObject(id))?;
        if self.selected == Some(id) {
            self.clear_selection();
        }
        log::info!("Object {id} deleted");
        Ok(removed)
    }

    /// Copies type, rotation and scale of `id` into a new object one unit along +X.
    pub fn duplicate_object(
        &mut self,
        scene: &mut Scene,
        id: ObjectId,
    ) -> Result<ObjectId, EditorError> {
        let source = scene.get(id).ok_or(EditorError::UnknownObject(id))?;
        let mut copy =
            VrObject::new(source.object_type).with_position(source.position + DUPLICATE_OFFSET);
        copy.rotation = source.rotation;
        copy.scale = source.scale;

        let new_id = scene.add_object(copy);
        log::info!("Object {id} duplicated as {new_id}");
        Ok(new_id)
    }

    fn set_tool(&mut self, tool: Tool) {
        self.tool = tool;
        log::info!("{tool} tool enabled");
    }

    /// Switches to the select tool.
    pub fn enable_select_tool(&mut self) {
        self.set_tool(Tool::Select);
    }

    /// Switches to the move tool.
    pub fn enable_move_tool(&mut self) {
        self.set_tool(Tool::Move);
    }

    /// Switches to the rotate tool.
    pub fn enable_rotate_tool(&mut self) {
        self.set_tool(Tool::Rotate);
    }

    /// Switches to the scale tool.
    pub fn enable_scale_tool(&mut self) {
        self.set_tool(Tool::Scale);
    }

    /// Switches to the spawn tool.
    pub fn enable_spawn_tool(&mut self) {
        self.set_tool(Tool::Spawn);
    }

    /// Enters play mode: editor input and gizmos are suspended.
    pub fn enter_play_mode(&mut self) {
        self.play_mode = true;
        log::info!("Entered PLAY MODE - Testing game...");
    }

    /// Returns to edit mode.
    pub fn exit_play_mode(&mut self) {
        self.play_mode = false;
        log::info!("Exited play mode - Back to editing");
    }

    /// Whether play mode is active.
    pub fn is_in_play_mode(&self) -> bool {
        self.play_mode
    }

    /// Saves `scene` as `<games_dir>/<name>.vrgame` and returns the written path.
    pub fn save_game(
        &self,
        scene: &Scene,
        games_dir: &Path,
        name: &str,
    ) -> Result<PathBuf, EditorError> {
        let path = publish::game_path(games_dir, name)?;
        scene.save(&path)?;
        log::info!("Game saved: {name}");
        Ok(path)
    }

    /// Saves the game, then writes `<name>.publish.json` next to it.
    pub fn publish_game(
        &self,
        scene: &Scene,
        games_dir: &Path,
        name: &str,
        description: &str,
    ) -> Result<PublishManifest, EditorError> {
        self.save_game(scene, games_dir, name)?;

        let manifest = PublishManifest::new(name, description, scene.len());
        manifest.write(&publish::manifest_path(games_dir, name)?)?;

        log::info!("Publishing game: {name}");
        log::info!("Description: {description}");
        // The upload to the community server would start here.
        Ok(manifest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use vrplatform_core::math::{approx_eq, approx_eq_eps, vec3_approx_eq, FRAC_PI_2};
    use vrplatform_xr::{Eye, GizmoKind, HeadlessStereoRenderer, SimulatedHandTracker};

    /// Same orientation, allowing for the double cover.
    fn quat_like(a: Quaternion, b: Quaternion) -> bool {
        approx_eq_eps(a.dot(b).abs(), 1.0, 1e-4)
    }

    fn right_hand(tracker: &mut SimulatedHandTracker) -> &mut HandPose {
        tracker.pose_mut(HandType::Right)
    }

    fn scene_with_cube(at: Vec3) -> (Scene, ObjectId) {
        let mut scene = Scene::new();
        let id = scene.add_object(VrObject::new(ObjectType::Cube).with_position(at).into_static());
        (scene, id)
    }

    #[test]
    fn test_trigger_selects_nearest_object() {
        let (mut scene, id) = scene_with_cube(Vec3::new(0.0, 1.0, -2.0));
        let mut tracker = SimulatedHandTracker::new();
        let mut creator = GameCreator::new();

        right_hand(&mut tracker).is_trigger_pressed = true;
        right_hand(&mut tracker).is_gripping = true;
        creator.update(0.016, &tracker, &mut scene);

        assert_eq!(creator.selected(), Some(id));
        assert_eq!(scene.get(id).map(|o| o.is_grabbed), Some(true));
    }

    #[test]
    fn test_selection_without_grip_is_dropped_same_frame() {
        let (mut scene, id) = scene_with_cube(Vec3::ZERO);
        let mut tracker = SimulatedHandTracker::new();
        let mut creator = GameCreator::new();

        right_hand(&mut tracker).is_trigger_pressed = true;
        creator.update(0.016, &tracker, &mut scene);

        assert_eq!(creator.selected(), None);
        assert_eq!(scene.get(id).map(|o| o.is_grabbed), Some(false));
    }

    #[test]
    fn test_move_tool_follows_hand() {
        let (mut scene, id) = scene_with_cube(Vec3::ZERO);
        let mut tracker = SimulatedHandTracker::new();
        let mut creator = GameCreator::new();
        creator.enable_move_tool();

        {
            let hand = right_hand(&mut tracker);
            hand.is_trigger_pressed = true;
            hand.is_gripping = true;
            hand.position = Vec3::new(0.5, 1.0, 0.0);
        }
        creator.update(0.016, &tracker, &mut scene);
        assert_eq!(scene.get(id).map(|o| o.position), Some(Vec3::new(0.5, 1.0, 0.0)));

        right_hand(&mut tracker).position = Vec3::new(2.0, 1.5, -1.0);
        creator.update(0.016, &tracker, &mut scene);
        assert_eq!(scene.get(id).map(|o| o.position), Some(Vec3::new(2.0, 1.5, -1.0)));
    }

    #[test]
    fn test_rotate_tool_applies_relative_hand_rotation() {
        let (mut scene, id) = scene_with_cube(Vec3::ZERO);
        let start = Quaternion::from_axis_angle(Vec3::X, FRAC_PI_2);
        if let Some(obj) = scene.get_mut(id) {
            obj.rotation = start;
        }
        let mut tracker = SimulatedHandTracker::new();
        let mut creator = GameCreator::new();
        creator.enable_rotate_tool();

        {
            let hand = right_hand(&mut tracker);
            hand.is_trigger_pressed = true;
            hand.is_gripping = true;
            hand.rotation = Quaternion::from_axis_angle(Vec3::Z, 0.3);
        }
        creator.update(0.016, &tracker, &mut scene);
        let after_grab = scene.get(id).map(|o| o.rotation).unwrap_or_default();
        assert!(quat_like(after_grab, start));

        let turn = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
        right_hand(&mut tracker).rotation = turn * Quaternion::from_axis_angle(Vec3::Z, 0.3);
        creator.update(0.016, &tracker, &mut scene);

        let rotated = scene.get(id).map(|o| o.rotation).unwrap_or_default();
        assert!(quat_like(rotated, turn * start));
    }

    #[test]
    fn test_scale_tool_uses_vertical_displacement() {
        let (mut scene, id) = scene_with_cube(Vec3::ZERO);
        let mut tracker = SimulatedHandTracker::new();
        let mut creator = GameCreator::new();
        creator.enable_scale_tool();

        {
            let hand = right_hand(&mut tracker);
            hand.is_trigger_pressed = true;
            hand.is_gripping = true;
            hand.position = Vec3::new(0.0, 1.0, 0.0);
        }
        creator.update(0.016, &tracker, &mut scene);

        right_hand(&mut tracker).position = Vec3::new(0.0, 1.5, 0.0);
        creator.update(0.016, &tracker, &mut scene);
        let scale = scene.get(id).map(|o| o.scale).unwrap_or_default();
        assert!(vec3_approx_eq(scale, Vec3::splat(1.5)));

        // Dragging far down clamps to the minimum factor.
        right_hand(&mut tracker).position = Vec3::new(0.0, -5.0, 0.0);
        creator.update(0.016, &tracker, &mut scene);
        let scale = scene.get(id).map(|o| o.scale).unwrap_or_default();
        assert!(approx_eq(scale.x, 0.1));
    }

    #[test]
    fn test_play_mode_suspends_editing_and_gizmos() {
        let (mut scene, id) = scene_with_cube(Vec3::ZERO);
        let mut tracker = SimulatedHandTracker::new();
        let mut creator = GameCreator::new();
        creator.select_object(&mut scene, id).expect("known id");

        creator.enter_play_mode();
        assert!(creator.is_in_play_mode());
        right_hand(&mut tracker).is_trigger_pressed = true;
        creator.update(0.016, &tracker, &mut scene);
        // Still selected: updates are skipped entirely.
        assert_eq!(creator.selected(), Some(id));

        let mut renderer = HeadlessStereoRenderer::new();
        renderer.initialize(4, 4).expect("init");
        renderer.begin_frame();
        renderer.render_eye(Eye::Left);
        creator.render(&mut renderer, &scene);
        creator.exit_play_mode();
        creator.render(&mut renderer, &scene);
        renderer.end_frame();
        assert_eq!(renderer.last_frame_stats().gizmos_drawn, 1);
    }

    #[test]
    fn test_gizmo_follows_tool() {
        let (mut scene, id) = scene_with_cube(Vec3::new(1.0, 2.0, 3.0));
        let mut creator = GameCreator::new();
        creator.select_object(&mut scene, id).expect("known id");
        creator.enable_rotate_tool();
        assert_eq!(creator.tool().gizmo_kind(), GizmoKind::Rotate);
        assert_eq!(creator.tool(), Tool::Rotate);
    }

    #[test]
    fn test_select_unknown_is_error() {
        let mut scene = Scene::new();
        let mut creator = GameCreator::new();
        assert!(matches!(
            creator.select_object(&mut scene, ObjectId(3)),
            Err(EditorError::UnknownObject(ObjectId(3)))
        ));
    }

    #[test]
    fn test_reselect_releases_previous() {
        let mut scene = Scene::new();
        let a = scene.add_object(VrObject::new(ObjectType::Cube));
        let b = scene.add_object(VrObject::new(ObjectType::Sphere));
        let releases = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&releases);
        scene.on_released(a, move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut creator = GameCreator::new();
        creator.select_object(&mut scene, a).expect("known id");
        creator.select_object(&mut scene, b).expect("known id");
        assert_eq!(creator.selected(), Some(b));
        assert_eq!(releases.load(Ordering::SeqCst), 1);
        assert_eq!(scene.get(a).map(|o| o.is_grabbed), Some(false));
    }

    #[test]
    fn test_cancel_restores_transform() {
        let (mut scene, id) = scene_with_cube(Vec3::new(1.0, 1.0, 1.0));
        let mut creator = GameCreator::new();
        creator.select_object(&mut scene, id).expect("known id");
        scene.set_position(id, Vec3::new(9.0, 9.0, 9.0));
        if let Some(obj) = scene.get_mut(id) {
            obj.scale = Vec3::splat(4.0);
        }

        creator.cancel_manipulation(&mut scene);
        let obj = scene.get(id).cloned().unwrap_or_default();
        assert_eq!(obj.position, Vec3::new(1.0, 1.0, 1.0));
        assert_eq!(obj.scale, Vec3::ONE);
        assert!(!obj.is_grabbed);
        assert_eq!(creator.selected(), None);
    }

    #[test]
    fn test_spawn_delete_duplicate() {
        let mut scene = Scene::new();
        let mut creator = GameCreator::new();
        let id = creator.spawn_object(&mut scene, ObjectType::Cylinder, Vec3::new(3.0, 1.0, -3.0));
        if let Some(obj) = scene.get_mut(id) {
            obj.scale = Vec3::splat(2.0);
            obj.mass = 40.0;
        }

        let copy = creator.duplicate_object(&mut scene, id).expect("known id");
        let dup = scene.get(copy).cloned().unwrap_or_default();
        assert_eq!(dup.object_type, ObjectType::Cylinder);
        assert_eq!(dup.position, Vec3::new(4.0, 1.0, -3.0));
        assert_eq!(dup.scale, Vec3::splat(2.0));
        assert_eq!(dup.mass, 1.0);

        creator.select_object(&mut scene, id).expect("known id");
        creator.delete_object(&mut scene, id).expect("known id");
        assert_eq!(creator.selected(), None);
        assert!(!scene.contains(id));
        assert!(matches!(
            creator.delete_object(&mut scene, id),
            Err(EditorError::UnknownObject(_))
        ));
        assert!(creator.duplicate_object(&mut scene, id).is_err());
    }
}
