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

use crate::callbacks::ObjectCallbacks;
use crate::event::SceneEvent;
use crate::format::SceneFile;
use crate::persistence::{ObjectDefinition, SceneDefinition, SceneIoError, SceneSerializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::path::Path;
use vrplatform_core::math::{Ray, Vec3};
use vrplatform_core::{EventBus, ObjectId, VrObject};
use vrplatform_xr::StereoRenderer;

/// Search radius used by [`Scene::raycast`] callers that have no better bound.
pub const DEFAULT_RAYCAST_DISTANCE: f32 = 100.0;

/// The live collection of manipulable objects in a VR session.
///
/// Objects are addressed by [`ObjectId`] handles that are never reused, so a
/// handle kept across a removal simply stops resolving.
pub struct Scene {
    objects: BTreeMap<ObjectId, VrObject>,
    callbacks: HashMap<ObjectId, ObjectCallbacks>,
    next_id: u64,
    events: EventBus<SceneEvent>,
}

impl Scene {
    /// Creates an empty scene.
    pub fn new() -> Self {
        log::info!("Creating new scene");
        Self {
            objects: BTreeMap::new(),
            callbacks: HashMap::new(),
            next_id: 0,
            events: EventBus::new(),
        }
    }

    /// Inserts `object` and returns its new handle.
    pub fn add_object(&mut self, object: VrObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        self.events.publish(SceneEvent::ObjectAdded {
            id,
            object_type: object.object_type,
            position: object.position,
        });
        self.objects.insert(id, object);
        log::info!("Added object to scene. Total objects: {}", self.objects.len());
        id
    }

    /// Removes the object and its callbacks. Unknown ids are a no-op.
    pub fn remove_object(&mut self, id: ObjectId) -> Option<VrObject> {
        let removed = self.objects.remove(&id)?;
        self.callbacks.remove(&id);
        self.events.publish(SceneEvent::ObjectRemoved { id });
        log::info!("Removed object {id} from scene");
        Some(removed)
    }

    /// Looks up an object.
    pub fn get(&self, id: ObjectId) -> Option<&VrObject> {
        self.objects.get(&id)
    }

    /// Looks up an object for in-place edits. Edits made this way publish no event.
    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut VrObject> {
        self.objects.get_mut(&id)
    }

    /// Whether `id` resolves to a live object.
    pub fn contains(&self, id: ObjectId) -> bool {
        self.objects.contains_key(&id)
    }

    /// Number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene holds no object.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// All objects in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (ObjectId, &VrObject)> {
        self.objects.iter().map(|(id, obj)| (*id, obj))
    }

    /// All handles in insertion order.
    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.keys().copied().collect()
    }

    /// Removes every object and callback.
    pub fn clear(&mut self) {
        for id in self.objects.keys() {
            self.events.publish(SceneEvent::ObjectRemoved { id: *id });
        }
        self.objects.clear();
        self.callbacks.clear();
    }

    /// Moves an object and publishes [`SceneEvent::ObjectMoved`].
    ///
    /// Returns `false` if `id` is unknown.
    pub fn set_position(&mut self, id: ObjectId, position: Vec3) -> bool {
        match self.objects.get_mut(&id) {
            Some(obj) => {
                obj.position = position;
                self.events.publish(SceneEvent::ObjectMoved { id, position });
                true
            }
            None => false,
        }
    }

    /// The bus that receives this scene's change notifications.
    pub fn events(&self) -> &EventBus<SceneEvent> {
        &self.events
    }

    /// Advances the simulation by `dt` seconds.
    ///
    /// Every object integrates gravity first. Then each pair of objects whose
    /// bounds overlap fires the collision callback of both objects, once per
    /// call for as long as the overlap lasts.
    pub fn update(&mut self, dt: f32) {
        for obj in self.objects.values_mut() {
            obj.update(dt);
        }

        let pairs = self.overlapping_pairs();
        for (a, b) in pairs {
            log::trace!("Collision between {a} and {b}");
            if let Some(cbs) = self.callbacks.get_mut(&a) {
                cbs.fire_collision(b);
            }
            if let Some(cbs) = self.callbacks.get_mut(&b) {
                cbs.fire_collision(a);
            }
        }
    }

    fn overlapping_pairs(&self) -> Vec<(ObjectId, ObjectId)> {
        let bounds: Vec<_> = self
            .objects
            .iter()
            .map(|(id, obj)| (*id, obj.bounds()))
            .collect();

        let mut pairs = Vec::new();
        for (i, (id_a, aabb_a)) in bounds.iter().enumerate() {
            for (id_b, aabb_b) in &bounds[i + 1..] {
                if aabb_a.intersects_aabb(aabb_b) {
                    pairs.push((*id_a, *id_b));
                }
            }
        }
        pairs
    }

    /// Issues one draw call per object.
    pub fn render(&self, renderer: &mut dyn StereoRenderer) {
        for (id, obj) in &self.objects {
            renderer.draw_object(*id, obj);
        }
    }

    /// Proximity pick: the object whose position is nearest to `origin`.
    ///
    /// An object only counts when its distance is strictly below the best
    /// distance so far, which starts at `max_distance`. `direction` does not
    /// take part in the test; use [`Scene::raycast_bounds`] for a real ray.
    pub fn raycast(&self, origin: Vec3, _direction: Vec3, max_distance: f32) -> Option<ObjectId> {
        let mut closest_hit = None;
        let mut closest_distance = max_distance;

        for (id, obj) in &self.objects {
            let distance = obj.position.distance(origin);
            if distance < closest_distance {
                closest_distance = distance;
                closest_hit = Some(*id);
            }
        }

        closest_hit
    }

    /// Ray against object bounds: the nearest hit within `max_distance`.
    pub fn raycast_bounds(&self, ray: &Ray, max_distance: f32) -> Option<(ObjectId, f32)> {
        self.objects
            .iter()
            .filter_map(|(id, obj)| ray.intersect_aabb(&obj.bounds()).map(|t| (*id, t)))
            .filter(|(_, t)| *t <= max_distance)
            .min_by(|a, b| a.1.total_cmp(&b.1))
    }

    fn callbacks_for(&mut self, id: ObjectId) -> Option<&mut ObjectCallbacks> {
        if !self.objects.contains_key(&id) {
            return None;
        }
        Some(self.callbacks.entry(id).or_default())
    }

    /// Registers the grab callback of `id`, replacing any previous one.
    ///
    /// Returns `false` if `id` is unknown.
    pub fn on_grabbed<F>(&mut self, id: ObjectId, callback: F) -> bool
    where
        F: FnMut() + Send + 'static,
    {
        self.callbacks_for(id)
            .map(|cbs| cbs.on_grabbed = Some(Box::new(callback)))
            .is_some()
    }

    /// Registers the release callback of `id`, replacing any previous one.
    pub fn on_released<F>(&mut self, id: ObjectId, callback: F) -> bool
    where
        F: FnMut() + Send + 'static,
    {
        self.callbacks_for(id)
            .map(|cbs| cbs.on_released = Some(Box::new(callback)))
            .is_some()
    }

    /// Registers the collision callback of `id`, replacing any previous one.
    pub fn on_collision<F>(&mut self, id: ObjectId, callback: F) -> bool
    where
        F: FnMut(ObjectId) + Send + 'static,
    {
        self.callbacks_for(id)
            .map(|cbs| cbs.on_collision = Some(Box::new(callback)))
            .is_some()
    }

    /// Marks `id` as grabbed and fires its grab callback.
    pub fn notify_grabbed(&mut self, id: ObjectId) -> bool {
        let Some(obj) = self.objects.get_mut(&id) else {
            return false;
        };
        obj.is_grabbed = true;
        if let Some(cbs) = self.callbacks.get_mut(&id) {
            cbs.fire_grabbed();
        }
        true
    }

    /// Marks `id` as released and fires its release callback.
    pub fn notify_released(&mut self, id: ObjectId) -> bool {
        let Some(obj) = self.objects.get_mut(&id) else {
            return false;
        };
        obj.is_grabbed = false;
        if let Some(cbs) = self.callbacks.get_mut(&id) {
            cbs.fire_released();
        }
        true
    }

    /// Captures the persistable state of every object.
    pub fn to_definition(&self) -> SceneDefinition {
        SceneDefinition {
            objects: self
                .objects
                .iter()
                .map(|(id, obj)| ObjectDefinition::from_object(*id, obj))
                .collect(),
        }
    }

    /// Replaces the contents with `definition`. Objects get fresh handles.
    pub fn apply_definition(&mut self, definition: &SceneDefinition) {
        self.clear();
        for def in &definition.objects {
            self.add_object(def.to_object());
        }
    }

    /// Writes the scene to `path`, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SceneIoError> {
        let path = path.as_ref();
        log::info!("Saving scene to: {}", path.display());

        let file = SceneSerializer::default().encode(&self.to_definition())?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| SceneIoError::io(parent, e))?;
        }
        std::fs::write(path, file.to_bytes()).map_err(|e| SceneIoError::io(path, e))
    }

    /// Replaces the contents with the scene stored at `path`.
    ///
    /// The file is fully validated first; on error the scene is left untouched.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<(), SceneIoError> {
        let path = path.as_ref();
        log::info!("Loading scene from: {}", path.display());

        let bytes = std::fs::read(path).map_err(|e| SceneIoError::io(path, e))?;
        let file = SceneFile::from_bytes(&bytes)?;
        let definition = SceneSerializer::default().decode(&file)?;
        self.apply_definition(&definition);

        log::info!("Loaded {} objects", self.objects.len());
        Ok(())
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("objects", &self.objects.len())
            .field("callbacks", &self.callbacks.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
