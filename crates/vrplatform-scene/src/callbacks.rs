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

//! Per-object interaction callbacks.
//!
//! Callbacks belong to the scene, not to the object data: they are dropped
//! together with their object and are never written to a `.vrgame` file.

use std::fmt;
use vrplatform_core::ObjectId;

/// Invoked when a hand grabs or releases the object.
pub type InteractionCallback = Box<dyn FnMut() + Send>;

/// Invoked with the id of the other object when bounds overlap.
pub type CollisionCallback = Box<dyn FnMut(ObjectId) + Send>;

/// The callbacks registered for one object.
#[derive(Default)]
pub struct ObjectCallbacks {
    /// Fired by [`Scene::notify_grabbed`](crate::Scene::notify_grabbed).
    pub on_grabbed: Option<InteractionCallback>,
    /// Fired by [`Scene::notify_released`](crate::Scene::notify_released).
    pub on_released: Option<InteractionCallback>,
    /// Fired by [`Scene::update`](crate::Scene::update) for every overlapping neighbour.
    pub on_collision: Option<CollisionCallback>,
}

impl ObjectCallbacks {
    /// Whether no callback is registered.
    pub fn is_empty(&self) -> bool {
        self.on_grabbed.is_none() && self.on_released.is_none() && self.on_collision.is_none()
    }

    pub(crate) fn fire_grabbed(&mut self) {
        if let Some(cb) = self.on_grabbed.as_mut() {
            cb();
        }
    }

    pub(crate) fn fire_released(&mut self) {
        if let Some(cb) = self.on_released.as_mut() {
            cb();
        }
    }

    pub(crate) fn fire_collision(&mut self, other: ObjectId) {
        if let Some(cb) = self.on_collision.as_mut() {
            cb(other);
        }
    }
}

impl fmt::Debug for ObjectCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ObjectCallbacks")
            .field("on_grabbed", &self.on_grabbed.is_some())
            .field("on_released", &self.on_released.is_some())
            .field("on_collision", &self.on_collision.is_some())
            .finish()
    }
}
