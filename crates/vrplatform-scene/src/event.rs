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

//! Change notifications published by a [`Scene`](crate::Scene).

use vrplatform_core::math::Vec3;
use vrplatform_core::{ObjectId, ObjectType};

/// Something structural happened to the scene.
///
/// Only explicit edits are reported. Gravity integration does not publish
/// [`SceneEvent::ObjectMoved`].
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    /// An object was inserted.
    ObjectAdded {
        /// The new object's handle.
        id: ObjectId,
        /// What kind of object it is.
        object_type: ObjectType,
        /// Where it was placed.
        position: Vec3,
    },
    /// An object was removed.
    ObjectRemoved {
        /// The removed object's handle.
        id: ObjectId,
    },
    /// An object was repositioned through [`Scene::set_position`](crate::Scene::set_position).
    ObjectMoved {
        /// The moved object's handle.
        id: ObjectId,
        /// Its new position.
        position: Vec3,
    },
}

impl SceneEvent {
    /// The object the event is about.
    pub fn object_id(&self) -> ObjectId {
        match self {
            SceneEvent::ObjectAdded { id, .. }
            | SceneEvent::ObjectRemoved { id }
            | SceneEvent::ObjectMoved { id, .. } => *id,
        }
    }
}
