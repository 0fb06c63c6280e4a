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

//! Scene objects and their physical properties.

use crate::math::{Aabb, Quaternion, Vec3, GRAVITY};
use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of thing a [`VrObject`] represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectType {
    /// A box primitive.
    Cube,
    /// A sphere primitive.
    Sphere,
    /// A cylinder primitive.
    Cylinder,
    /// An imported mesh, identified by `mesh_id`.
    CustomMesh,
    /// Ground geometry.
    Terrain,
    /// A light source.
    Light,
    /// A positional sound emitter.
    AudioSource,
    /// A game-logic trigger volume.
    TriggerVolume,
}

impl ObjectType {
    /// All variants, in declaration order.
    pub const ALL: [ObjectType; 8] = [
        ObjectType::Cube,
        ObjectType::Sphere,
        ObjectType::Cylinder,
        ObjectType::CustomMesh,
        ObjectType::Terrain,
        ObjectType::Light,
        ObjectType::AudioSource,
        ObjectType::TriggerVolume,
    ];
}

impl fmt::Display for ObjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectType::Cube => "Cube",
            ObjectType::Sphere => "Sphere",
            ObjectType::Cylinder => "Cylinder",
            ObjectType::CustomMesh => "CustomMesh",
            ObjectType::Terrain => "Terrain",
            ObjectType::Light => "Light",
            ObjectType::AudioSource => "AudioSource",
            ObjectType::TriggerVolume => "TriggerVolume",
        };
        f.write_str(name)
    }
}

/// Stable handle to an object owned by a scene.
///
/// Ids are handed out by the scene and are never reused within its lifetime,
/// so a stale handle simply stops resolving once its object is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A placeable, simulated object in a VR scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VrObject {
    /// What this object is.
    pub object_type: ObjectType,
    /// World-space position.
    pub position: Vec3,
    /// World-space orientation.
    pub rotation: Quaternion,
    /// Per-axis scale. The object's bounds are `scale` wide, centered on `position`.
    pub scale: Vec3,
    /// Mass in kilograms.
    pub mass: f32,
    /// Whether gravity applies during [`VrObject::update`].
    pub use_gravity: bool,
    /// Kinematic objects are never moved by the simulation.
    pub is_kinematic: bool,
    /// Whether a hand may grab this object.
    pub is_grabbable: bool,
    /// Whether this object reacts to interaction at all.
    pub is_interactable: bool,
    /// Set while a hand holds the object.
    pub is_grabbed: bool,
    /// Mesh resource identifier, `0` for the built-in primitive.
    pub mesh_id: u32,
    /// Material resource identifier, `0` for the default material.
    pub material_id: u32,
}

impl VrObject {
    /// Creates an object of the given type with default properties at the origin.
    pub fn new(object_type: ObjectType) -> Self {
        Self {
            object_type,
            position: Vec3::ZERO,
            rotation: Quaternion::IDENTITY,
            scale: Vec3::ONE,
            mass: 1.0,
            use_gravity: true,
            is_kinematic: false,
            is_grabbable: true,
            is_interactable: true,
            is_grabbed: false,
            mesh_id: 0,
            material_id: 0,
        }
    }

    /// Builder-style helper to set the position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Builder-style helper to set the scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Builder-style helper that makes the object static (kinematic, no gravity).
    pub fn into_static(mut self) -> Self {
        self.is_kinematic = true;
        self.use_gravity = false;
        self
    }

    /// Whether the simulation moves this object.
    #[inline]
    pub fn is_simulated(&self) -> bool {
        !self.is_kinematic && self.use_gravity
    }

    /// Advances the object by `dt` seconds.
    ///
    /// Applies a downward displacement of `GRAVITY * dt` to non-kinematic objects
    /// with gravity enabled. Velocity is not tracked.
    pub fn update(&mut self, dt: f32) {
        if self.is_simulated() {
            self.position.y -= GRAVITY * dt;
        }
    }

    /// The world-space bounds of the object, ignoring rotation.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_center_half_extents(self.position, self.scale * 0.5)
    }
}

impl Default for VrObject {
    fn default() -> Self {
        Self::new(ObjectType::Cube)
    }
}
