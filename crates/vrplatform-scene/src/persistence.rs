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

//! Encoding scenes into `.vrgame` files and back.
//!
//! A live [`Scene`](crate::Scene) is first captured into a [`SceneDefinition`],
//! a stable, decoupled description of its objects. A [`SerializationStrategy`]
//! turns that definition into payload bytes, and the [`SceneSerializer`] wraps
//! the payload in a [`SceneFile`] naming the strategy that produced it.

use crate::format::SceneFile;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use vrplatform_core::math::{Quaternion, Vec3};
use vrplatform_core::{ObjectId, ObjectType, VrObject};

/// Errors raised while reading or writing scene files.
#[derive(Debug, thiserror::Error)]
pub enum SceneIoError {
    /// The file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The file does not start with the `.vrgame` magic bytes.
    #[error("not a .vrgame file (bad magic bytes)")]
    BadMagic,
    /// The header layout version is not one this build understands.
    #[error("unsupported .vrgame format version {0}")]
    UnsupportedVersion(u8),
    /// No decoder is registered for the header's strategy id.
    #[error("unknown serialization strategy '{0}'")]
    UnknownStrategy(String),
    /// The file ends before the declared data.
    #[error("truncated scene file: expected {expected} bytes, found {actual}")]
    Truncated {
        /// Bytes the header promised.
        expected: u64,
        /// Bytes actually present.
        actual: u64,
    },
    /// The payload could not be decoded.
    #[error("malformed scene payload: {0}")]
    Malformed(String),
    /// The scene could not be encoded.
    #[error("failed to encode scene: {0}")]
    Encode(String),
}

impl SceneIoError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SceneIoError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Persisted description of one object.
///
/// Runtime-only state (`is_grabbed`, callbacks) is not part of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectDefinition {
    /// Handle in the saved scene. Only meaningful inside the file.
    pub id: ObjectId,
    /// What the object is.
    pub object_type: ObjectType,
    /// Position.
    pub position: Vec3,
    /// Orientation.
    pub rotation: Quaternion,
    /// Scale.
    pub scale: Vec3,
    /// Mass in kilograms.
    pub mass: f32,
    /// Gravity flag.
    pub use_gravity: bool,
    /// Kinematic flag.
    pub is_kinematic: bool,
    /// Grabbable flag.
    pub is_grabbable: bool,
    /// Interactable flag.
    pub is_interactable: bool,
    /// Mesh resource id.
    pub mesh_id: u32,
    /// Material resource id.
    pub material_id: u32,
}

impl ObjectDefinition {
    /// Captures `object` under `id`.
    pub fn from_object(id: ObjectId, object: &VrObject) -> Self {
        Self {
            id,
            object_type: object.object_type,
            position: object.position,
            rotation: object.rotation,
            scale: object.scale,
            mass: object.mass,
            use_gravity: object.use_gravity,
            is_kinematic: object.is_kinematic,
            is_grabbable: object.is_grabbable,
            is_interactable: object.is_interactable,
            mesh_id: object.mesh_id,
            material_id: object.material_id,
        }
    }

    /// Rebuilds a live object. The result is never grabbed.
    pub fn to_object(&self) -> VrObject {
        VrObject {
            object_type: self.object_type,
            position: self.position,
            rotation: self.rotation,
            scale: self.scale,
            mass: self.mass,
            use_gravity: self.use_gravity,
            is_kinematic: self.is_kinematic,
            is_grabbable: self.is_grabbable,
            is_interactable: self.is_interactable,
            is_grabbed: false,
            mesh_id: self.mesh_id,
            material_id: self.material_id,
        }
    }
}

/// Persisted description of a whole scene.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SceneDefinition {
    /// Every object, in scene order.
    pub objects: Vec<ObjectDefinition>,
}

/// Turns a [`SceneDefinition`] into payload bytes and back.
pub trait SerializationStrategy: Send + Sync {
    /// The id written into the file header. At most 32 bytes.
    fn strategy_id(&self) -> &'static str;

    /// Encodes the definition.
    fn serialize(&self, definition: &SceneDefinition) -> Result<Vec<u8>, SceneIoError>;

    /// Decodes a payload.
    fn deserialize(&self, data: &[u8]) -> Result<SceneDefinition, SceneIoError>;
}

/// Human-readable RON encoding of [`SceneDefinition`].
#[derive(Debug, Default)]
pub struct DefinitionRonStrategy;

impl DefinitionRonStrategy {
    /// The id this strategy writes into headers.
    pub const ID: &'static str = "VRG_DEFINITION_RON_V1";
}

impl SerializationStrategy for DefinitionRonStrategy {
    fn strategy_id(&self) -> &'static str {
        Self::ID
    }

    fn serialize(&self, definition: &SceneDefinition) -> Result<Vec<u8>, SceneIoError> {
        let pretty_config = ron::ser::PrettyConfig::default().indentor("  ".to_string());
        ron::ser::to_string_pretty(definition, pretty_config)
            .map(|s| s.into_bytes())
            .map_err(|e| SceneIoError::Encode(e.to_string()))
    }

    fn deserialize(&self, data: &[u8]) -> Result<SceneDefinition, SceneIoError> {
        ron::de::from_bytes(data).map_err(|e| SceneIoError::Malformed(e.to_string()))
    }
}

/// Chooses a strategy to write scenes with and dispatches loads by header id.
pub struct SceneSerializer {
    strategies: HashMap<String, Box<dyn SerializationStrategy>>,
    default_strategy: &'static str,
}

impl SceneSerializer {
    /// A serializer that writes and reads [`DefinitionRonStrategy`] payloads.
    pub fn new() -> Self {
        let mut strategies: HashMap<String, Box<dyn SerializationStrategy>> = HashMap::new();
        strategies.insert(
            DefinitionRonStrategy::ID.to_string(),
            Box::new(DefinitionRonStrategy),
        );
        Self {
            strategies,
            default_strategy: DefinitionRonStrategy::ID,
        }
    }

    /// Encodes `definition` with the default strategy.
    pub fn encode(&self, definition: &SceneDefinition) -> Result<SceneFile, SceneIoError> {
        let strategy = self
            .strategies
            .get(self.default_strategy)
            .ok_or_else(|| SceneIoError::UnknownStrategy(self.default_strategy.to_string()))?;
        let payload = strategy.serialize(definition)?;
        SceneFile::new(strategy.strategy_id(), payload)
    }

    /// Decodes `file` with the strategy named in its header.
    pub fn decode(&self, file: &SceneFile) -> Result<SceneDefinition, SceneIoError> {
        let strategy_id = file.header.strategy_name()?;
        let strategy = self
            .strategies
            .get(strategy_id)
            .ok_or_else(|| SceneIoError::UnknownStrategy(strategy_id.to_string()))?;
        strategy.deserialize(&file.payload)
    }
}

impl Default for SceneSerializer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_definition() -> SceneDefinition {
        let mut ground = VrObject::new(ObjectType::Terrain).into_static();
        ground.position = Vec3::new(0.0, -1.0, 0.0);
        ground.scale = Vec3::new(20.0, 0.1, 20.0);
        let mut lamp = VrObject::new(ObjectType::Light);
        lamp.material_id = 3;
        SceneDefinition {
            objects: vec![
                ObjectDefinition::from_object(ObjectId(0), &ground),
                ObjectDefinition::from_object(ObjectId(4), &lamp),
            ],
        }
    }

    #[test]
    fn test_ron_payload_is_readable() {
        let bytes = DefinitionRonStrategy
            .serialize(&sample_definition())
            .expect("encode");
        let text = String::from_utf8(bytes).expect("RON is UTF-8");
        assert!(text.contains("Terrain"));
        assert!(text.contains("is_kinematic: true"));
        assert!(!text.contains("is_grabbed"));
    }

    #[test]
    fn test_serializer_encodes_and_decodes() {
        let serializer = SceneSerializer::new();
        let definition = sample_definition();
        let file = serializer.encode(&definition).expect("encode");
        assert_eq!(
            file.header.strategy_name().expect("utf8"),
            DefinitionRonStrategy::ID
        );
        assert_eq!(file.header.payload_length, file.payload.len() as u64);
        assert_eq!(serializer.decode(&file).expect("decode"), definition);
    }

    #[test]
    fn test_unknown_strategy_is_rejected() {
        let serializer = SceneSerializer::new();
        let file = SceneFile::new("SOMETHING_ELSE", b"()".to_vec()).expect("short id");
        match serializer.decode(&file) {
            Err(SceneIoError::UnknownStrategy(id)) => assert_eq!(id, "SOMETHING_ELSE"),
            other => panic!("expected UnknownStrategy, got {other:?}"),
        }
    }

    #[test]
    fn test_garbage_payload_is_malformed() {
        let serializer = SceneSerializer::new();
        let file = SceneFile::new(DefinitionRonStrategy::ID, b"(objects: [ nope".to_vec())
            .expect("short id");
        assert!(matches!(
            serializer.decode(&file),
            Err(SceneIoError::Malformed(_))
        ));
    }

    #[test]
    fn test_grabbed_state_is_not_restored() {
        let mut obj = VrObject::new(ObjectType::Cube);
        obj.is_grabbed = true;
        let def = ObjectDefinition::from_object(ObjectId(1), &obj);
        assert!(!def.to_object().is_grabbed);
    }
}
