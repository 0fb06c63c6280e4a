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

//! JSON messages exchanged between clients and the multiplayer server.
//!
//! Every message is an object carrying a `type` field naming the variant,
//! for example `{"type":"ObjectDestroyed","object_id":"7"}`.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use vrplatform_core::math::{Quaternion, Vec3};

/// Full-body pose of a player: body root, head and both hands.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerTransform {
    /// Body root position.
    pub position: Vec3,
    /// Body root orientation.
    pub rotation: Quaternion,
    /// Head position.
    pub head_position: Vec3,
    /// Head orientation.
    pub head_rotation: Quaternion,
    /// Left hand position.
    pub left_hand_position: Vec3,
    /// Left hand orientation.
    pub left_hand_rotation: Quaternion,
    /// Right hand position.
    pub right_hand_position: Vec3,
    /// Right hand orientation.
    pub right_hand_rotation: Quaternion,
}

/// A player as seen by the other members of a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Account id of the player.
    pub player_id: String,
    /// Display name.
    pub username: String,
    /// Latest pose.
    pub transform: PlayerTransform,
    /// Avatar model, if any.
    pub avatar_url: Option<String>,
    /// Whether voice activity is detected.
    pub is_talking: bool,
    /// Game-specific key/value state.
    #[serde(default)]
    pub custom_data: HashMap<String, String>,
}

impl PlayerState {
    /// A player with a default pose and no custom data.
    pub fn new(player_id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            player_id: player_id.into(),
            username: username.into(),
            transform: PlayerTransform::default(),
            avatar_url: None,
            is_talking: false,
            custom_data: HashMap::new(),
        }
    }
}

/// Everything that travels over the multiplayer connection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameMessage {
    /// Client hello, authenticated by an account token.
    Connect {
        /// Account token.
        token: String,
        /// Game the client wants to play.
        game_id: String,
    },
    /// Client goodbye.
    Disconnect {
        /// Leaving player.
        player_id: String,
    },
    /// A player entered the room.
    PlayerJoined {
        /// The new player.
        player: PlayerState,
    },
    /// A player left the room.
    PlayerLeft {
        /// The leaving player.
        player_id: String,
    },
    /// A player moved.
    PlayerUpdate {
        /// The moving player.
        player_id: String,
        /// Their new pose.
        transform: PlayerTransform,
    },
    /// A scene object was created.
    ObjectSpawned {
        /// Object handle.
        object_id: String,
        /// Object type name.
        object_type: String,
        /// Initial position.
        position: Vec3,
        /// Initial orientation.
        rotation: Quaternion,
    },
    /// A scene object was moved.
    ObjectMoved {
        /// Object handle.
        object_id: String,
        /// New position.
        position: Vec3,
        /// New orientation.
        rotation: Quaternion,
    },
    /// A scene object was removed.
    ObjectDestroyed {
        /// Object handle.
        object_id: String,
    },
    /// A player grabbed an object.
    ObjectGrabbed {
        /// Object handle.
        object_id: String,
        /// Grabbing player.
        player_id: String,
    },
    /// An object was let go.
    ObjectReleased {
        /// Object handle.
        object_id: String,
    },
    /// A chunk of encoded voice audio.
    VoiceData {
        /// Speaking player.
        player_id: String,
        /// Encoded audio.
        audio_data: Vec<u8>,
    },
    /// Game-defined event.
    CustomEvent {
        /// Event name.
        event_name: String,
        /// Free-form payload.
        data: String,
    },
    /// Server-side failure report.
    Error {
        /// Human-readable reason.
        message: String,
    },
    /// Server-side acknowledgement.
    Success {
        /// Human-readable note.
        message: String,
    },
}

impl GameMessage {
    /// The variant name, as written in the `type` field.
    pub fn kind(&self) -> &'static str {
        match self {
            GameMessage::Connect { .. } => "Connect",
            GameMessage::Disconnect { .. } => "Disconnect",
            GameMessage::PlayerJoined { .. } => "PlayerJoined",
            GameMessage::PlayerLeft { .. } => "PlayerLeft",
            GameMessage::PlayerUpdate { .. } => "PlayerUpdate",
            GameMessage::ObjectSpawned { .. } => "ObjectSpawned",
            GameMessage::ObjectMoved { .. } => "ObjectMoved",
            GameMessage::ObjectDestroyed { .. } => "ObjectDestroyed",
            GameMessage::ObjectGrabbed { .. } => "ObjectGrabbed",
            GameMessage::ObjectReleased { .. } => "ObjectReleased",
            GameMessage::VoiceData { .. } => "VoiceData",
            GameMessage::CustomEvent { .. } => "CustomEvent",
            GameMessage::Error { .. } => "Error",
            GameMessage::Success { .. } => "Success",
        }
    }

    /// Encodes the message as a JSON text frame.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }

    /// Decodes a JSON text frame.
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tag_is_inline() {
        let msg = GameMessage::ObjectDestroyed {
            object_id: "7".to_string(),
        };
        let json = msg.to_json().expect("encode");
        assert_eq!(json, r#"{"type":"ObjectDestroyed","object_id":"7"}"#);
        assert_eq!(msg.kind(), "ObjectDestroyed");
    }

    #[test]
    fn test_vectors_use_named_fields() {
        let msg = GameMessage::ObjectMoved {
            object_id: "1".to_string(),
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quaternion::IDENTITY,
        };
        let value: serde_json::Value =
            serde_json::from_str(&msg.to_json().expect("encode")).expect("valid json");
        assert_eq!(value["position"]["y"], 2.0);
        assert_eq!(value["rotation"]["w"], 1.0);
    }

    #[test]
    fn test_decode_client_frame() {
        let frame = r#"{"type":"Connect","token":"abc","game_id":"arena"}"#;
        match GameMessage::from_json(frame).expect("decode") {
            GameMessage::Connect { token, game_id } => {
                assert_eq!(token, "abc");
                assert_eq!(game_id, "arena");
            }
            other => panic!("unexpected message {other:?}"),
        }
    }

    #[test]
    fn test_player_state_custom_data_defaults() {
        let frame = r#"{"type":"PlayerJoined","player":{"player_id":"p1","username":"ana",
            "transform":{"position":{"x":0,"y":0,"z":0},"rotation":{"x":0,"y":0,"z":0,"w":1},
            "head_position":{"x":0,"y":1.7,"z":0},"head_rotation":{"x":0,"y":0,"z":0,"w":1},
            "left_hand_position":{"x":0,"y":0,"z":0},"left_hand_rotation":{"x":0,"y":0,"z":0,"w":1},
            "right_hand_position":{"x":0,"y":0,"z":0},"right_hand_rotation":{"x":0,"y":0,"z":0,"w":1}},
            "avatar_url":null,"is_talking":false}}"#;
        let GameMessage::PlayerJoined { player } = GameMessage::from_json(frame).expect("decode")
        else {
            panic!("expected PlayerJoined");
        };
        assert_eq!(player.username, "ana");
        assert!(player.custom_data.is_empty());
        assert!((player.transform.head_position.y - 1.7).abs() < 1e-6);
    }

    #[test]
    fn test_unknown_type_is_rejected() {
        assert!(GameMessage::from_json(r#"{"type":"Teleport"}"#).is_err());
    }
}
