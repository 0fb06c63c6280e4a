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

//! Client side of the multiplayer link.
//!
//! There is no socket layer yet. A [`ServerConnection`] validates the
//! endpoint, tracks whether the client considers itself connected, and queues
//! outgoing [`GameMessage`]s in an outbox.

use thiserror::Error;
use vrplatform_core::math::Quaternion;
use vrplatform_scene::{Scene, SceneEvent};
use vrplatform_server::GameMessage;

/// Errors raised by [`ServerConnection`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConnectionError {
    /// The address is not a `ws://` or `wss://` URL with a host.
    #[error("invalid server address '{0}': expected ws://host or wss://host")]
    InvalidAddress(String),
    /// A message was sent while disconnected.
    #[error("not connected to a server")]
    NotConnected,
}

/// Returns the host part of a `ws://` or `wss://` address.
fn host_of(address: &str) -> Option<&str> {
    let rest = address
        .strip_prefix("wss://")
        .or_else(|| address.strip_prefix("ws://"))?;
    let authority = rest.split('/').next().unwrap_or_default();
    let host = authority.rsplit_once(':').map_or(authority, |(host, _)| host);
    (!host.is_empty()).then_some(host)
}

/// Client connection stub with an outgoing message queue.
#[derive(Debug, Default)]
pub struct ServerConnection {
    address: Option<String>,
    connected: bool,
    outbox: Vec<GameMessage>,
}

impl ServerConnection {
    /// A disconnected client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects to `address`. Reconnecting replaces the previous endpoint.
    pub fn connect(&mut self, address: &str) -> Result<(), ConnectionError> {
        let host = host_of(address)
            .ok_or_else(|| ConnectionError::InvalidAddress(address.to_owned()))?;
        log::info!("Connecting to server: {address} (host {host})");
        self.address = Some(address.to_owned());
        self.connected = true;
        Ok(())
    }

    /// Drops the link. Queued messages are kept.
    pub fn disconnect(&mut self) {
        if self.connected {
            log::info!("Disconnected from server");
        }
        self.connected = false;
    }

    /// Whether the client is connected.
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// The last endpoint connected to.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Queues `message` for delivery.
    pub fn send(&mut self, message: GameMessage) -> Result<(), ConnectionError> {
        if !self.connected {
            return Err(ConnectionError::NotConnected);
        }
        log::debug!("Queued {} message", message.kind());
        self.outbox.push(message);
        Ok(())
    }

    /// Messages queued so far, oldest first.
    pub fn outbox(&self) -> &[GameMessage] {
        &self.outbox
    }

    /// Empties the outbox and returns its contents.
    pub fn take_outbox(&mut self) -> Vec<GameMessage> {
        std::mem::take(&mut self.outbox)
    }
}

/// Translates a scene change into the message that announces it to peers.
///
/// Rotation is read from `scene` and falls back to identity for objects that
/// are already gone.
pub fn scene_event_message(event: &SceneEvent, scene: &Scene) -> GameMessage {
    let rotation = scene
        .get(event.object_id())
        .map_or(Quaternion::IDENTITY, |object| object.rotation);
    match event {
        SceneEvent::ObjectAdded {
            id,
            object_type,
            position,
        } => GameMessage::ObjectSpawned {
            object_id: id.0.to_string(),
            object_type: object_type.to_string(),
            position: *position,
            rotation,
        },
        SceneEvent::ObjectRemoved { id } => GameMessage::ObjectDestroyed {
            object_id: id.0.to_string(),
        },
        SceneEvent::ObjectMoved { id, position } => GameMessage::ObjectMoved {
            object_id: id.0.to_string(),
            position: *position,
            rotation,
        },
    }
}
