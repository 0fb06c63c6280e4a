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

//! Room directory and message fan-out.

use crate::lock;
use crate::protocol::{GameMessage, PlayerState, PlayerTransform};
use crate::room::{GameRoom, RoomError};
use serde::Serialize;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;

#[derive(Debug, Default)]
struct Registry {
    rooms: HashMap<String, GameRoom>,
    player_to_room: HashMap<String, String>,
}

/// Aggregate counters reported by [`MultiplayerServer::stats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ServerStats {
    /// Open rooms.
    pub total_rooms: usize,
    /// Players seated across all rooms.
    pub total_players: usize,
    /// Registered client connections.
    pub active_connections: usize,
}

/// Directory of game rooms and the players seated in them.
#[derive(Debug, Default)]
pub struct MultiplayerServer {
    registry: Mutex<Registry>,
    connections: Mutex<HashMap<String, SocketAddr>>,
}

impl MultiplayerServer {
    /// Creates a server with no rooms.
    pub fn new() -> Self {
        log::info!("Initializing multiplayer server...");
        Self::default()
    }

    /// Opens an empty room for `game_id` and returns its `room_<uuid>` id.
    pub fn create_room(&self, game_id: &str, host_id: &str, max_players: usize) -> String {
        let room_id = format!("room_{}", uuid::Uuid::new_v4());
        let room = GameRoom::new(
            room_id.clone(),
            game_id.to_string(),
            host_id.to_string(),
            max_players,
        );
        lock(&self.registry).rooms.insert(room_id.clone(), room);
        log::info!("Room created: {room_id}");
        room_id
    }

    /// Seats `player` in `room_id`.
    pub fn join_room(&self, room_id: &str, player: PlayerState) -> Result<(), RoomError> {
        let mut registry = lock(&self.registry);
        if let Some(current) = registry.player_to_room.get(&player.player_id) {
            return Err(RoomError::AlreadyInRoom {
                player_id: player.player_id.clone(),
                room_id: current.clone(),
            });
        }

        let room = registry
            .rooms
            .get_mut(room_id)
            .ok_or_else(|| RoomError::NotFound(room_id.to_string()))?;
        let player_id = player.player_id.clone();
        if !room.add_player(player) {
            return Err(RoomError::Full(room_id.to_string()));
        }
        registry
            .player_to_room
            .insert(player_id.clone(), room_id.to_string());

        log::info!("Player {player_id} joined room {room_id}");
        Ok(())
    }

    /// Unseats `player_id` and returns the room they left. Empty rooms are deleted.
    pub fn leave_room(&self, player_id: &str) -> Option<String> {
        let mut registry = lock(&self.registry);
        let room_id = registry.player_to_room.remove(player_id)?;

        let room = registry.rooms.get_mut(&room_id)?;
        room.remove_player(player_id);
        if room.player_count() == 0 {
            registry.rooms.remove(&room_id);
            log::info!("Room {room_id} deleted (empty)");
        } else {
            log::info!("Player {player_id} left room {room_id}");
        }
        Some(room_id)
    }

    /// Stores a new pose for `player_id` and returns their room.
    pub fn update_player(&self, player_id: &str, transform: PlayerTransform) -> Option<String> {
        let mut registry = lock(&self.registry);
        let room_id = registry.player_to_room.get(player_id)?.clone();
        let room = registry.rooms.get_mut(&room_id)?;
        room.update_player(player_id, transform).then_some(room_id)
    }

    /// Snapshot of the players seated in `room_id`. Unknown rooms are empty.
    pub fn room_players(&self, room_id: &str) -> Vec<PlayerState> {
        lock(&self.registry)
            .rooms
            .get(room_id)
            .map(|room| room.players.clone())
            .unwrap_or_default()
    }

    /// Public rooms of `game_id` with a free seat, as `(room_id, players, max_players)`.
    pub fn find_rooms(&self, game_id: &str) -> Vec<(String, usize, usize)> {
        lock(&self.registry)
            .rooms
            .values()
            .filter(|room| room.game_id == game_id && room.is_public && !room.is_full())
            .map(|room| (room.room_id.clone(), room.player_count(), room.max_players))
            .collect()
    }

    /// Snapshot of a room.
    pub fn get_room(&self, room_id: &str) -> Option<GameRoom> {
        lock(&self.registry).rooms.get(room_id).cloned()
    }

    /// Sends `message` to every player of `room_id` except `exclude_player`.
    ///
    /// Returns the ids of the players it was addressed to.
    pub fn broadcast_to_room(
        &self,
        room_id: &str,
        message: &GameMessage,
        exclude_player: Option<&str>,
    ) -> Vec<String> {
        let recipients: Vec<String> = lock(&self.registry)
            .rooms
            .get(room_id)
            .map(|room| {
                room.players
                    .iter()
                    .filter(|p| Some(p.player_id.as_str()) != exclude_player)
                    .map(|p| p.player_id.clone())
                    .collect()
            })
            .unwrap_or_default();

        for player_id in &recipients {
            // The frame would be written to the player's socket here.
            log::debug!("Broadcasting {} to player: {player_id}", message.kind());
        }
        recipients
    }

    /// Remembers the network address of a connected player.
    pub fn register_connection(&self, player_id: &str, addr: SocketAddr) {
        lock(&self.connections).insert(player_id.to_string(), addr);
        log::info!("Connection registered: {player_id} from {addr}");
    }

    /// Forgets a player's connection. Returns the address it had.
    pub fn unregister_connection(&self, player_id: &str) -> Option<SocketAddr> {
        lock(&self.connections).remove(player_id)
    }

    /// Current counters.
    pub fn stats(&self) -> ServerStats {
        let (total_rooms, total_players) = {
            let registry = lock(&self.registry);
            (
                registry.rooms.len(),
                registry.rooms.values().map(GameRoom::player_count).sum(),
            )
        };
        ServerStats {
            total_rooms,
            total_players,
            active_connections: lock(&self.connections).len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_creation() {
        let server = MultiplayerServer::new();
        let room_id = server.create_room("game123", "player1", 4);
        assert!(room_id.starts_with("room_"));
        let room = server.get_room(&room_id).expect("room exists");
        assert_eq!(room.game_id, "game123");
        assert_eq!(room.host_id, "player1");
        assert_eq!(room.max_players, 4);
    }

    #[test]
    fn test_join_errors() {
        let server = MultiplayerServer::new();
        assert_eq!(
            server.join_room("room_missing", PlayerState::new("a", "A")),
            Err(RoomError::NotFound("room_missing".to_string()))
        );

        let room_id = server.create_room("g", "a", 1);
        server
            .join_room(&room_id, PlayerState::new("a", "A"))
            .expect("first seat");
        assert_eq!(
            server.join_room(&room_id, PlayerState::new("b", "B")),
            Err(RoomError::Full(room_id.clone()))
        );
        assert!(matches!(
            server.join_room(&room_id, PlayerState::new("a", "A")),
            Err(RoomError::AlreadyInRoom { .. })
        ));
    }

    #[test]
    fn test_error_messages_match_wire_text() {
        assert_eq!(RoomError::Full("r".into()).to_string(), "Room is full");
        assert_eq!(RoomError::NotFound("r".into()).to_string(), "Room not found");
    }

    #[test]
    fn test_leave_deletes_empty_room() {
        let server = MultiplayerServer::new();
        let room_id = server.create_room("g", "a", 4);
        server.join_room(&room_id, PlayerState::new("a", "A")).expect("seat");
        server.join_room(&room_id, PlayerState::new("b", "B")).expect("seat");

        assert_eq!(server.leave_room("a"), Some(room_id.clone()));
        assert!(server.get_room(&room_id).is_some());
        assert_eq!(server.leave_room("b"), Some(room_id.clone()));
        assert!(server.get_room(&room_id).is_none());
        assert_eq!(server.leave_room("b"), None);
    }

    #[test]
    fn test_find_rooms_skips_full_private_and_other_games() {
        let server = MultiplayerServer::new();
        let open = server.create_room("arena", "h1", 4);
        let full = server.create_room("arena", "h2", 1);
        server.join_room(&full, PlayerState::new("x", "X")).expect("seat");
        server.create_room("racing", "h3", 4);
        let private = server.create_room("arena", "h4", 4);
        if let Some(room) = lock(&server.registry).rooms.get_mut(&private) {
            room.is_public = false;
        }

        let found = server.find_rooms("arena");
        assert_eq!(found, vec![(open, 0, 4)]);
    }

    #[test]
    fn test_broadcast_excludes_sender() {
        let server = MultiplayerServer::new();
        let room_id = server.create_room("g", "a", 4);
        for id in ["a", "b", "c"] {
            server.join_room(&room_id, PlayerState::new(id, id)).expect("seat");
        }
        let msg = GameMessage::ObjectReleased {
            object_id: "3".into(),
        };
        let mut recipients = server.broadcast_to_room(&room_id, &msg, Some("b"));
        recipients.sort();
        assert_eq!(recipients, vec!["a".to_string(), "c".to_string()]);
        assert!(server.broadcast_to_room("nope", &msg, None).is_empty());
    }

    #[test]
    fn test_update_player_and_stats() {
        let server = MultiplayerServer::new();
        let room_id = server.create_room("g", "a", 4);
        server.join_room(&room_id, PlayerState::new("a", "A")).expect("seat");
        assert_eq!(
            server.update_player("a", PlayerTransform::default()),
            Some(room_id.clone())
        );
        assert_eq!(server.update_player("ghost", PlayerTransform::default()), None);

        server.register_connection("a", "127.0.0.1:9000".parse().expect("addr"));
        let stats = server.stats();
        assert_eq!(
            stats,
            ServerStats {
                total_rooms: 1,
                total_players: 1,
                active_connections: 1
            }
        );
        assert!(server.unregister_connection("a").is_some());
        assert_eq!(server.room_players(&room_id).len(), 1);
    }
}
