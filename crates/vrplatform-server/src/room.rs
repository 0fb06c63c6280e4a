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

//! A single multiplayer game session.

use crate::protocol::{PlayerState, PlayerTransform};
use std::collections::HashMap;

/// Why a player could not join a room.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoomError {
    /// No room has this id.
    #[error("Room not found")]
    NotFound(String),
    /// The room reached its player limit.
    #[error("Room is full")]
    Full(String),
    /// The player is already seated in a room.
    #[error("Player {player_id} is already in room {room_id}")]
    AlreadyInRoom {
        /// The joining player.
        player_id: String,
        /// The room they are in.
        room_id: String,
    },
}

/// Players sharing one instance of a game.
#[derive(Debug, Clone)]
pub struct GameRoom {
    /// `room_<uuid>` identifier.
    pub room_id: String,
    /// The game being played.
    pub game_id: String,
    /// Player who created the room.
    pub host_id: String,
    /// Seat limit.
    pub max_players: usize,
    /// Seated players, in join order.
    pub players: Vec<PlayerState>,
    /// Creation time, seconds since the Unix epoch.
    pub created_at: i64,
    /// Whether the room shows up in [`MultiplayerServer::find_rooms`](crate::MultiplayerServer::find_rooms).
    pub is_public: bool,
    /// Game-specific shared state.
    pub game_state: HashMap<String, String>,
}

impl GameRoom {
    /// Creates an empty public room.
    pub fn new(room_id: String, game_id: String, host_id: String, max_players: usize) -> Self {
        Self {
            room_id,
            game_id,
            host_id,
            max_players,
            players: Vec::new(),
            created_at: crate::unix_now(),
            is_public: true,
            game_state: HashMap::new(),
        }
    }

    /// Seats `player`. Returns `false` when the room is full.
    pub fn add_player(&mut self, player: PlayerState) -> bool {
        if self.is_full() {
            return false;
        }
        self.players.push(player);
        true
    }

    /// Unseats the player with `player_id`, if present.
    pub fn remove_player(&mut self, player_id: &str) {
        self.players.retain(|p| p.player_id != player_id);
    }

    /// Looks up a seated player.
    pub fn get_player(&self, player_id: &str) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.player_id == player_id)
    }

    /// Replaces a seated player's pose. Returns `false` if the player is not here.
    pub fn update_player(&mut self, player_id: &str, transform: PlayerTransform) -> bool {
        match self.players.iter_mut().find(|p| p.player_id == player_id) {
            Some(player) => {
                player.transform = transform;
                true
            }
            None => false,
        }
    }

    /// Whether every seat is taken.
    pub fn is_full(&self) -> bool {
        self.players.len() >= self.max_players
    }

    /// Seated player count.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}
