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

//! First-come, first-served matchmaking queues, one per game.

use crate::lock;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

/// Groups queued players into matches.
#[derive(Debug, Default)]
pub struct MatchmakingService {
    queues: Mutex<HashMap<String, VecDeque<String>>>,
}

impl MatchmakingService {
    /// Creates a service with empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `player_id` to the queue of `game_id`.
    pub fn join_queue(&self, game_id: &str, player_id: &str) {
        lock(&self.queues)
            .entry(game_id.to_string())
            .or_default()
            .push_back(player_id.to_string());
        log::info!("Player {player_id} joined queue for game {game_id}");
    }

    /// Removes `player_id` from the queue of `game_id`.
    pub fn leave_queue(&self, game_id: &str, player_id: &str) {
        if let Some(queue) = lock(&self.queues).get_mut(game_id) {
            queue.retain(|p| p != player_id);
        }
    }

    /// Number of players waiting for `game_id`.
    pub fn queue_len(&self, game_id: &str) -> usize {
        lock(&self.queues).get(game_id).map_or(0, VecDeque::len)
    }

    /// Takes the first `required_players` queued players once enough are waiting.
    pub fn find_match(&self, game_id: &str, required_players: usize) -> Option<Vec<String>> {
        let mut queues = lock(&self.queues);
        let queue = queues.get_mut(game_id)?;
        if queue.len() < required_players {
            return None;
        }
        let matched: Vec<String> = queue.drain(..required_players).collect();
        log::info!("Match found for game {game_id}: {} players", matched.len());
        Some(matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_match_is_fifo() {
        let mm = MatchmakingService::new();
        for p in ["p1", "p2", "p3"] {
            mm.join_queue("arena", p);
        }
        assert_eq!(mm.find_match("arena", 4), None);
        assert_eq!(
            mm.find_match("arena", 2),
            Some(vec!["p1".to_string(), "p2".to_string()])
        );
        assert_eq!(mm.queue_len("arena"), 1);
    }

    #[test]
    fn test_leave_queue() {
        let mm = MatchmakingService::new();
        mm.join_queue("arena", "p1");
        mm.join_queue("arena", "p2");
        mm.leave_queue("arena", "p1");
        assert_eq!(mm.find_match("arena", 1), Some(vec!["p2".to_string()]));
        assert_eq!(mm.find_match("unknown", 1), None);
    }

    #[test]
    fn test_zero_player_match_is_empty() {
        let mm = MatchmakingService::new();
        mm.join_queue("arena", "p1");
        assert_eq!(mm.find_match("arena", 0), Some(Vec::new()));
        assert_eq!(mm.queue_len("arena"), 1);
    }
}
