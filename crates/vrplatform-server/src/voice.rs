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

//! Per-room voice channels.

use crate::lock;
use std::collections::HashMap;
use std::sync::Mutex;

/// Tracks who listens in each room's voice channel.
#[derive(Debug, Default)]
pub struct VoiceChatServer {
    channels: Mutex<HashMap<String, Vec<String>>>,
}

impl VoiceChatServer {
    /// Creates a server with no open channel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `player_id` to the channel of `room_id`, opening it if needed.
    pub fn join_voice_channel(&self, room_id: &str, player_id: &str) {
        let mut channels = lock(&self.channels);
        let members = channels.entry(room_id.to_string()).or_default();
        if !members.iter().any(|p| p == player_id) {
            members.push(player_id.to_string());
        }
        log::info!("Player {player_id} joined voice channel in room {room_id}");
    }

    /// Removes `player_id` from the channel. Empty channels are closed.
    pub fn leave_voice_channel(&self, room_id: &str, player_id: &str) {
        let mut channels = lock(&self.channels);
        if let Some(members) = channels.get_mut(room_id) {
            members.retain(|p| p != player_id);
            if members.is_empty() {
                channels.remove(room_id);
            }
        }
        log::info!("Player {player_id} left voice channel");
    }

    /// Relays audio to everyone in the channel but the sender. Returns the recipients.
    pub fn broadcast_audio(&self, room_id: &str, sender_id: &str, audio_data: &[u8]) -> Vec<String> {
        let recipients: Vec<String> = lock(&self.channels)
            .get(room_id)
            .map(|members| {
                members
                    .iter()
                    .filter(|p| p.as_str() != sender_id)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();

        for player_id in &recipients {
            log::trace!(
                "Sending {} bytes of audio from {sender_id} to {player_id}",
                audio_data.len()
            );
        }
        recipients
    }

    /// Members of the channel of `room_id`.
    pub fn channel_members(&self, room_id: &str) -> Vec<String> {
        lock(&self.channels)
            .get(room_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Number of open channels.
    pub fn channel_count(&self) -> usize {
        lock(&self.channels).len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_audio_skips_sender() {
        let voice = VoiceChatServer::new();
        voice.join_voice_channel("r", "a");
        voice.join_voice_channel("r", "b");
        voice.join_voice_channel("r", "c");
        assert_eq!(voice.broadcast_audio("r", "b", &[1, 2, 3]), vec!["a", "c"]);
        assert!(voice.broadcast_audio("other", "a", &[]).is_empty());
    }

    #[test]
    fn test_empty_channel_is_closed() {
        let voice = VoiceChatServer::new();
        voice.join_voice_channel("r", "a");
        voice.join_voice_channel("r", "a");
        assert_eq!(voice.channel_members("r"), vec!["a"]);
        voice.leave_voice_channel("r", "a");
        assert_eq!(voice.channel_count(), 0);
    }
}
