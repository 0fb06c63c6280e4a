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

//! # VR Platform Server
//!
//! In-memory services behind the multiplayer backend: the JSON wire protocol,
//! game rooms, voice channels, matchmaking queues, user accounts with hashed
//! passwords and signed tokens, and session bookkeeping.
//!
//! Every service is `Send + Sync` and can be shared behind an `Arc`. Message
//! delivery is a log line; there is no socket layer.

#![warn(missing_docs)]

pub mod auth;
pub mod matchmaking;
pub mod protocol;
pub mod room;
pub mod server;
pub mod session;
pub mod voice;

pub use auth::{AuthError, AuthResponse, AuthService, LoginRequest, SignupRequest, UserProfile};
pub use matchmaking::MatchmakingService;
pub use protocol::{GameMessage, PlayerState, PlayerTransform};
pub use room::{GameRoom, RoomError};
pub use server::{MultiplayerServer, ServerStats};
pub use session::SessionManager;
pub use voice::VoiceChatServer;

use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

/// Locks `mutex`, recovering the data if a previous holder panicked.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Seconds since the Unix epoch.
pub(crate) fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or(0)
}
