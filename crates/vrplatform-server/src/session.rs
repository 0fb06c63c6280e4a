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

//! Token to user bookkeeping for signed-in clients.

use crate::lock;
use std::collections::HashMap;
use std::sync::Mutex;

/// Maps live tokens to the user they were issued to.
#[derive(Debug, Default)]
pub struct SessionManager {
    sessions: Mutex<HashMap<String, String>>,
}

impl SessionManager {
    /// Creates an empty session table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records that `token` belongs to `user_id`.
    pub fn create_session(&self, token: &str, user_id: &str) {
        lock(&self.sessions).insert(token.to_string(), user_id.to_string());
        log::info!("Session created");
    }

    /// The user owning `token`.
    pub fn get_user_id(&self, token: &str) -> Option<String> {
        lock(&self.sessions).get(token).cloned()
    }

    /// Ends the session of `token`. Returns whether it existed.
    pub fn remove_session(&self, token: &str) -> bool {
        let removed = lock(&self.sessions).remove(token).is_some();
        if removed {
            log::info!("Session removed");
        }
        removed
    }

    /// Number of live sessions.
    pub fn active_count(&self) -> usize {
        lock(&self.sessions).len()
    }
}
