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

//! Runtime configuration, read from a TOML file.
//!
//! Every field has a default, so a partial file (or none at all) is valid:
//!
//! ```toml
//! frame_interval_ms = 11
//! server_address = "wss://vrplatform.example.com"
//! games_dir = "games"
//!
//! [render]
//! width = 1920
//! height = 1080
//! ```

use serde::{Deserialize, Serialize};
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while reading a configuration file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file exists but could not be read.
    #[error("failed to read config '{path}': {source}")]
    Io {
        /// The offending file.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// The file is not valid TOML for [`RuntimeConfig`].
    #[error("failed to parse config '{path}': {source}")]
    Parse {
        /// The offending file.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: toml::de::Error,
    },
}

/// Per-eye render target size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Width of each eye's target, in pixels.
    pub width: u32,
    /// Height of each eye's target, in pixels.
    pub height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
        }
    }
}

/// Settings of the runtime host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Render target size.
    pub render: RenderConfig,
    /// Target duration of one frame of [`Engine::run`](crate::Engine::run).
    pub frame_interval_ms: u64,
    /// Pause between two menu simulation steps.
    pub simulation_step_ms: u64,
    /// Number of steps of a menu simulation.
    pub simulation_steps: u32,
    /// Time step fed to the scene by a menu simulation, in seconds.
    pub simulation_dt: f32,
    /// Multiplayer endpoint used by the menu.
    pub server_address: String,
    /// Where `.vrgame` files are saved and loaded.
    pub games_dir: PathBuf,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            render: RenderConfig::default(),
            frame_interval_ms: 11,
            simulation_step_ms: 1000,
            simulation_steps: 5,
            simulation_dt: 0.016,
            server_address: "wss://vrplatform.example.com".to_owned(),
            games_dir: PathBuf::from("games"),
        }
    }
}

impl RuntimeConfig {
    /// Reads `path`. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No config at '{}', using defaults.", path.display());
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        let config = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Loaded config from '{}'.", path.display());
        Ok(config)
    }
}
