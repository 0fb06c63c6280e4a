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

//! Command-line arguments of the runtime binary.

use crate::config::RuntimeConfig;
use clap::Parser;
use std::path::PathBuf;

/// Default location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "vrplatform.toml";

/// VR game platform host.
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "vrplatform-runtime", version, about = "Play & create in virtual reality")]
pub struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Directory holding saved games (overrides the config file)
    #[arg(long)]
    pub games_dir: Option<PathBuf>,

    /// Multiplayer endpoint, ws:// or wss:// (overrides the config file)
    #[arg(long)]
    pub server: Option<String>,

    /// Skip the menu and run this many frames of the engine loop
    #[arg(long, value_name = "FRAMES")]
    pub headless_loop: Option<u64>,
}

impl Args {
    /// Applies the flags that override file settings.
    pub fn apply(&self, config: &mut RuntimeConfig) {
        if let Some(dir) = &self.games_dir {
            config.games_dir = dir.clone();
        }
        if let Some(server) = &self.server {
            config.server_address = server.clone();
        }
    }
}
