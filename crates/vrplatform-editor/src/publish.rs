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

//! Game file naming and the publish manifest.

use crate::EditorError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

/// Extension of saved scenes.
pub const GAME_EXTENSION: &str = "vrgame";
/// Suffix of publish manifests, appended to the game name.
pub const MANIFEST_SUFFIX: &str = ".publish.json";

/// Metadata written next to a published game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishManifest {
    /// The game name.
    pub name: String,
    /// Free-form description shown to other players.
    pub description: String,
    /// Number of objects in the published scene.
    pub object_count: usize,
    /// File name of the scene, relative to the manifest.
    pub scene_file: String,
    /// Seconds since the Unix epoch at publish time.
    pub published_at: u64,
}

impl PublishManifest {
    pub(crate) fn new(name: &str, description: &str, object_count: usize) -> Self {
        let published_at = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        Self {
            name: name.to_string(),
            description: description.to_string(),
            object_count,
            scene_file: format!("{name}.{GAME_EXTENSION}"),
            published_at,
        }
    }

    /// Writes the manifest as pretty JSON to `path`.
    pub fn write(&self, path: &Path) -> Result<(), EditorError> {
        let json = serde_json::to_vec_pretty(self)?;
        std::fs::write(path, json).map_err(|source| EditorError::Io {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Reads a manifest written by [`PublishManifest::write`].
    pub fn read(path: &Path) -> Result<Self, EditorError> {
        let bytes = std::fs::read(path).map_err(|source| EditorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Rejects names that are empty or that could leave the games directory.
pub fn validate_game_name(name: &str) -> Result<(), EditorError> {
    let trimmed = name.trim();
    let bad = trimmed.is_empty()
        || trimmed != name
        || name.contains('/')
        || name.contains('\\')
        || name.contains("..")
        || name.contains('\0');
    if bad {
        return Err(EditorError::InvalidGameName(name.to_string()));
    }
    Ok(())
}

/// `<games_dir>/<name>.vrgame`, after validating `name`.
pub fn game_path(games_dir: &Path, name: &str) -> Result<PathBuf, EditorError> {
    validate_game_name(name)?;
    Ok(games_dir.join(format!("{name}.{GAME_EXTENSION}")))
}

/// `<games_dir>/<name>.publish.json`, after validating `name`.
pub fn manifest_path(games_dir: &Path, name: &str) -> Result<PathBuf, EditorError> {
    validate_game_name(name)?;
    Ok(games_dir.join(format!("{name}{MANIFEST_SUFFIX}")))
}
