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

use std::path::PathBuf;
use vrplatform_core::ObjectId;
use vrplatform_scene::SceneIoError;

/// Errors returned by [`GameCreator`](crate::GameCreator) operations.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    /// The handle does not resolve to an object of the scene.
    #[error("object {0} does not exist in the scene")]
    UnknownObject(ObjectId),
    /// A game name was empty or could escape the games directory.
    #[error("invalid game name '{0}'")]
    InvalidGameName(String),
    /// Writing the scene file failed.
    #[error(transparent)]
    Scene(#[from] SceneIoError),
    /// Writing the publish manifest failed.
    #[error("failed to write {path}: {source}")]
    Io {
        /// The file involved.
        path: PathBuf,
        /// The underlying error.
        #[source]
        source: std::io::Error,
    },
    /// The publish manifest could not be encoded.
    #[error("failed to encode publish manifest: {0}")]
    Manifest(#[from] serde_json::Error),
}
