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

use crate::connection::ConnectionError;
use thiserror::Error;
use vrplatform_editor::EditorError;
use vrplatform_scene::SceneIoError;
use vrplatform_xr::{HandTrackingError, RenderError};

/// Errors surfaced by the [`Engine`](crate::Engine).
#[derive(Debug, Error)]
pub enum EngineError {
    /// An operation needed the engine to be initialized first.
    #[error("engine is not initialized")]
    NotInitialized,
    /// The stereo renderer failed.
    #[error("renderer: {0}")]
    Render(#[from] RenderError),
    /// The hand tracker failed.
    #[error("hand tracking: {0}")]
    HandTracking(#[from] HandTrackingError),
    /// The multiplayer link failed.
    #[error(transparent)]
    Connection(#[from] ConnectionError),
    /// Saving, publishing or naming a game failed.
    #[error(transparent)]
    Editor(#[from] EditorError),
    /// Loading a scene failed.
    #[error(transparent)]
    Scene(#[from] SceneIoError),
}
