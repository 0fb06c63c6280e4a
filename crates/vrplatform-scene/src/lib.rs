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

//! # VR Platform Scene
//!
//! The live collection of manipulable objects, its simulation step, the
//! per-object interaction callbacks and the `.vrgame` file format.

#![warn(missing_docs)]

pub mod callbacks;
pub mod event;
pub mod format;
pub mod persistence;
mod scene;

pub use callbacks::ObjectCallbacks;
pub use event::SceneEvent;
pub use format::{SceneFile, SceneHeader};
pub use persistence::{SceneDefinition, SceneIoError, SceneSerializer};
pub use scene::{Scene, DEFAULT_RAYCAST_DISTANCE};
