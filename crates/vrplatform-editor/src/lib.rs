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

//! # VR Platform Editor
//!
//! The game creator lets a user build a scene from inside the headset: pick
//! objects with the right hand, move, rotate or scale them while gripping,
//! spawn, duplicate and delete objects, toggle play mode, and save or publish
//! the result under a games directory.
//!
//! The creator never owns the scene. Every operation borrows it explicitly.

#![warn(missing_docs)]

mod creator;
mod error;
pub mod publish;
mod tool;

pub use creator::GameCreator;
pub use error::EditorError;
pub use publish::PublishManifest;
pub use tool::Tool;
