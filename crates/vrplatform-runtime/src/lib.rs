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

//! # VR Platform Runtime
//!
//! Hosts the whole platform in one process. The [`Engine`] owns the stereo
//! renderer, the hand tracker, the live scene, the game creator and the
//! client connection, and drives them from a fixed-interval frame loop.
//!
//! The binary wraps the engine in a small text menu (see [`menu`]) or runs a
//! bounded headless loop.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod connection;
pub mod demo;
mod engine;
mod error;
pub mod menu;

pub use config::{ConfigError, RenderConfig, RuntimeConfig};
pub use connection::{ConnectionError, ServerConnection};
pub use engine::{Engine, StopHandle};
pub use error::EngineError;
