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

//! # VR Platform XR
//!
//! Device-facing interfaces of the platform: hand tracking, stereo rendering
//! and frame pacing statistics. Only placeholder backends ship here; they log
//! where a real XR runtime or graphics API would be driven.

#![warn(missing_docs)]

pub mod hand;
pub mod render;
pub mod timing;

pub use hand::{HandPose, HandTracker, HandTrackingError, HandType, SimulatedHandTracker};
pub use render::{
    Eye, FrameStats, Gizmo, GizmoKind, HeadlessStereoRenderer, RenderError, RenderTarget,
    StereoRenderer,
};
pub use timing::{FrameTiming, FrameTimingStats, Stopwatch};
