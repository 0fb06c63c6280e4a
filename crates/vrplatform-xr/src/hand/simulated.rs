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

use super::{HandPose, HandTracker, HandTrackingError, HandType};

/// Placeholder hand-tracking backend.
///
/// Stands in for an OpenXR or SteamVR session: `update` only flags both hands
/// as tracked and keeps whatever poses were injected with
/// [`SimulatedHandTracker::set_pose`].
#[derive(Debug, Default)]
pub struct SimulatedHandTracker {
    poses: [HandPose; 2],
    initialized: bool,
}

impl SimulatedHandTracker {
    /// Creates a tracker with both hands in the default, untracked pose.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the pose of `hand`.
    pub fn set_pose(&mut self, hand: HandType, pose: HandPose) {
        self.poses[hand.index()] = pose;
    }

    /// Mutable access to the pose of `hand`, for scripted input.
    pub fn pose_mut(&mut self, hand: HandType) -> &mut HandPose {
        &mut self.poses[hand.index()]
    }

    /// Whether [`HandTracker::initialize`] has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }
}

impl HandTracker for SimulatedHandTracker {
    fn initialize(&mut self) -> Result<(), HandTrackingError> {
        log::info!("Initializing hand tracking system...");
        // An XR runtime session would be created here.
        self.initialized = true;
        log::info!("Hand tracking initialized successfully.");
        Ok(())
    }

    fn update(&mut self) {
        for pose in &mut self.poses {
            pose.is_tracking = true;
        }
    }

    fn hand_pose(&self, hand: HandType) -> HandPose {
        self.poses[hand.index()]
    }
}
