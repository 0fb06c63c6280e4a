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

//! Hand poses and the hand-tracking backend interface.

pub mod gesture;
mod simulated;

pub use self::simulated::SimulatedHandTracker;

use serde::{Deserialize, Serialize};
use std::fmt;
use vrplatform_core::math::{Quaternion, Vec3};

/// Which hand a pose or query refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HandType {
    /// The user's left hand.
    Left,
    /// The user's right hand.
    Right,
}

impl HandType {
    /// Both hands, left first.
    pub const BOTH: [HandType; 2] = [HandType::Left, HandType::Right];

    /// Lowercase name, used in log lines.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Stable array index (left = 0, right = 1).
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Self::Left => 0,
            Self::Right => 1,
        }
    }
}

impl fmt::Display for HandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Snapshot of one tracked hand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandPose {
    /// World-space position of the hand.
    pub position: Vec3,
    /// World-space orientation of the hand.
    pub rotation: Quaternion,
    /// Whether the runtime currently sees this hand.
    pub is_tracking: bool,
    /// Whether the grip button or fist is held.
    pub is_gripping: bool,
    /// Whether the trigger or index pinch is held.
    pub is_trigger_pressed: bool,
    /// Analog grip strength in `[0, 1]`.
    pub grip_strength: f32,
    /// Analog trigger strength in `[0, 1]`.
    pub trigger_strength: f32,
}

impl Default for HandPose {
    /// An untracked, fully released pose at the origin.
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quaternion::IDENTITY,
            is_tracking: false,
            is_gripping: false,
            is_trigger_pressed: false,
            grip_strength: 0.0,
            trigger_strength: 0.0,
        }
    }
}

/// Errors reported by a hand-tracking backend.
#[derive(Debug, thiserror::Error)]
pub enum HandTrackingError {
    /// The XR runtime could not be reached or refused the session.
    #[error("hand tracking runtime unavailable: {0}")]
    RuntimeUnavailable(String),
}

/// A source of hand poses.
///
/// Implementors only have to provide the raw poses; the gesture queries are
/// derived from them with the thresholds in [`gesture`].
pub trait HandTracker: fmt::Debug {
    /// Brings the backend up. Must be called before the first [`HandTracker::update`].
    fn initialize(&mut self) -> Result<(), HandTrackingError>;

    /// Pulls fresh poses from the runtime.
    fn update(&mut self);

    /// The latest pose of `hand`, or the default pose if the hand is unknown.
    fn hand_pose(&self, hand: HandType) -> HandPose;

    /// Whether the runtime currently tracks `hand`.
    fn is_hand_tracked(&self, hand: HandType) -> bool {
        self.hand_pose(hand).is_tracking
    }

    /// Whether `hand` is pinching.
    fn is_pinching(&self, hand: HandType) -> bool {
        gesture::is_pinching(&self.hand_pose(hand))
    }

    /// Whether `hand` is pointing.
    fn is_pointing(&self, hand: HandType) -> bool {
        gesture::is_pointing(&self.hand_pose(hand))
    }

    /// Whether `hand` shows a thumbs-up.
    fn is_thumbs_up(&self, hand: HandType) -> bool {
        gesture::is_thumbs_up(&self.hand_pose(hand))
    }
}
