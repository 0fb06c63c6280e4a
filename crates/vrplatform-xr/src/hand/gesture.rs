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

//! Gesture recognition from analog hand state.
//!
//! Gestures are derived purely from a [`HandPose`]: grip and trigger strength
//! plus the hand orientation. No joint skeleton is needed.

use super::HandPose;
use vrplatform_core::math::Vec3;

/// Grip strength above which the hand counts as closed.
pub const GRIP_CLOSED_THRESHOLD: f32 = 0.7;
/// Grip strength below which the hand counts as open.
pub const GRIP_OPEN_THRESHOLD: f32 = 0.3;
/// Trigger strength above which the index finger counts as extended for pointing.
pub const TRIGGER_THRESHOLD: f32 = 0.7;
/// Minimum world-up component of the hand's local up axis for a thumbs-up.
pub const THUMB_UP_ALIGNMENT: f32 = 0.7;

/// Pinch: grip strength above [`GRIP_CLOSED_THRESHOLD`].
pub fn is_pinching(pose: &HandPose) -> bool {
    pose.grip_strength > GRIP_CLOSED_THRESHOLD
}

/// Point: trigger held firmly while the rest of the hand stays open.
pub fn is_pointing(pose: &HandPose) -> bool {
    pose.trigger_strength > TRIGGER_THRESHOLD && pose.grip_strength < GRIP_OPEN_THRESHOLD
}

/// Thumbs-up: closed fist, trigger released, hand's local up axis pointing at the sky.
pub fn is_thumbs_up(pose: &HandPose) -> bool {
    if pose.grip_strength <= GRIP_CLOSED_THRESHOLD || pose.is_trigger_pressed {
        return false;
    }
    let up = pose.rotation * Vec3::Y;
    up.y > THUMB_UP_ALIGNMENT
}
