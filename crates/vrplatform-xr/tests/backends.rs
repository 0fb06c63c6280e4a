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

//! Drives the placeholder backends through trait objects, the way the runtime does.

use vrplatform_core::math::Vec3;
use vrplatform_core::{ObjectId, ObjectType, VrObject};
use vrplatform_xr::{
    Eye, HandPose, HandTracker, HandType, HeadlessStereoRenderer, SimulatedHandTracker,
    StereoRenderer,
};

#[test]
fn boxed_backends_run_a_frame() {
    let mut renderer: Box<dyn StereoRenderer> = Box::new(HeadlessStereoRenderer::new());
    let mut tracker: Box<dyn HandTracker> = Box::new(SimulatedHandTracker::new());

    renderer.initialize(1920, 1080).expect("renderer init");
    tracker.initialize().expect("tracker init");
    tracker.update();
    assert!(tracker.is_hand_tracked(HandType::Right));

    let objects: Vec<(ObjectId, VrObject)> = (0..3)
        .map(|i| {
            (
                ObjectId(i),
                VrObject::new(ObjectType::Sphere).with_position(Vec3::new(i as f32, 0.0, 0.0)),
            )
        })
        .collect();

    renderer.begin_frame();
    for eye in Eye::BOTH {
        renderer.render_eye(eye);
        for (id, obj) in &objects {
            renderer.draw_object(*id, obj);
        }
    }
    renderer.submit_frame();
    renderer.end_frame();

    assert_eq!(renderer.last_frame_stats().objects_drawn, 6);
    renderer.shutdown();
    assert_eq!(renderer.eye_render_target(Eye::Left).width, 0);
}

#[test]
fn unknown_pose_defaults_to_untracked() {
    let tracker = SimulatedHandTracker::new();
    assert_eq!(tracker.hand_pose(HandType::Left), HandPose::default());
    assert!(!tracker.is_thumbs_up(HandType::Left));
}
