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

use super::{Eye, FrameStats, Gizmo, RenderError, RenderTarget, StereoRenderer};
use vrplatform_core::{ObjectId, VrObject};

const IDENTITY_MATRIX: [f32; 16] = [
    1.0, 0.0, 0.0, 0.0, //
    0.0, 1.0, 0.0, 0.0, //
    0.0, 0.0, 1.0, 0.0, //
    0.0, 0.0, 0.0, 1.0,
];

/// A [`StereoRenderer`] that allocates nothing on a GPU.
///
/// It hands out fake resource handles, counts draw calls and logs where a
/// graphics API would be invoked. Used when no headset is attached and in tests.
#[derive(Debug)]
pub struct HeadlessStereoRenderer {
    targets: [RenderTarget; 2],
    view: [[f32; 16]; 2],
    projection: [[f32; 16]; 2],
    bound_eye: Option<Eye>,
    next_handle: u32,
    frame_counter: u64,
    current: FrameStats,
    last: FrameStats,
    initialized: bool,
}

impl Default for HeadlessStereoRenderer {
    fn default() -> Self {
        Self {
            targets: [RenderTarget::default(); 2],
            view: [IDENTITY_MATRIX; 2],
            projection: [IDENTITY_MATRIX; 2],
            bound_eye: None,
            next_handle: 1,
            frame_counter: 0,
            current: FrameStats::default(),
            last: FrameStats::default(),
            initialized: false,
        }
    }
}

impl HeadlessStereoRenderer {
    /// Creates an uninitialized renderer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `initialize` succeeded and `shutdown` has not run since.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// The eye currently bound for drawing, if any.
    pub fn bound_eye(&self) -> Option<Eye> {
        self.bound_eye
    }

    /// The view matrix last set for `eye`.
    pub fn view_matrix(&self, eye: Eye) -> [f32; 16] {
        self.view[eye.index()]
    }

    /// The projection matrix last set for `eye`.
    pub fn projection_matrix(&self, eye: Eye) -> [f32; 16] {
        self.projection[eye.index()]
    }

    fn allocate_handle(&mut self) -> u32 {
        let handle = self.next_handle;
        self.next_handle = self.next_handle.wrapping_add(1).max(1);
        handle
    }

    fn create_render_target(&mut self, width: u32, height: u32) -> RenderTarget {
        // Framebuffer, color and depth attachments would be created here.
        let target = RenderTarget {
            framebuffer: self.allocate_handle(),
            color_texture: self.allocate_handle(),
            depth_texture: self.allocate_handle(),
            width,
            height,
        };
        log::info!("Created render target: {width}x{height}");
        target
    }
}

impl StereoRenderer for HeadlessStereoRenderer {
    fn initialize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        log::info!("Initializing stereo renderer...");
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }

        for eye in Eye::BOTH {
            self.targets[eye.index()] = self.create_render_target(width, height);
        }
        self.initialized = true;

        log::info!("Stereo renderer initialized.");
        Ok(())
    }

    fn shutdown(&mut self) {
        if !self.initialized {
            return;
        }
        self.targets = [RenderTarget::default(); 2];
        self.bound_eye = None;
        self.initialized = false;
        log::info!("Stereo renderer shut down.");
    }

    fn begin_frame(&mut self) {
        if !self.initialized {
            log::warn!("begin_frame called on an uninitialized renderer.");
        }
        self.current = FrameStats {
            frame_number: self.frame_counter + 1,
            ..FrameStats::default()
        };
    }

    fn render_eye(&mut self, eye: Eye) {
        // The eye's framebuffer would be bound and cleared here.
        self.bound_eye = Some(eye);
        log::trace!(
            "Rendering {eye} eye into framebuffer {}",
            self.targets[eye.index()].framebuffer
        );
    }

    fn draw_object(&mut self, id: ObjectId, object: &VrObject) {
        self.current.objects_drawn += 1;
        log::trace!(
            "Draw {} {id} (mesh {}, material {})",
            object.object_type,
            object.mesh_id,
            object.material_id
        );
    }

    fn draw_gizmo(&mut self, gizmo: &Gizmo) {
        self.current.gizmos_drawn += 1;
        log::trace!("Draw {:?} gizmo for {}", gizmo.kind, gizmo.target);
    }

    fn submit_frame(&mut self) {
        // Both eye textures would be handed to the XR compositor here.
        log::debug!(
            "Submitted frame {} ({} draws, {} gizmos)",
            self.current.frame_number,
            self.current.objects_drawn,
            self.current.gizmos_drawn
        );
    }

    fn end_frame(&mut self) {
        self.bound_eye = None;
        self.frame_counter = self.current.frame_number;
        self.last = self.current;
    }

    fn eye_render_target(&self, eye: Eye) -> RenderTarget {
        self.targets[eye.index()]
    }

    fn set_view_matrix(&mut self, eye: Eye, matrix: [f32; 16]) {
        self.view[eye.index()] = matrix;
    }

    fn set_projection_matrix(&mut self, eye: Eye, matrix: [f32; 16]) {
        self.projection[eye.index()] = matrix;
    }

    fn last_frame_stats(&self) -> &FrameStats {
        &self.last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::GizmoKind;
    use vrplatform_core::math::Vec3;
    use vrplatform_core::ObjectType;

    #[test]
    fn test_initialize_creates_both_targets() {
        let mut renderer = HeadlessStereoRenderer::new();
        renderer.initialize(1920, 1080).expect("init should succeed");
        assert!(renderer.is_initialized());

        let left = renderer.eye_render_target(Eye::Left);
        let right = renderer.eye_render_target(Eye::Right);
        assert_eq!((left.width, left.height), (1920, 1080));
        assert_eq!((right.width, right.height), (1920, 1080));
        assert_ne!(left.framebuffer, right.framebuffer);
        assert_ne!(left.color_texture, left.depth_texture);
    }

    #[test]
    fn test_zero_dimension_is_rejected() {
        let mut renderer = HeadlessStereoRenderer::new();
        let err = renderer.initialize(0, 1080).unwrap_err();
        assert!(matches!(
            err,
            RenderError::InvalidDimensions {
                width: 0,
                height: 1080
            }
        ));
        assert!(!renderer.is_initialized());
    }

    #[test]
    fn test_frame_counts_draws_for_both_eyes() {
        let mut renderer = HeadlessStereoRenderer::new();
        renderer.initialize(64, 64).expect("init should succeed");
        let cube = VrObject::new(ObjectType::Cube);

        renderer.begin_frame();
        for eye in Eye::BOTH {
            renderer.render_eye(eye);
            assert_eq!(renderer.bound_eye(), Some(eye));
            renderer.draw_object(ObjectId(1), &cube);
            renderer.draw_object(ObjectId(2), &cube);
            renderer.draw_gizmo(&Gizmo {
                target: ObjectId(1),
                kind: GizmoKind::Translate,
                position: Vec3::ZERO,
            });
        }
        renderer.submit_frame();
        renderer.end_frame();

        let stats = *renderer.last_frame_stats();
        assert_eq!(stats.frame_number, 1);
        assert_eq!(stats.objects_drawn, 4);
        assert_eq!(stats.gizmos_drawn, 2);
        assert_eq!(renderer.bound_eye(), None);

        renderer.begin_frame();
        renderer.end_frame();
        assert_eq!(renderer.last_frame_stats().frame_number, 2);
        assert_eq!(renderer.last_frame_stats().objects_drawn, 0);
    }

    #[test]
    fn test_shutdown_zeroes_targets() {
        let mut renderer = HeadlessStereoRenderer::new();
        renderer.initialize(32, 16).expect("init should succeed");
        renderer.shutdown();
        assert!(!renderer.is_initialized());
        assert_eq!(renderer.eye_render_target(Eye::Left), RenderTarget::default());
        assert!(!renderer.eye_render_target(Eye::Right).is_allocated());
    }

    #[test]
    fn test_matrices_are_stored_per_eye() {
        let mut renderer = HeadlessStereoRenderer::new();
        let mut shifted = IDENTITY_MATRIX;
        shifted[12] = -0.032;
        renderer.set_view_matrix(Eye::Left, shifted);
        assert_eq!(renderer.view_matrix(Eye::Left)[12], -0.032);
        assert_eq!(renderer.view_matrix(Eye::Right), IDENTITY_MATRIX);

        renderer.set_projection_matrix(Eye::Right, shifted);
        assert_eq!(renderer.projection_matrix(Eye::Right), shifted);
    }
}
