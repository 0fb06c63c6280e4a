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

//! Stereo rendering interface and its headless backend.

mod headless;

pub use self::headless::HeadlessStereoRenderer;

use std::fmt;
use vrplatform_core::math::Vec3;
use vrplatform_core::{ObjectId, VrObject};

/// One of the two eyes of a head-mounted display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    /// Left eye, index 0.
    Left,
    /// Right eye, index 1.
    Right,
}

impl Eye {
    /// Both eyes in submission order.
    pub const BOTH: [Eye; 2] = [Eye::Left, Eye::Right];

    /// Stable array index (left = 0, right = 1).
    #[inline]
    pub fn index(&self) -> usize {
        match self {
            Eye::Left => 0,
            Eye::Right => 1,
        }
    }
}

impl fmt::Display for Eye {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Eye::Left => f.write_str("left"),
            Eye::Right => f.write_str("right"),
        }
    }
}

/// Offscreen surface one eye is rendered into.
///
/// The handles are opaque backend identifiers, `0` meaning "none".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderTarget {
    /// Framebuffer handle.
    pub framebuffer: u32,
    /// Color attachment handle.
    pub color_texture: u32,
    /// Depth attachment handle.
    pub depth_texture: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl RenderTarget {
    /// Whether the target has a non-zero size.
    pub fn is_allocated(&self) -> bool {
        self.width > 0 && self.height > 0
    }
}

/// Visual handle kind drawn around a selected object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GizmoKind {
    /// Selection outline.
    Selection,
    /// Translation arrows.
    Translate,
    /// Rotation rings.
    Rotate,
    /// Scale handles.
    Scale,
}

/// A gizmo to draw this frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gizmo {
    /// Object the gizmo is attached to.
    pub target: ObjectId,
    /// Kind of handle.
    pub kind: GizmoKind,
    /// World-space anchor, usually the object's position.
    pub position: Vec3,
}

/// Per-frame draw counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameStats {
    /// Monotonic frame counter, starting at 1 for the first frame.
    pub frame_number: u64,
    /// Object draw calls issued this frame, across both eyes.
    pub objects_drawn: u32,
    /// Gizmo draw calls issued this frame, across both eyes.
    pub gizmos_drawn: u32,
}

/// Errors reported by a stereo renderer.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// An operation was attempted before the renderer was initialized.
    #[error("the stereo renderer is not initialized")]
    NotInitialized,
    /// A render target was requested with a zero dimension.
    #[error("invalid render target size {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// The graphics backend failed to come up.
    #[error("failed to initialize graphics backend: {0}")]
    InitializationFailed(String),
}

/// A renderer that produces one image per eye each frame.
///
/// A frame is driven as `begin_frame`, then for each eye `render_eye` followed
/// by the draw calls for that eye, then `submit_frame` and `end_frame`.
pub trait StereoRenderer: fmt::Debug {
    /// Allocates one render target per eye of the given size.
    fn initialize(&mut self, width: u32, height: u32) -> Result<(), RenderError>;

    /// Releases the render targets.
    fn shutdown(&mut self);

    /// Starts a new frame.
    fn begin_frame(&mut self);

    /// Binds the render target of `eye` for subsequent draws.
    fn render_eye(&mut self, eye: Eye);

    /// Draws one scene object into the bound eye.
    fn draw_object(&mut self, id: ObjectId, object: &VrObject);

    /// Draws an editor gizmo into the bound eye.
    fn draw_gizmo(&mut self, gizmo: &Gizmo);

    /// Hands both eye images to the compositor.
    fn submit_frame(&mut self);

    /// Finishes the frame and publishes its stats.
    fn end_frame(&mut self);

    /// The render target of `eye`.
    fn eye_render_target(&self, eye: Eye) -> RenderTarget;

    /// Sets the column-major view matrix of `eye`.
    fn set_view_matrix(&mut self, eye: Eye, matrix: [f32; 16]);

    /// Sets the column-major projection matrix of `eye`.
    fn set_projection_matrix(&mut self, eye: Eye, matrix: [f32; 16]);

    /// Counters of the last completed frame.
    fn last_frame_stats(&self) -> &FrameStats;
}
