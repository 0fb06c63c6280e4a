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

//! Math primitives used by the scene, the editor and the hand tracker.
//!
//! Everything here is `f32` and right-handed with +Y up and -Z forward,
//! matching the convention of the tracked hand poses. Angles are in
//! **radians** unless a function says otherwise.

/// A small constant for floating-point comparisons.
pub const EPSILON: f32 = 1e-5;

pub use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, PI};

/// Standard gravity in meters per second squared.
pub const GRAVITY: f32 = 9.81;

pub mod geometry;
pub mod quaternion;
pub mod vector;

pub use self::geometry::{Aabb, Ray};
pub use self::quaternion::Quaternion;
pub use self::vector::Vec3;

/// Converts an angle from degrees to radians.
///
/// # Examples
///
/// ```
/// use vrplatform_core::math::{degrees_to_radians, PI};
/// assert_eq!(degrees_to_radians(180.0), PI);
/// ```
#[inline]
pub fn degrees_to_radians(degrees: f32) -> f32 {
    degrees * (PI / 180.0)
}

/// Performs an approximate equality comparison between two floats with a custom tolerance.
///
/// # Examples
///
/// ```
/// use vrplatform_core::math::approx_eq_eps;
/// assert!(approx_eq_eps(0.001, 0.002, 1e-2));
/// assert!(!approx_eq_eps(0.001, 0.002, 1e-4));
/// ```
#[inline]
pub fn approx_eq_eps(a: f32, b: f32, epsilon: f32) -> bool {
    (a - b).abs() < epsilon
}

/// Performs an approximate equality comparison using the module's default [`EPSILON`].
///
/// # Examples
///
/// ```
/// use vrplatform_core::math::{approx_eq, EPSILON};
/// assert!(approx_eq(1.0, 1.0 + EPSILON / 2.0));
/// assert!(!approx_eq(1.0, 1.0 + EPSILON * 2.0));
/// ```
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    approx_eq_eps(a, b, EPSILON)
}

/// Component-wise [`approx_eq_eps`] for two vectors.
#[inline]
pub fn vec3_approx_eq_eps(a: Vec3, b: Vec3, epsilon: f32) -> bool {
    approx_eq_eps(a.x, b.x, epsilon)
        && approx_eq_eps(a.y, b.y, epsilon)
        && approx_eq_eps(a.z, b.z, epsilon)
}

/// Component-wise [`approx_eq`] for two vectors.
#[inline]
pub fn vec3_approx_eq(a: Vec3, b: Vec3) -> bool {
    vec3_approx_eq_eps(a, b, EPSILON)
}
