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

//! Provides a Quaternion type for representing object and hand orientations.

use serde::{Deserialize, Serialize};

use super::{Vec3, EPSILON};
use std::ops::{Add, Mul, Neg};

/// A rotation quaternion stored as `(x, y, z, w)`.
///
/// `[x, y, z]` is the vector part and `w` the scalar part. Rotations are unit
/// quaternions; the constructors below always return one.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Quaternion {
    /// The x component of the vector part.
    pub x: f32,
    /// The y component of the vector part.
    pub y: f32,
    /// The z component of the vector part.
    pub z: f32,
    /// The scalar (real) part.
    pub w: f32,
}

impl Quaternion {
    /// The identity quaternion, representing no rotation.
    pub const IDENTITY: Quaternion = Quaternion {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 1.0,
    };

    /// Creates a new quaternion from its raw components.
    ///
    /// Note: This does not guarantee a unit quaternion.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a quaternion representing a rotation around `axis` by `angle_radians`.
    #[inline]
    pub fn from_axis_angle(axis: Vec3, angle_radians: f32) -> Self {
        let normalized_axis = axis.normalize();
        let half_angle = angle_radians * 0.5;
        let s = half_angle.sin();
        let c = half_angle.cos();
        Self {
            x: normalized_axis.x * s,
            y: normalized_axis.y * s,
            z: normalized_axis.z * s,
            w: c,
        }
    }

    /// Calculates the squared length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Calculates the length (magnitude) of the quaternion.
    #[inline]
    pub fn magnitude(&self) -> f32 {
        self.magnitude_squared().sqrt()
    }

    /// Returns a normalized version of the quaternion with a length of 1.
    /// If the quaternion has a near-zero magnitude, it returns the identity quaternion.
    pub fn normalize(&self) -> Self {
        let mag_sq = self.magnitude_squared();
        if mag_sq > EPSILON {
            let inv_mag = 1.0 / mag_sq.sqrt();
            *self * inv_mag
        } else {
            Self::IDENTITY
        }
    }

    /// Computes the conjugate of the quaternion, which negates the vector part.
    #[inline]
    pub fn conjugate(&self) -> Self {
        Self::new(-self.x, -self.y, -self.z, self.w)
    }

    /// Computes the inverse of the quaternion.
    /// For a unit quaternion, the inverse is equal to its conjugate.
    #[inline]
    pub fn inverse(&self) -> Self {
        let mag_squared = self.magnitude_squared();
        if mag_squared > EPSILON {
            self.conjugate() * (1.0 / mag_squared)
        } else {
            Self::IDENTITY
        }
    }

    /// Computes the dot product of two quaternions.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }

    /// Rotates a 3D vector by this quaternion.
    pub fn rotate_vec3(&self, v: Vec3) -> Vec3 {
        let u = Vec3::new(self.x, self.y, self.z);
        let s: f32 = self.w;
        2.0 * u.dot(v) * u + (s * s - u.dot(u)) * v + 2.0 * s * u.cross(v)
    }

    /// Spherical linear interpolation along the shortest arc.
    ///
    /// `t` is clamped to `[0.0, 1.0]`.
    pub fn slerp(start: Self, end: Self, t: f32) -> Self {
        let t = t.clamp(0.0, 1.0);
        let mut cos_theta = start.dot(end);
        let mut end_adjusted = end;

        if cos_theta < 0.0 {
            cos_theta = -cos_theta;
            end_adjusted = -end;
        }

        if cos_theta > 1.0 - EPSILON {
            ((start * (1.0 - t)) + (end_adjusted * t)).normalize()
        } else {
            let angle = cos_theta.acos();
            let sin_theta_inv = 1.0 / angle.sin();
            let scale_start = ((1.0 - t) * angle).sin() * sin_theta_inv;
            let scale_end = (t * angle).sin() * sin_theta_inv;
            (start * scale_start) + (end_adjusted * scale_end)
        }
    }
}

impl Default for Quaternion {
    #[inline]
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul<Quaternion> for Quaternion {
    type Output = Self;
    /// Combines two rotations using the Hamilton product (`self` applied after `rhs`).
    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        Self {
            x: self.w * rhs.x + self.x * rhs.w + self.y * rhs.z - self.z * rhs.y,
            y: self.w * rhs.y - self.x * rhs.z + self.y * rhs.w + self.z * rhs.x,
            z: self.w * rhs.z + self.x * rhs.y - self.y * rhs.x + self.z * rhs.w,
            w: self.w * rhs.w - self.x * rhs.x - self.y * rhs.y - self.z * rhs.z,
        }
    }
}

impl Mul<Vec3> for Quaternion {
    type Output = Vec3;
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        self.normalize().rotate_vec3(rhs)
    }
}

impl Mul<f32> for Quaternion {
    type Output = Self;
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs, self.w * rhs)
    }
}

impl Add<Quaternion> for Quaternion {
    type Output = Self;
    /// Component-wise addition; only meaningful inside interpolation.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.x + rhs.x,
            self.y + rhs.y,
            self.z + rhs.z,
            self.w + rhs.w,
        )
    }
}

impl Neg for Quaternion {
    type Output = Self;
    #[inline]
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z, -self.w)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, approx_eq_eps, vec3_approx_eq, FRAC_PI_2, PI};

    fn quat_approx_eq(a: Quaternion, b: Quaternion) -> bool {
        // q and -q encode the same rotation.
        let d = a.dot(b).abs();
        approx_eq_eps(d, 1.0, 1e-4)
    }

    #[test]
    fn test_identity_leaves_vectors_untouched() {
        let v = Vec3::new(1.0, -2.0, 3.0);
        assert!(vec3_approx_eq(Quaternion::IDENTITY * v, v));
        assert_eq!(Quaternion::default(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_from_axis_angle_rotates() {
        let q = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
        assert!(approx_eq(q.magnitude(), 1.0));
        // +X rotated 90 degrees around +Y lands on -Z.
        assert!(vec3_approx_eq(q * Vec3::X, -Vec3::Z));
    }

    #[test]
    fn test_composition_and_inverse() {
        let a = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2);
        let b = Quaternion::from_axis_angle(Vec3::Z, FRAC_PI_2);
        let half_turn = Quaternion::from_axis_angle(Vec3::Z, PI);
        assert!(quat_approx_eq(a * b, half_turn));
        assert!(quat_approx_eq(a * a.inverse(), Quaternion::IDENTITY));
        assert_eq!(a.conjugate().w, a.w);
    }

    #[test]
    fn test_normalize_degenerate() {
        let zero = Quaternion::new(0.0, 0.0, 0.0, 0.0);
        assert_eq!(zero.normalize(), Quaternion::IDENTITY);
        assert_eq!(zero.inverse(), Quaternion::IDENTITY);
    }

    #[test]
    fn test_slerp_endpoints_and_midpoint() {
        let start = Quaternion::IDENTITY;
        let end = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2);
        assert!(quat_approx_eq(Quaternion::slerp(start, end, 0.0), start));
        assert!(quat_approx_eq(Quaternion::slerp(start, end, 1.0), end));
        let mid = Quaternion::slerp(start, end, 0.5);
        let expected = Quaternion::from_axis_angle(Vec3::Y, FRAC_PI_2 / 2.0);
        assert!(quat_approx_eq(mid, expected));
    }
}
