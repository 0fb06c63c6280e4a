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

//! Geometric primitives for picking and overlap tests.

use super::{Vec3, EPSILON};

/// An Axis-Aligned Bounding Box (AABB).
///
/// Defined by its minimum and maximum corner points. Used as the pick and
/// overlap volume of every scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// The corner of the box with the smallest coordinates on all axes.
    pub min: Vec3,
    /// The corner of the box with the largest coordinates on all axes.
    pub max: Vec3,
}

impl Aabb {
    /// An invalid `Aabb` where `min` components are positive infinity and `max` are negative infinity.
    ///
    /// Merging any valid `Aabb` with `INVALID` yields that valid `Aabb`.
    pub const INVALID: Self = Self {
        min: Vec3::new(f32::INFINITY, f32::INFINITY, f32::INFINITY),
        max: Vec3::new(f32::NEG_INFINITY, f32::NEG_INFINITY, f32::NEG_INFINITY),
    };

    /// Creates a new `Aabb` from two corner points given in any order.
    #[inline]
    pub fn from_min_max(a: Vec3, b: Vec3) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    /// Creates a new `Aabb` from a center point and its half-extents.
    ///
    /// Negative half-extents are treated as their absolute value.
    #[inline]
    pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
        let safe_half_extents = half_extents.abs();
        Self {
            min: center - safe_half_extents,
            max: center + safe_half_extents,
        }
    }

    /// Calculates the center point of the `Aabb`.
    #[inline]
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Calculates the full size (width, height, depth) of the `Aabb`.
    #[inline]
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Checks if the `Aabb` is valid (i.e., `min` <= `max` on all axes).
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Checks if a point is contained within or on the boundary of the `Aabb`.
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Checks if this `Aabb` intersects with another `Aabb`.
    ///
    /// Boxes that only touch at the boundary are considered to be intersecting.
    #[inline]
    pub fn intersects_aabb(&self, other: &Aabb) -> bool {
        (self.min.x <= other.max.x && self.max.x >= other.min.x)
            && (self.min.y <= other.max.y && self.max.y >= other.min.y)
            && (self.min.z <= other.max.z && self.max.z >= other.min.z)
    }

    /// Creates a new `Aabb` that encompasses both this `Aabb` and another one.
    #[inline]
    pub fn merge(&self, other: &Aabb) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

impl Default for Aabb {
    /// Returns `Aabb::INVALID`.
    #[inline]
    fn default() -> Self {
        Self::INVALID
    }
}

/// A half-line starting at `origin` and extending along `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Where the ray starts.
    pub origin: Vec3,
    /// Unit direction of the ray.
    pub direction: Vec3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    ///
    /// A zero direction stays zero; such a ray hits nothing.
    #[inline]
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Returns the point at distance `t` along the ray.
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Slab test against an `Aabb`.
    ///
    /// Returns the distance to the first intersection in front of the origin,
    /// or `0.0` when the origin is inside the box.
    pub fn intersect_aabb(&self, aabb: &Aabb) -> Option<f32> {
        if self.direction.length_squared() < EPSILON {
            return None;
        }

        let mut t_min = 0.0_f32;
        let mut t_max = f32::INFINITY;

        for (origin, dir, min, max) in [
            (self.origin.x, self.direction.x, aabb.min.x, aabb.max.x),
            (self.origin.y, self.direction.y, aabb.min.y, aabb.max.y),
            (self.origin.z, self.direction.z, aabb.min.z, aabb.max.z),
        ] {
            if dir.abs() < EPSILON {
                // Parallel to this slab: must already be between its planes.
                if origin < min || origin > max {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir;
            let mut t0 = (min - origin) * inv;
            let mut t1 = (max - origin) * inv;
            if t0 > t1 {
                std::mem::swap(&mut t0, &mut t1);
            }
            t_min = t_min.max(t0);
            t_max = t_max.min(t1);
            if t_min > t_max {
                return None;
            }
        }

        Some(t_min)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, vec3_approx_eq};

    #[test]
    fn test_aabb_from_min_max_orders_corners() {
        let aabb = Aabb::from_min_max(Vec3::new(4.0, 5.0, 6.0), Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.min, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(aabb.max, Vec3::new(4.0, 5.0, 6.0));
    }

    #[test]
    fn test_aabb_from_center_half_extents() {
        let aabb =
            Aabb::from_center_half_extents(Vec3::new(10.0, 20.0, 30.0), Vec3::new(-1.0, 2.0, 3.0));
        assert_eq!(aabb.min, Vec3::new(9.0, 18.0, 27.0));
        assert_eq!(aabb.max, Vec3::new(11.0, 22.0, 33.0));
        assert!(vec3_approx_eq(aabb.center(), Vec3::new(10.0, 20.0, 30.0)));
        assert!(vec3_approx_eq(aabb.size(), Vec3::new(2.0, 4.0, 6.0)));
    }

    #[test]
    fn test_aabb_contains_and_intersects() {
        let a = Aabb::from_min_max(Vec3::ZERO, Vec3::splat(2.0));
        assert!(a.contains_point(Vec3::splat(1.0)));
        assert!(a.contains_point(Vec3::ZERO));
        assert!(!a.contains_point(Vec3::new(2.1, 1.0, 1.0)));

        let touching = Aabb::from_min_max(Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 2.0, 2.0));
        let apart = Aabb::from_min_max(Vec3::new(2.1, 0.0, 0.0), Vec3::new(3.0, 2.0, 2.0));
        assert!(a.intersects_aabb(&touching));
        assert!(!a.intersects_aabb(&apart));
    }

    #[test]
    fn test_aabb_merge_with_invalid() {
        let a = Aabb::from_min_max(Vec3::ZERO, Vec3::ONE);
        assert_eq!(Aabb::INVALID.merge(&a), a);
        assert!(!Aabb::default().is_valid());
    }

    #[test]
    fn test_ray_hits_box_in_front() {
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -2.0));
        assert!(vec3_approx_eq(ray.direction, Vec3::FORWARD));
        let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        let t = ray.intersect_aabb(&aabb).expect("should hit");
        assert!(approx_eq(t, 4.0));
        assert!(vec3_approx_eq(ray.at(t), Vec3::new(0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_ray_misses_box_behind_or_aside() {
        let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        let behind = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::Z);
        assert!(behind.intersect_aabb(&aabb).is_none());
        let aside = Ray::new(Vec3::new(3.0, 0.0, 5.0), Vec3::FORWARD);
        assert!(aside.intersect_aabb(&aabb).is_none());
        let degenerate = Ray::new(Vec3::ZERO, Vec3::ZERO);
        assert!(degenerate.intersect_aabb(&aabb).is_none());
    }

    #[test]
    fn test_ray_from_inside_reports_zero() {
        let aabb = Aabb::from_center_half_extents(Vec3::ZERO, Vec3::ONE);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);
        assert_eq!(ray.intersect_aabb(&aabb), Some(0.0));
    }
}
