// Copyright 2026 the Veld contributors
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

//! Provides 3D and 4D vector types and their associated operations.

use bincode::{Decode, Encode};
use serde::{Deserialize, Serialize};

use super::Quaternion;
use std::ops::{Add, Div, Index, IndexMut, Mul, Neg, Sub};

// --- Vec3 ---

/// A 3-dimensional vector with `f32` components.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Vec3 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
    /// The z component of the vector.
    pub z: f32,
}

impl Vec3 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    };
    /// A vector with all components set to `1.0`.
    pub const ONE: Self = Self {
        x: 1.0,
        y: 1.0,
        z: 1.0,
    };
    /// The unit vector pointing along the positive X-axis.
    pub const X: Self = Self {
        x: 1.0,
        y: 0.0,
        z: 0.0,
    };
    /// The unit vector pointing along the positive Y-axis.
    pub const Y: Self = Self {
        x: 0.0,
        y: 1.0,
        z: 0.0,
    };
    /// The unit vector pointing along the positive Z-axis.
    pub const Z: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 1.0,
    };

    /// Creates a new `Vec3` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Returns a new vector with the absolute value of each component.
    #[inline]
    pub const fn abs(self) -> Self {
        Self {
            x: if self.x < 0.0 { -self.x } else { self.x },
            y: if self.y < 0.0 { -self.y } else { self.y },
            z: if self.z < 0.0 { -self.z } else { self.z },
        }
    }

    /// Calculates the squared length (magnitude) of the vector.
    /// This is faster than `length()` as it avoids a square root.
    #[inline]
    pub fn length_squared(&self) -> f32 {
        self.dot(*self)
    }

    /// Calculates the length (magnitude) of the vector.
    #[inline]
    pub fn length(&self) -> f32 {
        self.length_squared().sqrt()
    }

    /// Normalizes the vector in place and returns its previous length.
    ///
    /// Near-zero vectors are left untouched rather than treated as an error;
    /// the (near-zero) previous length is still returned so callers can detect
    /// the degenerate case if they care.
    #[inline]
    pub fn normalize(&mut self) -> f32 {
        let len = self.length();
        if len > 1e-8 {
            let inv_len = 1.0 / len;
            self.x *= inv_len;
            self.y *= inv_len;
            self.z *= inv_len;
        }
        len
    }

    /// Returns a normalized copy of the vector.
    ///
    /// Near-zero vectors are returned unchanged, mirroring [`Vec3::normalize`].
    #[inline]
    pub fn normalized(&self) -> Self {
        let mut v = *self;
        v.normalize();
        v
    }

    /// Calculates the dot product of this vector and another.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Computes the cross product of this vector and another.
    #[inline]
    pub fn cross(&self, other: Self) -> Self {
        Self {
            x: self.y * other.z - self.z * other.y,
            y: self.z * other.x - self.x * other.z,
            z: self.x * other.y - self.y * other.x,
        }
    }

    /// Sets each component to the minimum of its current value and the
    /// corresponding component of `other`.
    #[inline]
    pub fn make_floor(&mut self, other: Self) {
        if other.x < self.x {
            self.x = other.x;
        }
        if other.y < self.y {
            self.y = other.y;
        }
        if other.z < self.z {
            self.z = other.z;
        }
    }

    /// Sets each component to the maximum of its current value and the
    /// corresponding component of `other`.
    #[inline]
    pub fn make_ceil(&mut self, other: Self) {
        if other.x > self.x {
            self.x = other.x;
        }
        if other.y > self.y {
            self.y = other.y;
        }
        if other.z > self.z {
            self.z = other.z;
        }
    }

    /// Calculates the squared distance between this vector and another.
    #[inline]
    pub fn distance_squared(&self, other: Self) -> f32 {
        (*self - other).length_squared()
    }

    /// Calculates the distance between this vector and another.
    #[inline]
    pub fn distance(&self, other: Self) -> f32 {
        self.distance_squared(other).sqrt()
    }

    /// Performs a linear interpolation between two vectors.
    #[inline]
    pub fn lerp(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }

    /// Computes the shortest-arc quaternion rotating this vector onto `dest`.
    ///
    /// Based on Stan Melax's article in Game Programming Gems. When the two
    /// vectors are antiparallel every axis perpendicular to them is a valid
    /// rotation axis; `fallback_axis` picks one deterministically, and when it
    /// is `None` an arbitrary perpendicular axis is generated instead.
    pub fn rotation_to(&self, dest: Self, fallback_axis: Option<Vec3>) -> Quaternion {
        let v0 = self.normalized();
        let v1 = dest.normalized();

        let d = v0.dot(v1);
        // If dot == 1, vectors are the same.
        if d >= 1.0 {
            return Quaternion::IDENTITY;
        }

        let s = ((1.0 + d) * 2.0).sqrt();
        if s < 1e-6 {
            match fallback_axis {
                // Rotate 180 degrees about the fallback axis.
                Some(axis) if axis != Vec3::ZERO => {
                    Quaternion::from_axis_angle(axis, std::f32::consts::PI)
                }
                _ => {
                    // Generate an axis.
                    let mut axis = Vec3::X.cross(*self);
                    if axis.length_squared() < 1e-12 {
                        // Pick another if this and X are colinear.
                        axis = Vec3::Y.cross(*self);
                    }
                    axis.normalize();
                    Quaternion::from_axis_angle(axis, std::f32::consts::PI)
                }
            }
        } else {
            let c = v0.cross(v1);
            let inv_s = 1.0 / s;
            Quaternion::new(c.x * inv_s, c.y * inv_s, c.z * inv_s, s * 0.5)
        }
    }

    /// Retrieves a component of the vector by its index.
    ///
    /// # Panics
    /// Panics if `index` is not 0, 1, or 2.
    #[inline]
    pub fn get(&self, index: usize) -> f32 {
        match index {
            0 => self.x,
            1 => self.y,
            2 => self.z,
            _ => panic!("Index out of bounds for Vec3"),
        }
    }
}

// --- Operator Overloads ---

impl Default for Vec3 {
    /// Returns `Vec3::ZERO`.
    #[inline]
    fn default() -> Self {
        Self::ZERO
    }
}

impl Add for Vec3 {
    type Output = Self;
    /// Adds two vectors component-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Self;
    /// Subtracts two vectors component-wise.
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
            z: self.z - rhs.z,
        }
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;
    /// Multiplies the vector by a scalar.
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
        }
    }
}

impl Mul<Vec3> for f32 {
    type Output = Vec3;
    /// Multiplies a scalar by a vector.
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        rhs * self
    }
}

impl Mul<Vec3> for Vec3 {
    type Output = Self;
    /// Multiplies two vectors component-wise.
    #[inline]
    fn mul(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x * rhs.x,
            y: self.y * rhs.y,
            z: self.z * rhs.z,
        }
    }
}

impl Div<f32> for Vec3 {
    type Output = Self;
    /// Divides the vector by a scalar.
    #[inline]
    fn div(self, rhs: f32) -> Self::Output {
        let inv_rhs = 1.0 / rhs;
        Self {
            x: self.x * inv_rhs,
            y: self.y * inv_rhs,
            z: self.z * inv_rhs,
        }
    }
}

impl Div<Vec3> for Vec3 {
    type Output = Self;
    /// Divides two vectors component-wise.
    #[inline]
    fn div(self, rhs: Vec3) -> Self::Output {
        Self {
            x: self.x / rhs.x,
            y: self.y / rhs.y,
            z: self.z / rhs.z,
        }
    }
}

impl Neg for Vec3 {
    type Output = Self;
    /// Negates the vector.
    #[inline]
    fn neg(self) -> Self::Output {
        Self {
            x: -self.x,
            y: -self.y,
            z: -self.z,
        }
    }
}

impl Index<usize> for Vec3 {
    type Output = f32;
    /// Allows accessing a vector component by index (`v[0]`, `v[1]`, `v[2]`).
    ///
    /// # Panics
    /// Panics if `index` is not 0, 1, or 2.
    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        match index {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("Index out of bounds for Vec3"),
        }
    }
}

impl IndexMut<usize> for Vec3 {
    /// Allows mutating a vector component by index.
    ///
    /// # Panics
    /// Panics if `index` is not 0, 1, or 2.
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut Self::Output {
        match index {
            0 => &mut self.x,
            1 => &mut self.y,
            2 => &mut self.z,
            _ => panic!("Index out of bounds for Vec3"),
        }
    }
}

// --- Vec4 ---

/// A 4-dimensional vector with `f32` components, used for homogeneous
/// coordinates in matrix transforms.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    bytemuck::Pod,
    bytemuck::Zeroable,
    Serialize,
    Deserialize,
    Encode,
    Decode,
)]
#[repr(C)]
pub struct Vec4 {
    /// The x component of the vector.
    pub x: f32,
    /// The y component of the vector.
    pub y: f32,
    /// The z component of the vector.
    pub z: f32,
    /// The w component of the vector.
    pub w: f32,
}

impl Vec4 {
    /// A vector with all components set to `0.0`.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        z: 0.0,
        w: 0.0,
    };

    /// Creates a new `Vec4` with the specified components.
    #[inline]
    pub const fn new(x: f32, y: f32, z: f32, w: f32) -> Self {
        Self { x, y, z, w }
    }

    /// Creates a `Vec4` from a `Vec3` and an explicit w component.
    #[inline]
    pub const fn from_vec3(v: Vec3, w: f32) -> Self {
        Self {
            x: v.x,
            y: v.y,
            z: v.z,
            w,
        }
    }

    /// Drops the w component, returning the xyz part as a `Vec3`.
    #[inline]
    pub const fn truncate(self) -> Vec3 {
        Vec3 {
            x: self.x,
            y: self.y,
            z: self.z,
        }
    }

    /// Calculates the dot product of this vector and another.
    #[inline]
    pub fn dot(&self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z + self.w * other.w
    }
}

impl Add for Vec4 {
    type Output = Self;
    /// Adds two vectors component-wise.
    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        Self {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
            z: self.z + rhs.z,
            w: self.w + rhs.w,
        }
    }
}

impl Mul<f32> for Vec4 {
    type Output = Self;
    /// Multiplies the vector by a scalar.
    #[inline]
    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            x: self.x * rhs,
            y: self.y * rhs,
            z: self.z * rhs,
            w: self.w * rhs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{approx_eq, EPSILON};
    use approx::assert_relative_eq;

    fn vec3_approx_eq(a: Vec3, b: Vec3) -> bool {
        approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
    }

    #[test]
    fn test_basic_arithmetic() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, -5.0, 6.0);

        assert_eq!(a + b, Vec3::new(5.0, -3.0, 9.0));
        assert_eq!(a - b, Vec3::new(-3.0, 7.0, -3.0));
        assert_eq!(a * 2.0, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(2.0 * a, Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(a * b, Vec3::new(4.0, -10.0, 18.0));
        assert_eq!(-a, Vec3::new(-1.0, -2.0, -3.0));
        assert!(vec3_approx_eq(a / 2.0, Vec3::new(0.5, 1.0, 1.5)));
    }

    #[test]
    fn test_dot_and_cross() {
        assert_relative_eq!(Vec3::X.dot(Vec3::Y), 0.0);
        assert_relative_eq!(Vec3::X.dot(Vec3::X), 1.0);
        assert_eq!(Vec3::X.cross(Vec3::Y), Vec3::Z);
        assert_eq!(Vec3::Y.cross(Vec3::X), -Vec3::Z);
    }

    #[test]
    fn test_length() {
        let v = Vec3::new(3.0, 4.0, 0.0);
        assert_relative_eq!(v.length_squared(), 25.0);
        assert_relative_eq!(v.length(), 5.0);
    }

    #[test]
    fn test_normalize_returns_previous_length() {
        let mut v = Vec3::new(3.0, 4.0, 0.0);
        let prev = v.normalize();
        assert_relative_eq!(prev, 5.0, epsilon = EPSILON);
        assert_relative_eq!(v.length(), 1.0, epsilon = EPSILON);
    }

    #[test]
    fn test_normalize_near_zero_is_noop() {
        let mut v = Vec3::new(1e-12, 0.0, 0.0);
        let prev = v.normalize();
        // The vector must be left untouched, not zeroed or inf'd.
        assert_eq!(v, Vec3::new(1e-12, 0.0, 0.0));
        assert!(prev < 1e-8);
    }

    #[test]
    fn test_make_floor_and_ceil() {
        let mut floor = Vec3::new(1.0, 5.0, -2.0);
        floor.make_floor(Vec3::new(0.0, 9.0, -1.0));
        assert_eq!(floor, Vec3::new(0.0, 5.0, -2.0));

        let mut ceil = Vec3::new(1.0, 5.0, -2.0);
        ceil.make_ceil(Vec3::new(0.0, 9.0, -1.0));
        assert_eq!(ceil, Vec3::new(1.0, 9.0, -1.0));
    }

    #[test]
    fn test_rotation_to_simple() {
        let q = Vec3::X.rotation_to(Vec3::Y, None);
        let rotated = q * Vec3::X;
        assert!(vec3_approx_eq(rotated, Vec3::Y));
    }

    #[test]
    fn test_rotation_to_identical_vectors() {
        let q = Vec3::Z.rotation_to(Vec3::Z, None);
        assert_eq!(q, crate::math::Quaternion::IDENTITY);
    }

    #[test]
    fn test_rotation_to_antiparallel_uses_fallback_axis() {
        let q = Vec3::X.rotation_to(-Vec3::X, Some(Vec3::Z));
        let rotated = q * Vec3::X;
        assert!(vec3_approx_eq(rotated, -Vec3::X));
        // A 180 degree turn about Z keeps Z fixed.
        let z_rotated = q * Vec3::Z;
        assert!(vec3_approx_eq(z_rotated, Vec3::Z));
    }

    #[test]
    fn test_rotation_to_antiparallel_generates_axis() {
        let q = Vec3::Y.rotation_to(-Vec3::Y, None);
        let rotated = q * Vec3::Y;
        assert!(vec3_approx_eq(rotated, -Vec3::Y));
    }

    #[test]
    fn test_vec4_from_vec3_roundtrip() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        let v4 = Vec4::from_vec3(v, 1.0);
        assert_eq!(v4.w, 1.0);
        assert_eq!(v4.truncate(), v);
    }
}
