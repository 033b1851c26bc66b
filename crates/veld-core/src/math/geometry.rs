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

//! Provides geometric primitive shapes for spatial calculations.
//!
//! This module contains common geometric structures used in hit-testing,
//! spatial targeting, and other spatial reasoning tasks within the engine.

use super::{Mat4, Vec3, EPSILON};

/// Represents an Axis-Aligned Bounding Box (AABB).
///
/// An AABB is a rectangular prism aligned with the coordinate axes, defined by
/// its minimum and maximum corner points. A box may also be *null*: a null box
/// contains nothing, merging anything with it leaves the merge target
/// unchanged, and it intersects nothing. Default-constructed boxes are null.
///
/// The 8 corner points are cached and recomputed whenever the extents change,
/// so repeated corner queries (plane tests, transforms) do not pay the
/// expansion cost each time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    min: Vec3,
    max: Vec3,
    corners: [Vec3; 8],
    null: bool,
}

impl Aabb {
    /// Creates a new null `Aabb` containing nothing.
    #[inline]
    pub fn null() -> Self {
        Self {
            min: Vec3::new(-0.5, -0.5, -0.5),
            max: Vec3::new(0.5, 0.5, 0.5),
            corners: [Vec3::ZERO; 8],
            null: true,
        }
    }

    /// Creates a new `Aabb` from two corner points.
    ///
    /// This constructor automatically ensures that `min` holds the
    /// component-wise minimum and `max` holds the component-wise maximum,
    /// regardless of the order the points are passed in.
    pub fn from_min_max(a: Vec3, b: Vec3) -> Self {
        let mut aabb = Self::null();
        let mut min = a;
        let mut max = b;
        min.make_floor(b);
        max.make_ceil(a);
        aabb.set_extents(min, max);
        aabb
    }

    /// Returns `true` if this box is null (contains nothing).
    #[inline]
    pub fn is_null(&self) -> bool {
        self.null
    }

    /// Makes this box null, so it contains nothing.
    #[inline]
    pub fn set_null(&mut self) {
        self.null = true;
    }

    /// The corner of the box with the smallest coordinates on all axes.
    ///
    /// The value is unspecified while the box is null.
    #[inline]
    pub fn min(&self) -> Vec3 {
        self.min
    }

    /// The corner of the box with the largest coordinates on all axes.
    ///
    /// The value is unspecified while the box is null.
    #[inline]
    pub fn max(&self) -> Vec3 {
        self.max
    }

    /// Sets both extents at once and marks the box non-null.
    ///
    /// `min` must be component-wise less than or equal to `max`.
    pub fn set_extents(&mut self, min: Vec3, max: Vec3) {
        debug_assert!(
            min.x <= max.x && min.y <= max.y && min.z <= max.z,
            "Aabb extents out of order: min {min:?}, max {max:?}"
        );
        self.min = min;
        self.max = max;
        self.null = false;
        self.update_corners();
    }

    /// Returns the 8 corner points of the box.
    ///
    /// Corners 0-3 form the near face (minimum z) counter-clockwise starting
    /// at `min`, corners 4-7 the far face starting at `max`. The slice is only
    /// meaningful for a non-null box.
    #[inline]
    pub fn corners(&self) -> &[Vec3; 8] {
        &self.corners
    }

    fn update_corners(&mut self) {
        let (min, max) = (self.min, self.max);
        self.corners[0] = min;
        self.corners[1] = Vec3::new(min.x, max.y, min.z);
        self.corners[2] = Vec3::new(max.x, max.y, min.z);
        self.corners[3] = Vec3::new(max.x, min.y, min.z);
        self.corners[4] = max;
        self.corners[5] = Vec3::new(min.x, max.y, max.z);
        self.corners[6] = Vec3::new(min.x, min.y, max.z);
        self.corners[7] = Vec3::new(max.x, min.y, max.z);
    }

    /// Calculates the center point of the box, or `Vec3::ZERO` if it is null.
    #[inline]
    pub fn center(&self) -> Vec3 {
        if self.null {
            Vec3::ZERO
        } else {
            (self.min + self.max) * 0.5
        }
    }

    /// Calculates the volume of the box. A null box has zero volume.
    #[inline]
    pub fn volume(&self) -> f32 {
        if self.null {
            0.0
        } else {
            let size = self.max - self.min;
            size.x * size.y * size.z
        }
    }

    /// Grows this box to also enclose `other`.
    ///
    /// Merging a null box in is a no-op; merging into a null box makes this
    /// box a copy of `other`.
    pub fn merge(&mut self, other: &Aabb) {
        if other.null {
            return;
        }
        if self.null {
            self.set_extents(other.min, other.max);
        } else {
            let mut min = self.min;
            let mut max = self.max;
            min.make_floor(other.min);
            max.make_ceil(other.max);
            self.set_extents(min, max);
        }
    }

    /// Checks if a point is contained within or on the boundary of the box.
    /// A null box contains no points.
    #[inline]
    pub fn contains_point(&self, point: Vec3) -> bool {
        !self.null
            && point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Checks if this box overlaps another. A null box intersects nothing;
    /// boxes that only touch at the boundary are considered intersecting.
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        if self.null || other.null {
            return false;
        }
        (self.min.x <= other.max.x && self.max.x >= other.min.x)
            && (self.min.y <= other.max.y && self.max.y >= other.min.y)
            && (self.min.z <= other.max.z && self.max.z >= other.min.z)
    }

    /// Recomputes this box as the tight axis-aligned bound of its 8 corners
    /// after transformation by `matrix`.
    ///
    /// The result never shrinks below the transformed shape's actual extent
    /// but may be looser than optimal for rotations. Null boxes stay null.
    pub fn transform(&mut self, matrix: &Mat4) {
        if self.null {
            return;
        }
        let first = matrix.transform_point(self.corners[0]);
        let mut min = first;
        let mut max = first;
        for corner in &self.corners[1..] {
            let p = matrix.transform_point(*corner);
            min.make_floor(p);
            max.make_ceil(p);
        }
        self.set_extents(min, max);
    }
}

impl Default for Aabb {
    /// Returns a null `Aabb`.
    #[inline]
    fn default() -> Self {
        Self::null()
    }
}

/// The side of a plane a point or volume lies on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaneSide {
    /// On the plane itself (within epsilon).
    None,
    /// The half-space the normal points into.
    Positive,
    /// The half-space opposite the normal.
    Negative,
    /// Spanning the plane (volumes only).
    Both,
}

/// A plane in 3D space, stored in normal-distance form.
///
/// Points `p` on the plane satisfy `normal.dot(p) + d == 0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// The plane's unit normal.
    pub normal: Vec3,
    /// The negated distance from the origin along the normal.
    pub d: f32,
}

impl Plane {
    /// Creates a plane from a unit normal and a point it passes through.
    #[inline]
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            normal,
            d: -normal.dot(point),
        }
    }

    /// Returns the signed distance from `point` to the plane. Positive values
    /// lie on the side the normal points into.
    #[inline]
    pub fn distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    /// Classifies which side of the plane `point` lies on.
    pub fn side(&self, point: Vec3) -> PlaneSide {
        let dist = self.distance(point);
        if dist < -EPSILON {
            PlaneSide::Negative
        } else if dist > EPSILON {
            PlaneSide::Positive
        } else {
            PlaneSide::None
        }
    }
}

/// A convex volume bounded by a set of planes, such as a frustum or a
/// spatial picking region.
///
/// The `outside` side designates which half-space of each plane is outside
/// the volume; a point is inside the volume when it is not on the outside
/// side of any bounding plane.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaneBoundedVolume {
    /// The planes bounding the volume.
    pub planes: Vec<Plane>,
    /// The side of each plane that is outside the volume.
    pub outside: PlaneSide,
}

impl PlaneBoundedVolume {
    /// Creates an empty volume with the conventional outside side
    /// (`Negative`, normals pointing inwards).
    #[inline]
    pub fn new() -> Self {
        Self {
            planes: Vec::new(),
            outside: PlaneSide::Negative,
        }
    }

    /// Checks whether the volume intersects an `Aabb`.
    ///
    /// The box is rejected as soon as all 8 of its corners lie on the outside
    /// side of a single bounding plane. A null box intersects nothing, and a
    /// volume with no planes is unbounded and intersects every non-null box.
    pub fn intersects(&self, aabb: &Aabb) -> bool {
        if aabb.is_null() {
            return false;
        }
        for plane in &self.planes {
            let all_outside = aabb
                .corners()
                .iter()
                .all(|corner| plane.side(*corner) == self.outside);
            if all_outside {
                return false;
            }
        }
        true
    }
}

impl Default for PlaneBoundedVolume {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
