//! Axis-aligned bounding boxes.

use crate::math::vec3::{Axis, Vec3};

/// An axis-aligned bounding box given by its minimum and maximum corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub const fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Smallest box containing every point, or `None` for an empty input.
    pub fn from_points<'a, I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Vec3>,
    {
        let mut points = points.into_iter();
        let first = *points.next()?;
        Some(points.fold(Self::new(first, first), |bounds, p| bounds.grow(*p)))
    }

    /// Returns this box extended to contain `point`.
    pub fn grow(self, point: Vec3) -> Self {
        Self::new(self.min.min(point), self.max.max(point))
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// Radius of the sphere around the center that encloses the box.
    pub fn bounding_radius(&self) -> f32 {
        self.size().magnitude() * 0.5
    }

    /// The `(min, max)` extent along a single axis.
    pub fn extent(&self, axis: Axis) -> (f32, f32) {
        (self.min.component(axis), self.max.component(axis))
    }
}
