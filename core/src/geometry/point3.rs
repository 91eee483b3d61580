//! 3-D Points

use crate::common::*;
use crate::geometry::*;
use std::fmt;
use std::ops::{Add, Sub};

/// A 3-D point containing `Float` values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point3f {
    /// X-coordinate.
    pub x: Float,

    /// Y-coordinate.
    pub y: Float,

    /// Z-coordinate.
    pub z: Float,
}

impl Point3f {
    /// The origin.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Creates a new 3-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub const fn new(x: Float, y: Float, z: Float) -> Self {
        Self { x, y, z }
    }

    /// Returns the squared distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance_squared(&self, other: &Self) -> Float {
        (*other - *self).length_squared()
    }

    /// Returns the distance to another point.
    ///
    /// * `other` - The other point.
    pub fn distance(&self, other: &Self) -> Float {
        self.distance_squared(other).sqrt()
    }

    /// Returns the vector from the origin to this point.
    pub fn to_vector(&self) -> Vector3f {
        Vector3f::new(self.x, self.y, self.z)
    }
}

impl From<Vector3f> for Point3f {
    fn from(v: Vector3f) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

impl Add<Vector3f> for Point3f {
    type Output = Self;

    /// Offset the point by a vector.
    ///
    /// * `v` - The vector.
    fn add(self, v: Vector3f) -> Self::Output {
        Self::new(self.x + v.x, self.y + v.y, self.z + v.z)
    }
}

impl Sub<Vector3f> for Point3f {
    type Output = Self;

    /// Offset the point by the negated vector.
    ///
    /// * `v` - The vector.
    fn sub(self, v: Vector3f) -> Self::Output {
        Self::new(self.x - v.x, self.y - v.y, self.z - v.z)
    }
}

impl Sub for Point3f {
    type Output = Vector3f;

    /// Returns the vector from `other` to this point.
    ///
    /// * `other` - The other point.
    fn sub(self, other: Self) -> Self::Output {
        Vector3f::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl fmt::Display for Point3f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}
