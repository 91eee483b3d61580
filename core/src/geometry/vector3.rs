//! 3-D Vectors

use crate::common::*;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub};

/// A 3-D vector containing `Float` values.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vector3f {
    /// X-coordinate.
    pub x: Float,

    /// Y-coordinate.
    pub y: Float,

    /// Z-coordinate.
    pub z: Float,
}

impl Vector3f {
    /// Zero vector.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Unit vector along the x-axis.
    pub const X_AXIS: Self = Self::new(1.0, 0.0, 0.0);

    /// Unit vector along the y-axis.
    pub const Y_AXIS: Self = Self::new(0.0, 1.0, 0.0);

    /// Unit vector along the z-axis.
    pub const Z_AXIS: Self = Self::new(0.0, 0.0, 1.0);

    /// Creates a new 3-D vector.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    /// * `z` - Z-coordinate.
    pub const fn new(x: Float, y: Float, z: Float) -> Self {
        Self { x, y, z }
    }

    /// Returns true if any component is NaN.
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan() || self.z.is_nan()
    }

    /// Returns the square of the vector's length.
    pub fn length_squared(&self) -> Float {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    /// Returns the vector's length.
    pub fn length(&self) -> Float {
        self.length_squared().sqrt()
    }

    /// Returns the unit vector in the same direction.
    ///
    /// NOTE: Normalizing a zero vector yields NaNs.
    pub fn normalize(&self) -> Self {
        *self / self.length()
    }

    /// Returns the dot product with another vector.
    ///
    /// * `other` - The other vector.
    pub fn dot(&self, other: &Self) -> Float {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    /// Returns the absolute value of the dot product with another vector.
    ///
    /// * `other` - The other vector.
    pub fn abs_dot(&self, other: &Self) -> Float {
        self.dot(other).abs()
    }

    /// Returns the cross product with another vector.
    ///
    /// * `other` - The other vector.
    pub fn cross(&self, other: &Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Construct a local coordinate system given a unit vector. Returns the
    /// two remaining orthonormal axes.
    pub fn coordinate_system(&self) -> (Self, Self) {
        let v2 = if self.x.abs() > self.y.abs() {
            Self::new(-self.z, 0.0, self.x) / (self.x * self.x + self.z * self.z).sqrt()
        } else {
            Self::new(0.0, self.z, -self.y) / (self.y * self.y + self.z * self.z).sqrt()
        };
        let v3 = self.cross(&v2);
        (v2, v3)
    }

    /// Transforms a vector given in the local frame `(s, t, n)` to world space.
    ///
    /// * `s` - First tangent.
    /// * `t` - Second tangent.
    /// * `n` - Normal.
    pub fn from_local(&self, s: &Self, t: &Self, n: &Self) -> Self {
        *s * self.x + *t * self.y + *n * self.z
    }
}

impl Add for Vector3f {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl AddAssign for Vector3f {
    fn add_assign(&mut self, other: Self) {
        self.x += other.x;
        self.y += other.y;
        self.z += other.z;
    }
}

impl Sub for Vector3f {
    type Output = Self;

    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<Float> for Vector3f {
    type Output = Self;

    fn mul(self, f: Float) -> Self::Output {
        Self::new(self.x * f, self.y * f, self.z * f)
    }
}

impl Mul<Vector3f> for Float {
    type Output = Vector3f;

    fn mul(self, v: Vector3f) -> Self::Output {
        v * self
    }
}

impl MulAssign<Float> for Vector3f {
    fn mul_assign(&mut self, f: Float) {
        self.x *= f;
        self.y *= f;
        self.z *= f;
    }
}

impl Div<Float> for Vector3f {
    type Output = Self;

    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0);
        let inv = 1.0 / f;
        Self::new(self.x * inv, self.y * inv, self.z * inv)
    }
}

impl Neg for Vector3f {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y, -self.z)
    }
}

impl fmt::Display for Vector3f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.x, self.y, self.z)
    }
}
