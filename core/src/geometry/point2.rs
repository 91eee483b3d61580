//! 2-D Points

use crate::common::*;
use std::fmt;
use std::ops::{Add, Index, Sub};

/// A 2-D point on the image plane or in a sample domain.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Point2f {
    /// X-coordinate.
    pub x: Float,

    /// Y-coordinate.
    pub y: Float,
}

impl Point2f {
    /// Creates a new 2-D point.
    ///
    /// * `x` - X-coordinate.
    /// * `y` - Y-coordinate.
    pub const fn new(x: Float, y: Float) -> Self {
        Self { x, y }
    }

    /// Creates a new 2-D zero point.
    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    /// Returns true if either coordinate is NaN.
    pub fn has_nans(&self) -> bool {
        self.x.is_nan() || self.y.is_nan()
    }
}

impl Add for Point2f {
    type Output = Self;

    /// Adds the coordinates of another point.
    ///
    /// * `other` - The other point.
    fn add(self, other: Self) -> Self::Output {
        Self::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for Point2f {
    type Output = Self;

    /// Subtracts the coordinates of another point.
    ///
    /// * `other` - The other point.
    fn sub(self, other: Self) -> Self::Output {
        Self::new(self.x - other.x, self.y - other.y)
    }
}

impl Index<usize> for Point2f {
    type Output = Float;

    /// Index the coordinates by axis.
    ///
    /// * `i` - 0 for x and 1 for y.
    fn index(&self, i: usize) -> &Self::Output {
        match i {
            0 => &self.x,
            1 => &self.y,
            _ => panic!("Invalid axis for Point2f"),
        }
    }
}

impl fmt::Display for Point2f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.x, self.y)
    }
}
