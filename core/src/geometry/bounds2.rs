//! 2D Axis Aligned Bounding Boxes.

use crate::common::*;
use crate::geometry::*;
use std::fmt;

/// 2D Axis Aligned Bounding Box containing `Float` points.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Bounds2f {
    /// Minimum bounds.
    pub p_min: Point2f,

    /// Maximum bounds.
    pub p_max: Point2f,
}

impl Bounds2f {
    /// The unit square `[0, 1] x [0, 1]`.
    pub const UNIT: Self = Self {
        p_min: Point2f::new(0.0, 0.0),
        p_max: Point2f::new(1.0, 1.0),
    };

    /// Creates a new 2D bounding box from 2 points. The minimum and maximum bounds
    /// are used for each coordinate axis.
    ///
    /// * `p1` - First point.
    /// * `p2` - Second point.
    pub fn new(p1: Point2f, p2: Point2f) -> Self {
        Self {
            p_min: Point2f::new(min(p1.x, p2.x), min(p1.y, p2.y)),
            p_max: Point2f::new(max(p1.x, p2.x), max(p1.y, p2.y)),
        }
    }

    /// Returns true if the box has zero or negative extent along an axis.
    pub fn is_empty(&self) -> bool {
        self.p_max.x <= self.p_min.x || self.p_max.y <= self.p_min.y
    }

    /// Returns the extent along the x-axis.
    pub fn length_x(&self) -> Float {
        self.p_max.x - self.p_min.x
    }

    /// Returns the extent along the y-axis.
    pub fn length_y(&self) -> Float {
        self.p_max.y - self.p_min.y
    }

    /// Returns the area of the bounding box.
    pub fn area(&self) -> Float {
        if self.is_empty() {
            0.0
        } else {
            self.length_x() * self.length_y()
        }
    }

    /// Returns true if a point is inside the bounding box.
    ///
    /// * `p` - The point.
    pub fn contains(&self, p: &Point2f) -> bool {
        p.x >= self.p_min.x && p.x <= self.p_max.x && p.y >= self.p_min.y && p.y <= self.p_max.y
    }

    /// Returns true if this box lies within another.
    ///
    /// * `other` - The enclosing box.
    pub fn is_inside(&self, other: &Self) -> bool {
        other.contains(&self.p_min) && other.contains(&self.p_max)
    }

    /// Linearly interpolates between the corners of the box by the given amount
    /// in each dimension.
    ///
    /// * `t` - The interpolation parameter in x and y directions.
    pub fn lerp(&self, t: &Point2f) -> Point2f {
        Point2f::new(
            lerp(t.x, self.p_min.x, self.p_max.x),
            lerp(t.y, self.p_min.y, self.p_max.y),
        )
    }

    /// Returns the continuous position of a point relative to the corners of the
    /// box, where a point at the minimum corner has offset `(0, 0)` and a
    /// point at the maximum corner has offset is `(1, 1)`.
    ///
    /// * `p` - The point.
    pub fn offset(&self, p: &Point2f) -> Point2f {
        let mut o = *p - self.p_min;
        if self.p_max.x > self.p_min.x {
            o.x /= self.length_x();
        }
        if self.p_max.y > self.p_min.y {
            o.y /= self.length_y();
        }
        o
    }
}

impl fmt::Display for Bounds2f {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} - {}]", self.p_min, self.p_max)
    }
}
