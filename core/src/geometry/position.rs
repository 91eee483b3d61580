//! Homogeneous positions

use crate::geometry::*;
use std::fmt;

/// The location of a path vertex: a finite point, or a point at infinity
/// identified by the direction towards it (directional emitters and
/// environment hits).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Position {
    /// A finite point.
    Point(Point3f),

    /// A point at infinity in the given unit direction.
    Direction(Vector3f),
}

impl Position {
    /// Returns true if the position lies at infinity.
    pub fn is_at_infinity(&self) -> bool {
        matches!(self, Self::Direction(_))
    }

    /// Returns the finite point, if any.
    pub fn point(&self) -> Option<Point3f> {
        match self {
            Self::Point(p) => Some(*p),
            Self::Direction(_) => None,
        }
    }

    /// Returns the homogeneous coordinates as a vector (the point relative to
    /// the origin, or the direction for points at infinity).
    pub fn to_vector(&self) -> Vector3f {
        match self {
            Self::Point(p) => p.to_vector(),
            Self::Direction(v) => *v,
        }
    }
}

impl From<Point3f> for Position {
    fn from(p: Point3f) -> Self {
        Self::Point(p)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Point(p) => write!(f, "{p}"),
            Self::Direction(v) => write!(f, "∞{v}"),
        }
    }
}
