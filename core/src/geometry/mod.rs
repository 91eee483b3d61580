//! Geometry

mod bounds2;
mod point2;
mod point3;
mod position;
mod ray;
mod vector3;

// Re-export
pub use bounds2::*;
pub use point2::*;
pub use point3::*;
pub use position::*;
pub use ray::*;
pub use vector3::*;
