//! Scene

use crate::geometry::*;
use crate::interaction::*;
use std::sync::Arc;

/// Result of tracing a ray through the scene.
#[derive(Clone)]
pub enum Hit {
    /// The ray hit a surface.
    Surface(ArcInteraction),

    /// The ray left the scene and reached its environment; the interaction
    /// is positioned at infinity.
    Environment(ArcInteraction),
}

/// Ray intersection and visibility queries.
pub trait Scene: Send + Sync {
    /// Returns the first thing a ray hits, or `None` if it escapes into
    /// nothing.
    ///
    /// * `ray` - The ray.
    fn intersect(&self, ray: &Ray) -> Option<Hit>;

    /// Returns true if nothing blocks the segment between two positions.
    ///
    /// * `a` - First position.
    /// * `b` - Second position.
    fn visibility(&self, a: &Position, b: &Position) -> bool;
}

/// Atomic reference counted `Scene`.
pub type ArcScene = Arc<dyn Scene>;
