//! Emitters

use crate::camera::Endpoint;
use crate::common::*;
use std::sync::Arc;

/// Samples light subpath roots.
pub trait Emitter: Send + Sync {
    /// Samples a point on the emitter. Returns `None` if the emitter emits
    /// nothing.
    ///
    /// * `ru` - First random number.
    /// * `rv` - Second random number.
    /// * `rj` - Third random number.
    fn sample(&self, ru: Float, rv: Float, rj: Float) -> Option<Endpoint>;
}

/// Atomic reference counted `Emitter`.
pub type ArcEmitter = Arc<dyn Emitter>;
