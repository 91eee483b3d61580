//! Light Tracing

use super::*;
use crate::expand;
use pbrt_core::error::*;

/// Traces full light subpaths and connects each of their vertices to the
/// sensor root. The eye subpath is never expanded.
#[derive(Copy, Clone, Debug)]
pub struct LightTracingStrategy {
    /// Maximum number of light subpath vertices.
    max_depth: usize,
}

impl LightTracingStrategy {
    /// Create a new `LightTracingStrategy`.
    ///
    /// * `max_depth` - Maximum number of light subpath vertices; at least 1.
    pub fn new(max_depth: usize) -> Result<Self> {
        let max_depth = check_depth(max_depth)?;
        Ok(Self { max_depth })
    }
}

impl BidiPathStrategy for LightTracingStrategy {
    fn trace_eye_path(
        &self,
        _scene: &dyn Scene,
        sensor: &dyn Sensor,
        p: &Point2f,
        arena: &mut PathArena,
        rng: &mut dyn Random,
    ) -> Option<NodeId> {
        sample_eye_root(sensor, p, arena, rng)
    }

    fn trace_light_path(
        &self,
        scene: &dyn Scene,
        emitter: &dyn Emitter,
        arena: &mut PathArena,
        rng: &mut dyn Random,
    ) -> Option<NodeId> {
        let root = sample_light_root(emitter, arena, rng);
        expand(scene, arena, root, self.max_depth - 1, rng)
    }

    fn weight(&self, path: &Path) -> Float {
        let accepted = match (path.light_tail, path.eye()) {
            (None, _) => false,
            (Some(light), None) => non_specular_bounces(path.arena, light) == 1,
            (Some(_), Some(eye)) => eye.depth == 0,
        };
        if accepted {
            1.0
        } else {
            0.0
        }
    }
}
