//! Uniform Weights

use super::*;
use crate::expand;

/// Traces both subpaths and weights every connection technique that could
/// have produced a path equally.
///
/// Light subpaths reaching the aperture get no weight. Emitters found by
/// chance along the eye subpath are weighted as if joined to a bare light
/// root, or fully when no light subpath is traced.
#[derive(Copy, Clone, Debug)]
pub struct UniformWeightedStrategy {
    /// Maximum number of light subpath vertices; 0 skips the light subpath.
    max_light_depth: usize,

    /// Maximum number of eye subpath vertices; 0 skips the eye subpath.
    max_eye_depth: usize,
}

impl UniformWeightedStrategy {
    /// Create a new `UniformWeightedStrategy`.
    ///
    /// * `max_light_depth` - Maximum number of light subpath vertices.
    /// * `max_eye_depth`   - Maximum number of eye subpath vertices.
    pub fn new(max_light_depth: usize, max_eye_depth: usize) -> Self {
        Self {
            max_light_depth,
            max_eye_depth,
        }
    }
}

impl BidiPathStrategy for UniformWeightedStrategy {
    fn trace_eye_path(
        &self,
        scene: &dyn Scene,
        sensor: &dyn Sensor,
        p: &Point2f,
        arena: &mut PathArena,
        rng: &mut dyn Random,
    ) -> Option<NodeId> {
        if self.max_eye_depth == 0 {
            return None;
        }
        let root = sample_eye_root(sensor, p, arena, rng);
        expand(scene, arena, root, self.max_eye_depth - 1, rng)
    }

    fn trace_light_path(
        &self,
        scene: &dyn Scene,
        emitter: &dyn Emitter,
        arena: &mut PathArena,
        rng: &mut dyn Random,
    ) -> Option<NodeId> {
        if self.max_light_depth == 0 {
            return None;
        }
        let root = sample_light_root(emitter, arena, rng);
        expand(scene, arena, root, self.max_light_depth - 1, rng)
    }

    fn weight(&self, path: &Path) -> Float {
        let Some(eye) = path.eye() else {
            return 0.0;
        };
        if self.max_light_depth == 0 {
            // The eye subpath is the only technique.
            return 1.0;
        }

        // An absent light subpath counts like a bare root.
        let light_depth = path.light().map_or(0, |n| n.depth);
        let techniques = light_depth + eye.depth + 1;
        let blocked = specular_nodes(path.arena, path.light_tail)
            + specular_nodes(path.arena, path.eye_tail);
        if techniques > blocked {
            1.0 / (techniques - blocked) as Float
        } else {
            0.0
        }
    }
}
