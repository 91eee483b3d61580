//! Path Tracing

use super::*;
use crate::expand;
use pbrt_core::error::*;

/// Traces full eye subpaths and connects each of their vertices to an
/// emitter root. The light subpath is never expanded.
#[derive(Copy, Clone, Debug)]
pub struct PathTracingStrategy {
    /// Maximum number of eye subpath vertices.
    max_depth: usize,
}

impl PathTracingStrategy {
    /// Create a new `PathTracingStrategy`.
    ///
    /// * `max_depth` - Maximum number of eye subpath vertices; at least 1.
    pub fn new(max_depth: usize) -> Result<Self> {
        let max_depth = check_depth(max_depth)?;
        Ok(Self { max_depth })
    }
}

impl BidiPathStrategy for PathTracingStrategy {
    fn trace_eye_path(
        &self,
        scene: &dyn Scene,
        sensor: &dyn Sensor,
        p: &Point2f,
        arena: &mut PathArena,
        rng: &mut dyn Random,
    ) -> Option<NodeId> {
        let root = sample_eye_root(sensor, p, arena, rng);
        expand(scene, arena, root, self.max_depth - 1, rng)
    }

    fn trace_light_path(
        &self,
        _scene: &dyn Scene,
        emitter: &dyn Emitter,
        arena: &mut PathArena,
        rng: &mut dyn Random,
    ) -> Option<NodeId> {
        sample_light_root(emitter, arena, rng)
    }

    fn weight(&self, path: &Path) -> Float {
        let accepted = match (path.light(), path.eye_tail) {
            (_, None) => false,
            (None, Some(eye)) => non_specular_bounces(path.arena, eye) == 1,
            (Some(light), Some(eye)) => light.depth == 0 && path.arena[eye].depth >= 1,
        };
        if accepted {
            1.0
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use crate::LightTracingStrategy;
    use pbrt_core::rng::SequenceRandom;

    #[test]
    fn zero_depth_is_rejected() {
        assert!(PathTracingStrategy::new(0).is_err());
    }

    #[test]
    fn light_path_is_the_emitter_root() {
        let furnace = furnace(0.5);
        let strategy = PathTracingStrategy::new(3).unwrap();
        let mut arena = PathArena::new();
        let mut rng = SequenceRandom::new(&[0.3, 0.6, 0.2]);
        let light = strategy
            .trace_light_path(&furnace, &furnace, &mut arena, &mut rng)
            .unwrap();
        assert!(arena[light].is_root());
        assert_eq!(rng.draws(), 3);

        let eye = strategy
            .trace_eye_path(&furnace, &pinhole(), &Point2f::new(0.4, 0.6), &mut arena, &mut rng)
            .unwrap();
        assert_eq!(arena[eye].depth, 2);
        assert_eq!(rng.draws(), 12);
    }

    #[test]
    fn weights_cover_emitter_hits_and_root_connections() {
        let furnace = furnace(0.5);
        let strategy = PathTracingStrategy::new(4).unwrap();
        let mut arena = PathArena::new();
        let light = light_root_at(&furnace, &mut arena, wall_point(Vector3f::new(0.0, 0.0, -1.0)));
        let bounce = extend_through(&furnace, &mut arena, light, &[wall_point(Vector3f::X_AXIS)]);
        let target = wall_point(Vector3f::new(0.1, 0.0, 1.0));
        let sensor = pinhole();
        let eye = eye_root_toward(&sensor, &mut arena, target);
        let hit = extend_through(&furnace, &mut arena, eye, &[target]);
        let second = extend_through(&furnace, &mut arena, hit, &[wall_point(Vector3f::Y_AXIS)]);

        assert_eq!(strategy.weight(&Path::new(&arena, Some(light), Some(hit))), 1.0);
        assert_eq!(strategy.weight(&Path::new(&arena, Some(light), Some(second))), 1.0);
        assert_eq!(strategy.weight(&Path::new(&arena, Some(light), Some(eye))), 0.0);
        assert_eq!(strategy.weight(&Path::new(&arena, Some(bounce), Some(hit))), 0.0);
        assert_eq!(strategy.weight(&Path::new(&arena, None, Some(hit))), 1.0);
        assert_eq!(strategy.weight(&Path::new(&arena, None, Some(second))), 0.0);
        assert_eq!(strategy.weight(&Path::new(&arena, Some(light), None)), 0.0);
        assert_eq!(strategy.weight(&Path::new(&arena, None, None)), 0.0);
    }

    #[test]
    fn light_and_path_tracing_accept_disjoint_splits() {
        // A path of five vertices from the emitter to the sensor, split at
        // every possible place.
        let furnace = furnace(0.5);
        let sensor = pinhole();
        let points = [
            wall_point(Vector3f::new(0.0, 0.0, -1.0)),
            wall_point(Vector3f::new(1.0, 0.2, 0.0)),
            wall_point(Vector3f::new(-0.3, 1.0, 0.1)),
            wall_point(Vector3f::new(0.1, -0.2, 1.0)),
        ];
        let lt = LightTracingStrategy::new(8).unwrap();
        let pt = PathTracingStrategy::new(8).unwrap();

        let mut accepted = 0.0;
        for s in 0..=points.len() {
            let mut arena = PathArena::new();
            let light = (s > 0).then(|| {
                let root = light_root_at(&furnace, &mut arena, points[0]);
                extend_through(&furnace, &mut arena, root, &points[1..s])
            });
            let eye_points: Vec<Point3f> = points[s..].iter().rev().copied().collect();
            let eye = eye_root_toward(&sensor, &mut arena, points[3]);
            let eye = extend_through(&furnace, &mut arena, eye, &eye_points);

            let path = Path::new(&arena, light, Some(eye));
            let (wl, wp) = (lt.weight(&path), pt.weight(&path));
            assert_eq!(wl * wp, 0.0, "split {s} accepted twice");
            accepted += wl + wp;
        }
        // Light tracing accepts the split at the sensor and path tracing the
        // split at the emitter root.
        assert_eq!(accepted, 2.0);
    }
}
