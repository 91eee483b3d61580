//! Bidirectional path strategies

use pbrt_core::camera::*;
use pbrt_core::common::*;
use pbrt_core::geometry::*;
use pbrt_core::light::*;
use pbrt_core::path::*;
use pbrt_core::rng::Random;
use pbrt_core::scene::*;
use std::sync::Arc;

mod light_tracing;
mod mis;
mod path_tracing;
mod uniform;

// Re-export
pub use light_tracing::*;
pub use mis::*;
pub use path_tracing::*;
pub use uniform::*;

/// Decides which subpaths are built for a sample and how much each joined
/// path contributes.
pub trait BidiPathStrategy: Send + Sync {
    /// Builds the eye subpath for an image point and returns its tail.
    ///
    /// * `scene`  - The scene.
    /// * `sensor` - The sensor.
    /// * `p`      - Normalized image point.
    /// * `arena`  - Arena receiving the nodes.
    /// * `rng`    - Random number stream.
    fn trace_eye_path(
        &self,
        scene: &dyn Scene,
        sensor: &dyn Sensor,
        p: &Point2f,
        arena: &mut PathArena,
        rng: &mut dyn Random,
    ) -> Option<NodeId>;

    /// Builds a light subpath and returns its tail.
    ///
    /// * `scene`   - The scene.
    /// * `emitter` - The emitter.
    /// * `arena`   - Arena receiving the nodes.
    /// * `rng`     - Random number stream.
    fn trace_light_path(
        &self,
        scene: &dyn Scene,
        emitter: &dyn Emitter,
        arena: &mut PathArena,
        rng: &mut dyn Random,
    ) -> Option<NodeId>;

    /// Returns the weight of the path formed by joining a light subpath tail
    /// and an eye subpath tail, either of which may be absent.
    ///
    /// * `path` - The joined path.
    fn weight(&self, path: &Path) -> Float;
}

/// Atomic reference counted `BidiPathStrategy`.
pub type ArcBidiPathStrategy = Arc<dyn BidiPathStrategy>;

/// Samples an eye subpath root from three fresh random numbers.
///
/// * `sensor` - The sensor.
/// * `p`      - Normalized image point.
/// * `arena`  - Arena receiving the root.
/// * `rng`    - Random number stream.
pub fn sample_eye_root(
    sensor: &dyn Sensor,
    p: &Point2f,
    arena: &mut PathArena,
    rng: &mut dyn Random,
) -> Option<NodeId> {
    let samples = [rng.next(), rng.next(), rng.next()];
    let [ru, rv, rj] = samples;
    sensor
        .sample(p, ru, rv, rj)
        .map(|endpoint| arena.push_root(Subpath::Eye, endpoint, samples))
}

/// Samples a light subpath root from three fresh random numbers.
///
/// * `emitter` - The emitter.
/// * `arena`   - Arena receiving the root.
/// * `rng`     - Random number stream.
pub fn sample_light_root(
    emitter: &dyn Emitter,
    arena: &mut PathArena,
    rng: &mut dyn Random,
) -> Option<NodeId> {
    let samples = [rng.next(), rng.next(), rng.next()];
    let [ru, rv, rj] = samples;
    emitter
        .sample(ru, rv, rj)
        .map(|endpoint| arena.push_root(Subpath::Light, endpoint, samples))
}

/// Returns the number of non-specular nodes between a tail and its root,
/// not counting the root.
///
/// * `arena` - The arena.
/// * `tail`  - Last node of the subpath.
fn non_specular_bounces(arena: &PathArena, tail: NodeId) -> usize {
    arena
        .ancestors(tail)
        .filter(|&id| arena[id].depth > 0 && !arena[id].specular)
        .count()
}

/// Returns the number of specular nodes on a subpath, root included.
///
/// * `arena` - The arena.
/// * `tail`  - Last node of the subpath; `None` counts nothing.
fn specular_nodes(arena: &PathArena, tail: Option<NodeId>) -> usize {
    tail.map_or(0, |tail| {
        arena.ancestors(tail).filter(|&id| arena[id].specular).count()
    })
}

/// Validates a maximum depth of a single-technique strategy.
fn check_depth(depth: usize) -> pbrt_core::error::Result<usize> {
    if depth < 1 {
        Err(pbrt_core::error::Error::InvalidDepth { depth, min: 1 })
    } else {
        Ok(depth)
    }
}
