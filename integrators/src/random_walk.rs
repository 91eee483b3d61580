//! Random walk

use pbrt_core::path::*;
use pbrt_core::rng::Random;
use pbrt_core::scene::*;

/// Extends a subpath by up to `bounces` scattering events and returns the
/// new tail.
///
/// Every step draws exactly three random numbers. The walk ends early, and
/// without consuming further random numbers, when the tail does not scatter,
/// scatters with a black throughput or a non-positive density, or when the
/// scattered ray leaves the scene. An eye subpath ray that reaches the
/// environment is recorded as a terminal node before the walk ends.
///
/// * `scene`   - The scene.
/// * `arena`   - The arena holding the subpath.
/// * `tail`    - Last node of the subpath; `None` yields `None`.
/// * `bounces` - Maximum number of nodes to append.
/// * `rng`     - Random number stream.
pub fn expand(
    scene: &dyn Scene,
    arena: &mut PathArena,
    tail: Option<NodeId>,
    bounces: usize,
    rng: &mut dyn Random,
) -> Option<NodeId> {
    let mut tail = tail?;

    for _ in 0..bounces {
        let samples = [rng.next(), rng.next(), rng.next()];
        let [ru, rv, rj] = samples;

        let sr = match arena.sample(tail, ru, rv, rj) {
            Some(sr) if sr.pdf > 0.0 && !sr.color.is_black() => sr,
            _ => break,
        };

        match scene.intersect(&sr.ray) {
            Some(Hit::Surface(interaction)) => {
                tail = arena.push_scattering(tail, &sr, interaction, samples);
            }
            Some(Hit::Environment(interaction)) => {
                if arena[tail].is_on_eye_path() {
                    tail = arena.push_terminal(tail, &sr, interaction, samples);
                }
                break;
            }
            None => break,
        }
    }

    Some(tail)
}
