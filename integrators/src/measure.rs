//! Measurement contribution

use pbrt_core::path::*;
use pbrt_core::scene::*;
use pbrt_core::spectrum::*;

/// Returns the unweighted contribution of a joined path divided by the
/// density with which its subpaths were sampled, or `None` if the path
/// carries nothing.
///
/// A path without an eye node never contributes because the aperture is not
/// part of the scene. A path without a light node contributes the emission
/// found at the eye tail.
///
/// * `scene` - The scene, used for the visibility of the connection.
/// * `path`  - The joined path.
pub fn contribution(scene: &dyn Scene, path: &Path) -> Option<Spectrum> {
    let arena = path.arena;
    let eye = path.eye_tail?;

    let Some(light) = path.light_tail else {
        if !arena.is_emissive(eye) {
            return None;
        }
        let c = arena[eye].cumulative_weight * arena.emission(eye);
        return (!c.is_black()).then_some(c);
    };

    let v = arena.direction(light, eye)?;
    let g = arena.geometric_factor(light, eye);
    if g <= 0.0 {
        return None;
    }

    let c = arena.scatter(light, &v) * arena.scatter(eye, &-v);
    if c.is_black() || !scene.visibility(&arena[light].position(), &arena[eye].position()) {
        return None;
    }

    Some(c * g * arena[light].cumulative_weight * arena[eye].cumulative_weight)
}
