//! Shaders

use crate::geometry::*;
use crate::rng::Random;
use crate::spectrum::*;

/// Computes the radiance arriving along a ray.
pub trait RayShader: Send + Sync {
    /// Returns the radiance travelling back along `ray`.
    ///
    /// * `ray` - The ray.
    /// * `rng` - Random source.
    fn shade(&self, ray: &Ray, rng: &mut dyn Random) -> Spectrum;
}

/// Computes the value of an image at a point.
pub trait ImageShader: Send + Sync {
    /// Returns the image value at `p`.
    ///
    /// * `p`   - Image point in `[0, 1]^2`.
    /// * `rng` - Random source.
    fn shade_at(&self, p: &Point2f, rng: &mut dyn Random) -> Spectrum;
}
