//! Sensors

use crate::common::*;
use crate::geometry::*;
use crate::interaction::*;
use crate::rng::Random;
use crate::spectrum::*;
use std::sync::Arc;

/// A sampled subpath root: the vertex on a sensor or emitter together with
/// its weight and area density.
#[derive(Clone)]
pub struct Endpoint {
    /// Local behaviour at the root.
    pub interaction: ArcInteraction,

    /// Weight carried by the root (already divided by `pdf`).
    pub weight: Spectrum,

    /// Area density (or discrete probability) the root was sampled with.
    pub pdf: Float,

    /// True if the root position is delta-distributed in a way the subpath
    /// cannot be connected through.
    pub specular: bool,
}

impl Endpoint {
    /// Create a new `Endpoint`.
    ///
    /// * `interaction` - Local behaviour at the root.
    /// * `weight`      - Weight carried by the root.
    /// * `pdf`         - Area density.
    /// * `specular`    - Delta-distributed root.
    pub fn new(interaction: ArcInteraction, weight: Spectrum, pdf: Float, specular: bool) -> Self {
        Self {
            interaction,
            weight,
            pdf,
            specular,
        }
    }
}

/// Maps normalized image points to rays and eye subpath roots.
pub trait Sensor: Send + Sync {
    /// Returns the primary ray through an image point, or `None` if the
    /// sensor does not see through it.
    ///
    /// * `p`   - Image point in `[0, 1]^2`.
    /// * `rng` - Random source for aperture sampling.
    fn ray_at(&self, p: &Point2f, rng: &mut dyn Random) -> Option<ScatteredRay>;

    /// Samples an eye subpath root whose outgoing direction passes through
    /// an image point.
    ///
    /// * `p`  - Image point in `[0, 1]^2`.
    /// * `ru` - First random number.
    /// * `rv` - Second random number.
    /// * `rj` - Third random number.
    fn sample(&self, p: &Point2f, ru: Float, rv: Float, rj: Float) -> Option<Endpoint>;

    /// Returns the image point at which a position is seen, or `None` if it
    /// is outside the field of view.
    ///
    /// * `x` - The position.
    fn project(&self, x: &Position) -> Option<Point2f>;
}

/// Atomic reference counted `Sensor`.
pub type ArcSensor = Arc<dyn Sensor>;
