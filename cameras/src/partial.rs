//! Partial Sensor

use pbrt_core::camera::*;
use pbrt_core::common::*;
use pbrt_core::error::*;
use pbrt_core::geometry::*;
use pbrt_core::interaction::*;
use pbrt_core::rng::Random;
use pbrt_core::spectrum::*;
use std::sync::Arc;

/// Decorates a sensor so that a renderer sampling only a fraction `f` of the
/// image plane still produces an unbiased estimate of the full image.
///
/// Every density of a sampled root is divided by `f`; throughputs are left
/// alone. Cooperating renderers must use fractions that sum to 1; this is
/// not checked.
///
/// A window is stretched over the whole raster, so each output pixel sees
/// `1 / area` times the image plane of an inner pixel and the importance the
/// root emits toward the scene is scaled to match.
pub struct PartialSensor {
    /// The decorated sensor.
    inner: ArcSensor,

    /// The part of the unit image square being sampled.
    window: Bounds2f,

    /// Fraction of the sampling domain covered.
    fraction: Float,
}

impl PartialSensor {
    /// Create a new `PartialSensor` covering a fraction of the whole image
    /// plane. Image points are passed through unchanged.
    ///
    /// * `fraction` - Fraction of the sampling domain, in (0, 1].
    /// * `inner`    - The decorated sensor.
    pub fn new(fraction: Float, inner: ArcSensor) -> Result<Self> {
        if !(fraction > 0.0 && fraction <= 1.0) {
            return Err(Error::InvalidFraction(fraction));
        }
        Ok(Self {
            inner,
            window: Bounds2f::UNIT,
            fraction,
        })
    }

    /// Create a new `PartialSensor` sampling only a window of the image plane.
    /// Image points in `[0, 1]^2` are mapped into the window and the fraction
    /// is the window's area.
    ///
    /// * `window` - A non-empty part of the unit square.
    /// * `inner`  - The decorated sensor.
    pub fn with_bounds(window: Bounds2f, inner: ArcSensor) -> Result<Self> {
        if window.is_empty() || !window.is_inside(&Bounds2f::UNIT) {
            return Err(Error::InvalidWindow {
                x0: window.p_min.x,
                y0: window.p_min.y,
                x1: window.p_max.x,
                y1: window.p_max.y,
            });
        }
        let fraction = window.area();
        debug!("Partial sensor window {window} covers {fraction} of the image");
        Ok(Self {
            inner,
            window,
            fraction,
        })
    }

    /// Returns the fraction of the sampling domain covered.
    pub fn fraction(&self) -> Float {
        self.fraction
    }

    /// Returns the part of the image plane being sampled.
    pub fn window(&self) -> Bounds2f {
        self.window
    }
}

impl Sensor for PartialSensor {
    fn ray_at(&self, p: &Point2f, rng: &mut dyn Random) -> Option<ScatteredRay> {
        self.inner.ray_at(&self.window.lerp(p), rng)
    }

    fn sample(&self, p: &Point2f, ru: Float, rv: Float, rj: Float) -> Option<Endpoint> {
        self.inner
            .sample(&self.window.lerp(p), ru, rv, rj)
            .map(|e| Endpoint {
                interaction: Arc::new(PartialRoot {
                    inner: e.interaction,
                    fraction: self.fraction,
                    importance: 1.0 / self.window.area(),
                }),
                weight: e.weight,
                pdf: e.pdf / self.fraction,
                specular: e.specular,
            })
    }

    fn project(&self, x: &Position) -> Option<Point2f> {
        self.inner
            .project(x)
            .filter(|p| self.window.contains(p))
            .map(|p| self.window.offset(&p))
    }
}

/// Eye subpath root of a `PartialSensor`.
struct PartialRoot {
    inner: ArcInteraction,
    fraction: Float,

    /// Scale of the emitted importance; 1 unless a window is stretched.
    importance: Float,
}

impl Interaction for PartialRoot {
    fn position(&self) -> Position {
        self.inner.position()
    }

    fn cosine(&self, v: &Vector3f) -> Float {
        self.inner.cosine(v)
    }

    fn sample(
        &self,
        wi: Option<&Vector3f>,
        mode: TransportMode,
        ru: Float,
        rv: Float,
        rj: Float,
    ) -> Option<ScatteredRay> {
        self.inner.sample(wi, mode, ru, rv, rj).map(|sr| ScatteredRay {
            pdf: sr.pdf / self.fraction,
            ..sr
        })
    }

    fn scatter(&self, wi: Option<&Vector3f>, wo: &Vector3f, mode: TransportMode) -> Spectrum {
        self.inner.scatter(wi, wo, mode) * self.importance
    }

    fn pdf(&self, wi: Option<&Vector3f>, wo: &Vector3f, mode: TransportMode) -> Float {
        self.inner.pdf(wi, wo, mode) / self.fraction
    }
}
