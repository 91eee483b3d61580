//! Local scattering behaviour at a path vertex.

use crate::common::*;
use crate::geometry::*;
use crate::spectrum::*;
use std::fmt;
use std::sync::Arc;

/// Which quantity a subpath transports.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransportMode {
    /// Eye subpaths carry radiance back toward the sensor.
    Radiance,

    /// Light subpaths carry importance back toward the emitter.
    Importance,
}

impl TransportMode {
    /// Returns the mode of the opposite subpath.
    pub fn flip(&self) -> Self {
        match self {
            Self::Radiance => Self::Importance,
            Self::Importance => Self::Radiance,
        }
    }
}

/// Classifies the distribution a scattered ray was drawn from.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ScatterType {
    Diffuse,
    Glossy,
    Specular,
}

/// A ray leaving a vertex together with its throughput and density.
///
/// `color` is the throughput weight already divided by `pdf`; `pdf` is a
/// density with respect to projected solid angle at the scattering vertex
/// (or the discrete probability for specular events), so that multiplying
/// it by the geometric factor of the next edge yields an area density.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScatteredRay {
    /// The scattered ray.
    pub ray: Ray,

    /// Throughput weight.
    pub color: Spectrum,

    /// Kind of scattering event.
    pub scatter_type: ScatterType,

    /// Density the ray was sampled with.
    pub pdf: Float,

    /// True if the ray passes through the surface.
    pub transmitted: bool,
}

impl ScatteredRay {
    /// Create a new `ScatteredRay`.
    ///
    /// * `ray`          - The scattered ray.
    /// * `color`        - Throughput weight.
    /// * `scatter_type` - Kind of scattering event.
    /// * `pdf`          - Sampling density.
    /// * `transmitted`  - True if the ray passes through the surface.
    pub fn new(
        ray: Ray,
        color: Spectrum,
        scatter_type: ScatterType,
        pdf: Float,
        transmitted: bool,
    ) -> Self {
        Self {
            ray,
            color,
            scatter_type,
            pdf,
            transmitted,
        }
    }

    /// Returns a reflected ray drawn from a diffuse distribution.
    pub fn diffuse(ray: Ray, color: Spectrum, pdf: Float) -> Self {
        Self::new(ray, color, ScatterType::Diffuse, pdf, false)
    }

    /// Returns a reflected ray drawn from a glossy distribution.
    pub fn glossy(ray: Ray, color: Spectrum, pdf: Float) -> Self {
        Self::new(ray, color, ScatterType::Glossy, pdf, false)
    }

    /// Returns a reflected ray drawn from a delta distribution.
    pub fn specular(ray: Ray, color: Spectrum, pdf: Float) -> Self {
        Self::new(ray, color, ScatterType::Specular, pdf, false)
    }

    /// Marks the ray as transmitted.
    pub fn transmit(mut self) -> Self {
        self.transmitted = true;
        self
    }

    /// Returns true for delta-distributed events.
    pub fn is_specular(&self) -> bool {
        self.scatter_type == ScatterType::Specular
    }

    /// Accounts for choosing this ray among several components with the
    /// given probability: the weight is divided by and the density
    /// multiplied by `probability`.
    ///
    /// * `probability` - Probability of having selected this component.
    pub fn select(self, probability: Float) -> Self {
        debug_assert!(probability > 0.0);
        Self {
            color: self.color / probability,
            pdf: self.pdf * probability,
            ..self
        }
    }
}

impl fmt::Display for ScatteredRay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?} {} color {} pdf {}",
            self.scatter_type, self.ray, self.color, self.pdf
        )
    }
}

/// Local behaviour at a vertex: surface point, sensor point or emitter point.
///
/// Directions are given in the travel order of the subpath the vertex belongs
/// to: `wi` is the unit direction the subpath arrived along (`None` at a
/// root) and `wo` the unit direction it leaves along.
pub trait Interaction: Send + Sync {
    /// Returns the location of the vertex.
    fn position(&self) -> Position;

    /// Returns the cosine between the vertex's normal and `v`, a unit vector
    /// pointing away from the vertex. Vertices without a normal return 1.
    ///
    /// * `v` - The direction.
    fn cosine(&self, v: &Vector3f) -> Float;

    /// Samples the next direction of the subpath. Returns `None` when the
    /// subpath is absorbed.
    ///
    /// * `wi`   - Arrival direction, `None` at a root.
    /// * `mode` - What the subpath transports.
    /// * `ru`   - First random number.
    /// * `rv`   - Second random number.
    /// * `rj`   - Random number used to choose among components.
    fn sample(
        &self,
        wi: Option<&Vector3f>,
        mode: TransportMode,
        ru: Float,
        rv: Float,
        rj: Float,
    ) -> Option<ScatteredRay>;

    /// Evaluates the scattering function (without cosine factors). At a
    /// root this is the directional distribution of emission or importance.
    ///
    /// * `wi`   - Arrival direction, `None` at a root.
    /// * `wo`   - Departure direction.
    /// * `mode` - What the subpath transports.
    fn scatter(&self, wi: Option<&Vector3f>, wo: &Vector3f, mode: TransportMode) -> Spectrum;

    /// Returns the projected solid angle density with which `sample()` would
    /// choose `wo`.
    ///
    /// * `wi`   - Arrival direction, `None` at a root.
    /// * `wo`   - Departure direction.
    /// * `mode` - What the subpath transports.
    fn pdf(&self, wi: Option<&Vector3f>, wo: &Vector3f, mode: TransportMode) -> Float;

    /// Returns the radiance emitted along `wo`.
    ///
    /// * `wo` - Direction away from the vertex.
    fn emission(&self, _wo: &Vector3f) -> Spectrum {
        Spectrum::ZERO
    }

    /// Returns true if the vertex lies on an emitter.
    fn is_emissive(&self) -> bool {
        false
    }

    /// Returns the area density with which the scene's emitter samples this
    /// vertex as a light subpath root.
    fn source_pdf(&self) -> Float {
        0.0
    }

    /// Returns the projected solid angle density with which an emitter root
    /// at this vertex would sample `wo`.
    ///
    /// * `wo` - Direction away from the vertex.
    fn source_pdf_toward(&self, _wo: &Vector3f) -> Float {
        0.0
    }
}

/// Atomic reference counted `Interaction`.
pub type ArcInteraction = Arc<dyn Interaction>;
