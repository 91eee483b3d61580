//! Test interactions

use crate::common::*;
use crate::geometry::*;
use crate::interaction::*;
use crate::spectrum::*;
use std::sync::Arc;

/// A one sided Lambertian reflector at a point.
pub struct Lambert {
    p: Point3f,
    n: Vector3f,
    albedo: Float,
}

impl Interaction for Lambert {
    fn position(&self) -> Position {
        Position::Point(self.p)
    }

    fn cosine(&self, v: &Vector3f) -> Float {
        self.n.dot(v)
    }

    fn sample(
        &self,
        _wi: Option<&Vector3f>,
        _mode: TransportMode,
        _ru: Float,
        _rv: Float,
        _rj: Float,
    ) -> Option<ScatteredRay> {
        Some(ScatteredRay::diffuse(
            Ray::new(self.p, self.n),
            Spectrum::splat(self.albedo),
            INV_PI,
        ))
    }

    fn scatter(&self, _wi: Option<&Vector3f>, wo: &Vector3f, _mode: TransportMode) -> Spectrum {
        if self.n.dot(wo) > 0.0 {
            Spectrum::splat(self.albedo * INV_PI)
        } else {
            Spectrum::ZERO
        }
    }

    fn pdf(&self, _wi: Option<&Vector3f>, wo: &Vector3f, _mode: TransportMode) -> Float {
        if self.n.dot(wo) > 0.0 {
            INV_PI
        } else {
            0.0
        }
    }

    fn is_emissive(&self) -> bool {
        true
    }

    fn emission(&self, wo: &Vector3f) -> Spectrum {
        if self.n.dot(wo) > 0.0 {
            Spectrum::ONE
        } else {
            Spectrum::ZERO
        }
    }

    fn source_pdf(&self) -> Float {
        0.5
    }
}

pub fn lambert(z: Float, n: Vector3f) -> ArcInteraction {
    Arc::new(Lambert {
        p: Point3f::new(0.0, 0.0, z),
        n,
        albedo: 0.5,
    })
}
