//! Furnace

use pbrt_core::camera::*;
use pbrt_core::common::*;
use pbrt_core::error::*;
use pbrt_core::geometry::*;
use pbrt_core::interaction::*;
use pbrt_core::light::*;
use pbrt_core::sampling::*;
use pbrt_core::scene::*;
use pbrt_core::spectrum::*;
use std::sync::Arc;

/// A closed sphere whose inside is a Lambertian reflector that also emits
/// uniform radiance. Every point inside sees the same radiance
/// `Le * (1 + a + a^2 + ...)`, which makes it a convenient analytic test.
#[derive(Clone, Debug)]
pub struct Furnace {
    /// Centre of the sphere.
    pub centre: Point3f,

    /// Radius of the sphere.
    pub radius: Float,

    /// Albedo of the walls.
    pub albedo: Float,

    /// Radiance emitted by the walls.
    pub emission: Float,
}

impl Furnace {
    /// Create a new `Furnace`.
    ///
    /// * `centre`   - Centre of the sphere.
    /// * `radius`   - Radius of the sphere; positive.
    /// * `albedo`   - Albedo of the walls; in [0, 1].
    /// * `emission` - Emitted radiance; non-negative.
    pub fn new(centre: Point3f, radius: Float, albedo: Float, emission: Float) -> Result<Self> {
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "radius",
                value: radius,
            });
        }
        if !(0.0..=1.0).contains(&albedo) {
            return Err(Error::InvalidParameter {
                name: "albedo",
                value: albedo,
            });
        }
        if !(emission >= 0.0 && emission.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "emission",
                value: emission,
            });
        }

        info!("Furnace radius {radius}, albedo {albedo}, emission {emission}");
        Ok(Self {
            centre,
            radius,
            albedo,
            emission,
        })
    }

    /// Returns the surface area of the walls.
    pub fn area(&self) -> Float {
        FOUR_PI * self.radius * self.radius
    }

    /// Returns the radiance seen from inside by paths of at most `max_depth`
    /// edges: `Le * (1 + a + ... + a^(max_depth - 1))`.
    ///
    /// * `max_depth` - Maximum number of path edges.
    pub fn radiance(&self, max_depth: usize) -> Float {
        let mut sum = 0.0;
        let mut a = 1.0;
        for _ in 0..max_depth {
            sum += a;
            a *= self.albedo;
        }
        self.emission * sum
    }

    /// Returns the wall at a point on the sphere.
    ///
    /// * `p` - Point on the sphere.
    fn wall(&self, p: Point3f) -> Wall {
        let n = (self.centre - p).normalize();
        Wall {
            p: self.centre - n * self.radius,
            n,
            albedo: self.albedo,
            emission: self.emission,
            area: self.area(),
        }
    }
}

impl Scene for Furnace {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let d = ray.d.normalize();
        let oc = ray.o - self.centre;
        let b = oc.dot(&d);
        let c = oc.length_squared() - self.radius * self.radius;
        let discrim = b * b - c;
        if discrim < 0.0 {
            return None;
        }

        // Rays start inside; the far root is the wall ahead.
        let t = -b + discrim.sqrt();
        if t <= RAY_EPSILON * self.radius {
            return None;
        }
        Some(Hit::Surface(Arc::new(self.wall(ray.o + d * t))))
    }

    /// The inside of a sphere is convex; points at infinity are never seen.
    fn visibility(&self, a: &Position, b: &Position) -> bool {
        !a.is_at_infinity() && !b.is_at_infinity()
    }
}

impl Emitter for Furnace {
    fn sample(&self, ru: Float, rv: Float, _rj: Float) -> Option<Endpoint> {
        if self.emission <= 0.0 {
            return None;
        }
        let v = uniform_sample_sphere(&Point2f::new(ru, rv));
        let wall = self.wall(self.centre + v * self.radius);
        let area = self.area();
        Some(Endpoint::new(Arc::new(wall), Spectrum::splat(area), 1.0 / area, false))
    }
}

/// A point on the inside of the furnace. As a light subpath root (no arrival
/// direction) it emits; otherwise it reflects diffusely.
#[derive(Copy, Clone, Debug)]
struct Wall {
    p: Point3f,
    n: Vector3f,
    albedo: Float,
    emission: Float,
    area: Float,
}

impl Wall {
    fn faces(&self, v: &Vector3f) -> bool {
        self.n.dot(v) > 0.0
    }
}

impl Interaction for Wall {
    fn position(&self) -> Position {
        Position::Point(self.p)
    }

    fn cosine(&self, v: &Vector3f) -> Float {
        self.n.dot(v)
    }

    fn sample(
        &self,
        wi: Option<&Vector3f>,
        _mode: TransportMode,
        ru: Float,
        rv: Float,
        _rj: Float,
    ) -> Option<ScatteredRay> {
        let color = match wi {
            None => self.emission * PI,
            Some(_) => self.albedo,
        };
        if color <= 0.0 {
            return None;
        }

        let local = cosine_sample_hemisphere(&Point2f::new(ru, rv));
        let (s, t) = self.n.coordinate_system();
        let wo = local.from_local(&s, &t, &self.n).normalize();
        Some(ScatteredRay::diffuse(
            Ray::new(self.p, wo),
            Spectrum::splat(color),
            INV_PI,
        ))
    }

    fn scatter(&self, wi: Option<&Vector3f>, wo: &Vector3f, _mode: TransportMode) -> Spectrum {
        if !self.faces(wo) {
            return Spectrum::ZERO;
        }
        match wi {
            None => Spectrum::splat(self.emission),
            Some(wi) if !self.faces(wi) => Spectrum::splat(self.albedo * INV_PI),
            Some(_) => Spectrum::ZERO,
        }
    }

    fn pdf(&self, _wi: Option<&Vector3f>, wo: &Vector3f, _mode: TransportMode) -> Float {
        if self.faces(wo) {
            INV_PI
        } else {
            0.0
        }
    }

    fn emission(&self, wo: &Vector3f) -> Spectrum {
        if self.faces(wo) {
            Spectrum::splat(self.emission)
        } else {
            Spectrum::ZERO
        }
    }

    fn is_emissive(&self) -> bool {
        self.emission > 0.0
    }

    fn source_pdf(&self) -> Float {
        if self.emission > 0.0 {
            1.0 / self.area
        } else {
            0.0
        }
    }

    fn source_pdf_toward(&self, wo: &Vector3f) -> Float {
        if self.emission > 0.0 {
            self.pdf(None, wo, TransportMode::Importance)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;
    use proptest::prelude::*;

    fn furnace() -> Furnace {
        Furnace::new(Point3f::new(1.0, 2.0, 3.0), 2.0, 0.5, 3.0).unwrap()
    }

    fn surface(hit: Option<Hit>) -> ArcInteraction {
        match hit {
            Some(Hit::Surface(i)) => i,
            _ => panic!("expected a surface hit"),
        }
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let c = Point3f::ORIGIN;
        assert!(Furnace::new(c, 0.0, 0.5, 1.0).is_err());
        assert!(Furnace::new(c, 1.0, 1.5, 1.0).is_err());
        assert!(Furnace::new(c, 1.0, 0.5, -1.0).is_err());
        assert!(Furnace::new(c, INFINITY, 0.5, 1.0).is_err());
    }

    #[test]
    fn radiance_sums_geometric_series() {
        let f = furnace();
        assert_eq!(f.radiance(0), 0.0);
        assert!(approx_eq!(f64, f.radiance(1), 3.0));
        assert!(approx_eq!(f64, f.radiance(3), 3.0 * 1.75));
    }

    #[test]
    fn emitter_without_emission_samples_nothing() {
        let f = Furnace::new(Point3f::ORIGIN, 1.0, 0.5, 0.0).unwrap();
        assert!(Emitter::sample(&f, 0.1, 0.2, 0.3).is_none());
    }

    #[test]
    fn emitter_root_weight_is_area() {
        let f = furnace();
        let e = Emitter::sample(&f, 0.3, 0.6, 0.0).unwrap();
        assert!(approx_eq!(f64, e.weight[0] * e.pdf, 1.0, epsilon = 1e-12));
        let sr = e
            .interaction
            .sample(None, TransportMode::Importance, 0.2, 0.7, 0.0)
            .unwrap();
        assert!(approx_eq!(f64, sr.color[0], 3.0 * PI, epsilon = 1e-12));
        let le = e.interaction.scatter(None, &sr.ray.d, TransportMode::Importance);
        assert!(approx_eq!(f64, le[0], 3.0));
    }

    #[test]
    fn walls_do_not_scatter_from_behind() {
        let f = furnace();
        let wall = surface(f.intersect(&Ray::new(f.centre, Vector3f::X_AXIS)));
        let inward = -Vector3f::X_AXIS;
        assert_eq!(
            wall.scatter(Some(&Vector3f::X_AXIS), &inward, TransportMode::Radiance),
            Spectrum::splat(0.5 * INV_PI)
        );
        assert_eq!(
            wall.scatter(Some(&inward), &inward, TransportMode::Radiance),
            Spectrum::ZERO
        );
        assert_eq!(wall.pdf(None, &Vector3f::X_AXIS, TransportMode::Radiance), 0.0);
        assert_eq!(wall.emission(&Vector3f::X_AXIS), Spectrum::ZERO);
    }

    proptest! {
        #[test]
        fn rays_from_inside_hit_the_wall(u in 0.0..1.0f64, v in 0.0..1.0f64) {
            let f = furnace();
            let d = uniform_sample_sphere(&Point2f::new(u, v));
            let o = f.centre + Vector3f::new(0.3, -0.2, 0.5);
            let wall = surface(f.intersect(&Ray::new(o, d)));
            let p = wall.position().point().unwrap();
            prop_assert!(approx_eq!(f64, p.distance(&f.centre), 2.0, epsilon = 1e-9));
            prop_assert!(wall.cosine(&(f.centre - p).normalize()) > 0.999_999);
        }

        #[test]
        fn reflected_rays_stay_inside(u in 0.0..1.0f64, v in 0.0..1.0f64) {
            let f = furnace();
            let wall = surface(f.intersect(&Ray::new(f.centre, Vector3f::Y_AXIS)));
            let sr = wall
                .sample(Some(&Vector3f::Y_AXIS), TransportMode::Radiance, u, v, 0.5)
                .unwrap();
            prop_assert!(wall.cosine(&sr.ray.d) >= 0.0);
            prop_assert!(approx_eq!(f64, sr.color[0], 0.5));
            prop_assert!(approx_eq!(f64, sr.pdf, INV_PI));
        }
    }
}
