//! Scenes and path builders shared by the tests.

use cameras::PinholeSensor;
use pbrt_core::camera::*;
use pbrt_core::common::*;
use pbrt_core::geometry::*;
use pbrt_core::interaction::*;
use pbrt_core::path::*;
use pbrt_core::sampling::*;
use pbrt_core::scene::*;
use pbrt_core::spectrum::*;
use scenes::Furnace;
use std::sync::Arc;

/// A unit furnace at the origin emitting unit radiance.
pub fn furnace(albedo: Float) -> Furnace {
    Furnace::new(Point3f::ORIGIN, 1.0, albedo, 1.0).unwrap()
}

/// A pinhole at the furnace centre looking along +z.
pub fn pinhole() -> PinholeSensor {
    PinholeSensor::new(Point3f::ORIGIN, Point3f::new(0.0, 0.0, 1.0), Vector3f::Y_AXIS, 90.0, 1.0)
        .unwrap()
}

/// Returns the wall point of a unit furnace at the origin in direction `d`.
pub fn wall_point(d: Vector3f) -> Point3f {
    Point3f::from(d.normalize())
}

/// Pushes a light root sampled with fixed random numbers.
pub fn light_root(furnace: &Furnace, arena: &mut PathArena) -> NodeId {
    let samples = [0.2, 0.6, 0.5];
    let e = pbrt_core::light::Emitter::sample(furnace, 0.2, 0.6, 0.5).unwrap();
    arena.push_root(Subpath::Light, e, samples)
}

/// Pushes a light root on the wall at `p`.
pub fn light_root_at(furnace: &Furnace, arena: &mut PathArena, p: Point3f) -> NodeId {
    let wall = surface(furnace.intersect(&Ray::new(furnace.centre, p - furnace.centre)));
    let area = furnace.area();
    arena.push_root(
        Subpath::Light,
        Endpoint::new(wall, Spectrum::splat(area), 1.0 / area, false),
        [0.0; 3],
    )
}

/// Pushes a pinhole root whose image point looks at `p`.
pub fn eye_root_toward(sensor: &PinholeSensor, arena: &mut PathArena, p: Point3f) -> NodeId {
    let uv = sensor.project(&Position::Point(p)).unwrap();
    let e = sensor.sample(&uv, 0.0, 0.0, 0.0).unwrap();
    arena.push_root(Subpath::Eye, e, [0.0; 3])
}

/// Appends furnace wall nodes at `points` to a subpath, scattering toward
/// each one in turn with the density the tail would have used.
pub fn extend_through(
    furnace: &Furnace,
    arena: &mut PathArena,
    tail: NodeId,
    points: &[Point3f],
) -> NodeId {
    let mut tail = tail;
    for p in points {
        let o = arena[tail].position().point().unwrap();
        let wo = (*p - o).normalize();
        let pdf = arena.pdf_toward(tail, &wo);
        assert!(pdf > 0.0, "{p} cannot be reached from {o}");
        let sr = ScatteredRay::diffuse(Ray::new(o, wo), arena.scatter(tail, &wo) / pdf, pdf);
        let wall = surface(furnace.intersect(&sr.ray));
        tail = arena.push_scattering(tail, &sr, wall, [0.0; 3]);
    }
    tail
}

/// Unwraps a surface hit.
pub fn surface(hit: Option<Hit>) -> ArcInteraction {
    match hit {
        Some(Hit::Surface(i)) => i,
        _ => panic!("expected a surface hit"),
    }
}

/// A diffuse ground plane at `z = 0` under a uniformly bright sky.
pub struct OpenSky;

impl OpenSky {
    /// Returns an endpoint on the ground at the origin.
    pub fn ground_endpoint() -> Endpoint {
        Endpoint::new(Arc::new(Ground { p: Point3f::ORIGIN }), Spectrum::ONE, 1.0, false)
    }
}

impl Scene for OpenSky {
    fn intersect(&self, ray: &Ray) -> Option<Hit> {
        if ray.d.z >= 0.0 {
            Some(Hit::Environment(Arc::new(Sky { d: ray.d.normalize() })))
        } else if ray.o.z > 0.0 {
            Some(Hit::Surface(Arc::new(Ground {
                p: ray.at(-ray.o.z / ray.d.z),
            })))
        } else {
            None
        }
    }

    fn visibility(&self, _a: &Position, _b: &Position) -> bool {
        true
    }
}

struct Ground {
    p: Point3f,
}

impl Interaction for Ground {
    fn position(&self) -> Position {
        Position::Point(self.p)
    }

    fn cosine(&self, v: &Vector3f) -> Float {
        v.z
    }

    fn sample(
        &self,
        _wi: Option<&Vector3f>,
        _mode: TransportMode,
        ru: Float,
        rv: Float,
        _rj: Float,
    ) -> Option<ScatteredRay> {
        let wo = cosine_sample_hemisphere(&Point2f::new(ru, rv));
        Some(ScatteredRay::diffuse(Ray::new(self.p, wo), Spectrum::splat(0.5), INV_PI))
    }

    fn scatter(&self, _wi: Option<&Vector3f>, wo: &Vector3f, _mode: TransportMode) -> Spectrum {
        if wo.z > 0.0 {
            Spectrum::splat(0.5 * INV_PI)
        } else {
            Spectrum::ZERO
        }
    }

    fn pdf(&self, _wi: Option<&Vector3f>, wo: &Vector3f, _mode: TransportMode) -> Float {
        if wo.z > 0.0 {
            INV_PI
        } else {
            0.0
        }
    }
}

struct Sky {
    d: Vector3f,
}

impl Interaction for Sky {
    fn position(&self) -> Position {
        Position::Direction(self.d)
    }

    fn cosine(&self, _v: &Vector3f) -> Float {
        1.0
    }

    fn sample(
        &self,
        _wi: Option<&Vector3f>,
        _mode: TransportMode,
        _ru: Float,
        _rv: Float,
        _rj: Float,
    ) -> Option<ScatteredRay> {
        None
    }

    fn scatter(&self, _wi: Option<&Vector3f>, _wo: &Vector3f, _mode: TransportMode) -> Spectrum {
        Spectrum::ZERO
    }

    fn pdf(&self, _wi: Option<&Vector3f>, _wo: &Vector3f, _mode: TransportMode) -> Float {
        0.0
    }

    fn emission(&self, _wo: &Vector3f) -> Spectrum {
        Spectrum::splat(2.0)
    }

    fn is_emissive(&self) -> bool {
        true
    }
}
