//! Pinhole Sensor

use pbrt_core::camera::*;
use pbrt_core::common::*;
use pbrt_core::error::*;
use pbrt_core::geometry::*;
use pbrt_core::interaction::*;
use pbrt_core::rng::Random;
use pbrt_core::spectrum::*;
use std::sync::Arc;

/// The viewing frustum of a pinhole: an image plane one unit in front of
/// the origin.
#[derive(Copy, Clone, Debug)]
struct Frustum {
    /// Centre of projection.
    origin: Point3f,

    /// Right axis of the image plane.
    s: Vector3f,

    /// Up axis of the image plane.
    t: Vector3f,

    /// Viewing direction.
    n: Vector3f,

    /// Width of the image plane at unit distance.
    width: Float,

    /// Height of the image plane at unit distance.
    height: Float,
}

impl Frustum {
    /// Returns the unit direction through a normalized image point.
    fn direction_through(&self, p: &Point2f) -> Vector3f {
        let x = self.width * (p.x - 0.5);
        let y = self.height * (0.5 - p.y);
        (self.s * x + self.t * y + self.n).normalize()
    }

    /// Returns the image point a direction passes through, if any.
    fn project_direction(&self, v: &Vector3f) -> Option<Point2f> {
        let z = v.dot(&self.n);
        if z < RAY_EPSILON * v.length() {
            return None;
        }
        let p = Point2f::new(
            0.5 + v.dot(&self.s) / (self.width * z),
            0.5 - v.dot(&self.t) / (self.height * z),
        );
        if Bounds2f::UNIT.contains(&p) {
            Some(p)
        } else {
            None
        }
    }

    /// Returns the cosine between a direction and the viewing direction.
    fn cosine(&self, v: &Vector3f) -> Float {
        v.dot(&self.n) / v.length()
    }

    /// Returns `1 / (A cos^4)`, both the importance emitted along `v` and the
    /// projected solid angle density of choosing `v` through a uniformly
    /// distributed image point; zero outside the field of view.
    fn density(&self, v: &Vector3f) -> Float {
        if self.project_direction(v).is_none() {
            return 0.0;
        }
        let cos_theta = self.cosine(v);
        let cos2 = cos_theta * cos_theta;
        1.0 / (self.width * self.height * cos2 * cos2)
    }
}

/// A sensor with an infinitesimal aperture.
#[derive(Clone, Debug)]
pub struct PinholeSensor {
    frustum: Frustum,
}

impl PinholeSensor {
    /// Create a new `PinholeSensor`.
    ///
    /// * `origin`  - Centre of projection.
    /// * `look_at` - A point the sensor looks at.
    /// * `up`      - Approximate up direction.
    /// * `fov`     - Horizontal field of view in degrees, in (0, 180).
    /// * `aspect`  - Ratio of image width to height.
    pub fn new(
        origin: Point3f,
        look_at: Point3f,
        up: Vector3f,
        fov: Float,
        aspect: Float,
    ) -> Result<Self> {
        if !(fov > 0.0 && fov < 180.0) {
            return Err(Error::InvalidParameter { name: "fov", value: fov });
        }
        if !(aspect > 0.0 && aspect.is_finite()) {
            return Err(Error::InvalidParameter {
                name: "aspect",
                value: aspect,
            });
        }

        let view = look_at - origin;
        if view.length_squared() == 0.0 {
            return Err(Error::InvalidParameter {
                name: "look_at",
                value: 0.0,
            });
        }
        let n = view.normalize();
        let right = n.cross(&up);
        if right.length_squared() == 0.0 {
            return Err(Error::InvalidParameter {
                name: "up",
                value: up.length(),
            });
        }
        let s = right.normalize();
        let t = s.cross(&n);

        let width = 2.0 * (0.5 * fov.to_radians()).tan();
        let height = width / aspect;
        debug!("Pinhole at {origin} looking along {n}, image plane {width} x {height}");

        Ok(Self {
            frustum: Frustum {
                origin,
                s,
                t,
                n,
                width,
                height,
            },
        })
    }
}

impl Sensor for PinholeSensor {
    fn ray_at(&self, p: &Point2f, _rng: &mut dyn Random) -> Option<ScatteredRay> {
        let d = self.frustum.direction_through(p);
        Some(ScatteredRay::diffuse(
            Ray::new(self.frustum.origin, d),
            Spectrum::ONE,
            self.frustum.density(&d),
        ))
    }

    /// The root is positioned at the centre of projection and always
    /// scatters through `p`; the random numbers are not needed.
    fn sample(&self, p: &Point2f, _ru: Float, _rv: Float, _rj: Float) -> Option<Endpoint> {
        let root = PinholeRoot {
            frustum: self.frustum,
            direction: self.frustum.direction_through(p),
        };
        Some(Endpoint::new(Arc::new(root), Spectrum::ONE, 1.0, false))
    }

    fn project(&self, x: &Position) -> Option<Point2f> {
        let v = match x {
            Position::Point(q) => *q - self.frustum.origin,
            Position::Direction(d) => *d,
        };
        self.frustum.project_direction(&v)
    }
}

/// Eye subpath root of a `PinholeSensor`.
struct PinholeRoot {
    frustum: Frustum,
    direction: Vector3f,
}

impl Interaction for PinholeRoot {
    fn position(&self) -> Position {
        Position::Point(self.frustum.origin)
    }

    fn cosine(&self, v: &Vector3f) -> Float {
        self.frustum.cosine(v)
    }

    fn sample(
        &self,
        _wi: Option<&Vector3f>,
        _mode: TransportMode,
        _ru: Float,
        _rv: Float,
        _rj: Float,
    ) -> Option<ScatteredRay> {
        let pdf = self.frustum.density(&self.direction);
        if pdf > 0.0 {
            Some(ScatteredRay::diffuse(
                Ray::new(self.frustum.origin, self.direction),
                Spectrum::ONE,
                pdf,
            ))
        } else {
            None
        }
    }

    fn scatter(&self, _wi: Option<&Vector3f>, wo: &Vector3f, _mode: TransportMode) -> Spectrum {
        Spectrum::splat(self.frustum.density(wo))
    }

    fn pdf(&self, _wi: Option<&Vector3f>, wo: &Vector3f, _mode: TransportMode) -> Float {
        self.frustum.density(wo)
    }
}
