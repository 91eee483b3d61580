//! Shaders

use pbrt_core::camera::*;
use pbrt_core::common::*;
use pbrt_core::geometry::*;
use pbrt_core::raster::*;
use pbrt_core::rng::Random;
use pbrt_core::scene::*;
use pbrt_core::shader::*;
use pbrt_core::spectrum::*;
use std::sync::Arc;

/// Shades image points by shading the ray a sensor produces through them.
pub struct CameraImageShader {
    /// The sensor.
    sensor: ArcSensor,

    /// Shades the rays.
    shader: Arc<dyn RayShader>,
}

impl CameraImageShader {
    /// Create a new `CameraImageShader`.
    ///
    /// * `sensor` - The sensor.
    /// * `shader` - Shades the rays.
    pub fn new(sensor: ArcSensor, shader: Arc<dyn RayShader>) -> Self {
        Self { sensor, shader }
    }
}

impl ImageShader for CameraImageShader {
    /// Returns black for image points the sensor has no ray for.
    fn shade_at(&self, p: &Point2f, rng: &mut dyn Random) -> Spectrum {
        match self.sensor.ray_at(p, rng) {
            Some(sr) => self.shader.shade(&sr.ray, rng) * sr.color,
            None => Spectrum::ZERO,
        }
    }
}

/// Shades a ray with the radiance emitted toward it by whatever it hits
/// first.
pub struct EmissionRayShader {
    scene: ArcScene,
}

impl EmissionRayShader {
    /// Create a new `EmissionRayShader`.
    ///
    /// * `scene` - The scene.
    pub fn new(scene: ArcScene) -> Self {
        Self { scene }
    }
}

impl RayShader for EmissionRayShader {
    fn shade(&self, ray: &Ray, _rng: &mut dyn Random) -> Spectrum {
        match self.scene.intersect(ray) {
            Some(Hit::Surface(i)) | Some(Hit::Environment(i)) => i.emission(&-ray.d.normalize()),
            None => Spectrum::ZERO,
        }
    }
}

/// Returns an image whose pixels average a shader over jittered image points.
///
/// * `shader`  - The image shader.
/// * `width`   - Image width in pixels.
/// * `height`  - Image height in pixels.
/// * `samples` - Image points per pixel.
/// * `rng`     - Random number stream used for jittering and shading.
pub fn shade_image(
    shader: &dyn ImageShader,
    width: usize,
    height: usize,
    samples: usize,
    rng: &mut dyn Random,
) -> Raster {
    let mut raster = Raster::new(width, height);
    if samples == 0 {
        return raster;
    }

    let scale = 1.0 / samples as Float;
    for y in 0..height {
        for x in 0..width {
            for _ in 0..samples {
                let p = Point2f::new(
                    (x as Float + rng.next()) / width as Float,
                    (y as Float + rng.next()) / height as Float,
                );
                let v = shader.shade_at(&p, rng) * scale;
                raster.add_pixel(x, y, &v);
            }
        }
    }
    raster
}
