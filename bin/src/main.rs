#[macro_use]
extern crate log;
#[macro_use]
extern crate lazy_static;

use cameras::*;
use clap::Parser;
use pbrt_core::app::*;
use pbrt_core::camera::*;
use pbrt_core::common::*;
use pbrt_core::error::*;
use pbrt_core::geometry::*;
use pbrt_core::raster::*;
use pbrt_core::rng::RNG;
use pbrt_core::scene::*;
use integrators::*;
use scenes::*;
use std::process;
use std::sync::Arc;

lazy_static! {
    static ref OPTIONS: Options = Options::parse();
}

fn main() {
    // Initialize `env_logger`.
    env_logger::init();

    if let Err(e) = render(&OPTIONS) {
        error!("{e}");
        process::exit(1);
    }
}

fn render(options: &Options) -> Result<()> {
    let furnace = Arc::new(Furnace::new(
        Point3f::ORIGIN,
        options.radius,
        options.albedo,
        options.emission,
    )?);
    let sensor = create_sensor(options)?;

    let (image, max_depth) = if options.preview {
        let shader = CameraImageShader::new(
            Arc::clone(&sensor),
            Arc::new(EmissionRayShader::new(furnace.clone() as ArcScene)),
        );
        let mut rng = RNG::new(options.seed);
        let image = shade_image(
            &shader,
            options.width,
            options.height,
            options.eye_paths_per_pixel,
            &mut rng,
        );
        (image, 1)
    } else {
        let (strategy, max_depth) = create_strategy(options)?;
        let tracer = BidiPathTracer::new(
            RenderSettings::from(options),
            strategy,
            Box::new(RNG::new(options.seed)),
        )?;
        let image = tracer.render(furnace.as_ref(), sensor.as_ref(), furnace.as_ref(), options.seed);
        (image, max_depth)
    };

    report(&image, furnace.radiance(max_depth));
    Ok(())
}

/// Returns the pinhole sensor at the centre of the furnace, restricted to a
/// window or fraction of the image plane when requested.
///
/// * `options` - The options.
fn create_sensor(options: &Options) -> Result<ArcSensor> {
    let pinhole: ArcSensor = Arc::new(PinholeSensor::new(
        Point3f::ORIGIN,
        Point3f::new(0.0, 0.0, 1.0),
        Vector3f::Y_AXIS,
        options.fov,
        options.width as Float / options.height.max(1) as Float,
    )?);

    if let Some(window) = options.window() {
        Ok(Arc::new(PartialSensor::with_bounds(window, pinhole)?))
    } else if options.fraction != 1.0 {
        Ok(Arc::new(PartialSensor::new(options.fraction, pinhole)?))
    } else {
        Ok(pinhole)
    }
}

/// Returns the requested strategy and the longest path, in vertices after
/// the sensor, it can produce.
///
/// * `options` - The options.
fn create_strategy(options: &Options) -> Result<(ArcBidiPathStrategy, usize)> {
    let light_depth = options.light_depth();
    let eye_depth = options.eye_depth();
    let bidi_depth = (light_depth + eye_depth).saturating_sub(1);

    Ok(match options.strategy {
        StrategyKind::LightTracing => (
            Arc::new(LightTracingStrategy::new(options.max_depth)?),
            options.max_depth,
        ),
        StrategyKind::PathTracing => (
            Arc::new(PathTracingStrategy::new(options.max_depth)?),
            options.max_depth,
        ),
        StrategyKind::Uniform => (
            Arc::new(UniformWeightedStrategy::new(light_depth, eye_depth)),
            bidi_depth,
        ),
        StrategyKind::Mis => {
            let heuristic = options.power.map_or(Heuristic::Balance, Heuristic::Power);
            (
                Arc::new(MultipleImportanceSamplingStrategy::new(
                    light_depth,
                    eye_depth,
                    heuristic,
                )),
                bidi_depth,
            )
        }
    })
}

/// Logs the mean of the image next to the radiance the furnace predicts.
///
/// * `image`    - The rendered image.
/// * `expected` - Analytic radiance for the longest paths rendered.
fn report(image: &Raster, expected: Float) {
    let mean = image.mean();
    info!(
        "Mean radiance {:.6} {:.6} {:.6}, expected {expected:.6}",
        mean[0], mean[1], mean[2]
    );
    println!("{:.6}", mean[0]);
}
