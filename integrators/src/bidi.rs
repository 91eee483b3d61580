//! Bidirectional Path Tracer

use crate::measure::contribution;
use crate::strategy::*;
use pbrt_core::app::*;
use pbrt_core::camera::*;
use pbrt_core::common::*;
use pbrt_core::error::*;
use pbrt_core::geometry::*;
use pbrt_core::light::*;
use pbrt_core::path::*;
use pbrt_core::raster::*;
use pbrt_core::rng::Random;
use pbrt_core::scene::*;
use itertools::iproduct;
use std::panic;
use std::thread;

/// Image and sampling settings of a render.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderSettings {
    /// Image width in pixels.
    pub width: usize,

    /// Image height in pixels.
    pub height: usize,

    /// Eye paths traced per pixel.
    pub eye_paths_per_pixel: usize,

    /// Light paths traced and joined with each eye path.
    pub light_paths_per_eye_path: usize,

    /// Size in pixels of the square tiles handed to worker threads.
    pub tile_size: usize,

    /// Number of worker threads.
    pub n_threads: usize,

    /// Hide the progress bar.
    pub quiet: bool,
}

impl RenderSettings {
    /// Returns an error if any setting is zero.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(Error::InvalidResolution {
                width: self.width,
                height: self.height,
            });
        }
        if self.tile_size == 0 {
            return Err(Error::InvalidResolution {
                width: self.tile_size,
                height: self.tile_size,
            });
        }
        if self.eye_paths_per_pixel == 0 {
            return Err(Error::InvalidSampleCount("eye paths per pixel"));
        }
        if self.light_paths_per_eye_path == 0 {
            return Err(Error::InvalidSampleCount("light paths per eye path"));
        }
        if self.n_threads == 0 {
            return Err(Error::InvalidSampleCount("threads"));
        }
        Ok(())
    }

    /// Returns the number of tiles along each image axis.
    pub fn tiles(&self) -> (usize, usize) {
        (
            (self.width + self.tile_size - 1) / self.tile_size,
            (self.height + self.tile_size - 1) / self.tile_size,
        )
    }
}

impl From<&Options> for RenderSettings {
    fn from(options: &Options) -> Self {
        Self {
            width: options.width,
            height: options.height,
            eye_paths_per_pixel: options.eye_paths_per_pixel,
            light_paths_per_eye_path: options.light_paths_per_eye_path,
            tile_size: options.tile_size,
            n_threads: options.threads(),
            quiet: options.quiet,
        }
    }
}

/// Renders an image by joining eye and light subpaths built and weighted by
/// a `BidiPathStrategy`.
pub struct BidiPathTracer {
    /// Image and sampling settings.
    settings: RenderSettings,

    /// Builds and weights the subpaths.
    strategy: ArcBidiPathStrategy,

    /// Prototype of the per-tile random number streams.
    random: Box<dyn Random + Sync>,
}

impl BidiPathTracer {
    /// Create a new `BidiPathTracer`.
    ///
    /// * `settings` - Image and sampling settings.
    /// * `strategy` - Builds and weights the subpaths.
    /// * `random`   - Prototype of the per-tile random number streams.
    pub fn new(
        settings: RenderSettings,
        strategy: ArcBidiPathStrategy,
        random: Box<dyn Random + Sync>,
    ) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            strategy,
            random,
        })
    }

    /// Returns the settings.
    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Renders the image. Each pixel holds the average of its eye paths, and
    /// joins at the sensor root are splatted where the light vertex projects.
    ///
    /// * `scene`   - The scene.
    /// * `sensor`  - The sensor.
    /// * `emitter` - The emitter.
    /// * `seed`    - Offset of the per-tile random number streams.
    pub fn render(
        &self,
        scene: &dyn Scene,
        sensor: &dyn Sensor,
        emitter: &dyn Emitter,
        seed: u64,
    ) -> Raster {
        let RenderSettings {
            width,
            height,
            n_threads,
            ..
        } = self.settings;
        let n_tiles = self.settings.tiles();
        let tile_count = n_tiles.0 * n_tiles.1;
        info!("Rendering {width}x{height} image in {tile_count} tiles using {n_threads} threads");

        let progress = create_progress_reporter(tile_count as u64, self.settings.quiet);
        progress.set_message("Rendering scene");

        let rasters: Vec<Raster> = thread::scope(|scope| {
            let (tx, rx) = crossbeam_channel::bounded(n_threads);

            // Spawn worker threads.
            let workers: Vec<_> = (0..n_threads)
                .map(|_| {
                    let rxc = rx.clone();
                    let progress = &progress;
                    scope.spawn(move || {
                        let mut raster = Raster::new(width, height);
                        let mut arena = PathArena::new();
                        for tile_idx in rxc.iter() {
                            self.render_tile(
                                tile_idx,
                                n_tiles,
                                scene,
                                sensor,
                                emitter,
                                seed,
                                &mut arena,
                                &mut raster,
                            );
                            progress.inc(1);
                        }
                        raster
                    })
                })
                .collect();
            drop(rx); // Drop extra rx since we've cloned one for each worker.

            // Send work.
            for tile_idx in 0..tile_count {
                if tx.send(tile_idx).is_err() {
                    break;
                }
            }
            drop(tx);

            workers
                .into_iter()
                .map(|worker| worker.join().unwrap_or_else(|e| panic::resume_unwind(e)))
                .collect()
        });

        let mut image = Raster::new(width, height);
        for raster in rasters.iter() {
            image.merge(raster);
        }

        progress.finish_with_message("Render complete");
        image
    }

    /// Renders the pixels of one tile into a worker's raster.
    #[allow(clippy::too_many_arguments)]
    fn render_tile(
        &self,
        tile_idx: usize,
        n_tiles: (usize, usize),
        scene: &dyn Scene,
        sensor: &dyn Sensor,
        emitter: &dyn Emitter,
        seed: u64,
        arena: &mut PathArena,
        raster: &mut Raster,
    ) {
        let RenderSettings {
            width,
            height,
            eye_paths_per_pixel,
            light_paths_per_eye_path,
            tile_size,
            ..
        } = self.settings;

        // Get the x and y tile indices.
        let tile_x = tile_idx % n_tiles.0;
        let tile_y = tile_idx / n_tiles.0;

        // Compute pixel bounds for tile.
        let x0 = tile_x * tile_size;
        let x1 = min(x0 + tile_size, width);
        let y0 = tile_y * tile_size;
        let y1 = min(y0 + tile_size, height);

        info!("Starting image tile ({tile_x}, {tile_y}) -> [{x0}, {x1}) x [{y0}, {y1})");

        let mut tile_rng = self.random.create_compatible(seed.wrapping_add(tile_idx as u64));
        let rng = tile_rng.as_mut();
        let scale = 1.0 / (eye_paths_per_pixel * light_paths_per_eye_path) as Float;

        for y in y0..y1 {
            for x in x0..x1 {
                for _ in 0..eye_paths_per_pixel {
                    let p = Point2f::new(
                        (x as Float + rng.next()) / width as Float,
                        (y as Float + rng.next()) / height as Float,
                    );

                    arena.clear();
                    let eye = self.strategy.trace_eye_path(scene, sensor, &p, arena, rng);
                    let mark = arena.len();

                    for _ in 0..light_paths_per_eye_path {
                        arena.truncate(mark);
                        let light = self.strategy.trace_light_path(scene, emitter, arena, rng);
                        self.join(scene, sensor, arena, light, eye, (x, y), scale, raster);
                    }
                }
            }
        }
    }

    /// Joins every node of a light subpath, or none, with every node of an
    /// eye subpath, or none, and accumulates the weighted contributions.
    #[allow(clippy::too_many_arguments)]
    fn join(
        &self,
        scene: &dyn Scene,
        sensor: &dyn Sensor,
        arena: &PathArena,
        light: Option<NodeId>,
        eye: Option<NodeId>,
        pixel: (usize, usize),
        scale: Float,
        raster: &mut Raster,
    ) {
        let light_nodes = subpath_nodes(arena, light);
        let eye_nodes = subpath_nodes(arena, eye);

        for (l, e) in iproduct!(light_nodes.iter().copied(), eye_nodes.iter().copied()) {
            let path = Path::new(arena, l, e);
            let w = self.strategy.weight(&path);
            if w <= 0.0 {
                continue;
            }
            let Some(c) = contribution(scene, &path) else {
                continue;
            };
            let c = c * (w * scale);

            match (l, e) {
                (Some(l), Some(e)) if arena[e].is_root() => {
                    if let Some(p) = sensor.project(&arena[l].position()) {
                        raster.add_splat(&p, &c);
                    }
                }
                _ => raster.add_pixel(pixel.0, pixel.1, &c),
            }
        }
    }
}

/// Returns `None` followed by every node from a subpath tail to its root.
fn subpath_nodes(arena: &PathArena, tail: Option<NodeId>) -> Vec<Option<NodeId>> {
    std::iter::once(None)
        .chain(tail.into_iter().flat_map(|t| arena.ancestors(t)).map(Some))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use crate::*;
    use cameras::{PartialSensor, PinholeSensor};
    use pbrt_core::rng::RNG;
    use float_cmp::*;
    use std::sync::Arc;

    fn settings(width: usize, height: usize, spp: usize, n_threads: usize) -> RenderSettings {
        RenderSettings {
            width,
            height,
            eye_paths_per_pixel: spp,
            light_paths_per_eye_path: 1,
            tile_size: 4,
            n_threads,
            quiet: true,
        }
    }

    fn tracer(settings: RenderSettings, strategy: ArcBidiPathStrategy) -> BidiPathTracer {
        BidiPathTracer::new(settings, strategy, Box::new(RNG::new(0))).unwrap()
    }

    fn wide_pinhole() -> PinholeSensor {
        PinholeSensor::new(Point3f::ORIGIN, Point3f::new(0.0, 0.0, 1.0), Vector3f::Y_AXIS, 90.0, 1.0)
            .unwrap()
    }

    #[test]
    fn zero_settings_are_rejected() {
        let valid = settings(8, 6, 2, 1);
        assert!(valid.validate().is_ok());
        assert_eq!(
            RenderSettings { width: 0, ..valid }.validate(),
            Err(Error::InvalidResolution { width: 0, height: 6 })
        );
        assert!(RenderSettings { tile_size: 0, ..valid }.validate().is_err());
        assert_eq!(
            RenderSettings { eye_paths_per_pixel: 0, ..valid }.validate(),
            Err(Error::InvalidSampleCount("eye paths per pixel"))
        );
        assert!(RenderSettings { light_paths_per_eye_path: 0, ..valid }.validate().is_err());
        assert!(RenderSettings { n_threads: 0, ..valid }.validate().is_err());
    }

    #[test]
    fn tiles_cover_the_image() {
        let s = RenderSettings { tile_size: 4, ..settings(9, 4, 1, 1) };
        assert_eq!(s.tiles(), (3, 1));
    }

    #[test]
    fn path_tracing_renders_the_furnace_exactly() {
        let furnace = furnace(0.5);
        let sensor = pinhole();
        let strategy = Arc::new(PathTracingStrategy::new(4).unwrap());
        let image = tracer(settings(9, 7, 2, 3), strategy).render(&furnace, &sensor, &furnace, 5);

        let expected = furnace.radiance(4);
        for p in image.pixels() {
            assert!(approx_eq!(f64, p[0], expected, epsilon = 1e-9), "{} != {expected}", p[0]);
        }
    }

    #[test]
    fn thread_count_does_not_change_path_traced_images() {
        let furnace = furnace(0.7);
        let sensor = pinhole();
        let strategy: ArcBidiPathStrategy = Arc::new(PathTracingStrategy::new(3).unwrap());
        let one = tracer(settings(8, 8, 1, 1), Arc::clone(&strategy)).render(&furnace, &sensor, &furnace, 11);
        let many = tracer(settings(8, 8, 1, 4), strategy).render(&furnace, &sensor, &furnace, 11);
        assert_eq!(one, many);
    }

    #[test]
    fn light_tracing_estimates_the_furnace() {
        let furnace = furnace(0.5);
        let sensor = wide_pinhole();
        let strategy = Arc::new(LightTracingStrategy::new(3).unwrap());
        let image = tracer(settings(16, 16, 16, 2), strategy).render(&furnace, &sensor, &furnace, 3);

        let expected = furnace.radiance(3);
        let mean = image.mean()[0];
        assert!((mean - expected).abs() < 0.15 * expected, "{mean} != {expected}");
    }

    #[test]
    fn light_tracing_through_a_window_matches_the_full_frame() {
        let furnace = furnace(0.5);
        let window = Bounds2f::new(Point2f::new(0.25, 0.25), Point2f::new(0.75, 0.75));
        let sensor = PartialSensor::with_bounds(window, Arc::new(wide_pinhole())).unwrap();
        let strategy: ArcBidiPathStrategy = Arc::new(LightTracingStrategy::new(3).unwrap());
        let full = tracer(settings(16, 16, 16, 2), Arc::clone(&strategy))
            .render(&furnace, &wide_pinhole(), &furnace, 3)
            .mean()[0];
        let windowed = tracer(settings(16, 16, 16, 2), strategy)
            .render(&furnace, &sensor, &furnace, 3)
            .mean()[0];

        let expected = furnace.radiance(3);
        assert!((windowed - expected).abs() < 0.15 * expected, "{windowed} != {expected}");
        assert!((windowed - full).abs() < 0.2 * full, "{windowed} != {full}");
    }

    #[test]
    fn uniform_weights_without_light_subpaths_trace_from_the_eye() {
        let furnace = furnace(0.5);
        let sensor = pinhole();
        let strategy = Arc::new(UniformWeightedStrategy::new(0, 4));
        let image = tracer(settings(8, 8, 4, 2), strategy).render(&furnace, &sensor, &furnace, 9);

        // Emission found at eye depths 1 to 3.
        let expected = furnace.radiance(3);
        for p in image.pixels() {
            assert!(approx_eq!(f64, p[0], expected, epsilon = 1e-9), "{} != {expected}", p[0]);
        }
    }

    #[test]
    fn mis_estimates_the_furnace() {
        // Subpaths of three vertices join into paths of up to five edges.
        let furnace = furnace(0.5);
        let sensor = wide_pinhole();
        let strategy = Arc::new(MultipleImportanceSamplingStrategy::power(3, 3));
        let image = tracer(settings(16, 16, 8, 2), strategy).render(&furnace, &sensor, &furnace, 7);

        let expected = furnace.radiance(5);
        let mean = image.mean()[0];
        assert!((mean - expected).abs() < 0.1 * expected, "{mean} != {expected}");
    }
}
