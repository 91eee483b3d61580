//! Application related stuff

use crate::common::*;
use crate::geometry::*;
use clap::{Parser, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

/// Technique used to build and weight paths.
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyKind {
    /// Trace from the emitter and connect every vertex to the sensor.
    LightTracing,

    /// Trace from the sensor and connect every vertex to the emitter.
    PathTracing,

    /// All bidirectional techniques with equal weights.
    Uniform,

    /// All bidirectional techniques weighted by multiple importance sampling.
    Mis,
}

/// System wide options.
#[derive(Parser, Clone, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Options {
    /// Number of threads to use for rendering.
    #[arg(
        long = "nthreads",
        short = 't',
        value_name = "NUM",
        default_value_t = 1,
        help = "Use specified number of threads for rendering."
    )]
    n_threads: usize,

    /// Suppress all text output other than error messages.
    #[arg(long, help = "Suppress all text output other than error messages.")]
    pub quiet: bool,

    /// Tile size.
    #[arg(
        long = "tilesize",
        short = 'p',
        value_name = "NUM",
        default_value_t = 16,
        help = "Size in pixels of square tiles rendered per thread."
    )]
    pub tile_size: usize,

    /// Image width.
    #[arg(long, value_name = "NUM", default_value_t = 64, help = "Image width in pixels.")]
    pub width: usize,

    /// Image height.
    #[arg(long, value_name = "NUM", default_value_t = 48, help = "Image height in pixels.")]
    pub height: usize,

    /// Eye paths traced per pixel.
    #[arg(
        long = "spp",
        short = 's',
        value_name = "NUM",
        default_value_t = 4,
        help = "Number of eye paths traced per pixel."
    )]
    pub eye_paths_per_pixel: usize,

    /// Light paths traced per eye path.
    #[arg(
        long = "lightpaths",
        value_name = "NUM",
        default_value_t = 1,
        help = "Number of light paths traced per eye path."
    )]
    pub light_paths_per_eye_path: usize,

    /// Path construction technique.
    #[arg(long, value_enum, default_value_t = StrategyKind::PathTracing, help = "Path construction technique.")]
    pub strategy: StrategyKind,

    /// Maximum path depth.
    #[arg(
        long = "maxdepth",
        short = 'd',
        value_name = "NUM",
        default_value_t = 5,
        help = "Maximum number of vertices on a subpath."
    )]
    pub max_depth: usize,

    /// Maximum light subpath depth for bidirectional techniques.
    #[arg(long = "lightdepth", value_name = "NUM", help = "Maximum light subpath vertices (defaults to maxdepth).")]
    light_depth: Option<usize>,

    /// Maximum eye subpath depth for bidirectional techniques.
    #[arg(long = "eyedepth", value_name = "NUM", help = "Maximum eye subpath vertices (defaults to maxdepth).")]
    eye_depth: Option<usize>,

    /// Exponent of the power heuristic.
    #[arg(
        long,
        value_name = "FLOAT",
        help = "Use the power heuristic with the given exponent instead of the balance heuristic."
    )]
    pub power: Option<Float>,

    /// Fraction of the image plane sampled.
    #[arg(
        long,
        short = 'f',
        value_name = "FLOAT",
        default_value_t = 1.0,
        help = "Fraction of the image plane this render samples."
    )]
    pub fraction: Float,

    /// The sampling window x0, x1, y0, y1.
    #[arg(
        long,
        short = 'w',
        value_name = "FLOAT",
        num_args = 4,
        allow_negative_numbers = true,
        help = "Sample only the given window of the image plane (x0 x1 y0 y1)."
    )]
    pub window: Vec<Float>,

    /// Radius of the furnace.
    #[arg(long, value_name = "FLOAT", default_value_t = 1.0, help = "Radius of the furnace.")]
    pub radius: Float,

    /// Albedo of the furnace walls.
    #[arg(long, value_name = "FLOAT", default_value_t = 0.5, help = "Albedo of the furnace walls.")]
    pub albedo: Float,

    /// Radiance emitted by the furnace walls.
    #[arg(long, value_name = "FLOAT", default_value_t = 1.0, help = "Radiance emitted by the furnace walls.")]
    pub emission: Float,

    /// Field of view.
    #[arg(long, value_name = "DEGREES", default_value_t = 60.0, help = "Horizontal field of view.")]
    pub fov: Float,

    /// Random seed.
    #[arg(long, value_name = "NUM", default_value_t = 0, help = "Seed for the random number streams.")]
    pub seed: u64,

    /// Render a direct emission preview instead.
    #[arg(long, help = "Render the emission seen by primary rays only.")]
    pub preview: bool,
}

impl Options {
    /// Returns the number of threads to use.
    pub fn threads(&self) -> usize {
        let max_threads = num_cpus::get();
        match self.n_threads {
            0 => {
                warn!("Invalid nthreads");
                1
            }
            n if n > max_threads => {
                warn!("Num threads > max logical CPUs {}", max_threads);
                max_threads
            }
            n => n,
        }
    }

    /// Returns the maximum light subpath depth.
    pub fn light_depth(&self) -> usize {
        self.light_depth.unwrap_or(self.max_depth)
    }

    /// Returns the maximum eye subpath depth.
    pub fn eye_depth(&self) -> usize {
        self.eye_depth.unwrap_or(self.max_depth)
    }

    /// Returns the sampling window, if one was given.
    pub fn window(&self) -> Option<Bounds2f> {
        match self.window[..] {
            [x0, x1, y0, y1] => Some(Bounds2f::new(Point2f::new(x0, y0), Point2f::new(x1, y1))),
            _ => None,
        }
    }
}

/// Returns a progress bar for `len` units of work; hidden when `quiet`.
///
/// * `len`   - Total units of work.
/// * `quiet` - Suppress output.
pub fn create_progress_reporter(len: u64, quiet: bool) -> ProgressBar {
    if quiet {
        return ProgressBar::hidden();
    }

    let progress = ProgressBar::new(len);
    let style = ProgressStyle::default_bar()
        .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} (eta: {eta}) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    progress.set_style(style);
    progress
}
