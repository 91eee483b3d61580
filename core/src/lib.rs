//! Core

#[macro_use]
extern crate hexf;
#[macro_use]
extern crate log;

// Re-export.
pub mod app;
pub mod camera;
pub mod common;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod light;
pub mod path;
pub mod raster;
pub mod rng;
pub mod sampling;
pub mod scene;
pub mod shader;
pub mod spectrum;
