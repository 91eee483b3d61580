//! Sensors

#[macro_use]
extern crate log;

mod partial;
mod pinhole;

// Re-export
pub use partial::*;
pub use pinhole::*;
