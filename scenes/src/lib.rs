//! Scenes

#[macro_use]
extern crate log;

mod furnace;

// Re-export
pub use furnace::*;
