//! Integrators

#[macro_use]
extern crate log;

mod bidi;
mod measure;
mod random_walk;
mod shader;
mod strategy;

#[cfg(test)]
mod testing;

// Re-export.
pub use bidi::*;
pub use measure::*;
pub use random_walk::*;
pub use shader::*;
pub use strategy::*;
