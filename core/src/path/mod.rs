//! Path vertices and subpaths

mod arena;
mod node;
mod util;
mod view;

// Re-export
pub use arena::*;
pub use node::*;
pub use util::*;
pub use view::*;

#[cfg(test)]
mod fixtures;
