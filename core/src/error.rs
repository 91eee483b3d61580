//! Configuration errors

use crate::common::Float;
use thiserror::Error;

/// Errors raised when a component is constructed with invalid parameters.
///
/// Monte Carlo termination (absorption, escaped rays, roulette) is never an
/// error; it is reported as an absent node or sample.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// A maximum path depth below the minimum the component supports.
    #[error("maximum depth must be at least {min}, got {depth}")]
    InvalidDepth { depth: usize, min: usize },

    /// A sampling fraction outside of (0, 1].
    #[error("sampling fraction must lie in (0, 1], got {0}")]
    InvalidFraction(Float),

    /// A sampling window that is empty or not contained in the unit square.
    #[error("sampling window [{x0}, {x1}] x [{y0}, {y1}] is not a non-empty subset of the unit square")]
    InvalidWindow { x0: Float, y0: Float, x1: Float, y1: Float },

    /// Zero samples or paths requested.
    #[error("{0} must be positive")]
    InvalidSampleCount(&'static str),

    /// Zero sized image or tile.
    #[error("invalid resolution {width}x{height}")]
    InvalidResolution { width: usize, height: usize },

    /// A scene parameter outside of its physical range.
    #[error("invalid scene parameter '{name}': {value}")]
    InvalidParameter { name: &'static str, value: Float },
}

/// Result type used by constructors in this workspace.
pub type Result<T> = std::result::Result<T, Error>;
