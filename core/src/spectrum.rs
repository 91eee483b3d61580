//! Spectrum

use crate::common::*;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Index, Mul, MulAssign};

/// Number of samples used in `RGBSpectrum`.
pub const RGB_SAMPLES: usize = 3;

/// Throughput, radiance and importance values carried along paths. Path
/// construction treats it as an opaque multiplicative quantity.
pub type Spectrum = RGBSpectrum;

/// An RGB spectrum.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct RGBSpectrum {
    c: [Float; RGB_SAMPLES],
}

impl RGBSpectrum {
    /// Spectrum with all samples set to 0.
    pub const ZERO: Self = Self::splat(0.0);

    /// Spectrum with all samples set to 1.
    pub const ONE: Self = Self::splat(1.0);

    /// Create a new `RGBSpectrum`.
    ///
    /// * `r` - Red.
    /// * `g` - Green.
    /// * `b` - Blue.
    pub const fn new(r: Float, g: Float, b: Float) -> Self {
        Self { c: [r, g, b] }
    }

    /// Create a new `RGBSpectrum` with a constant value in all samples.
    ///
    /// * `v` - The constant value.
    pub const fn splat(v: Float) -> Self {
        Self { c: [v; RGB_SAMPLES] }
    }

    /// Returns true if all samples are zero.
    pub fn is_black(&self) -> bool {
        self.c.iter().all(|&v| v == 0.0)
    }

    /// Returns true if any sample is NaN.
    pub fn has_nans(&self) -> bool {
        self.c.iter().any(|v| v.is_nan())
    }

    /// Returns the sum of all samples.
    pub fn total(&self) -> Float {
        self.c.iter().sum()
    }

    /// Returns the maximum sample value.
    pub fn max_component_value(&self) -> Float {
        self.c.iter().fold(Float::MIN, |m, &v| max(m, v))
    }

    /// Returns the luminance (y-coefficient) of the spectrum.
    pub fn y(&self) -> Float {
        0.212671 * self.c[0] + 0.715160 * self.c[1] + 0.072169 * self.c[2]
    }
}

impl From<Float> for RGBSpectrum {
    fn from(v: Float) -> Self {
        Self::splat(v)
    }
}

impl Index<usize> for RGBSpectrum {
    type Output = Float;

    fn index(&self, i: usize) -> &Self::Output {
        &self.c[i]
    }
}

impl Add for RGBSpectrum {
    type Output = Self;

    fn add(self, other: Self) -> Self::Output {
        Self::new(self.c[0] + other.c[0], self.c[1] + other.c[1], self.c[2] + other.c[2])
    }
}

impl AddAssign for RGBSpectrum {
    fn add_assign(&mut self, other: Self) {
        for (a, b) in self.c.iter_mut().zip(other.c.iter()) {
            *a += b;
        }
    }
}

impl Mul for RGBSpectrum {
    type Output = Self;

    fn mul(self, other: Self) -> Self::Output {
        Self::new(self.c[0] * other.c[0], self.c[1] * other.c[1], self.c[2] * other.c[2])
    }
}

impl MulAssign for RGBSpectrum {
    fn mul_assign(&mut self, other: Self) {
        for (a, b) in self.c.iter_mut().zip(other.c.iter()) {
            *a *= b;
        }
    }
}

impl Mul<Float> for RGBSpectrum {
    type Output = Self;

    fn mul(self, f: Float) -> Self::Output {
        Self::new(self.c[0] * f, self.c[1] * f, self.c[2] * f)
    }
}

impl Mul<RGBSpectrum> for Float {
    type Output = RGBSpectrum;

    fn mul(self, s: RGBSpectrum) -> Self::Output {
        s * self
    }
}

impl MulAssign<Float> for RGBSpectrum {
    fn mul_assign(&mut self, f: Float) {
        for a in self.c.iter_mut() {
            *a *= f;
        }
    }
}

impl Div<Float> for RGBSpectrum {
    type Output = Self;

    fn div(self, f: Float) -> Self::Output {
        debug_assert!(f != 0.0 && !f.is_nan());
        self * (1.0 / f)
    }
}

impl DivAssign<Float> for RGBSpectrum {
    fn div_assign(&mut self, f: Float) {
        debug_assert!(f != 0.0 && !f.is_nan());
        *self *= 1.0 / f;
    }
}

impl fmt::Display for RGBSpectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}, {}]", self.c[0], self.c[1], self.c[2])
    }
}
