//! Raster

use crate::common::*;
use crate::geometry::*;
use crate::spectrum::*;

/// A `width` x `height` grid of accumulated `Spectrum` values, stored in
/// row-major order with the origin at the top left.
#[derive(Clone, Debug, PartialEq)]
pub struct Raster {
    /// Number of columns.
    pub width: usize,

    /// Number of rows.
    pub height: usize,

    /// The pixels.
    pixels: Vec<Spectrum>,
}

impl Raster {
    /// Create a new black `Raster`.
    ///
    /// * `width`  - Number of columns.
    /// * `height` - Number of rows.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![Spectrum::ZERO; width * height],
        }
    }

    /// Returns the value of a pixel.
    ///
    /// * `x` - Column.
    /// * `y` - Row.
    pub fn pixel(&self, x: usize, y: usize) -> Spectrum {
        self.pixels[self.offset(x, y)]
    }

    /// Adds a value to a pixel. Values with NaNs, negative or infinite
    /// luminance are ignored.
    ///
    /// * `x` - Column.
    /// * `y` - Row.
    /// * `v` - The value.
    pub fn add_pixel(&mut self, x: usize, y: usize, v: &Spectrum) {
        if Self::is_valid(v, x as Float, y as Float) {
            let offset = self.offset(x, y);
            self.pixels[offset] += *v;
        }
    }

    /// Adds a value to the pixel containing a normalized image point. Points
    /// outside `[0, 1)^2` are ignored.
    ///
    /// * `p` - Image point.
    /// * `v` - The value.
    pub fn add_splat(&mut self, p: &Point2f, v: &Spectrum) {
        if !(0.0..1.0).contains(&p.x) || !(0.0..1.0).contains(&p.y) || !Self::is_valid(v, p.x, p.y) {
            return;
        }

        let x = min((p.x * self.width as Float) as usize, self.width - 1);
        let y = min((p.y * self.height as Float) as usize, self.height - 1);
        let offset = self.offset(x, y);
        self.pixels[offset] += *v;
    }

    /// Adds all pixels of another raster of the same size.
    ///
    /// * `other` - The other raster.
    pub fn merge(&mut self, other: &Self) {
        assert!(
            self.width == other.width && self.height == other.height,
            "cannot merge {}x{} raster into {}x{} raster",
            other.width,
            other.height,
            self.width,
            self.height
        );
        for (p, q) in self.pixels.iter_mut().zip(other.pixels.iter()) {
            *p += *q;
        }
    }

    /// Multiplies every pixel by a scale factor.
    ///
    /// * `s` - Scale factor.
    pub fn scale(&mut self, s: Float) {
        for p in self.pixels.iter_mut() {
            *p *= s;
        }
    }

    /// Returns the average pixel value.
    pub fn mean(&self) -> Spectrum {
        if self.pixels.is_empty() {
            return Spectrum::ZERO;
        }
        let mut sum = Spectrum::ZERO;
        for p in self.pixels.iter() {
            sum += *p;
        }
        sum / self.pixels.len() as Float
    }

    /// Returns an iterator over the pixels in row-major order.
    pub fn pixels(&self) -> impl Iterator<Item = &Spectrum> {
        self.pixels.iter()
    }

    fn offset(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y * self.width + x
    }

    fn is_valid(v: &Spectrum, x: Float, y: Float) -> bool {
        if v.has_nans() {
            warn!("Ignoring spectrum with NaN values at ({x}, {y})");
            return false;
        }

        let vy = v.y();
        if vy < 0.0 {
            warn!("Ignoring spectrum with negative luminance {vy} at ({x}, {y})");
            false
        } else if vy.is_infinite() {
            warn!("Ignoring spectrum with infinite luminance at ({x}, {y})");
            false
        } else {
            true
        }
    }
}
