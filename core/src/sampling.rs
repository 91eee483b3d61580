//! Common sampling functions.

use crate::common::*;
use crate::geometry::*;

/// Uniformly sample a point on the unit disk using the concentric mapping,
/// which preserves relative areas and stratification.
///
/// * `u` - The random sample point.
pub fn concentric_sample_disk(u: &Point2f) -> Point2f {
    // Map uniform random numbers to [-1,1]^2.
    let ox = 2.0 * u.x - 1.0;
    let oy = 2.0 * u.y - 1.0;

    // Handle degeneracy at the origin.
    if ox == 0.0 && oy == 0.0 {
        return Point2f::zero();
    }

    // Apply concentric mapping to point
    let (r, theta) = if ox.abs() > oy.abs() {
        (ox, 0.25 * PI * (oy / ox))
    } else {
        (oy, 0.5 * PI - 0.25 * PI * (ox / oy))
    };

    Point2f::new(r * theta.cos(), r * theta.sin())
}

/// Sample a direction from a cosine-weighted distribution over the hemisphere
/// about the `(0, 0, 1)` axis.
///
/// * `u` - The random sample point.
pub fn cosine_sample_hemisphere(u: &Point2f) -> Vector3f {
    let d = concentric_sample_disk(u);
    let z = max(0.0, 1.0 - d.x * d.x - d.y * d.y).sqrt();
    Vector3f::new(d.x, d.y, z)
}

/// Returns the PDF for cosine-weighted sampling a direction from a hemisphere.
///
/// * `cos_theta` - Cosine of the angle to the hemisphere axis.
#[inline]
pub fn cosine_hemisphere_pdf(cos_theta: Float) -> Float {
    max(cos_theta, 0.0) * INV_PI
}

/// Uniformly sample a direction from a sphere.
///
/// * `u` - The random sample point.
pub fn uniform_sample_sphere(u: &Point2f) -> Vector3f {
    let z = 1.0 - 2.0 * u[0];
    let r = max(0.0, 1.0 - z * z).sqrt();
    let phi = TWO_PI * u[1];
    Vector3f::new(r * phi.cos(), r * phi.sin(), z)
}

/// Returns the PDF for uniformly sampling a direction from a sphere.
#[inline]
pub fn uniform_sphere_pdf() -> Float {
    INV_FOUR_PI
}
